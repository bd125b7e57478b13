use anyhow::Context;
use serde::Deserialize;

/// Longest accepted token lifetime (one year).
pub const MAX_JWT_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} must be set"))
        };

        let database_url = required("DATABASE_URL")?;
        let db_name = required("DB_NAME")?;
        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "vows-and-wishes".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "vows-and-wishes-users".into()),
            ttl_hours: match lookup("JWT_TTL_HOURS") {
                Some(v) => v
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .filter(|h| (1..=MAX_JWT_TTL_HOURS).contains(h))
                    .with_context(|| {
                        format!("invalid JWT_TTL_HOURS {v:?}, expected 1..={MAX_JWT_TTL_HOURS}")
                    })?,
                None => 24,
            },
        };
        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("APP_PORT") {
            Some(v) => v.parse::<u16>().with_context(|| format!("invalid APP_PORT {v:?}"))?,
            None => 8080,
        };

        Ok(Self {
            database_url,
            db_name,
            db_max_connections,
            jwt,
            host,
            port,
        })
    }
}
