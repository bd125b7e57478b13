use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use time::Date;
use tracing::info;

use super::{Store, StoreError, StoreResult};
use crate::{
    auth::repo_types::User,
    booking::repo_types::Appointment,
    catalog::{
        dto::ServiceFilter,
        repo_types::{SeedOutcome, Service, ServiceRow},
    },
    config::AppConfig,
    payments::repo_types::Payment,
};

const SERVICE_COLUMNS: &str = "id, name, category, description, price_range, location, rating, \
     image_url, contact_phone, contact_email, availability, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to `DATABASE_URL`, selects `DB_NAME` and applies pending migrations.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let options = PgConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .database(&config.db_name);

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(options)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("run migrations")?;

        info!(db = %config.db_name, "database ready");
        Ok(Self { pool })
    }
}

fn into_services(rows: Vec<ServiceRow>) -> StoreResult<Vec<Service>> {
    rows.into_iter()
        .map(|r| Service::try_from(r).map_err(|e| StoreError::Backend(e.into())))
        .collect()
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, phone, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_user_profile(
        &self,
        id: &str,
        name: Option<&str>,
        phone: Option<Option<&str>>,
    ) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET name  = COALESCE($2, name),
                   phone = CASE WHEN $3 THEN $4 ELSE phone END
             WHERE id = $1
            RETURNING id, name, email, phone, password_hash, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone.is_some())
        .bind(phone.flatten())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_services(&self, filter: &ServiceFilter, limit: i64) -> StoreResult<Vec<Service>> {
        // strpos keeps user input literal; no LIKE/regex metacharacters
        let sql = format!(
            r#"
            SELECT {SERVICE_COLUMNS}
            FROM services
            WHERE availability = TRUE
              AND ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR strpos(lower(location), lower($2)) > 0)
              AND ($3::text IS NULL
                   OR strpos(lower(name), lower($3)) > 0
                   OR strpos(lower(description), lower($3)) > 0)
            ORDER BY created_at, id
            LIMIT $4
            "#
        );
        let rows = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.location.as_deref())
            .bind(filter.search.as_deref())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        into_services(rows)
    }

    async fn find_service(&self, id: &str) -> StoreResult<Option<Service>> {
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1");
        let row = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| Service::try_from(r).map_err(|e| StoreError::Backend(e.into())))
            .transpose()
    }

    async fn seed_services(&self, samples: Vec<Service>) -> StoreResult<SeedOutcome> {
        let mut tx = self.pool.begin().await?;

        // blocks concurrent seeders between the count and the inserts
        sqlx::query("LOCK TABLE services IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.commit().await?;
            return Ok(SeedOutcome::AlreadySeeded {
                existing: existing as u64,
            });
        }

        for s in &samples {
            sqlx::query(
                r#"
                INSERT INTO services (id, name, category, description, price_range, location,
                                      rating, image_url, contact_phone, contact_email,
                                      availability, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(&s.id)
            .bind(&s.name)
            .bind(s.category.as_str())
            .bind(&s.description)
            .bind(&s.price_range)
            .bind(&s.location)
            .bind(s.rating)
            .bind(&s.image_url)
            .bind(&s.contact_phone)
            .bind(&s.contact_email)
            .bind(s.availability)
            .bind(s.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(SeedOutcome::Inserted {
            count: samples.len() as u64,
        })
    }

    async fn find_appointment(
        &self,
        service_id: &str,
        date: Date,
    ) -> StoreResult<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, user_email, service_id, appointment_date, payment_id, status, created_at
            FROM appointments
            WHERE service_id = $1 AND appointment_date = $2
            "#,
        )
        .bind(service_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(appointment)
    }

    async fn insert_appointment(&self, a: &Appointment) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments (id, user_email, service_id, appointment_date,
                                      payment_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(a.id)
        .bind(&a.user_email)
        .bind(&a.service_id)
        .bind(a.appointment_date)
        .bind(&a.payment_id)
        .bind(&a.status)
        .bind(a.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn booked_dates(&self, service_id: &str, limit: i64) -> StoreResult<Vec<Date>> {
        let dates: Vec<(Date,)> = sqlx::query_as(
            r#"
            SELECT appointment_date
              FROM appointments
             WHERE service_id = $1
             ORDER BY appointment_date
             LIMIT $2
            "#,
        )
        .bind(service_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(dates.into_iter().map(|(d,)| d).collect())
    }

    async fn insert_payment(&self, p: &Payment) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, payment_id, email, user_id, service_id,
                                  amount, currency, status, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(p.id)
        .bind(p.payment_id)
        .bind(&p.email)
        .bind(&p.user_id)
        .bind(&p.service_id)
        .bind(p.amount)
        .bind(&p.currency)
        .bind(&p.status)
        .bind(p.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}
