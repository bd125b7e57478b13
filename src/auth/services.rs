use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{LoginRequest, RegisterRequest, UpdateProfileRequest},
    jwt::{JwtError, JwtKeys},
    password::{hash_password, verify_password},
    repo_types::User,
};
use crate::{
    error::AppError,
    state::AppState,
    store::{StoreError, USER_EMAIL_KEY},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    JwtKeys::from_ref(state)
        .sign(&user.id)
        .map_err(|e| AppError::Internal(e.into()))
}

pub async fn register(state: &AppState, req: RegisterRequest) -> Result<(User, String), AppError> {
    let email = normalize_email(&req.email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::bad_request("Invalid email"));
    }
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Name is required"));
    }
    if req.password.is_empty() {
        return Err(AppError::bad_request("Password is required"));
    }

    if state.store.find_user_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = hash_password(&req.password)?;
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email,
        phone: req.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
        password_hash,
        created_at: OffsetDateTime::now_utc(),
    };

    match state.store.insert_user(&user).await {
        Ok(()) => {}
        // lost a race with a concurrent registration for the same address
        Err(StoreError::Duplicate(key)) if key == USER_EMAIL_KEY => {
            warn!(email = %user.email, "email already registered");
            return Err(AppError::conflict("Email already registered"));
        }
        Err(e) => return Err(e.into()),
    }

    let token = issue_token(state, &user)?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((user, token))
}

pub async fn login(state: &AppState, req: LoginRequest) -> Result<(User, String), AppError> {
    let email = normalize_email(&req.email);

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::unauthorized("Invalid credentials"));
    };

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let token = issue_token(state, &user)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((user, token))
}

/// Resolves a bearer token to the stored user it names.
pub async fn authenticate(state: &AppState, token: &str) -> Result<User, AppError> {
    let claims = JwtKeys::from_ref(state).verify(token).map_err(|e| {
        warn!(error = %e, "rejected token");
        match e {
            JwtError::Expired => AppError::unauthorized("Token expired"),
            _ => AppError::unauthorized("Invalid token"),
        }
    })?;

    state
        .store
        .find_user_by_id(&claims.sub)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %claims.sub, "token subject not found");
            AppError::unauthorized("User not found")
        })
}

pub async fn update_profile(
    state: &AppState,
    user: &User,
    req: UpdateProfileRequest,
) -> Result<User, AppError> {
    if req.name.is_none() && req.phone.is_none() {
        return Err(AppError::bad_request("No valid fields to update"));
    }
    let name = req.name.as_deref().map(str::trim);
    if name == Some("") {
        return Err(AppError::bad_request("Name cannot be empty"));
    }
    // null or blank clears the stored number
    let phone = req
        .phone
        .as_ref()
        .map(|p| p.as_deref().map(str::trim).filter(|p| !p.is_empty()));

    let updated = state
        .store
        .update_user_profile(&user.id, name, phone)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;

    info!(user_id = %updated.id, "profile updated");
    Ok(updated)
}
