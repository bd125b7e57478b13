use tracing::{info, warn};

use super::{
    dto::ServiceFilter,
    repo_types::{SeedOutcome, Service},
    samples::sample_services,
};
use crate::{auth::repo_types::User, error::AppError, state::AppState};

/// Upper bound on rows returned by a catalog listing.
pub const LIST_LIMIT: i64 = 100;

pub async fn list_services(state: &AppState, filter: &ServiceFilter) -> Result<Vec<Service>, AppError> {
    Ok(state.store.list_services(filter, LIST_LIMIT).await?)
}

pub async fn seed(state: &AppState) -> Result<SeedOutcome, AppError> {
    let outcome = state.store.seed_services(sample_services()).await?;
    match outcome {
        SeedOutcome::Inserted { count } => info!(count, "sample services inserted"),
        SeedOutcome::AlreadySeeded { existing } => info!(existing, "sample data already present"),
    }
    Ok(outcome)
}

/// WhatsApp deep link from `user` to the provider of `service_id`.
pub async fn chat_link(state: &AppState, user: &User, service_id: &str) -> Result<String, AppError> {
    let service = state
        .store
        .find_service(service_id)
        .await?
        .ok_or_else(|| AppError::not_found("Service not found"))?;

    let digits: String = service
        .contact_phone
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        warn!(service_id, "provider has no phone number");
        return Err(AppError::bad_request("Provider phone number not available"));
    }

    let phone = user
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("no phone provided");
    let message = format!(
        "Hi, I'm {} ({phone}). I'm interested in your service '{}' listed on Vows & Wishes.",
        user.name, service.name,
    );
    let query = serde_urlencoded::to_string([("text", message.as_str())])
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(format!("https://wa.me/{digits}?{query}"))
}
