use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{ChatLinkResponse, SeedResponse, ServiceFilter, ServiceQuery},
    repo_types::{SeedOutcome, Service},
    services,
};
use crate::{auth::extractors::CurrentUser, error::AppError, state::AppState};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/init-data", post(init_data))
        .route("/chat/:service_id", get(chat_link))
}

#[instrument(skip(state))]
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let filter = ServiceFilter::from(query);
    let services = services::list_services(&state, &filter).await?;
    Ok(Json(services))
}

#[instrument(skip(state))]
pub async fn init_data(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let response = match services::seed(&state).await? {
        SeedOutcome::AlreadySeeded { existing } => SeedResponse {
            message: "Sample data already exists",
            count: existing,
        },
        SeedOutcome::Inserted { count } => SeedResponse {
            message: "Sample data initialized successfully",
            count,
        },
    };
    Ok(Json(response))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn chat_link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(service_id): Path<String>,
) -> Result<Json<ChatLinkResponse>, AppError> {
    let whatsapp_link = services::chat_link(&state, &user, &service_id).await?;
    Ok(Json(ChatLinkResponse { whatsapp_link }))
}
