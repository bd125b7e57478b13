use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{BookAppointmentRequest, BookedDatesResponse, BookingResponse},
    services,
};
use crate::{
    error::{AppError, ValidJson},
    state::AppState,
};

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/book-appointment", post(book_appointment))
        .route("/booked-dates/:service_id", get(booked_dates))
}

#[instrument(skip(state))]
pub async fn book_appointment(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<BookAppointmentRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let appointment = services::book(&state, payload).await?;
    Ok(Json(BookingResponse {
        message: "Appointment booked successfully!",
        appointment,
    }))
}

#[instrument(skip(state))]
pub async fn booked_dates(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<BookedDatesResponse>, AppError> {
    let booked_dates = services::list_booked_dates(&state, &service_id).await?;
    Ok(Json(BookedDatesResponse {
        service_id,
        booked_dates,
    }))
}
