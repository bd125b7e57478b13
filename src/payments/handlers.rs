use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreatePaymentRequest, PaymentPingResponse, PaymentResponse},
    services,
};
use crate::{
    error::{AppError, ValidJson},
    state::AppState,
};

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-fake-payment", post(create_fake_payment))
        .route("/test", get(payment_test))
}

#[instrument(skip(state))]
pub async fn create_fake_payment(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreatePaymentRequest>,
) -> Result<Json<PaymentResponse>, AppError> {
    let payment = services::simulate(&state, payload).await?;
    Ok(Json(PaymentResponse {
        status: "success",
        message: "Payment successful (simulated)",
        payment,
    }))
}

pub async fn payment_test() -> Json<PaymentPingResponse> {
    Json(PaymentPingResponse {
        status: "ok",
        message: "Payment routes reachable!",
    })
}
