use serde::{Deserialize, Serialize};

use super::repo_types::Payment;

/// `POST /create-fake-payment` body. A non-numeric `amount` fails to deserialize.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePaymentRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub payment: Payment,
}

#[derive(Debug, Serialize)]
pub struct PaymentPingResponse {
    pub status: &'static str,
    pub message: &'static str,
}
