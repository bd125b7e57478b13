use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub const CURRENCY: &str = "INR";
pub const STATUS_SUCCESS: &str = "success";

pub const GUEST_EMAIL: &str = "guest@example.com";
pub const GUEST_USER_ID: &str = "guest_user";
pub const UNKNOWN_SERVICE_ID: &str = "unknown_service";

/// Simulated payment; never contacts a processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub payment_id: Uuid,
    pub email: String,
    pub user_id: String,
    pub service_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}
