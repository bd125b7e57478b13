use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

pub const STATUS_BOOKED: &str = "booked";
pub const NO_PAYMENT_SENTINEL: &str = "manual_booking_no_payment";
pub const GUEST_EMAIL: &str = "guest@example.com";

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Appointment record; one per (service_id, appointment_date).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub user_email: String,
    pub service_id: String,
    #[serde(with = "calendar_date")]
    pub appointment_date: Date,
    pub payment_id: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
