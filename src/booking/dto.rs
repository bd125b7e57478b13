use serde::{Deserialize, Serialize};

use super::repo_types::Appointment;

/// `POST /book-appointment` body. Required fields are optional here so a
/// missing one is reported as "Missing required fields" rather than a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub message: &'static str,
    pub appointment: Appointment,
}

#[derive(Debug, Serialize)]
pub struct BookedDatesResponse {
    pub service_id: String,
    pub booked_dates: Vec<String>,
}
