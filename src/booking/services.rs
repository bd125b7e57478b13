use time::{
    format_description::well_known::{Iso8601, Rfc3339},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::BookAppointmentRequest,
    repo_types::{Appointment, GUEST_EMAIL, NO_PAYMENT_SENTINEL, STATUS_BOOKED},
};
use crate::{
    error::AppError,
    state::AppState,
    store::{StoreError, APPOINTMENT_SLOT_KEY},
};

/// Upper bound on dates returned for one service.
pub const BOOKED_DATES_LIMIT: i64 = 100;

const ALREADY_BOOKED: &str = "This date is already booked for the selected service";

/// Parses an ISO calendar date, or a date-time whose time of day is dropped.
pub fn parse_calendar_date(raw: &str) -> Result<Date, AppError> {
    let raw = raw.trim();
    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Ok(date);
    }
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(dt.date());
    }
    if let Ok(dt) = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"),
    ) {
        return Ok(dt.date());
    }
    if let Ok(dt) = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day] [hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"),
    ) {
        return Ok(dt.date());
    }
    if let Ok(dt) = PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT) {
        return Ok(dt.date());
    }
    Err(AppError::bad_request(format!(
        "Invalid appointment_date {raw:?}, expected YYYY-MM-DD"
    )))
}

pub fn format_calendar_date(date: Date) -> Result<String, AppError> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| AppError::Internal(e.into()))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub async fn book(state: &AppState, req: BookAppointmentRequest) -> Result<Appointment, AppError> {
    let (Some(service_id), Some(raw_date)) = (
        present(req.service_id.as_deref()),
        present(req.appointment_date.as_deref()),
    ) else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    let date = parse_calendar_date(raw_date)?;

    if state.store.find_appointment(service_id, date).await?.is_some() {
        warn!(service_id, %date, "date already booked");
        return Err(AppError::conflict(ALREADY_BOOKED));
    }

    let appointment = Appointment {
        id: Uuid::new_v4(),
        user_email: present(req.email.as_deref()).unwrap_or(GUEST_EMAIL).to_string(),
        service_id: service_id.to_string(),
        appointment_date: date,
        payment_id: present(req.payment_id.as_deref())
            .unwrap_or(NO_PAYMENT_SENTINEL)
            .to_string(),
        status: STATUS_BOOKED.to_string(),
        created_at: OffsetDateTime::now_utc(),
    };

    match state.store.insert_appointment(&appointment).await {
        Ok(()) => {}
        // a concurrent booking took the slot between the check and the insert
        Err(StoreError::Duplicate(key)) if key == APPOINTMENT_SLOT_KEY => {
            warn!(service_id, %date, "date booked concurrently");
            return Err(AppError::conflict(ALREADY_BOOKED));
        }
        Err(e) => return Err(e.into()),
    }

    info!(
        appointment_id = %appointment.id,
        service_id = %appointment.service_id,
        date = %appointment.appointment_date,
        "appointment booked"
    );
    Ok(appointment)
}

pub async fn list_booked_dates(state: &AppState, service_id: &str) -> Result<Vec<String>, AppError> {
    state
        .store
        .booked_dates(service_id, BOOKED_DATES_LIMIT)
        .await?
        .into_iter()
        .map(format_calendar_date)
        .collect()
}
