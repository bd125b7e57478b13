//! Persistence gateway shared by every request handler.

use async_trait::async_trait;
use thiserror::Error;
use time::Date;

use crate::{
    auth::repo_types::User,
    booking::repo_types::Appointment,
    catalog::{
        dto::ServiceFilter,
        repo_types::{SeedOutcome, Service},
    },
    payments::repo_types::Payment,
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Name of the unique index guarding one booking per service per day.
pub const APPOINTMENT_SLOT_KEY: &str = "appointments_service_date_key";
/// Name of the unique index on `users.email`.
pub const USER_EMAIL_KEY: &str = "users_email_key";

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write; carries the constraint name when known.
    #[error("duplicate key violates {0}")]
    Duplicate(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return StoreError::Duplicate(constraint);
            }
        }
        StoreError::Backend(e.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    // users
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>>;
    async fn insert_user(&self, user: &User) -> StoreResult<()>;
    /// Updates only the fields given; `phone: Some(None)` clears the number.
    /// Returns the stored user, or `None` if it does not exist.
    async fn update_user_profile(
        &self,
        id: &str,
        name: Option<&str>,
        phone: Option<Option<&str>>,
    ) -> StoreResult<Option<User>>;

    // services
    async fn list_services(&self, filter: &ServiceFilter, limit: i64) -> StoreResult<Vec<Service>>;
    async fn find_service(&self, id: &str) -> StoreResult<Option<Service>>;
    /// Inserts `samples` only if the collection is empty, atomically.
    async fn seed_services(&self, samples: Vec<Service>) -> StoreResult<SeedOutcome>;

    // appointments
    async fn find_appointment(&self, service_id: &str, date: Date)
        -> StoreResult<Option<Appointment>>;
    /// Fails with `StoreError::Duplicate` when the (service, date) slot is taken.
    async fn insert_appointment(&self, appointment: &Appointment) -> StoreResult<()>;
    async fn booked_dates(&self, service_id: &str, limit: i64) -> StoreResult<Vec<Date>>;

    // payments
    async fn insert_payment(&self, payment: &Payment) -> StoreResult<()>;

    /// Releases connections; called once after the server stops.
    async fn close(&self);
}
