use async_trait::async_trait;
use time::Date;
use tokio::sync::Mutex;

use super::{Store, StoreError, StoreResult, APPOINTMENT_SLOT_KEY, USER_EMAIL_KEY};
use crate::{
    auth::repo_types::User,
    booking::repo_types::Appointment,
    catalog::{
        dto::ServiceFilter,
        repo_types::{SeedOutcome, Service},
    },
    payments::repo_types::Payment,
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    services: Vec<Service>,
    appointments: Vec<Appointment>,
    payments: Vec<Payment>,
}

/// In-process store with the same uniqueness rules as the Postgres schema.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_service(&self, service: Service) {
        self.inner.lock().await.services.push(service);
    }

    pub async fn payments(&self) -> Vec<Payment> {
        self.inner.lock().await.payments.clone()
    }

    pub async fn appointment_count(&self) -> usize {
        self.inner.lock().await.appointments.len()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(filter: &ServiceFilter, s: &Service) -> bool {
    s.availability
        && filter.category.map_or(true, |c| s.category == c)
        && filter
            .location
            .as_deref()
            .map_or(true, |loc| contains_ci(&s.location, loc))
        && filter.search.as_deref().map_or(true, |q| {
            contains_ci(&s.name, q) || contains_ci(&s.description, q)
        })
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let db = self.inner.lock().await;
        Ok(db.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let db = self.inner.lock().await;
        Ok(db.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut db = self.inner.lock().await;
        if db.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(USER_EMAIL_KEY.into()));
        }
        db.users.push(user.clone());
        Ok(())
    }

    async fn update_user_profile(
        &self,
        id: &str,
        name: Option<&str>,
        phone: Option<Option<&str>>,
    ) -> StoreResult<Option<User>> {
        let mut db = self.inner.lock().await;
        let Some(user) = db.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = name {
            user.name = name.to_string();
        }
        if let Some(phone) = phone {
            user.phone = phone.map(str::to_string);
        }
        Ok(Some(user.clone()))
    }

    async fn list_services(&self, filter: &ServiceFilter, limit: i64) -> StoreResult<Vec<Service>> {
        let db = self.inner.lock().await;
        Ok(db
            .services
            .iter()
            .filter(|s| matches(filter, s))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_service(&self, id: &str) -> StoreResult<Option<Service>> {
        let db = self.inner.lock().await;
        Ok(db.services.iter().find(|s| s.id == id).cloned())
    }

    async fn seed_services(&self, samples: Vec<Service>) -> StoreResult<SeedOutcome> {
        let mut db = self.inner.lock().await;
        if !db.services.is_empty() {
            return Ok(SeedOutcome::AlreadySeeded {
                existing: db.services.len() as u64,
            });
        }
        let count = samples.len() as u64;
        db.services.extend(samples);
        Ok(SeedOutcome::Inserted { count })
    }

    async fn find_appointment(
        &self,
        service_id: &str,
        date: Date,
    ) -> StoreResult<Option<Appointment>> {
        let db = self.inner.lock().await;
        Ok(db
            .appointments
            .iter()
            .find(|a| a.service_id == service_id && a.appointment_date == date)
            .cloned())
    }

    async fn insert_appointment(&self, appointment: &Appointment) -> StoreResult<()> {
        let mut db = self.inner.lock().await;
        let taken = db.appointments.iter().any(|a| {
            a.service_id == appointment.service_id
                && a.appointment_date == appointment.appointment_date
        });
        if taken {
            return Err(StoreError::Duplicate(APPOINTMENT_SLOT_KEY.into()));
        }
        db.appointments.push(appointment.clone());
        Ok(())
    }

    async fn booked_dates(&self, service_id: &str, limit: i64) -> StoreResult<Vec<Date>> {
        let db = self.inner.lock().await;
        let mut dates: Vec<Date> = db
            .appointments
            .iter()
            .filter(|a| a.service_id == service_id)
            .map(|a| a.appointment_date)
            .collect();
        dates.sort();
        dates.truncate(limit.max(0) as usize);
        Ok(dates)
    }

    async fn insert_payment(&self, payment: &Payment) -> StoreResult<()> {
        self.inner.lock().await.payments.push(payment.clone());
        Ok(())
    }

    async fn close(&self) {}
}
