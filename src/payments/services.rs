use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::CreatePaymentRequest,
    repo_types::{Payment, CURRENCY, GUEST_EMAIL, GUEST_USER_ID, STATUS_SUCCESS, UNKNOWN_SERVICE_ID},
};
use crate::{error::AppError, state::AppState};

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Records a successful payment without contacting any processor.
pub async fn simulate(state: &AppState, req: CreatePaymentRequest) -> Result<Payment, AppError> {
    let amount = match req.amount {
        Some(a) if a.is_finite() && a > 0.0 => a,
        other => {
            warn!(amount = ?other, "invalid payment amount");
            return Err(AppError::bad_request("Invalid amount"));
        }
    };

    let payment = Payment {
        id: Uuid::new_v4(),
        payment_id: Uuid::new_v4(),
        email: or_default(req.email, GUEST_EMAIL),
        user_id: or_default(req.user_id, GUEST_USER_ID),
        service_id: or_default(req.service_id, UNKNOWN_SERVICE_ID),
        amount,
        currency: CURRENCY.to_string(),
        status: STATUS_SUCCESS.to_string(),
        timestamp: OffsetDateTime::now_utc(),
    };
    state.store.insert_payment(&payment).await?;

    info!(
        payment_id = %payment.payment_id,
        amount = payment.amount,
        service_id = %payment.service_id,
        "payment simulated"
    );
    Ok(payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn always_succeeds_in_inr() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_store(store.clone());

        let p = simulate(
            &state,
            CreatePaymentRequest {
                amount: Some(100.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(p.status, "success");
        assert_eq!(p.currency, "INR");
        assert_eq!(p.email, GUEST_EMAIL);
        assert_eq!(p.user_id, GUEST_USER_ID);
        assert_eq!(p.service_id, UNKNOWN_SERVICE_ID);
        assert_ne!(p.id, p.payment_id);

        let q = simulate(
            &state,
            CreatePaymentRequest {
                amount: Some(2500.5),
                email: Some("groom@example.com".into()),
                user_id: Some("u-7".into()),
                service_id: Some("svc-1".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(q.status, "success");
        assert_eq!(q.currency, "INR");
        assert_eq!(q.service_id, "svc-1");

        assert_eq!(store.payments().await.len(), 2);
    }

    #[tokio::test]
    async fn rejects_missing_or_non_positive_amount() {
        let state = AppState::fake();
        for amount in [None, Some(0.0), Some(-5.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let err = simulate(
                &state,
                CreatePaymentRequest {
                    amount,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{amount:?}");
        }
    }

    #[test]
    fn string_amount_does_not_deserialize() {
        let parsed = serde_json::from_str::<CreatePaymentRequest>(r#"{"amount": "bad"}"#);
        assert!(parsed.is_err());
        let parsed = serde_json::from_str::<CreatePaymentRequest>(r#"{"amount": 100}"#).unwrap();
        assert_eq!(parsed.amount, Some(100.0));
    }
}
