use std::net::SocketAddr;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, booking, catalog, payments};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(catalog::router())
                .merge(booking::router())
                .merge(payments::router())
                .route("/ping", get(ping)),
        )
        .route("/", get(home))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "Backend is running!" }))
}

async fn ping() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub async fn serve(app: Router, state: &AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(b) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    #[tokio::test]
    async fn liveness_routes() {
        let app = build_app(AppState::fake());
        let (status, body) = call(&app, Method::GET, "/api/ping", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let (status, body) = call(&app, Method::GET, "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Backend is running!");
    }

    #[tokio::test]
    async fn register_login_profile_flow() {
        let app = build_app(AppState::fake());
        let creds = json!({
            "name": "Priya",
            "email": "priya@example.com",
            "password": "hunter22",
            "phone": "9000000001"
        });

        let (status, body) = call(&app, Method::POST, "/api/register", Some(creds.clone()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "priya@example.com");
        assert!(body["user"].get("password_hash").is_none());
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let (status, body) = call(&app, Method::POST, "/api/register", Some(creds), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "Email already registered");

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/login",
            Some(json!({ "email": "priya@example.com", "password": "wrong" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/login",
            Some(json!({ "email": "priya@example.com", "password": "hunter22" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = call(&app, Method::GET, "/api/profile", None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Priya");

        let (status, body) = call(
            &app,
            Method::PUT,
            "/api/update-profile",
            Some(json!({ "name": "Priya S" })),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Profile updated");
        assert_eq!(body["user"]["name"], "Priya S");
        assert_eq!(body["user"]["phone"], "9000000001");

        let (status, body) = call(
            &app,
            Method::PUT,
            "/api/update-profile",
            Some(json!({ "phone": null })),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Priya S");
        assert!(body["user"]["phone"].is_null(), "{body}");

        let (status, _) = call(
            &app,
            Method::PUT,
            "/api/update-profile",
            Some(json!({})),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn protected_routes_need_a_valid_token() {
        let app = build_app(AppState::fake());
        let (status, _) = call(&app, Method::GET, "/api/profile", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = call(&app, Method::GET, "/api/profile", None, Some("garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid token");

        let (status, _) = call(&app, Method::GET, "/api/chat/anything", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn seed_list_and_chat() {
        let app = build_app(AppState::fake());

        let (status, body) = call(&app, Method::POST, "/api/init-data", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let seeded = body["count"].as_u64().unwrap();
        assert!(seeded > 0);

        let (_, body) = call(&app, Method::POST, "/api/init-data", None, None).await;
        assert_eq!(body["message"], "Sample data already exists");
        assert_eq!(body["count"].as_u64(), Some(seeded));

        let (status, all) = call(&app, Method::GET, "/api/services", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len() as u64, seeded);

        let (_, with_all) = call(&app, Method::GET, "/api/services?category=all", None, None).await;
        assert_eq!(with_all, all);

        let (_, venues) = call(&app, Method::GET, "/api/services?category=VENUES", None, None).await;
        let venues = venues.as_array().unwrap();
        assert!(!venues.is_empty());
        assert!(venues.iter().all(|s| s["category"] == "venues"));

        let (_, found) = call(
            &app,
            Method::GET,
            "/api/services?location=all%20locations&search=catering",
            None,
            None,
        )
        .await;
        assert!(found
            .as_array()
            .unwrap()
            .iter()
            .all(|s| s["name"].as_str().unwrap().to_lowercase().contains("catering")
                || s["description"].as_str().unwrap().to_lowercase().contains("catering")));

        let (_, body) = call(
            &app,
            Method::POST,
            "/api/register",
            Some(json!({ "name": "Kiran", "email": "kiran@example.com", "password": "pw" })),
            None,
        )
        .await;
        let token = body["token"].as_str().unwrap().to_string();
        let service_id = all[0]["id"].as_str().unwrap();

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/api/chat/{service_id}"),
            None,
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["whatsapp_link"].as_str().unwrap().starts_with("https://wa.me/"));

        let (status, _) = call(&app, Method::GET, "/api/chat/nope", None, Some(&token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn booking_endpoints() {
        let app = build_app(AppState::fake());
        let booking = json!({ "service_id": "S1", "appointment_date": "2025-11-05" });

        let (status, body) = call(&app, Method::POST, "/api/book-appointment", Some(booking.clone()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appointment"]["status"], "booked");
        assert_eq!(body["appointment"]["payment_id"], "manual_booking_no_payment");

        let (status, body) = call(&app, Method::POST, "/api/book-appointment", Some(booking), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["detail"],
            "This date is already booked for the selected service"
        );

        let (status, body) = call(&app, Method::GET, "/api/booked-dates/S1", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "service_id": "S1", "booked_dates": ["2025-11-05"] }));

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/book-appointment",
            Some(json!({ "service_id": "S1" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fake_payment_endpoint() {
        let app = build_app(AppState::fake());

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/create-fake-payment",
            Some(json!({ "amount": 100, "email": "x@example.com", "service_id": "S1" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["payment"]["currency"], "INR");
        assert_eq!(body["payment"]["status"], "success");
        assert_eq!(body["payment"]["amount"], 100.0);

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/create-fake-payment",
            Some(json!({ "amount": "bad" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().is_some());

        let (status, _) = call(&app, Method::POST, "/api/create-fake-payment", Some(json!({})), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&app, Method::GET, "/api/test", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/book-appointment")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
