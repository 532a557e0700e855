use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;

use turnstile_api::client::{TicketBackend, TicketServiceClient};
use turnstile_api::error::LOCATION_DENIED_FALLBACK;
use turnstile_api::{ApiError, RegisterRequest, Session};

fn event_json() -> Value {
    json!({
        "id": "ev-1",
        "name": "Night Market",
        "description": "Open-air food and music",
        "start_datetime": "2025-06-14T18:00:00",
        "end_datetime": "2025-06-14T23:30:00",
        "category": "food",
        "location_name": "River Docks",
        "location_address": "Dock 4",
        "latitude": 40.4168,
        "longitude": -3.7038,
        "nearest_metro": "Puerta del Sol",
        "price_min": 10,
        "price_max": 25,
        "currency": "EUR",
        "organizer": "Docklands Co",
        "contact_phone": "+34 600 000 000",
        "contact_email": "hello@docklands.example",
        "contact_website": "https://docklands.example",
        "tags": ["food", "music"],
        "image_url": "https://cdn.example/ev-1.jpg"
    })
}

fn ticket_json() -> Value {
    json!({
        "id": "t-1",
        "seat": "B12",
        "event": {
            "imageUrl": "https://cdn.example/ev-1.jpg",
            "name": "Night Market",
            "date": "2025-06-14T18:00:00",
            "location_name": "River Docks"
        }
    })
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn start_mock_server() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route(
            "/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "correct horse" {
                    (StatusCode::OK, Json(json!({ "auth_jwt": "jwt-login" })))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "detail": "bad credentials" })),
                    )
                }
            }),
        )
        .route(
            "/auth/register",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "taken@example.com" {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({
                            "message": "validation failed",
                            "errors": { "email": ["already taken"] }
                        })),
                    )
                } else {
                    (StatusCode::OK, Json(json!({ "auth_jwt": "jwt-register" })))
                }
            }),
        )
        .route(
            "/events",
            get(|headers: HeaderMap| async move {
                if bearer(&headers) == Some("jwt-login") {
                    (StatusCode::OK, Json(json!([event_json()])))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "auth" })))
                }
            }),
        )
        .route(
            "/tickets",
            get(|headers: HeaderMap| async move {
                if bearer(&headers).is_some() {
                    (StatusCode::OK, Json(json!([ticket_json()])))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "auth" })))
                }
            }),
        )
        .route(
            "/tickets/buy-ticket",
            post(|Json(body): Json<Value>| async move {
                if body["seat"] == "TAKEN" {
                    (
                        StatusCode::CONFLICT,
                        Json(json!({ "detail": "seat already sold" })),
                    )
                } else {
                    (
                        StatusCode::OK,
                        Json(json!({ "success": true, "ticket_id": "t-9" })),
                    )
                }
            }),
        )
        .route(
            "/tickets/:id/generate-temporal-qr",
            get(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "t-1" => (
                        StatusCode::OK,
                        Json(json!({ "qr_jwt": "jwt-entry" })).into_response(),
                    ),
                    "t-geo" => (
                        StatusCode::FORBIDDEN,
                        Json(json!({ "detail": "you must be within 100m of River Docks" }))
                            .into_response(),
                    ),
                    "t-geo-raw" => (
                        StatusCode::FORBIDDEN,
                        "not json at all".to_string().into_response(),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "detail": "boom" })).into_response(),
                    ),
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, handle)
}

fn client_for(addr: SocketAddr) -> TicketServiceClient {
    TicketServiceClient::new(
        reqwest::Client::new(),
        &format!("http://{addr}"),
        Session::new(),
    )
    .expect("client")
}

#[tokio::test]
async fn login_success_stores_token_in_session() {
    let (addr, server) = start_mock_server().await;
    let client = client_for(addr);

    let token = client.login("ada", "correct horse").await.expect("login");
    assert_eq!(token, "jwt-login");
    assert_eq!(client.session().current_token().as_deref(), Some("jwt-login"));

    server.abort();
}

#[tokio::test]
async fn login_401_is_invalid_credentials_and_session_stays_unset() {
    let (addr, server) = start_mock_server().await;
    let client = client_for(addr);

    let err = client.login("ada", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
    assert_eq!(client.session().current_token(), None);

    server.abort();
}

#[tokio::test]
async fn register_422_surfaces_field_errors() {
    let (addr, server) = start_mock_server().await;
    let client = client_for(addr);

    let request = RegisterRequest {
        name: "Ada".into(),
        surname: "Lovelace".into(),
        username: "ada".into(),
        phone: "555".into(),
        email: "taken@example.com".into(),
        password: "s3cret".into(),
    };
    let err = client.register(&request).await.unwrap_err();
    match err {
        ApiError::Validation {
            message,
            field_errors,
        } => {
            assert_eq!(message, "validation failed");
            assert_eq!(field_errors["email"], vec!["already taken".to_string()]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn events_require_and_carry_the_bearer_token() {
    let (addr, server) = start_mock_server().await;
    let client = client_for(addr);

    // Without a session token the server rejects the bare request.
    let err = client.events().await.unwrap_err();
    assert!(matches!(err, ApiError::Status(401)));

    client.login("ada", "correct horse").await.expect("login");
    let events = client.events().await.expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "ev-1");
    assert_eq!(events[0].price_label(), "10-25 EUR");

    server.abort();
}

#[tokio::test]
async fn my_tickets_decode_the_camel_case_image_field() {
    let (addr, server) = start_mock_server().await;
    let client = client_for(addr);
    client.session().set_token("jwt-login");

    let tickets = client.my_tickets().await.expect("tickets");
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].seat, "B12");
    assert_eq!(tickets[0].event.image_url, "https://cdn.example/ev-1.jpg");

    server.abort();
}

#[tokio::test]
async fn buy_ticket_decodes_the_purchase_receipt() {
    let (addr, server) = start_mock_server().await;
    let client = client_for(addr);
    client.session().set_token("jwt-login");

    let receipt = client.buy_ticket("ev-1", "B13").await.expect("buy");
    assert!(receipt.success);
    assert_eq!(receipt.ticket_id.as_deref(), Some("t-9"));

    let err = client.buy_ticket("ev-1", "TAKEN").await.unwrap_err();
    assert!(matches!(err, ApiError::Status(409)));

    server.abort();
}

#[tokio::test]
async fn qr_403_with_detail_is_location_denied() {
    let (addr, server) = start_mock_server().await;
    let client = client_for(addr);
    client.session().set_token("jwt-login");

    let jwt = client.generate_entry_qr("t-1").await.expect("qr");
    assert_eq!(jwt, "jwt-entry");

    let err = client.generate_entry_qr("t-geo").await.unwrap_err();
    match err {
        ApiError::LocationDenied(msg) => {
            assert_eq!(msg, "you must be within 100m of River Docks")
        }
        other => panic!("expected LocationDenied, got {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn qr_403_with_unparseable_body_uses_the_fallback_message() {
    let (addr, server) = start_mock_server().await;
    let client = client_for(addr);
    client.session().set_token("jwt-login");

    let err = client.generate_entry_qr("t-geo-raw").await.unwrap_err();
    match err {
        ApiError::LocationDenied(msg) => assert_eq!(msg, LOCATION_DENIED_FALLBACK),
        other => panic!("expected LocationDenied, got {other:?}"),
    }

    let err = client.generate_entry_qr("t-other").await.unwrap_err();
    assert!(matches!(err, ApiError::Status(500)));

    server.abort();
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() {
    // Nothing listens on port 1.
    let client = TicketServiceClient::new(
        reqwest::Client::new(),
        "http://127.0.0.1:1",
        Session::new(),
    )
    .expect("client");

    let err = client.events().await.unwrap_err();
    assert!(matches!(err, ApiError::Connection(_)));
}
