#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use cardoctor_api::{app, AppState, AuthConfig, CookiePolicy};
use cardoctor_core::repository::{
    BookingRepository, DeleteResult, InsertOneResult, StoreError, UpdateResult,
};
use cardoctor_shared::Document;
use cardoctor_store::{MemoryBookingRepository, MemoryServiceRepository};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "integration-secret";

/// In-memory bookings that record how often the listing is reached.
#[derive(Default)]
pub struct CountingBookings {
    inner: MemoryBookingRepository,
    pub list_calls: AtomicUsize,
}

impl CountingBookings {
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingRepository for CountingBookings {
    async fn list_bookings(&self, email: &str) -> Result<Vec<Document>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_bookings(email).await
    }

    async fn create_booking(&self, booking: Document) -> Result<InsertOneResult, StoreError> {
        self.inner.create_booking(booking).await
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        self.inner.get_booking(id).await
    }

    async fn update_booking_status(&self, id: Uuid, status: Value) -> Result<UpdateResult, StoreError> {
        self.inner.update_booking_status(id, status).await
    }

    async fn delete_booking(&self, id: Uuid) -> Result<DeleteResult, StoreError> {
        self.inner.delete_booking(id).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub services: Arc<MemoryServiceRepository>,
    pub bookings: Arc<CountingBookings>,
}

pub fn test_app() -> TestApp {
    test_app_with_policy(CookiePolicy::Development)
}

pub fn test_app_with_policy(cookie_policy: CookiePolicy) -> TestApp {
    let services = Arc::new(MemoryServiceRepository::new());
    let bookings = Arc::new(CountingBookings::default());

    let state = AppState {
        services: services.clone(),
        bookings: bookings.clone(),
        auth: AuthConfig {
            secret: SECRET.to_string(),
            expiration: 3600,
        },
        cookie_policy,
        allowed_origins: vec!["http://localhost:5173".to_string()],
    };

    TestApp {
        router: app(state),
        services,
        bookings,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    /// `name=value` part of the first Set-Cookie, ready for a Cookie header.
    pub fn cookie_pair(&self) -> String {
        self.set_cookies()[0].split(';').next().unwrap().trim().to_string()
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Log in with `identity` and return the Cookie header value.
    pub async fn login(&self, identity: Value) -> String {
        let response = self.send_json("POST", "/jwt", identity).await;
        assert_eq!(response.status, StatusCode::OK);
        response.cookie_pair()
    }

    pub async fn create_booking(&self, booking: Value) -> String {
        let response = self.send_json("POST", "/bookings", booking).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["insertedId"].as_str().unwrap().to_string()
    }
}
