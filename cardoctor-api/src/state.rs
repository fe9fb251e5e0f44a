use std::sync::Arc;

use cardoctor_core::repository::{BookingRepository, ServiceRepository};

use crate::session::CookiePolicy;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub auth: AuthConfig,
    pub cookie_policy: CookiePolicy,
    pub allowed_origins: Vec<String>,
}
