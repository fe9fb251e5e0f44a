use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use cardoctor_core::{token::issue_token, Identity};
use cardoctor_shared::MaskedEmail;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_session))
        .route("/logout", post(logout))
}

/// POST /jwt
/// Sign the presented identity and hand it back as the session cookie.
async fn issue_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(identity): Json<Identity>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    info!(email = ?identity.email().map(MaskedEmail), "Issuing access token");

    let token = issue_token(identity, &state.auth.secret, state.auth.expiration)?;
    let jar = jar.add(state.cookie_policy.session_cookie(token));

    Ok((jar, Json(AuthResponse { success: true })))
}

/// POST /logout
/// Overwrite the session cookie with an expired one. The body is optional
/// and only logged.
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> (CookieJar, Json<AuthResponse>) {
    let email = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|v| v.get("email").and_then(Value::as_str).map(str::to_owned));
    info!(email = ?email.as_deref().map(MaskedEmail), "Logging out");

    let jar = jar.add(state.cookie_policy.removal_cookie());

    (jar, Json(AuthResponse { success: true }))
}
