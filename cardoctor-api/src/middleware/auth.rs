use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use cardoctor_core::{token::verify_token, Identity};
use cardoctor_shared::{Masked, MaskedEmail};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{error::AppError, session::SESSION_COOKIE, state::AppState};

// ============================================================================
// Session verification
// ============================================================================

/// Admit a request only if it carries a valid, unexpired session token.
/// The decoded [`Identity`] is placed in request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from cookie; the emptied cookie left by logout counts as absent
    let Some(token) = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
    else {
        debug!("No session cookie on protected request");
        return Err(AppError::Unauthenticated);
    };

    // 2. Verify signature and expiry
    let identity = verify_token(&token, &state.auth.secret).map_err(|e| {
        warn!(token = %Masked(&token), error = %e, "Rejected session token");
        AppError::Unauthorized
    })?;

    debug!(email = ?identity.email().map(MaskedEmail), "Session verified");

    // 3. Inject identity
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

// ============================================================================
// Ownership check
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
}

/// Email the booking listing is restricted to, set by [`require_owner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerScope(pub String);

/// Restrict a listing to the verified identity's own records.
///
/// A requested `email` must match the token's email. Without one, the
/// listing is scoped to the token's email rather than left unfiltered.
/// Must run after [`require_session`].
pub async fn require_owner(mut req: Request, next: Next) -> Result<Response, AppError> {
    let identity = req
        .extensions()
        .get::<Identity>()
        .ok_or(AppError::Unauthenticated)?;

    let Some(own_email) = identity.email().map(str::to_owned) else {
        warn!("Verified identity carries no email");
        return Err(AppError::Forbidden);
    };

    let query = Query::<OwnerQuery>::try_from_uri(req.uri())
        .map_err(|e| AppError::Validation(e.body_text()))?;

    if let Some(requested) = query.0.email {
        if requested != own_email {
            warn!(
                requested = %MaskedEmail(&requested),
                "Booking list requested for another identity"
            );
            return Err(AppError::Forbidden);
        }
    }

    req.extensions_mut().insert(OwnerScope(own_email));

    Ok(next.run(req).await)
}
