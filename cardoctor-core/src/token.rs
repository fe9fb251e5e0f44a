//! Access token issuance and verification.
//!
//! Tokens are HS256 JWTs whose claims are the identity payload flattened at
//! the top level, plus `iat` and `exp`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Identity};

/// Claims the issuer owns. An identity payload may not carry them.
pub const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(flatten)]
    pub identity: Identity,
    pub iat: i64,
    pub exp: i64,
}

/// Sign `identity` into a token valid for `lifetime_seconds` from now.
pub fn issue_token(identity: Identity, secret: &str, lifetime_seconds: u64) -> CoreResult<String> {
    issue_token_at(identity, secret, lifetime_seconds, Utc::now())
}

/// Same as [`issue_token`] with an explicit issue time.
pub fn issue_token_at(
    identity: Identity,
    secret: &str,
    lifetime_seconds: u64,
    issued_at: DateTime<Utc>,
) -> CoreResult<String> {
    if let Some(claim) = RESERVED_CLAIMS.iter().find(|c| identity.contains(c)) {
        return Err(CoreError::ValidationError(format!(
            "payload already has an \"{}\" property",
            claim
        )));
    }

    let lifetime = i64::try_from(lifetime_seconds)
        .map_err(|_| CoreError::ValidationError("token lifetime out of range".to_string()))?;

    let claims = AccessClaims {
        identity,
        iat: issued_at.timestamp(),
        exp: (issued_at + Duration::seconds(lifetime)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| CoreError::SigningError(e.to_string()))
}

/// Check signature and expiry, returning the embedded identity.
pub fn verify_token(token: &str, secret: &str) -> CoreResult<Identity> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    // Identity payloads are arbitrary; an `aud` field is data, not a constraint.
    validation.validate_aud = false;

    let token_data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| CoreError::IdentityError(e.to_string()))?;

    Ok(token_data.claims.identity)
}
