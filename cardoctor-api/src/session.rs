//! Session cookie transport for the access token.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

/// Name of the cookie carrying the access token.
pub const SESSION_COOKIE: &str = "token";

/// Cookie attributes, chosen once at startup from the deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookiePolicy {
    /// Same-site only, sent over plain HTTP.
    Development,
    /// Cross-site (the frontend is hosted elsewhere), HTTPS only.
    Production,
}

impl CookiePolicy {
    pub fn from_production_flag(is_production: bool) -> Self {
        if is_production {
            CookiePolicy::Production
        } else {
            CookiePolicy::Development
        }
    }

    pub fn same_site(self) -> SameSite {
        match self {
            CookiePolicy::Development => SameSite::Strict,
            CookiePolicy::Production => SameSite::None,
        }
    }

    pub fn secure(self) -> bool {
        self == CookiePolicy::Production
    }

    /// Cookie delivering a freshly issued token.
    pub fn session_cookie(self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(self.same_site())
            .secure(self.secure())
            .build()
    }

    /// Same attributes as [`session_cookie`](Self::session_cookie), already expired.
    pub fn removal_cookie(self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(self.same_site())
            .secure(self.secure())
            .max_age(Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build()
    }
}
