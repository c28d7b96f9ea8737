use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::warn;

use super::{jwt::JwtKeys, repo_types::User};
use crate::{error::AppError, state::AppState};

pub const SESSION_COOKIE: &str = "session";

/// The authenticated user, reloaded from the directory on every request.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| session_cookie(parts))
            .ok_or(AppError::Unauthenticated)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify_access(&token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::Unauthenticated
        })?;

        let user = state
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = claims.sub, "token for unknown user");
                AppError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let auth = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(|t| t.trim().to_string())
}

fn session_cookie(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Store the access token in an `HttpOnly` cookie for browser clients.
pub fn with_session_cookie(jar: CookieJar, token: String, max_age_secs: u64) -> CookieJar {
    let max_age = time::Duration::seconds(i64::try_from(max_age_secs).unwrap_or(i64::MAX));
    jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(max_age),
    )
}

pub fn without_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
