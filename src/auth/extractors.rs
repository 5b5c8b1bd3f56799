use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::SignedCookieJar;

use crate::error::ApiError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "motorpool_session";

/// The authenticated caller, resolved from the signed session cookie.
///
/// This is the access-control gate for every vehicle route: it re-checks
/// session validity per request and rejects with 401 when the cookie is
/// absent, forged, or the session has expired. The check has no side
/// effects.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar: SignedCookieJar = SignedCookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::AuthRequired)?;
        let cookie = jar.get(SESSION_COOKIE).ok_or(ApiError::AuthRequired)?;
        let session = state
            .sessions
            .get(cookie.value())
            .ok_or(ApiError::AuthRequired)?;
        Ok(CurrentUser {
            user_id: session.user_id,
            username: session.username,
        })
    }
}
