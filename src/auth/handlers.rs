use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::SignedCookieJar;
use serde_json::json;
use time::Duration;
use tracing::{info, instrument, warn};

use crate::auth::dto::{AuthStatus, LoginRequest};
use crate::auth::extractors::SESSION_COOKIE;
use crate::auth::password::verify_password;
use crate::error::ApiError;
use crate::extract::JsonOrForm;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/auth/check", get(check))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    JsonOrForm(payload): JsonOrForm<LoginRequest>,
) -> Result<(SignedCookieJar, Json<AuthStatus>), ApiError> {
    let username = payload.username.trim();

    // Unknown username and wrong password are indistinguishable to the
    // caller; argon2 verification is slow and salted either way.
    let user = state.store.find_user(username).await?.ok_or_else(|| {
        warn!(%username, "login with unknown username");
        ApiError::InvalidCredentials
    })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(%username, user_id = user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let ttl = Duration::hours(state.config.session_ttl_hours);
    let token = state.sessions.create(user.id, &user.username, ttl);
    let cookie = session_cookie(token, ttl, state.config.cookie_secure);

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok((
        jar.add(cookie),
        Json(AuthStatus::authenticated(user.username)),
    ))
}

#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<serde_json::Value>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if state.sessions.remove(cookie.value()) {
            info!("user logged out");
        }
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(json!({ "message": "Logged out" })))
}

#[instrument(skip(state, jar))]
pub async fn check(State(state): State<AppState>, jar: SignedCookieJar) -> Json<AuthStatus> {
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.get(cookie.value()));
    Json(match session {
        Some(s) => AuthStatus::authenticated(s.username),
        None => AuthStatus::anonymous(),
    })
}

fn session_cookie(token: String, ttl: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(ttl)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok".into(), Duration::hours(24), false);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(Duration::hours(24)));
    }

    #[test]
    fn session_cookie_secure_in_production() {
        let cookie = session_cookie("tok".into(), Duration::hours(24), true);
        assert_eq!(cookie.secure(), Some(true));
    }
}
