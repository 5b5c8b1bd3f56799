use anyhow::Context;
use axum::Router;
use tracing::warn;

use crate::state::AppState;
use crate::store::Store;

pub mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod password;
pub mod session;

pub use extractors::CurrentUser;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin123";

/// Create the shared account the first time the service starts against an
/// empty credential table. Runs before the listener binds; a failure here
/// aborts startup so the service never runs without any account.
pub async fn ensure_default_account(store: &dyn Store) -> anyhow::Result<()> {
    if store.count_users().await.context("count users")? > 0 {
        return Ok(());
    }
    let hash = password::hash_password(DEFAULT_PASSWORD)?;
    let user = store
        .create_user(DEFAULT_USERNAME, &hash)
        .await
        .context("create default account")?;
    warn!(
        username = %user.username,
        "created default account with a well-known password; change it before exposing this service"
    );
    Ok(())
}
