use std::sync::Arc;

use anyhow::Context;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::auth::session::SessionStore;
use crate::config::AppConfig;
use crate::store::{PgStore, SqliteStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: SessionStore,
    pub config: Arc<AppConfig>,
    key: Key,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        Self::with_config(config).await
    }

    /// Pick the storage engine once, up front; handlers only ever see the
    /// trait object.
    pub async fn with_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let store: Arc<dyn Store> = match config.database_url.as_deref() {
            Some(url) => {
                tracing::info!("using postgres storage engine");
                Arc::new(PgStore::connect(url).await?)
            }
            None => {
                tracing::info!(path = %config.sqlite_path, "using embedded sqlite storage engine");
                Arc::new(
                    SqliteStore::connect(&config.sqlite_path)
                        .await
                        .context("open embedded database")?,
                )
            }
        };
        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
        let key = Key::derive_from(config.session_secret.as_bytes());
        Self {
            store,
            sessions: SessionStore::new(),
            config,
            key,
        }
    }
}

// Lets SignedCookieJar find the signing key.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
