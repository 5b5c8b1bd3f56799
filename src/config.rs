use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// When set, records are stored in the networked postgres engine;
    /// otherwise the embedded sqlite file is used.
    pub database_url: Option<String>,
    pub sqlite_path: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
}

const DEV_SESSION_SECRET: &str = "motorpool-dev-secret-change-me-0123456789";

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let session_secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
            tracing::warn!("SESSION_SECRET not set, using the built-in development secret");
            DEV_SESSION_SECRET.into()
        });
        // Cookie key derivation needs at least 32 bytes of input.
        anyhow::ensure!(
            session_secret.len() >= 32,
            "SESSION_SECRET must be at least 32 bytes"
        );

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL").ok(),
            sqlite_path: std::env::var("SQLITE_PATH").unwrap_or_else(|_| "vehicles.db".into()),
            session_secret,
            session_ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}
