use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

mod postgres;
mod sqlite;

pub use postgres::PgStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub license_plate: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The six required text fields of a vehicle record, already trimmed and
/// known to be non-empty by the time they reach a store.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub phone: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub license_plate: String,
}

/// Persistence interface shared by the embedded and networked engines.
///
/// Implementations are selected once at startup and injected as a trait
/// object; nothing downstream branches on the engine.
#[async_trait]
pub trait Store: Send + Sync {
    /// All vehicle records, newest first.
    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehicle>>;

    /// Records where any text field contains `query` as a case-insensitive
    /// substring, newest first. A blank query yields an empty set, not the
    /// full listing.
    async fn search_vehicles(&self, query: &str) -> anyhow::Result<Vec<Vehicle>>;

    /// Persist a new record with a server-assigned id and timestamp.
    async fn insert_vehicle(&self, vehicle: &NewVehicle) -> anyhow::Result<i64>;

    /// Returns whether a row was actually removed.
    async fn delete_vehicle(&self, id: i64) -> anyhow::Result<bool>;

    async fn find_user(&self, username: &str) -> anyhow::Result<Option<User>>;

    async fn create_user(&self, username: &str, password_hash: &str) -> anyhow::Result<User>;

    async fn count_users(&self) -> anyhow::Result<i64>;

    /// Release the connection pool. Called once on shutdown.
    async fn close(&self);
}

/// Wrap a search term in `%...%`, escaping LIKE metacharacters so the term
/// only ever matches as a literal substring.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_plain_terms() {
        assert_eq!(like_pattern("civic"), "%civic%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern(r"c:\d"), "%c:\\\\d%");
    }
}
