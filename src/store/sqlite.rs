use anyhow::Context;
use axum::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use time::OffsetDateTime;

use super::{like_pattern, NewVehicle, Store, User, Vehicle};

const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    make TEXT NOT NULL,
    model TEXT NOT NULL,
    color TEXT NOT NULL,
    license_plate TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;

/// Embedded single-file engine used when no external database is configured.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(path: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("open sqlite database at {path}"))?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Execute the bundled DDL statement by statement; sqlx rejects
    /// multi-command query strings.
    async fn init_schema(&self) -> anyhow::Result<()> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s)
                .execute(&self.pool)
                .await
                .context("apply sqlite schema")?;
        }
        Ok(())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, name, phone, make, model, color, license_plate, created_at
            FROM vehicles
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn search_vehicles(&self, query: &str) -> anyhow::Result<Vec<Vehicle>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        // sqlite LIKE is already case-insensitive for ASCII, matching the
        // embedded engine's native collation.
        let rows = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, name, phone, make, model, color, license_plate, created_at
            FROM vehicles
            WHERE name LIKE ?1 ESCAPE '\'
               OR phone LIKE ?1 ESCAPE '\'
               OR make LIKE ?1 ESCAPE '\'
               OR model LIKE ?1 ESCAPE '\'
               OR color LIKE ?1 ESCAPE '\'
               OR license_plate LIKE ?1 ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_vehicle(&self, vehicle: &NewVehicle) -> anyhow::Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO vehicles (name, phone, make, model, color, license_plate, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vehicle.name)
        .bind(&vehicle.phone)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(&vehicle.color)
        .bind(&vehicle.license_plate)
        .bind(OffsetDateTime::now_utc())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn delete_vehicle(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_user(&self, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> anyhow::Result<User> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc())
        .execute(&self.pool)
        .await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn count_users(&self) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
