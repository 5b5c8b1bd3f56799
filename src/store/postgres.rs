use anyhow::Context;
use axum::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::{like_pattern, NewVehicle, Store, User, Vehicle};

const PG_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    make TEXT NOT NULL,
    model TEXT NOT NULL,
    color TEXT NOT NULL,
    license_plate TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
"#;

/// Networked engine for shared deployments, selected when DATABASE_URL is set.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await
            .context("connect to postgres")?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> anyhow::Result<()> {
        for stmt in PG_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s)
                .execute(&self.pool)
                .await
                .context("apply postgres schema")?;
        }
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
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
        let rows = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, name, phone, make, model, color, license_plate, created_at
            FROM vehicles
            WHERE name ILIKE $1
               OR phone ILIKE $1
               OR make ILIKE $1
               OR model ILIKE $1
               OR color ILIKE $1
               OR license_plate ILIKE $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_vehicle(&self, vehicle: &NewVehicle) -> anyhow::Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO vehicles (name, phone, make, model, color, license_plate, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&vehicle.name)
        .bind(&vehicle.phone)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(&vehicle.color)
        .bind(&vehicle.license_plate)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn delete_vehicle(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
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
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc())
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
