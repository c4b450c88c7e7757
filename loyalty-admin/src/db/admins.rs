//! Admin accounts

use shared::models::{Admin, AdminRole};
use sqlx::{PgExecutor, PgPool};

/// Fields for a new admin row
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub hashed_password: String,
    pub role: AdminRole,
    pub business_name: String,
    pub business_id: Option<i64>,
    pub theme: String,
    pub logo_url: String,
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admins WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admins WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn username_exists<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM admins WHERE username = $1)")
        .bind(username)
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    admin: &NewAdmin,
    now: i64,
) -> Result<Admin, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO admins (username, hashed_password, role, business_name, business_id, theme, logo_url, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(&admin.username)
    .bind(&admin.hashed_password)
    .bind(admin.role.as_str())
    .bind(&admin.business_name)
    .bind(admin.business_id)
    .bind(&admin.theme)
    .bind(&admin.logo_url)
    .bind(now)
    .fetch_one(executor)
    .await
}
