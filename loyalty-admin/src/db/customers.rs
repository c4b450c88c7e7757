//! Customers

use shared::models::Customer;
use sqlx::PgPool;

use super::cascade::{self, CUSTOMER_CASCADE};
use crate::error::ServiceResult;

/// All customers, newest first
pub async fn list(pool: &PgPool) -> Result<Vec<Customer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM customers ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// First customer whose phone number contains `digits`
pub async fn find_by_phone_suffix(
    pool: &PgPool,
    digits: &str,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM customers WHERE phone_number LIKE '%' || $1 || '%' ORDER BY id LIMIT 1",
    )
    .bind(digits)
    .fetch_optional(pool)
    .await
}

/// Persist the editable profile fields of a loaded customer
pub async fn update_profile(pool: &PgPool, customer: &Customer) -> Result<Customer, sqlx::Error> {
    sqlx::query_as(
        "UPDATE customers
         SET name = $2, surname = $3, phone_number = $4, email = $5,
             profile_image = $6, gender = $7, birth_date = $8
         WHERE id = $1
         RETURNING *",
    )
    .bind(customer.id)
    .bind(&customer.name)
    .bind(&customer.surname)
    .bind(&customer.phone_number)
    .bind(&customer.email)
    .bind(&customer.profile_image)
    .bind(&customer.gender)
    .bind(customer.birth_date)
    .fetch_one(pool)
    .await
}

/// Delete a customer with wallets, transactions, reviews and participations.
///
/// Returns `(id, email)` of the removed customer, `None` if absent.
pub async fn delete_cascade(pool: &PgPool, id: i64) -> ServiceResult<Option<(i64, String)>> {
    let mut tx = pool.begin().await?;

    let found: Option<(i64, String)> =
        sqlx::query_as("SELECT id, email FROM customers WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(found) = found else {
        return Ok(None);
    };

    let removed = cascade::run(&mut *tx, CUSTOMER_CASCADE, id).await?;
    sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(customer_id = id, dependents = removed, "Customer deleted");
    Ok(Some(found))
}
