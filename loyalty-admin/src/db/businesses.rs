//! Businesses (firms)

use shared::error::{AppError, ErrorCode};
use shared::models::{Admin, Business, BusinessCreate};
use sqlx::PgPool;

use super::admins::{self, NewAdmin};
use super::cascade::{self, BUSINESS_CASCADE};
use crate::error::ServiceResult;

/// All businesses, newest first
pub async fn list(pool: &PgPool) -> Result<Vec<Business>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM businesses ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Business>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM businesses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a business together with its admin account.
///
/// The admin's username is the business email and its `business_id` points at
/// the new row. Either both rows exist afterwards or neither does.
pub async fn create_with_admin(
    pool: &PgPool,
    business: &BusinessCreate,
    admin: NewAdmin,
    now: i64,
) -> ServiceResult<(Business, Admin)> {
    let mut tx = pool.begin().await?;

    if admins::username_exists(&mut *tx, &admin.username).await? {
        return Err(AppError::new(ErrorCode::AdminEmailExists).into());
    }
    let (email_taken,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM businesses WHERE email = $1)")
            .bind(&business.email)
            .fetch_one(&mut *tx)
            .await?;
    if email_taken {
        return Err(AppError::new(ErrorCode::BusinessEmailExists).into());
    }

    let created: Business = sqlx::query_as(
        "INSERT INTO businesses (company_name, email, hashed_password, category, logo,
                                 card_color, card_icon, city, district, neighborhood, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING *",
    )
    .bind(&business.company_name)
    .bind(&business.email)
    .bind(&business.hashed_password)
    .bind(&business.category)
    .bind(&business.logo)
    .bind(&business.card_color)
    .bind(&business.card_icon)
    .bind(&business.city)
    .bind(&business.district)
    .bind(&business.neighborhood)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let admin = admins::insert(
        &mut *tx,
        &NewAdmin {
            business_id: Some(created.id),
            ..admin
        },
        now,
    )
    .await?;

    tx.commit().await?;
    Ok((created, admin))
}

/// Delete a business and everything referencing it.
///
/// Returns `(id, company_name)` of the removed business, `None` if absent.
pub async fn delete_cascade(pool: &PgPool, id: i64) -> ServiceResult<Option<(i64, String)>> {
    let mut tx = pool.begin().await?;

    let found: Option<(i64, String)> =
        sqlx::query_as("SELECT id, company_name FROM businesses WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(found) = found else {
        return Ok(None);
    };

    let removed = cascade::run(&mut *tx, BUSINESS_CASCADE, id).await?;
    sqlx::query("DELETE FROM businesses WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(business_id = id, dependents = removed, "Business deleted");
    Ok(Some(found))
}
