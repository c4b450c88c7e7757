//! Campaigns

use shared::models::{Campaign, CampaignCreate};
use sqlx::PgPool;

use crate::error::ServiceResult;

/// Campaigns of a business in display order
pub async fn list_for_business(
    pool: &PgPool,
    business_id: i64,
) -> Result<Vec<Campaign>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM campaigns WHERE business_id = $1
         ORDER BY display_order ASC, created_at DESC, id DESC",
    )
    .bind(business_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Campaign>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM campaigns WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, c: &CampaignCreate, now: i64) -> Result<Campaign, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO campaigns (business_id, title, short_description, header_image, content,
                                reward_type, reward_value, reward_validity_days, icon,
                                is_promoted, display_order, start_date, end_date, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
         RETURNING *",
    )
    .bind(c.business_id)
    .bind(&c.title)
    .bind(&c.short_description)
    .bind(&c.header_image)
    .bind(&c.content)
    .bind(c.reward_type.as_str())
    .bind(c.reward_value)
    .bind(c.reward_validity_days)
    .bind(&c.icon)
    .bind(c.is_promoted)
    .bind(c.display_order)
    .bind(c.start_date)
    .bind(c.end_date)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Write back every editable column of a loaded, patched campaign
pub async fn update(pool: &PgPool, c: &Campaign) -> Result<Campaign, sqlx::Error> {
    sqlx::query_as(
        "UPDATE campaigns
         SET business_id = $2, title = $3, short_description = $4, header_image = $5,
             content = $6, reward_type = $7, reward_value = $8, reward_validity_days = $9,
             icon = $10, is_promoted = $11, display_order = $12, start_date = $13, end_date = $14
         WHERE id = $1
         RETURNING *",
    )
    .bind(c.id)
    .bind(c.business_id)
    .bind(&c.title)
    .bind(&c.short_description)
    .bind(&c.header_image)
    .bind(&c.content)
    .bind(&c.reward_type)
    .bind(c.reward_value)
    .bind(c.reward_validity_days)
    .bind(&c.icon)
    .bind(c.is_promoted)
    .bind(c.display_order)
    .bind(c.start_date)
    .bind(c.end_date)
    .fetch_one(pool)
    .await
}

/// Delete a campaign and its participations; false when absent
pub async fn delete(pool: &PgPool, id: i64) -> ServiceResult<bool> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM participations WHERE campaign_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let deleted = sqlx::query("DELETE FROM campaigns WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Ok(false);
    }

    tx.commit().await?;
    tracing::info!(campaign_id = id, participations = removed, "Campaign deleted");
    Ok(true)
}
