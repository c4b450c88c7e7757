//! Dashboard aggregation queries
//!
//! Daily buckets are local epoch-days: `(ts + offset_ms) / 86_400_000`,
//! mapped back to dates by `stats::clock::bucket_to_date`.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::models::{ParticipationStatus, TransactionCategory, TransactionType};
use sqlx::PgPool;

use crate::stats::clock::{DayWindow, bucket_to_date};
use crate::stats::rewards::RewardGroup;

/// `(total, since_a, since_b)` counts over one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Counts {
    pub total: i64,
    pub since_a: i64,
    pub since_b: i64,
}

/// Customers: total and created since `today_start`
pub async fn customer_counts(pool: &PgPool, today_start: i64) -> Result<Counts, sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE created_at >= $1) AS since_a,
                0::BIGINT AS since_b
         FROM customers",
    )
    .bind(today_start)
    .fetch_one(pool)
    .await
}

/// Businesses: total, created since `today_start`, since `month_start`
pub async fn business_counts(
    pool: &PgPool,
    today_start: i64,
    month_start: i64,
) -> Result<Counts, sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE created_at >= $1) AS since_a,
                COUNT(*) FILTER (WHERE created_at >= $2) AS since_b
         FROM businesses",
    )
    .bind(today_start)
    .bind(month_start)
    .fetch_one(pool)
    .await
}

/// Transactions, optionally of one business: total, since `a`, since `b`
pub async fn transaction_counts(
    pool: &PgPool,
    business_id: Option<i64>,
    a: i64,
    b: i64,
) -> Result<Counts, sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE created_at >= $2) AS since_a,
                COUNT(*) FILTER (WHERE created_at >= $3) AS since_b
         FROM transactions
         WHERE ($1::BIGINT IS NULL OR business_id = $1)",
    )
    .bind(business_id)
    .bind(a)
    .bind(b)
    .fetch_one(pool)
    .await
}

/// Campaigns that have not ended yet
pub async fn active_campaigns(pool: &PgPool, now: i64) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM campaigns WHERE end_date >= $1")
        .bind(now)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Participations, optionally of one business: `(total, won)`
pub async fn participation_counts(
    pool: &PgPool,
    business_id: Option<i64>,
) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = $2)
         FROM participations
         WHERE ($1::BIGINT IS NULL OR business_id = $1)",
    )
    .bind(business_id)
    .bind(ParticipationStatus::Won.as_str())
    .fetch_one(pool)
    .await
}

/// Wallets opened at a business
pub async fn wallet_count(pool: &PgPool, business_id: i64) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM customer_businesses WHERE business_id = $1")
            .bind(business_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Sum of transaction values grouped by (type, category)
pub async fn reward_groups(
    pool: &PgPool,
    business_id: Option<i64>,
    since: Option<i64>,
) -> Result<Vec<RewardGroup>, sqlx::Error> {
    let rows: Vec<(String, String, i64)> = sqlx::query_as(
        "SELECT type, category, COALESCE(SUM(value), 0)::BIGINT
         FROM transactions
         WHERE ($1::BIGINT IS NULL OR business_id = $1)
           AND ($2::BIGINT IS NULL OR created_at >= $2)
         GROUP BY type, category",
    )
    .bind(business_id)
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(kind, category, total)| {
            match (
                TransactionType::from_db(&kind),
                TransactionCategory::from_db(&category),
            ) {
                (Some(kind), Some(category)) => Some(RewardGroup {
                    kind,
                    category,
                    total,
                }),
                _ => {
                    tracing::warn!(%kind, %category, "Skipping unknown transaction group");
                    None
                }
            }
        })
        .collect())
}

/// Ledger a daily series is counted from
#[derive(Debug, Clone, Copy)]
pub enum DailySource {
    Transactions,
    WalletJoins,
}

impl DailySource {
    fn sql(&self) -> &'static str {
        match self {
            Self::Transactions => {
                "SELECT (created_at + $1) / 86400000 AS day, COUNT(*)
                 FROM transactions
                 WHERE created_at >= $2 AND ($3::BIGINT IS NULL OR business_id = $3)
                 GROUP BY day"
            }
            Self::WalletJoins => {
                "SELECT (joined_at + $1) / 86400000 AS day, COUNT(*)
                 FROM customer_businesses
                 WHERE joined_at >= $2 AND ($3::BIGINT IS NULL OR business_id = $3)
                 GROUP BY day"
            }
        }
    }
}

/// Sparse per-day counts from the start of `window` onwards
pub async fn daily_counts(
    pool: &PgPool,
    source: DailySource,
    business_id: Option<i64>,
    window: &DayWindow,
    offset_millis: i64,
) -> Result<HashMap<NaiveDate, i64>, sqlx::Error> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(source.sql())
        .bind(offset_millis)
        .bind(window.start_millis)
        .bind(business_id)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(day, count)| bucket_to_date(day).map(|date| (date, count)))
        .collect())
}
