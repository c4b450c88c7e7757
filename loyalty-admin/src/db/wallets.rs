//! Customer wallets (customer_businesses)

use shared::models::{BusinessSummary, CustomerBusiness, WalletBalance, WalletEntry};
use sqlx::PgPool;

const WALLET_SELECT: &str = "
    SELECT w.id, w.customer_id, w.business_id, w.points, w.stamps, w.stamps_target,
           w.gifts_count, w.total_visits, w.order_index, w.joined_at,
           b.company_name, b.category, b.logo, b.card_color, b.card_icon,
           b.city, b.district, b.neighborhood
    FROM customer_businesses w
    JOIN businesses b ON b.id = w.business_id";

#[derive(sqlx::FromRow)]
struct WalletRow {
    id: i64,
    customer_id: i64,
    business_id: i64,
    points: i64,
    stamps: i64,
    stamps_target: i64,
    gifts_count: i64,
    total_visits: i64,
    order_index: i64,
    joined_at: i64,
    company_name: String,
    category: String,
    logo: Option<String>,
    card_color: String,
    card_icon: String,
    city: String,
    district: String,
    neighborhood: String,
}

impl From<WalletRow> for WalletEntry {
    fn from(r: WalletRow) -> Self {
        WalletEntry {
            business: BusinessSummary {
                id: r.business_id,
                company_name: r.company_name,
                category: r.category,
                logo: r.logo,
                card_color: r.card_color,
                card_icon: r.card_icon,
                city: r.city,
                district: r.district,
                neighborhood: r.neighborhood,
            },
            wallet: CustomerBusiness {
                id: r.id,
                customer_id: r.customer_id,
                business_id: r.business_id,
                points: r.points,
                stamps: r.stamps,
                stamps_target: r.stamps_target,
                gifts_count: r.gifts_count,
                total_visits: r.total_visits,
                order_index: r.order_index,
                joined_at: r.joined_at,
            },
        }
    }
}

/// Wallets of a customer with their business, newest join first
pub async fn list_for_customer(
    pool: &PgPool,
    customer_id: i64,
) -> Result<Vec<WalletEntry>, sqlx::Error> {
    let sql = format!("{WALLET_SELECT} WHERE w.customer_id = $1 ORDER BY w.joined_at DESC, w.id DESC");
    let rows: Vec<WalletRow> = sqlx::query_as(&sql).bind(customer_id).fetch_all(pool).await?;
    Ok(rows.into_iter().map(WalletEntry::from).collect())
}

/// One wallet, only if it belongs to `customer_id`
pub async fn find_for_customer(
    pool: &PgPool,
    customer_id: i64,
    wallet_id: i64,
) -> Result<Option<WalletEntry>, sqlx::Error> {
    let sql = format!("{WALLET_SELECT} WHERE w.id = $1 AND w.customer_id = $2");
    let row: Option<WalletRow> = sqlx::query_as(&sql)
        .bind(wallet_id)
        .bind(customer_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(WalletEntry::from))
}

pub async fn update_balance(
    pool: &PgPool,
    wallet_id: i64,
    balance: &WalletBalance,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE customer_businesses SET points = $2, stamps = $3, gifts_count = $4 WHERE id = $1")
        .bind(wallet_id)
        .bind(balance.points)
        .bind(balance.stamps)
        .bind(balance.gifts_count)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove a wallet owned by `customer_id`; false when there was none
pub async fn delete_for_customer(
    pool: &PgPool,
    customer_id: i64,
    wallet_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM customer_businesses WHERE id = $1 AND customer_id = $2")
        .bind(wallet_id)
        .bind(customer_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
