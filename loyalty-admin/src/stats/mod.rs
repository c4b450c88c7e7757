//! Dashboard statistics
//!
//! - [`clock`]: fixed-offset day boundaries
//! - [`series`]: dense daily chart series
//! - [`rewards`]: folding ledger sums into point/stamp totals
//!
//! Every figure of a response is computed from one query set; any failure
//! fails the whole response.

pub mod clock;
pub mod rewards;
pub mod series;

use serde::Serialize;
use sqlx::PgPool;

use crate::db::stats::{self as queries, DailySource};
use clock::StatsClock;
use rewards::{RewardTotals, WeeklyRewards};
use series::{DailyCount, DayLabel, fill_missing_days};

const WEEK_DAYS: u32 = 7;
const MONTH_CHART_DAYS: u32 = 30;

#[derive(Debug, Serialize)]
pub struct UserStats {
    pub total: i64,
    pub today: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmCounts {
    pub total: i64,
    pub today: i64,
    /// Firms created since the start of the local month
    #[serde(rename = "month")]
    pub this_month: i64,
}

#[derive(Debug, Serialize)]
pub struct TransactionStats {
    pub total: i64,
    pub today: i64,
    pub chart: Vec<DailyCount>,
}

#[derive(Debug, Serialize)]
pub struct CampaignStats {
    pub active: i64,
}

#[derive(Debug, Serialize)]
pub struct ParticipationStats {
    pub total: i64,
    pub won: i64,
}

/// GET /api/dashboard/stats
#[derive(Debug, Serialize)]
pub struct GlobalStats {
    pub users: UserStats,
    pub firms: FirmCounts,
    pub transactions: TransactionStats,
    pub campaigns: CampaignStats,
    pub participations: ParticipationStats,
    pub rewards: RewardTotals,
}

#[derive(Debug, Serialize)]
pub struct Total {
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct PeriodCounts {
    pub daily: i64,
    pub monthly: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmCharts {
    pub wallet_adds: Vec<DailyCount>,
    pub transactions: Vec<DailyCount>,
}

/// GET /api/dashboard/firm-stats
#[derive(Debug, Serialize)]
pub struct FirmStats {
    pub customers: Total,
    pub participations: Total,
    pub transactions: PeriodCounts,
    pub rewards: WeeklyRewards,
    pub charts: FirmCharts,
}

/// Platform-wide figures as of `now`
pub async fn global_stats(
    pool: &PgPool,
    clock: &StatsClock,
    now: i64,
) -> Result<GlobalStats, sqlx::Error> {
    let today = clock.local_date(now);
    let today_start = clock.start_of_day(today);
    let month_start = clock.start_of_month(today);
    let week = clock.window_ending(now, WEEK_DAYS);

    let (customers, businesses, transactions, active, (participations, won), groups, daily) = tokio::try_join!(
        queries::customer_counts(pool, today_start),
        queries::business_counts(pool, today_start, month_start),
        queries::transaction_counts(pool, None, today_start, today_start),
        queries::active_campaigns(pool, now),
        queries::participation_counts(pool, None),
        queries::reward_groups(pool, None, None),
        queries::daily_counts(
            pool,
            DailySource::Transactions,
            None,
            &week,
            clock.offset_millis()
        ),
    )?;

    Ok(GlobalStats {
        users: UserStats {
            total: customers.total,
            today: customers.since_a,
        },
        firms: FirmCounts {
            total: businesses.total,
            today: businesses.since_a,
            this_month: businesses.since_b,
        },
        transactions: TransactionStats {
            total: transactions.total,
            today: transactions.since_a,
            chart: fill_missing_days(&week, &daily, DayLabel::Weekday),
        },
        campaigns: CampaignStats { active },
        participations: ParticipationStats {
            total: participations,
            won,
        },
        rewards: RewardTotals::from_groups(&groups),
    })
}

/// Figures for one business as of `now`
pub async fn firm_stats(
    pool: &PgPool,
    clock: &StatsClock,
    business_id: i64,
    now: i64,
) -> Result<FirmStats, sqlx::Error> {
    let today = clock.local_date(now);
    let today_start = clock.start_of_day(today);
    let month_start = clock.start_of_month(today);
    let week = clock.window_ending(now, WEEK_DAYS);
    let month = clock.window_ending(now, MONTH_CHART_DAYS);
    let offset = clock.offset_millis();
    let bid = Some(business_id);

    let (wallets, (participations, _), transactions, weekly, wallet_days, transaction_days) = tokio::try_join!(
        queries::wallet_count(pool, business_id),
        queries::participation_counts(pool, bid),
        queries::transaction_counts(pool, bid, today_start, month_start),
        queries::reward_groups(pool, bid, Some(week.start_millis)),
        queries::daily_counts(pool, DailySource::WalletJoins, bid, &month, offset),
        queries::daily_counts(pool, DailySource::Transactions, bid, &month, offset),
    )?;

    Ok(FirmStats {
        customers: Total { total: wallets },
        participations: Total {
            total: participations,
        },
        transactions: PeriodCounts {
            daily: transactions.since_a,
            monthly: transactions.since_b,
        },
        rewards: WeeklyRewards::from_groups(&weekly),
        charts: FirmCharts {
            wallet_adds: fill_missing_days(&month, &wallet_days, DayLabel::DayMonth),
            transactions: fill_missing_days(&month, &transaction_days, DayLabel::DayMonth),
        },
    })
}
