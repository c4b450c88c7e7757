//! Folding (type, category) transaction sums into reward totals

use serde::Serialize;
use shared::models::{TransactionCategory, TransactionType};

/// Summed transaction value for one (type, category) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardGroup {
    pub kind: TransactionType,
    pub category: TransactionCategory,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EarnSpend {
    pub earned: i64,
    pub spent: i64,
}

/// Ledger-wide point and stamp flows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewardTotals {
    pub points: EarnSpend,
    pub stamps: EarnSpend,
}

impl RewardTotals {
    /// GIFT_REDEEM rows count as spent stamps whatever their category.
    pub fn from_groups(groups: &[RewardGroup]) -> Self {
        let mut totals = Self::default();
        for g in groups {
            match (g.kind, g.category) {
                (TransactionType::Point, TransactionCategory::Kazanim) => {
                    totals.points.earned += g.total
                }
                (TransactionType::Point, TransactionCategory::Harcama) => {
                    totals.points.spent += g.total
                }
                (TransactionType::Stamp, TransactionCategory::Kazanim) => {
                    totals.stamps.earned += g.total
                }
                (TransactionType::Stamp, TransactionCategory::Harcama) => {
                    totals.stamps.spent += g.total
                }
                (TransactionType::GiftRedeem, _) => totals.stamps.spent += g.total,
            }
        }
        totals
    }
}

/// What one business handed out over the last week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRewards {
    pub weekly_points: i64,
    pub weekly_stamps: i64,
    /// Redeemed gifts
    pub weekly_coffee: i64,
}

impl WeeklyRewards {
    pub fn from_groups(groups: &[RewardGroup]) -> Self {
        let mut weekly = Self::default();
        for g in groups {
            match (g.kind, g.category) {
                (TransactionType::Point, TransactionCategory::Kazanim) => {
                    weekly.weekly_points += g.total
                }
                (TransactionType::Stamp, TransactionCategory::Kazanim) => {
                    weekly.weekly_stamps += g.total
                }
                (TransactionType::GiftRedeem, _) => weekly.weekly_coffee += g.total,
                _ => {}
            }
        }
        weekly
    }
}
