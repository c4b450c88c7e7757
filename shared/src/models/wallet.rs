//! Wallet (CustomerBusiness) Model
//!
//! One row per (customer, business) pair, holding the customer's loyalty
//! balance at that business.

use serde::{Deserialize, Serialize};

use super::business::BusinessSummary;
use crate::error::ErrorCode;

/// Stamps that convert into one gift
pub const STAMPS_PER_GIFT: i64 = 6;

/// Wallet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CustomerBusiness {
    pub id: i64,
    pub customer_id: i64,
    pub business_id: i64,
    pub points: i64,
    pub stamps: i64,
    pub stamps_target: i64,
    pub gifts_count: i64,
    pub total_visits: i64,
    pub order_index: i64,
    pub joined_at: i64,
}

impl CustomerBusiness {
    pub fn balance(&self) -> WalletBalance {
        WalletBalance {
            points: self.points,
            stamps: self.stamps,
            gifts_count: self.gifts_count,
        }
    }
}

/// Wallet row with its business embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEntry {
    #[serde(flatten)]
    pub wallet: CustomerBusiness,
    pub business: BusinessSummary,
}

/// Wallet edit payload (PATCH /api/users/:userId/wallet/:recordId)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletUpdate {
    pub points: Option<i64>,
    pub stamps: Option<i64>,
    pub gifts_count: Option<i64>,
}

/// The editable balance of a wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletBalance {
    pub points: i64,
    pub stamps: i64,
    pub gifts_count: i64,
}

impl WalletBalance {
    /// Apply an admin edit.
    ///
    /// When stamps are given, every full [`STAMPS_PER_GIFT`] converts into a
    /// gift and only the remainder stays as stamps. Gifts start from the
    /// submitted `gifts_count` if present, otherwise from the current count.
    /// Negative values are rejected, as is a gift count that would overflow.
    pub fn apply(self, update: &WalletUpdate) -> Result<Self, ErrorCode> {
        let submitted = [update.points, update.stamps, update.gifts_count];
        if submitted.iter().flatten().any(|v| *v < 0) {
            return Err(ErrorCode::NegativeBalance);
        }

        let points = update.points.unwrap_or(self.points);
        let mut gifts_count = update.gifts_count.unwrap_or(self.gifts_count);
        let stamps = match update.stamps {
            Some(stamps) => {
                gifts_count = gifts_count
                    .checked_add(stamps / STAMPS_PER_GIFT)
                    .ok_or(ErrorCode::ValueOutOfRange)?;
                stamps % STAMPS_PER_GIFT
            }
            None => self.stamps,
        };

        Ok(Self {
            points,
            stamps,
            gifts_count,
        })
    }
}
