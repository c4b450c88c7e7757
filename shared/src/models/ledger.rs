//! Ledger Models: transactions and campaign participations

use serde::{Deserialize, Serialize};

/// Transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Stamp,
    Point,
    GiftRedeem,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stamp => "STAMP",
            Self::Point => "POINT",
            Self::GiftRedeem => "GIFT_REDEEM",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "STAMP" => Some(Self::Stamp),
            "POINT" => Some(Self::Point),
            "GIFT_REDEEM" => Some(Self::GiftRedeem),
            _ => None,
        }
    }
}

/// Transaction category: KAZANIM (earn) or HARCAMA (spend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionCategory {
    Kazanim,
    Harcama,
}

impl TransactionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kazanim => "KAZANIM",
            Self::Harcama => "HARCAMA",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "KAZANIM" => Some(Self::Kazanim),
            "HARCAMA" => Some(Self::Harcama),
            _ => None,
        }
    }
}

/// Participation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    Joined,
    Won,
    Completed,
}

impl ParticipationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joined => "JOINED",
            Self::Won => "WON",
            Self::Completed => "COMPLETED",
        }
    }
}
