//! Campaign Model

use serde::{Deserialize, Serialize};

/// What a campaign hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    Points,
    Stamp,
}

impl RewardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Stamp => "stamp",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "points" => Some(Self::Points),
            "stamp" => Some(Self::Stamp),
            _ => None,
        }
    }
}

pub const DEFAULT_REWARD_VALUE: i32 = 1;
pub const DEFAULT_REWARD_VALIDITY_DAYS: i32 = 30;
pub const DEFAULT_DISPLAY_ORDER: i32 = 0;
pub const DEFAULT_ICON: &str = "stars_rounded";

/// Campaign entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub business_id: i64,
    pub title: String,
    pub short_description: String,
    pub header_image: Option<String>,
    pub content: String,
    pub reward_type: String,
    pub reward_value: i32,
    pub reward_validity_days: i32,
    pub icon: String,
    pub is_promoted: bool,
    pub display_order: i32,
    pub start_date: i64,
    pub end_date: i64,
    pub created_at: i64,
}

/// Validated campaign insert
#[derive(Debug, Clone)]
pub struct CampaignCreate {
    pub business_id: i64,
    pub title: String,
    pub short_description: String,
    pub header_image: String,
    pub content: String,
    pub reward_type: RewardType,
    pub reward_value: i32,
    pub reward_validity_days: i32,
    pub icon: String,
    pub is_promoted: bool,
    pub display_order: i32,
    pub start_date: i64,
    pub end_date: i64,
}

/// Validated partial campaign update
#[derive(Debug, Clone, Default)]
pub struct CampaignPatch {
    pub business_id: Option<i64>,
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub header_image: Option<String>,
    pub content: Option<String>,
    pub reward_type: Option<RewardType>,
    pub reward_value: Option<i32>,
    pub reward_validity_days: Option<i32>,
    pub icon: Option<String>,
    pub is_promoted: Option<bool>,
    pub display_order: Option<i32>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

impl CampaignPatch {
    pub fn apply(self, campaign: &mut Campaign) {
        if let Some(v) = self.business_id {
            campaign.business_id = v;
        }
        if let Some(v) = self.title {
            campaign.title = v;
        }
        if let Some(v) = self.short_description {
            campaign.short_description = v;
        }
        if let Some(v) = self.header_image {
            campaign.header_image = Some(v);
        }
        if let Some(v) = self.content {
            campaign.content = v;
        }
        if let Some(v) = self.reward_type {
            campaign.reward_type = v.as_str().to_string();
        }
        if let Some(v) = self.reward_value {
            campaign.reward_value = v;
        }
        if let Some(v) = self.reward_validity_days {
            campaign.reward_validity_days = v;
        }
        if let Some(v) = self.icon {
            campaign.icon = v;
        }
        if let Some(v) = self.is_promoted {
            campaign.is_promoted = v;
        }
        if let Some(v) = self.display_order {
            campaign.display_order = v;
        }
        if let Some(v) = self.start_date {
            campaign.start_date = v;
        }
        if let Some(v) = self.end_date {
            campaign.end_date = v;
        }
    }
}
