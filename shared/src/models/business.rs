//! Business Model

use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Cafe";
pub const DEFAULT_CARD_COLOR: &str = "#EE2C2C";
pub const DEFAULT_CARD_ICON: &str = "local_cafe_rounded";
pub const DEFAULT_CITY: &str = "Ankara";
pub const DEFAULT_POINTS_PER_VISIT: i32 = 10;
pub const DEFAULT_REDEMPTION_THRESHOLD: i32 = 100;

/// Business (tenant) entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    pub company_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub points_per_visit: i32,
    pub redemption_threshold: i32,
    pub category: String,
    pub logo: Option<String>,
    pub card_color: String,
    pub card_icon: String,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
    pub created_at: i64,
}

/// Visual identity and location sent with firm creation (`settings` form field)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSettings {
    pub category: Option<String>,
    pub card_color: Option<String>,
    pub card_icon: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub neighborhood: Option<String>,
}

/// Fully defaulted business insert
#[derive(Debug, Clone)]
pub struct BusinessCreate {
    pub company_name: String,
    pub email: String,
    pub hashed_password: String,
    pub category: String,
    pub logo: Option<String>,
    pub card_color: String,
    pub card_icon: String,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
}

/// Business fields embedded in wallet listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSummary {
    pub id: i64,
    pub company_name: String,
    pub category: String,
    pub logo: Option<String>,
    pub card_color: String,
    pub card_icon: String,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
}
