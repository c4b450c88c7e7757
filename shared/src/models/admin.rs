//! Admin Model
//!
//! Panel accounts. `super_admin` manages every business; `business` admins
//! are linked to exactly one business through `business_id`.

use serde::{Deserialize, Serialize};

/// Admin role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Business,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Business => "business",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "super_admin" => Some(Self::SuperAdmin),
            "business" => Some(Self::Business),
            _ => None,
        }
    }
}

/// Admin entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub role: String,
    pub business_name: String,
    pub business_id: Option<i64>,
    pub theme: String,
    pub logo_url: String,
    pub created_at: i64,
}

/// Create admin payload (POST /api/auth/register)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreate {
    pub username: String,
    pub password: String,
    pub role: Option<AdminRole>,
    pub business_name: Option<String>,
    pub theme: Option<String>,
}

pub const DEFAULT_THEME: &str = "default";

/// Theme slug derived from a business name: lowercase, whitespace runs → `-`.
pub fn theme_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip_through_db_string() {
        for role in [AdminRole::SuperAdmin, AdminRole::Business] {
            assert_eq!(AdminRole::from_db(role.as_str()), Some(role));
        }
        assert_eq!(AdminRole::from_db("customer"), None);
    }

    #[test]
    fn test_theme_slug() {
        assert_eq!(theme_slug("Stock Coffee"), "stock-coffee");
        assert_eq!(theme_slug("  Big   Bean\tRoasters "), "big-bean-roasters");
        assert_eq!(theme_slug("Starbucks"), "starbucks");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let admin = Admin {
            id: 1,
            username: "stock".into(),
            hashed_password: "$argon2id$secret".into(),
            role: "business".into(),
            business_name: "Stock".into(),
            business_id: Some(7),
            theme: "stock".into(),
            logo_url: String::new(),
            created_at: 0,
        };
        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("hashedPassword").is_none());
        assert_eq!(json["businessId"], 7);
    }
}
