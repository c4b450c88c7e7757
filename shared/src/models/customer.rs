//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer gender; empty string means "not given"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::Unspecified => "",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            "" => Some(Self::Unspecified),
            _ => None,
        }
    }
}

/// Customer (end user) entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub gender: String,
    pub birth_date: Option<i64>,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub role: String,
    pub created_at: i64,
}

/// Update customer payload (PATCH /api/users/:id)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<i64>,
}

impl CustomerUpdate {
    /// Apply the update to a loaded customer, trimming and normalizing like
    /// the insert path does. Returns `None` for an unknown gender.
    pub fn apply(self, customer: &mut Customer) -> Option<()> {
        if let Some(gender) = self.gender {
            customer.gender = Gender::from_db(gender.trim())?.as_str().to_string();
        }
        if let Some(name) = self.name {
            customer.name = name.trim().to_string();
        }
        if let Some(surname) = self.surname {
            customer.surname = surname.trim().to_string();
        }
        if let Some(phone) = self.phone_number {
            customer.phone_number = phone.trim().to_string();
        }
        if let Some(email) = self.email {
            customer.email = email.trim().to_lowercase();
        }
        if self.profile_image.is_some() {
            customer.profile_image = self.profile_image;
        }
        if self.birth_date.is_some() {
            customer.birth_date = self.birth_date;
        }
        Some(())
    }
}
