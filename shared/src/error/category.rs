//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Business errors
/// - 4xxx: Customer errors
/// - 5xxx: Campaign errors
/// - 6xxx: Upload errors
/// - everything else: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Business,
    Customer,
    Campaign,
    Upload,
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Business,
            4000..5000 => Self::Customer,
            5000..6000 => Self::Campaign,
            6000..7000 => Self::Upload,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Business => "business",
            Self::Customer => "customer",
            Self::Campaign => "campaign",
            Self::Upload => "upload",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Business);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Customer);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Campaign);
        assert_eq!(ErrorCategory::from_code(6501), ErrorCategory::Upload);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::WrongPassword.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::BusinessAccessDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCode::BusinessEmailExists.category(),
            ErrorCategory::Business
        );
        assert_eq!(ErrorCode::WalletNotFound.category(), ErrorCategory::Customer);
        assert_eq!(ErrorCode::InvalidDate.category(), ErrorCategory::Campaign);
        assert_eq!(ErrorCode::FileTooLarge.category(), ErrorCategory::Upload);
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Campaign).unwrap();
        assert_eq!(json, "\"campaign\"");
        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
        assert_eq!(ErrorCategory::Upload.name(), "upload");
    }
}
