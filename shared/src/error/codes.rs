//! Unified error codes for the loyalty admin backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Business (firm) errors
//! - 4xxx: Customer and wallet errors
//! - 5xxx: Campaign errors
//! - 6xxx: File upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the admin UI can switch
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// No admin or customer matches the login identifier
    UserNotFound = 1008,
    /// Password does not match
    WrongPassword = 1009,
    /// Refresh token unknown, revoked or expired
    RefreshTokenInvalid = 1010,
    /// Admin username already taken
    UsernameExists = 1011,

    // ==================== 2xxx: Permission ====================
    /// super_admin role required
    AdminRequired = 2003,
    /// Business admin tried to reach another business
    BusinessAccessDenied = 2006,

    // ==================== 3xxx: Business ====================
    /// Business not found
    BusinessNotFound = 3001,
    /// Business email already registered
    BusinessEmailExists = 3002,
    /// Admin account for this email already exists
    AdminEmailExists = 3003,
    /// District / neighborhood missing
    BusinessLocationRequired = 3004,
    /// Admin has no linked business
    NoLinkedBusiness = 3005,

    // ==================== 4xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 4001,
    /// Wallet record not found
    WalletNotFound = 4002,
    /// Gender not in the allowed set
    InvalidGender = 4003,
    /// Negative wallet balance
    NegativeBalance = 4004,

    // ==================== 5xxx: Campaign ====================
    /// Campaign not found
    CampaignNotFound = 5001,
    /// businessId / title / endDate missing
    CampaignFieldsRequired = 5002,
    /// No header image given
    CampaignImageRequired = 5003,
    /// rewardType not points / stamp
    InvalidRewardType = 5004,
    /// Date field could not be parsed
    InvalidDate = 5005,

    // ==================== 65xx: File Upload ====================
    /// File too large
    FileTooLarge = 6501,
    /// Unsupported file format
    UnsupportedFileFormat = 6502,
    /// Invalid/corrupted image file
    InvalidImageFile = 6503,
    /// Empty file provided
    EmptyFile = 6505,
    /// File storage failed
    FileStorageFailed = 6509,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default user-facing message for this error code
    ///
    /// Messages shown verbatim by the admin UI are Turkish.
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "No token provided",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::UserNotFound => "Kullanıcı bulunamadı.",
            ErrorCode::WrongPassword => "Hatalı şifre.",
            ErrorCode::RefreshTokenInvalid => "Invalid or expired refresh token",
            ErrorCode::UsernameExists => "Username already exists",

            // Permission
            ErrorCode::AdminRequired => "Super admin role is required",
            ErrorCode::BusinessAccessDenied => "Access to this business is not allowed",

            // Business
            ErrorCode::BusinessNotFound => "Firm not found",
            ErrorCode::BusinessEmailExists => "Business email already exists",
            ErrorCode::AdminEmailExists => "Admin email already exists",
            ErrorCode::BusinessLocationRequired => "District and neighborhood are required",
            ErrorCode::NoLinkedBusiness => "Business not found for this user",

            // Customer
            ErrorCode::CustomerNotFound => "User not found",
            ErrorCode::WalletNotFound => "Wallet record not found",
            ErrorCode::InvalidGender => "Gender must be one of: male, female, other",
            ErrorCode::NegativeBalance => "Wallet values must not be negative",

            // Campaign
            ErrorCode::CampaignNotFound => "Kampanya bulunamadı.",
            ErrorCode::CampaignFieldsRequired => {
                "İşletme Kimliği, Başlık ve Bitiş Tarihi zorunludur."
            }
            ErrorCode::CampaignImageRequired => "Kampanya fotoğrafı zorunludur.",
            ErrorCode::InvalidRewardType => "Ödül tipi 'points' veya 'stamp' olmalıdır.",
            ErrorCode::InvalidDate => "Geçersiz tarih.",

            // File Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Only image files are allowed!",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::FileStorageFailed => "File storage failed",

            // System
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1008 => Ok(ErrorCode::UserNotFound),
            1009 => Ok(ErrorCode::WrongPassword),
            1010 => Ok(ErrorCode::RefreshTokenInvalid),
            1011 => Ok(ErrorCode::UsernameExists),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),
            2006 => Ok(ErrorCode::BusinessAccessDenied),

            // Business
            3001 => Ok(ErrorCode::BusinessNotFound),
            3002 => Ok(ErrorCode::BusinessEmailExists),
            3003 => Ok(ErrorCode::AdminEmailExists),
            3004 => Ok(ErrorCode::BusinessLocationRequired),
            3005 => Ok(ErrorCode::NoLinkedBusiness),

            // Customer
            4001 => Ok(ErrorCode::CustomerNotFound),
            4002 => Ok(ErrorCode::WalletNotFound),
            4003 => Ok(ErrorCode::InvalidGender),
            4004 => Ok(ErrorCode::NegativeBalance),

            // Campaign
            5001 => Ok(ErrorCode::CampaignNotFound),
            5002 => Ok(ErrorCode::CampaignFieldsRequired),
            5003 => Ok(ErrorCode::CampaignImageRequired),
            5004 => Ok(ErrorCode::InvalidRewardType),
            5005 => Ok(ErrorCode::InvalidDate),

            // File Upload
            6501 => Ok(ErrorCode::FileTooLarge),
            6502 => Ok(ErrorCode::UnsupportedFileFormat),
            6503 => Ok(ErrorCode::InvalidImageFile),
            6505 => Ok(ErrorCode::EmptyFile),
            6509 => Ok(ErrorCode::FileStorageFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::ValidationFailed,
        ErrorCode::AlreadyExists,
        ErrorCode::InvalidRequest,
        ErrorCode::InvalidFormat,
        ErrorCode::RequiredField,
        ErrorCode::ValueOutOfRange,
        ErrorCode::NotAuthenticated,
        ErrorCode::TokenExpired,
        ErrorCode::TokenInvalid,
        ErrorCode::UserNotFound,
        ErrorCode::WrongPassword,
        ErrorCode::RefreshTokenInvalid,
        ErrorCode::UsernameExists,
        ErrorCode::AdminRequired,
        ErrorCode::BusinessAccessDenied,
        ErrorCode::BusinessNotFound,
        ErrorCode::BusinessEmailExists,
        ErrorCode::AdminEmailExists,
        ErrorCode::BusinessLocationRequired,
        ErrorCode::NoLinkedBusiness,
        ErrorCode::CustomerNotFound,
        ErrorCode::WalletNotFound,
        ErrorCode::InvalidGender,
        ErrorCode::NegativeBalance,
        ErrorCode::CampaignNotFound,
        ErrorCode::CampaignFieldsRequired,
        ErrorCode::CampaignImageRequired,
        ErrorCode::InvalidRewardType,
        ErrorCode::InvalidDate,
        ErrorCode::FileTooLarge,
        ErrorCode::UnsupportedFileFormat,
        ErrorCode::InvalidImageFile,
        ErrorCode::EmptyFile,
        ErrorCode::FileStorageFailed,
        ErrorCode::InternalError,
    ];

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::ValueOutOfRange.code(), 8);
        assert_eq!(ErrorCode::UserNotFound.code(), 1008);
        assert_eq!(ErrorCode::BusinessNotFound.code(), 3001);
        assert_eq!(ErrorCode::WalletNotFound.code(), 4002);
        assert_eq!(ErrorCode::CampaignFieldsRequired.code(), 5002);
        assert_eq!(ErrorCode::FileTooLarge.code(), 6501);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_every_code_survives_u16_conversion() {
        for &code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::AlreadyExists).unwrap(), "4");
        assert_eq!(
            serde_json::to_string(&ErrorCode::CampaignNotFound).unwrap(),
            "5001"
        );
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::RequiredField), "7");
        assert_eq!(format!("{}", ErrorCode::CustomerNotFound), "4001");
    }

    #[test]
    fn test_ui_messages_are_turkish_where_the_panel_shows_them() {
        assert_eq!(ErrorCode::UserNotFound.message(), "Kullanıcı bulunamadı.");
        assert_eq!(ErrorCode::WrongPassword.message(), "Hatalı şifre.");
        assert_eq!(
            ErrorCode::CampaignFieldsRequired.message(),
            "İşletme Kimliği, Başlık ve Bitiş Tarihi zorunludur."
        );
        assert_eq!(
            ErrorCode::CampaignImageRequired.message(),
            "Kampanya fotoğrafı zorunludur."
        );
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
