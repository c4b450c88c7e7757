//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::BusinessNotFound
            | Self::NoLinkedBusiness
            | Self::CustomerNotFound
            | Self::WalletNotFound
            | Self::CampaignNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::RefreshTokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::AdminRequired | Self::BusinessAccessDenied => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::InternalError | Self::FileStorageFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation, login failures, duplicate form input)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(
            ErrorCode::NoLinkedBusiness.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::BusinessNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::WalletNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::CampaignNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_auth_statuses() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::TokenInvalid.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::AdminRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::BusinessAccessDenied.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_login_failures_are_bad_request() {
        assert_eq!(
            ErrorCode::UserNotFound.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::WrongPassword.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_validation_is_bad_request() {
        assert_eq!(
            ErrorCode::CampaignFieldsRequired.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::BusinessEmailExists.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::FileTooLarge.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_conflict_and_internal() {
        assert_eq!(ErrorCode::AlreadyExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::FileStorageFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
