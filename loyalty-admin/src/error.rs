//! Service-layer error type
//!
//! `ServiceError` bridges DB-layer errors (`sqlx::Error`) and the
//! API-layer error (`AppError`), so multi-step database work can use `?` and
//! still surface as a proper response.

use axum::response::IntoResponse;
use shared::error::AppError;

/// Service-layer error
///
/// - `Db`: database/infrastructure errors (logged, mapped to 500 or 409)
/// - `App`: business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Db(sqlx::Error),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => from_sqlx("service", db_err),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Map a failed query of operation `op` to an `AppError`.
///
/// Unique violations become 409; everything else is logged and becomes a 500
/// whose `details.error` carries the driver message.
pub fn from_sqlx(op: &'static str, e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            tracing::warn!(op, constraint = ?db.constraint(), "Unique constraint violated");
            return AppError::conflict(conflict_message(db.constraint()));
        }
    }
    tracing::error!(op, error = %e, "Database error");
    AppError::internal(e.to_string())
}

/// `map_err` adapter: `.map_err(db_error("list firms"))?`
pub fn db_error(op: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| from_sqlx(op, e)
}

fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(c) if c.contains("email") => "Email already in use",
        Some(c) if c.contains("phone") => "Phone number already in use",
        Some(c) if c.contains("username") => "Username already exists",
        _ => "Record already exists",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use shared::error::ErrorCode;

    #[test]
    fn test_app_error_passes_through() {
        let err: AppError = ServiceError::App(AppError::new(ErrorCode::CampaignNotFound)).into();
        assert_eq!(err.code, ErrorCode::CampaignNotFound);
    }

    #[test]
    fn test_db_error_is_internal_with_cause() {
        let err: AppError = ServiceError::from(sqlx::Error::RowNotFound).into();
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        let details = err.details.unwrap();
        assert!(details.contains_key("error"));
    }

    #[test]
    fn test_conflict_messages() {
        assert_eq!(
            conflict_message(Some("customers_email_key")),
            "Email already in use"
        );
        assert_eq!(
            conflict_message(Some("customers_phone_number_key")),
            "Phone number already in use"
        );
        assert_eq!(conflict_message(None), "Record already exists");
    }
}
