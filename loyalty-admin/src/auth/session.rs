//! Session JWTs for admins and customers

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

const JWT_EXPIRY_HOURS: i64 = 24;

/// Who a token was issued to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Admin,
    Customer,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "customer" => Some(Self::Customer),
            _ => None,
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin or customer ID
    pub sub: i64,
    pub kind: SubjectKind,
    /// Role string as stored on the account
    pub role: String,
    /// Business the admin manages, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<i64>,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Subject of a token about to be issued
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: i64,
    pub kind: SubjectKind,
    pub role: String,
    pub business_id: Option<i64>,
}

/// Sign a 24h HS256 token
pub fn create_token(subject: &Subject, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: subject.id,
        kind: subject.kind,
        role: subject.role.clone(),
        bid: subject.business_id,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry
pub fn decode_token(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::new(ErrorCode::TokenExpired),
            _ => AppError::invalid_token("Invalid token"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn admin() -> Subject {
        Subject {
            id: 7,
            kind: SubjectKind::Admin,
            role: "business".into(),
            business_id: Some(3),
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(&admin(), SECRET).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.kind, SubjectKind::Admin);
        assert_eq!(claims.role, "business");
        assert_eq!(claims.bid, Some(3));
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token(&admin(), SECRET).unwrap();
        let err = decode_token(&token, "other").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
        assert_eq!(err.message, "Invalid token");
    }

    #[test]
    fn test_expired_token() {
        let past = (chrono::Utc::now() - chrono::Duration::hours(48)).timestamp() as usize;
        let claims = SessionClaims {
            sub: 1,
            kind: SubjectKind::Customer,
            role: "customer".into(),
            bid: None,
            exp: past,
            iat: past,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let err = decode_token(&token, SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn test_garbage_token() {
        let err = decode_token("not.a.jwt", SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }
}
