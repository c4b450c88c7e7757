//! Admin authentication middleware and access policy
//!
//! Every protected route runs [`admin_auth_middleware`], which verifies the
//! bearer token and inserts an [`AdminIdentity`]. Customer tokens are valid
//! sessions but are refused here. Routes reserved for the platform operator
//! additionally run [`super_admin_middleware`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use shared::models::AdminRole;

use super::session::{SubjectKind, decode_token};
use crate::state::AppState;

/// Authenticated admin extracted from the JWT
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub admin_id: i64,
    pub role: AdminRole,
    pub business_id: Option<i64>,
}

impl AdminIdentity {
    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }

    /// Super admins reach every business; business admins only their own.
    pub fn ensure_business(&self, business_id: i64) -> Result<(), AppError> {
        if self.is_super_admin() || self.business_id == Some(business_id) {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::BusinessAccessDenied)
                .with_detail("businessId", business_id))
        }
    }
}

/// Extract the bearer token from the Authorization header
fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::not_authenticated)?;
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::not_authenticated)
}

/// Verify the admin JWT and attach the identity
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(&request).map_err(IntoResponse::into_response)?;
    let claims = decode_token(token, &state.jwt_secret).map_err(IntoResponse::into_response)?;

    if claims.kind != SubjectKind::Admin {
        return Err(AppError::new(ErrorCode::AdminRequired).into_response());
    }
    let role = AdminRole::from_db(&claims.role)
        .ok_or_else(|| AppError::invalid_token("Invalid token").into_response())?;

    request.extensions_mut().insert(AdminIdentity {
        admin_id: claims.sub,
        role,
        business_id: claims.bid,
    });

    Ok(next.run(request).await)
}

/// Refuse anyone but a super admin; runs after [`admin_auth_middleware`]
pub async fn super_admin_middleware(request: Request, next: Next) -> Result<Response, Response> {
    let allowed = request
        .extensions()
        .get::<AdminIdentity>()
        .is_some_and(AdminIdentity::is_super_admin);
    if !allowed {
        return Err(AppError::new(ErrorCode::AdminRequired).into_response());
    }
    Ok(next.run(request).await)
}
