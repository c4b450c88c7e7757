//! Authentication endpoints: login, refresh-token, register

use axum::{Extension, Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Admin, AdminCreate, AdminRole, Customer, DEFAULT_THEME};

use crate::auth::AdminIdentity;
use crate::auth::session::{Subject, SubjectKind, create_token};
use crate::db::{self, admins::NewAdmin};
use crate::error::db_error;
use crate::state::AppState;
use crate::util::{hash_password, phone_suffix, verify_password};

use super::ApiResult;

/// Routes reachable without a token
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh-token", post(refresh_token))
}

/// Account creation (super admin)
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/api/auth/register", post(register))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: Option<String>,
    #[serde(default)]
    pub password: String,
    pub phone_number: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: i64,
    pub role: String,
    pub username: String,
    pub business_name: String,
    pub business_id: Option<i64>,
    pub theme: String,
    pub logo_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUser {
    pub id: i64,
    pub role: String,
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    pub email: String,
    pub profile_image: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum SessionUser {
    Admin(AdminUser),
    Customer(CustomerUser),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: SessionUser,
}

/// An account that passed lookup, before the password check
enum Account {
    Admin(Admin),
    Customer(Customer),
}

impl Account {
    fn hashed_password(&self) -> &str {
        match self {
            Self::Admin(a) => &a.hashed_password,
            Self::Customer(c) => &c.hashed_password,
        }
    }

    fn subject(&self) -> Subject {
        match self {
            Self::Admin(a) => admin_subject(a),
            Self::Customer(c) => customer_subject(c),
        }
    }

    fn into_user(self) -> SessionUser {
        match self {
            Self::Admin(a) => SessionUser::Admin(AdminUser {
                id: a.id,
                role: a.role,
                username: a.username,
                business_name: a.business_name,
                business_id: a.business_id,
                theme: a.theme,
                logo_url: a.logo_url,
            }),
            Self::Customer(c) => SessionUser::Customer(CustomerUser {
                id: c.id,
                role: c.role,
                name: c.name,
                surname: c.surname,
                phone_number: c.phone_number,
                email: c.email,
                profile_image: c.profile_image,
            }),
        }
    }
}

fn admin_subject(a: &Admin) -> Subject {
    Subject {
        id: a.id,
        kind: SubjectKind::Admin,
        role: a.role.clone(),
        business_id: a.business_id,
    }
}

fn customer_subject(c: &Customer) -> Subject {
    Subject {
        id: c.id,
        kind: SubjectKind::Customer,
        role: c.role.clone(),
        business_id: None,
    }
}

fn sign(subject: &Subject, secret: &str) -> Result<String, AppError> {
    create_token(subject, secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::internal(e.to_string())
    })
}

/// Admin by username first, then customer by phone number
async fn find_account(state: &AppState, req: &LoginRequest) -> Result<Option<Account>, AppError> {
    if let Some(username) = req.username.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        let admin = db::admins::find_by_username(&state.pool, username)
            .await
            .map_err(db_error("login admin lookup"))?;
        if let Some(admin) = admin {
            return Ok(Some(Account::Admin(admin)));
        }
    }

    if let Some(phone) = req.phone_number.as_deref() {
        let digits = phone_suffix(phone);
        if !digits.is_empty() {
            let customer = db::customers::find_by_phone_suffix(&state.pool, &digits)
                .await
                .map_err(db_error("login customer lookup"))?;
            return Ok(customer.map(Account::Customer));
        }
    }

    Ok(None)
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let account = find_account(&state, &req)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if !verify_password(&req.password, account.hashed_password()) {
        return Err(AppError::new(ErrorCode::WrongPassword));
    }

    let subject = account.subject();
    let token = sign(&subject, &state.jwt_secret)?;
    let refresh_token = db::refresh_tokens::create(&state.pool, subject.kind, subject.id)
        .await
        .map_err(db_error("create refresh token"))?;

    tracing::info!(kind = subject.kind.as_str(), id = subject.id, "Login succeeded");

    Ok(Json(LoginResponse {
        token,
        refresh_token,
        user: account.into_user(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    pub refresh_token: String,
}

/// POST /api/auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<RefreshResponse> {
    let (kind, subject_id, new_refresh) = db::refresh_tokens::rotate(&state.pool, &req.refresh_token)
        .await
        .map_err(db_error("rotate refresh token"))?
        .ok_or_else(|| AppError::new(ErrorCode::RefreshTokenInvalid))?;

    // Claims come from the current account row, not the old token
    let subject = match kind {
        SubjectKind::Admin => db::admins::find_by_id(&state.pool, subject_id)
            .await
            .map_err(db_error("refresh admin lookup"))?
            .map(|a| admin_subject(&a)),
        SubjectKind::Customer => db::customers::find_by_id(&state.pool, subject_id)
            .await
            .map_err(db_error("refresh customer lookup"))?
            .map(|c| customer_subject(&c)),
    }
    .ok_or_else(|| AppError::new(ErrorCode::RefreshTokenInvalid))?;

    Ok(Json(RefreshResponse {
        token: sign(&subject, &state.jwt_secret)?,
        refresh_token: new_refresh,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Json(req): Json<AdminCreate>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let username = req.username.trim().to_string();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField)
            .with_detail("fields", "username, password"));
    }

    let exists = db::admins::username_exists(&state.pool, &username)
        .await
        .map_err(db_error("register username check"))?;
    if exists {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }

    let hashed_password = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::internal(e.to_string())
    })?;

    let admin = db::admins::insert(
        &state.pool,
        &NewAdmin {
            username,
            hashed_password,
            role: req.role.unwrap_or(AdminRole::Business),
            business_name: req.business_name.unwrap_or_default(),
            business_id: None,
            theme: req.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
            logo_url: String::new(),
        },
        shared::util::now_millis(),
    )
    .await
    .map_err(db_error("register admin"))?;

    tracing::info!(admin_id = admin.id, by = identity.admin_id, "Admin registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created".to_string(),
            user_id: admin.id,
        }),
    ))
}
