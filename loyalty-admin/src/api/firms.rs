//! Firm (business) management

use axum::{
    Extension, Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    AdminRole, Business, BusinessCreate, BusinessSettings, DEFAULT_CARD_COLOR, DEFAULT_CARD_ICON,
    DEFAULT_CATEGORY, DEFAULT_CITY, theme_slug,
};

use crate::auth::AdminIdentity;
use crate::db::{self, admins::NewAdmin};
use crate::error::db_error;
use crate::state::AppState;
use crate::upload::LOGO;
use crate::util::hash_password;

use super::ApiResult;
use super::form::FormData;

/// Firm management (super admin)
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/firms",
            get(list_firms)
                .post(create_firm)
                .layer(DefaultBodyLimit::max(LOGO.body_limit())),
        )
        .route("/api/firms/{id}", delete(delete_firm))
}

/// Reachable by every admin
pub fn router() -> Router<AppState> {
    Router::new().route("/api/firms/my-business", get(my_business))
}

/// GET /api/firms
pub async fn list_firms(State(state): State<AppState>) -> ApiResult<Vec<Business>> {
    let firms = db::businesses::list(&state.pool)
        .await
        .map_err(db_error("list firms"))?;
    Ok(Json(firms))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyBusiness {
    pub business_id: i64,
    pub business_name: String,
}

/// GET /api/firms/my-business
pub async fn my_business(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
) -> ApiResult<MyBusiness> {
    let admin = db::admins::find_by_id(&state.pool, identity.admin_id)
        .await
        .map_err(db_error("my-business admin lookup"))?
        .ok_or_else(|| AppError::new(ErrorCode::NoLinkedBusiness))?;
    let business_id = admin
        .business_id
        .ok_or_else(|| AppError::new(ErrorCode::NoLinkedBusiness))?;

    Ok(Json(MyBusiness {
        business_id,
        business_name: admin.business_name,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAdmin {
    pub id: i64,
    pub username: String,
    pub business_name: String,
    pub business_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBusiness {
    pub id: i64,
    pub company_name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct CreateFirmResponse {
    pub message: String,
    pub admin: CreatedAdmin,
    pub business: CreatedBusiness,
}

/// Validated text part of the firm form
#[derive(Debug)]
struct FirmInput {
    name: String,
    email: String,
    password: String,
    settings: BusinessSettings,
}

impl FirmInput {
    fn from_form(form: &FormData) -> Result<Self, AppError> {
        let missing = || AppError::validation("Name, email, and password are required");
        let (Some(name), Some(email), Some(password)) =
            (form.text("name"), form.text("email"), form.raw("password"))
        else {
            return Err(missing());
        };
        if password.is_empty() {
            return Err(missing());
        }

        let settings: BusinessSettings = match form.text("settings") {
            Some(raw) => serde_json::from_str(raw).map_err(|e| {
                AppError::with_message(ErrorCode::InvalidFormat, "Invalid settings")
                    .with_detail("error", e.to_string())
            })?,
            None => BusinessSettings::default(),
        };
        let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !has(&settings.district) || !has(&settings.neighborhood) {
            return Err(AppError::new(ErrorCode::BusinessLocationRequired));
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_lowercase(),
            password: password.to_string(),
            settings,
        })
    }

    fn into_business(self, hashed_password: String, logo: Option<String>) -> BusinessCreate {
        let s = self.settings;
        BusinessCreate {
            company_name: self.name,
            email: self.email,
            hashed_password,
            category: s.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            logo,
            card_color: s.card_color.unwrap_or_else(|| DEFAULT_CARD_COLOR.to_string()),
            card_icon: s.card_icon.unwrap_or_else(|| DEFAULT_CARD_ICON.to_string()),
            city: s.city.unwrap_or_else(|| DEFAULT_CITY.to_string()),
            district: s.district.unwrap_or_default(),
            neighborhood: s.neighborhood.unwrap_or_default(),
        }
    }
}

/// POST /api/firms (multipart)
pub async fn create_firm(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreateFirmResponse>), AppError> {
    let mut form = FormData::read(multipart, &LOGO).await?;
    let input = FirmInput::from_form(&form)?;

    let hashed_password = hash_password(&input.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::internal(e.to_string())
    })?;

    let logo = match form.take_file("logo") {
        Some(file) => Some(state.uploads.store(&LOGO, &file).await?),
        None => None,
    };
    let logo_url = logo.as_ref().map(|f| f.url.clone());

    let admin = NewAdmin {
        username: input.email.clone(),
        hashed_password: hashed_password.clone(),
        role: AdminRole::Business,
        business_name: input.name.clone(),
        business_id: None,
        theme: theme_slug(&input.name),
        logo_url: logo_url.clone().unwrap_or_default(),
    };
    let business = input.into_business(hashed_password, logo_url);

    let created = db::businesses::create_with_admin(
        &state.pool,
        &business,
        admin,
        shared::util::now_millis(),
    )
    .await;
    let (business, admin) = match created {
        Ok(pair) => pair,
        Err(e) => {
            if let Some(file) = &logo {
                state.uploads.remove(file).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(business_id = business.id, admin_id = admin.id, "Firm created");

    Ok((
        StatusCode::CREATED,
        Json(CreateFirmResponse {
            message: "Firm created successfully".to_string(),
            admin: CreatedAdmin {
                id: admin.id,
                username: admin.username,
                business_name: admin.business_name,
                business_id: admin.business_id,
            },
            business: CreatedBusiness {
                id: business.id,
                company_name: business.company_name,
                email: business.email,
            },
        }),
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBusiness {
    pub id: i64,
    pub company_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFirmResponse {
    pub message: String,
    pub deleted_business: DeletedBusiness,
}

/// DELETE /api/firms/{id}
pub async fn delete_firm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<DeleteFirmResponse> {
    let (id, company_name) = db::businesses::delete_cascade(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;

    Ok(Json(DeleteFirmResponse {
        message: "Firm and all associated data deleted successfully".to_string(),
        deleted_business: DeletedBusiness { id, company_name },
    }))
}
