//! Campaign management
//!
//! Business admins manage the campaigns of their own business; super admins
//! manage all of them. Create and update take multipart forms carrying an
//! optional `headerImage` file.

use axum::{
    Extension, Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use sqlx::PgPool;
use shared::models::{
    Campaign, CampaignCreate, CampaignPatch, DEFAULT_DISPLAY_ORDER, DEFAULT_ICON,
    DEFAULT_REWARD_VALIDITY_DAYS, DEFAULT_REWARD_VALUE, RewardType,
};

use crate::auth::AdminIdentity;
use crate::db;
use crate::error::db_error;
use crate::state::AppState;
use crate::upload::{CAMPAIGN_HEADER, StoredFile};

use super::ApiResult;
use super::dashboard::parse_business_id;
use super::form::{FormData, flag, int_or, parse_date};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/campaigns",
            get(list_campaigns)
                .post(create_campaign)
                .layer(DefaultBodyLimit::max(CAMPAIGN_HEADER.body_limit())),
        )
        .route(
            "/api/campaigns/business/{business_id}",
            get(list_business_campaigns),
        )
        .route(
            "/api/campaigns/{id}",
            patch(update_campaign)
                .delete(delete_campaign)
                .layer(DefaultBodyLimit::max(CAMPAIGN_HEADER.body_limit())),
        )
}

/// `<scheme>://<host>` of the incoming request
fn base_url(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let scheme = header("x-forwarded-proto").unwrap_or_else(|| "http".to_string());
    let host = header("host").unwrap_or_else(|| "localhost".to_string());
    format!("{scheme}://{host}")
}

/// Make a relative `headerImage` absolute against `base`
fn with_absolute_image(mut campaign: Campaign, base: &str) -> Campaign {
    if let Some(image) = campaign.header_image.as_deref() {
        if !image.starts_with("http") {
            campaign.header_image = Some(format!("{base}{image}"));
        }
    }
    campaign
}

async fn list_for(
    state: &AppState,
    identity: &AdminIdentity,
    business_id: i64,
    headers: &HeaderMap,
) -> ApiResult<Vec<Campaign>> {
    identity.ensure_business(business_id)?;
    let campaigns = db::campaigns::list_for_business(&state.pool, business_id)
        .await
        .map_err(db_error("list campaigns"))?;

    let base = base_url(headers);
    Ok(Json(
        campaigns
            .into_iter()
            .map(|c| with_absolute_image(c, &base))
            .collect(),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignQuery {
    pub business_id: Option<String>,
}

/// GET /api/campaigns?businessId=
///
/// A business admin may omit `businessId` to list its own campaigns.
pub async fn list_campaigns(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Query(query): Query<CampaignQuery>,
    headers: HeaderMap,
) -> ApiResult<Vec<Campaign>> {
    let business_id = match (query.business_id.as_deref(), identity.business_id) {
        (None, Some(own)) if !identity.is_super_admin() => own,
        (raw, _) => parse_business_id(raw)?,
    };
    list_for(&state, &identity, business_id, &headers).await
}

/// GET /api/campaigns/business/{business_id}
pub async fn list_business_campaigns(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(business_id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Vec<Campaign>> {
    list_for(&state, &identity, business_id, &headers).await
}

#[derive(Serialize)]
pub struct CampaignResponse {
    pub message: String,
    pub campaign: Campaign,
}

/// Validated campaign form, before the image is stored
fn campaign_from_form(
    form: &FormData,
    header_image: String,
    now: i64,
) -> Result<CampaignCreate, AppError> {
    let (Some(business_id), Some(title), Some(end_date)) = (
        form.text("businessId"),
        form.text("title"),
        form.text("endDate"),
    ) else {
        return Err(AppError::new(ErrorCode::CampaignFieldsRequired));
    };

    let business_id = business_id.parse().map_err(|_| {
        AppError::with_message(ErrorCode::InvalidFormat, "Invalid business ID")
            .with_detail("businessId", business_id)
    })?;
    let reward_type = match form.text("rewardType") {
        Some(raw) => RewardType::from_db(raw)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidRewardType).with_detail("value", raw))?,
        None => RewardType::Stamp,
    };
    let start_date = match form.text("startDate") {
        Some(raw) => parse_date(raw)?,
        None => now,
    };

    Ok(CampaignCreate {
        business_id,
        title: title.to_string(),
        short_description: form.raw("shortDescription").unwrap_or_default().to_string(),
        header_image,
        content: form.raw("content").unwrap_or_default().to_string(),
        reward_type,
        reward_value: int_or(form.raw("rewardValue"), DEFAULT_REWARD_VALUE),
        reward_validity_days: int_or(
            form.raw("rewardValidityDays"),
            DEFAULT_REWARD_VALIDITY_DAYS,
        ),
        icon: form.text("icon").unwrap_or(DEFAULT_ICON).to_string(),
        is_promoted: flag(form.raw("isPromoted")),
        display_order: int_or(form.raw("displayOrder"), DEFAULT_DISPLAY_ORDER),
        start_date,
        end_date: parse_date(end_date)?,
    })
}

/// Patch built from whichever fields the form carries
fn patch_from_form(form: &FormData) -> Result<CampaignPatch, AppError> {
    let business_id = match form.text("businessId") {
        Some(raw) => Some(raw.parse().map_err(|_| {
            AppError::with_message(ErrorCode::InvalidFormat, "Invalid business ID")
                .with_detail("businessId", raw)
        })?),
        None => None,
    };
    let reward_type = match form.text("rewardType") {
        Some(raw) => Some(
            RewardType::from_db(raw)
                .ok_or_else(|| AppError::new(ErrorCode::InvalidRewardType).with_detail("value", raw))?,
        ),
        None => None,
    };
    let date = |name: &str| form.text(name).map(parse_date).transpose();
    let text = |name: &str| form.raw(name).map(str::to_string);

    Ok(CampaignPatch {
        business_id,
        title: text("title"),
        short_description: text("shortDescription"),
        header_image: form.text("headerImage").map(str::to_string),
        content: text("content"),
        reward_type,
        reward_value: form.raw("rewardValue").map(|v| int_or(Some(v), 1)),
        reward_validity_days: form.raw("rewardValidityDays").map(|v| int_or(Some(v), 1)),
        icon: text("icon"),
        is_promoted: form.raw("isPromoted").map(|v| flag(Some(v))),
        display_order: form.raw("displayOrder").map(|v| int_or(Some(v), 0)),
        start_date: date("startDate")?,
        end_date: date("endDate")?,
    })
}

/// POST /api/campaigns (multipart)
pub async fn create_campaign(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CampaignResponse>), AppError> {
    let mut form = FormData::read(multipart, &CAMPAIGN_HEADER).await?;
    let file = form.take_file("headerImage");
    let text_image = form.text("headerImage").map(str::to_string);

    let now = shared::util::now_millis();
    // Required-field check runs before the image check
    let mut input = campaign_from_form(&form, text_image.clone().unwrap_or_default(), now)?;
    if file.is_none() && text_image.is_none() {
        return Err(AppError::new(ErrorCode::CampaignImageRequired));
    }

    ensure_target_business(&identity, &state.pool, input.business_id).await?;

    let stored = match file {
        Some(file) => {
            let stored = state.uploads.store(&CAMPAIGN_HEADER, &file).await?;
            input.header_image = stored.url.clone();
            Some(stored)
        }
        None => None,
    };

    let campaign = insert_or_cleanup(&state, &input, now, stored.as_ref()).await?;
    tracing::info!(campaign_id = campaign.id, business_id = campaign.business_id, "Campaign created");

    Ok((
        StatusCode::CREATED,
        Json(CampaignResponse {
            message: "Kampanya başarıyla oluşturuldu".to_string(),
            campaign: with_absolute_image(campaign, &base_url(&headers)),
        }),
    ))
}

/// The admin may manage `business_id` and the business exists.
async fn ensure_target_business(
    identity: &AdminIdentity,
    pool: &PgPool,
    business_id: i64,
) -> Result<(), AppError> {
    identity.ensure_business(business_id)?;
    db::businesses::find_by_id(pool, business_id)
        .await
        .map_err(db_error("campaign business lookup"))?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;
    Ok(())
}

async fn insert_or_cleanup(
    state: &AppState,
    input: &CampaignCreate,
    now: i64,
    stored: Option<&StoredFile>,
) -> Result<Campaign, AppError> {
    match db::campaigns::create(&state.pool, input, now).await {
        Ok(campaign) => Ok(campaign),
        Err(e) => {
            if let Some(file) = stored {
                state.uploads.remove(file).await;
            }
            Err(db_error("create campaign")(e))
        }
    }
}

/// PATCH /api/campaigns/{id} (multipart)
pub async fn update_campaign(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<CampaignResponse> {
    let mut form = FormData::read(multipart, &CAMPAIGN_HEADER).await?;
    let file = form.take_file("headerImage");
    let mut patch = patch_from_form(&form)?;

    let mut campaign = db::campaigns::find_by_id(&state.pool, id)
        .await
        .map_err(db_error("find campaign"))?
        .ok_or_else(|| AppError::new(ErrorCode::CampaignNotFound))?;
    identity.ensure_business(campaign.business_id)?;
    if let Some(target) = patch.business_id {
        ensure_target_business(&identity, &state.pool, target).await?;
    }

    let stored = match file {
        Some(file) => {
            let stored = state.uploads.store(&CAMPAIGN_HEADER, &file).await?;
            patch.header_image = Some(stored.url.clone());
            Some(stored)
        }
        None => None,
    };

    patch.apply(&mut campaign);
    let updated = match db::campaigns::update(&state.pool, &campaign).await {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(file) = &stored {
                state.uploads.remove(file).await;
            }
            return Err(db_error("update campaign")(e));
        }
    };

    Ok(Json(CampaignResponse {
        message: "Kampanya başarıyla güncellendi".to_string(),
        campaign: with_absolute_image(updated, &base_url(&headers)),
    }))
}

/// DELETE /api/campaigns/{id}
pub async fn delete_campaign(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let not_found = || AppError::with_message(ErrorCode::CampaignNotFound, "Campaign not found");

    let campaign = db::campaigns::find_by_id(&state.pool, id)
        .await
        .map_err(db_error("find campaign"))?
        .ok_or_else(not_found)?;
    identity.ensure_business(campaign.business_id)?;

    if !db::campaigns::delete(&state.pool, id).await? {
        return Err(not_found());
    }

    Ok(Json(serde_json::json!({
        "message": "Campaign deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::AdminRole;

    fn full_form() -> FormData {
        FormData::from_fields(&[
            ("businessId", "3"),
            ("title", "Kahve Festivali"),
            ("endDate", "2026-12-31"),
            ("rewardValue", "abc"),
            ("isPromoted", "true"),
        ])
    }

    #[test]
    fn test_create_defaults() {
        let input = campaign_from_form(&full_form(), "/uploads/campaigns/x.png".into(), 42).unwrap();
        assert_eq!(input.business_id, 3);
        assert_eq!(input.reward_type, RewardType::Stamp);
        assert_eq!(input.reward_value, 1);
        assert_eq!(input.reward_validity_days, 30);
        assert_eq!(input.icon, "stars_rounded");
        assert_eq!(input.display_order, 0);
        assert_eq!(input.start_date, 42);
        assert!(input.is_promoted);
        assert_eq!(input.short_description, "");
    }

    #[test]
    fn test_create_requires_end_date() {
        let form = FormData::from_fields(&[("businessId", "3"), ("title", "Yaz")]);
        let err = campaign_from_form(&form, String::new(), 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::CampaignFieldsRequired);
        assert_eq!(
            err.message,
            "İşletme Kimliği, Başlık ve Bitiş Tarihi zorunludur."
        );
    }

    #[test]
    fn test_create_rejects_bad_date_and_reward_type() {
        let form = FormData::from_fields(&[
            ("businessId", "3"),
            ("title", "Yaz"),
            ("endDate", "soon"),
        ]);
        let err = campaign_from_form(&form, String::new(), 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDate);

        let form = FormData::from_fields(&[
            ("businessId", "3"),
            ("title", "Yaz"),
            ("endDate", "2026-12-31"),
            ("rewardType", "coupon"),
        ]);
        let err = campaign_from_form(&form, String::new(), 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRewardType);
    }

    fn identity(role: AdminRole, business_id: Option<i64>) -> AdminIdentity {
        AdminIdentity {
            admin_id: 1,
            role,
            business_id,
        }
    }

    #[tokio::test]
    async fn test_target_business_access_checked_before_lookup() {
        // Never connects: access is denied before the query
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/loyalty_test")
            .unwrap();
        let err = ensure_target_business(&identity(AdminRole::Business, Some(3)), &pool, 4)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessAccessDenied);
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_missing_target_business_is_404() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&url).await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let err = ensure_target_business(&identity(AdminRole::SuperAdmin, None), &pool, i64::MAX)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessNotFound);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_patch_parse_fallbacks() {
        let form = FormData::from_fields(&[
            ("displayOrder", "x"),
            ("rewardValue", ""),
            ("isPromoted", "false"),
        ]);
        let patch = patch_from_form(&form).unwrap();
        assert_eq!(patch.display_order, Some(0));
        assert_eq!(patch.reward_value, Some(1));
        assert_eq!(patch.is_promoted, Some(false));
        assert_eq!(patch.title, None);
        assert_eq!(patch.reward_validity_days, None);
    }

    #[test]
    fn test_base_url_and_absolute_image() {
        let mut headers = HeaderMap::new();
        headers.insert("host", "panel.example.com".parse().unwrap());
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        let base = base_url(&headers);
        assert_eq!(base, "https://panel.example.com");

        let campaign = Campaign {
            id: 1,
            business_id: 1,
            title: "t".into(),
            short_description: String::new(),
            header_image: Some("/uploads/campaigns/a.png".into()),
            content: String::new(),
            reward_type: "stamp".into(),
            reward_value: 1,
            reward_validity_days: 30,
            icon: DEFAULT_ICON.into(),
            is_promoted: false,
            display_order: 0,
            start_date: 0,
            end_date: 0,
            created_at: 0,
        };
        let c = with_absolute_image(campaign.clone(), &base);
        assert_eq!(
            c.header_image.as_deref(),
            Some("https://panel.example.com/uploads/campaigns/a.png")
        );

        let remote = Campaign {
            header_image: Some("http://cdn/x.png".into()),
            ..campaign
        };
        let c = with_absolute_image(remote, &base);
        assert_eq!(c.header_image.as_deref(), Some("http://cdn/x.png"));
    }
}
