//! Dashboard statistics endpoints

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use crate::auth::AdminIdentity;
use crate::error::db_error;
use crate::state::AppState;
use crate::stats::{self, FirmStats, GlobalStats};

use super::ApiResult;

/// Platform-wide stats (super admin)
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/api/dashboard/stats", get(get_stats))
}

/// Per-business stats
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard/firm-stats", get(get_firm_stats))
}

/// GET /api/dashboard/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<GlobalStats> {
    let stats = stats::global_stats(&state.pool, &state.clock, shared::util::now_millis())
        .await
        .map_err(db_error("global stats"))?;
    Ok(Json(stats))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmStatsQuery {
    pub business_id: Option<String>,
}

/// GET /api/dashboard/firm-stats?businessId=
pub async fn get_firm_stats(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Query(query): Query<FirmStatsQuery>,
) -> ApiResult<FirmStats> {
    let business_id = parse_business_id(query.business_id.as_deref())?;
    identity.ensure_business(business_id)?;

    let stats = stats::firm_stats(
        &state.pool,
        &state.clock,
        business_id,
        shared::util::now_millis(),
    )
    .await
    .map_err(db_error("firm stats"))?;
    Ok(Json(stats))
}

/// Required `businessId` query parameter
pub fn parse_business_id(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "Business ID is required"))?;
    raw.parse().map_err(|_| {
        AppError::with_message(ErrorCode::InvalidFormat, "Invalid business ID")
            .with_detail("businessId", raw)
    })
}
