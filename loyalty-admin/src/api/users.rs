//! Customer and wallet management (super admin)

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Customer, CustomerUpdate, WalletEntry, WalletUpdate};

use crate::db;
use crate::error::db_error;
use crate::state::AppState;

use super::ApiResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users))
        .route(
            "/api/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/api/users/{id}/cafes", get(list_cafes))
        .route(
            "/api/users/{user_id}/wallet/{record_id}",
            patch(update_wallet).delete(delete_wallet),
        )
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<Customer>> {
    let users = db::customers::list(&state.pool)
        .await
        .map_err(db_error("list users"))?;
    Ok(Json(users))
}

async fn load_customer(state: &AppState, id: i64) -> Result<Customer, AppError> {
    db::customers::find_by_id(&state.pool, id)
        .await
        .map_err(db_error("find user"))?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))
}

/// GET /api/users/{id}
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Customer> {
    Ok(Json(load_customer(&state, id).await?))
}

/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<CustomerUpdate>,
) -> ApiResult<Customer> {
    let mut customer = load_customer(&state, id).await?;
    update
        .apply(&mut customer)
        .ok_or_else(|| AppError::new(ErrorCode::InvalidGender))?;

    let updated = db::customers::update_profile(&state.pool, &customer)
        .await
        .map_err(db_error("update user"))?;
    Ok(Json(updated))
}

#[derive(Serialize)]
pub struct DeletedUser {
    pub id: i64,
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserResponse {
    pub message: String,
    pub deleted_user: DeletedUser,
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<DeleteUserResponse> {
    let (id, email) = db::customers::delete_cascade(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    Ok(Json(DeleteUserResponse {
        message: "User and all associated data deleted successfully".to_string(),
        deleted_user: DeletedUser { id, email },
    }))
}

/// GET /api/users/{id}/cafes
pub async fn list_cafes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<WalletEntry>> {
    let wallets = db::wallets::list_for_customer(&state.pool, id)
        .await
        .map_err(db_error("list wallets"))?;
    Ok(Json(wallets))
}

#[derive(Serialize)]
pub struct WalletUpdateResponse {
    pub message: String,
    pub record: WalletEntry,
}

/// PATCH /api/users/{user_id}/wallet/{record_id}
pub async fn update_wallet(
    State(state): State<AppState>,
    Path((user_id, record_id)): Path<(i64, i64)>,
    Json(update): Json<WalletUpdate>,
) -> ApiResult<WalletUpdateResponse> {
    let mut entry = db::wallets::find_for_customer(&state.pool, user_id, record_id)
        .await
        .map_err(db_error("find wallet"))?
        .ok_or_else(|| AppError::new(ErrorCode::WalletNotFound))?;

    let balance = entry
        .wallet
        .balance()
        .apply(&update)
        .map_err(AppError::new)?;

    db::wallets::update_balance(&state.pool, record_id, &balance)
        .await
        .map_err(db_error("update wallet"))?;

    entry.wallet.points = balance.points;
    entry.wallet.stamps = balance.stamps;
    entry.wallet.gifts_count = balance.gifts_count;

    tracing::info!(
        wallet_id = record_id,
        stamps = balance.stamps,
        gifts = balance.gifts_count,
        "Wallet updated"
    );

    Ok(Json(WalletUpdateResponse {
        message: "Wallet updated successfully".to_string(),
        record: entry,
    }))
}

/// DELETE /api/users/{user_id}/wallet/{record_id}
pub async fn delete_wallet(
    State(state): State<AppState>,
    Path((user_id, record_id)): Path<(i64, i64)>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::wallets::delete_for_customer(&state.pool, user_id, record_id)
        .await
        .map_err(db_error("delete wallet"))?;
    if !deleted {
        return Err(AppError::new(ErrorCode::WalletNotFound));
    }

    Ok(Json(serde_json::json!({
        "message": "Business removed from user wallet"
    })))
}
