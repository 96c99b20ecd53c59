use axum::{
    Json,
    extract::{Path, Query, State},
};
use prizebox_db::models::prize::{Prize, PrizeChanges};
use serde_json::{Value, json};

use super::ApiError;
use crate::AppState;
use crate::services::catalog_service::{CatalogQuery, PrizeUpdate};
use crate::utils::Page;

/// GET /api/prizes?search=&filter=&sort=&direction=&page=
pub async fn list_prizes(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Page<Prize>> {
    Json(state.catalog_service.browse(&query).await)
}

/// PUT /api/prizes/{id}
pub async fn update_prize(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(changes): Json<PrizeChanges>,
) -> Result<Json<Value>, ApiError> {
    match state.catalog_service.update_prize(&id, &changes).await {
        PrizeUpdate::Updated => Ok(Json(json!({ "success": true }))),
        PrizeUpdate::NotFound => Err(ApiError::NotFound),
        PrizeUpdate::Failed => Err(ApiError::Unavailable),
    }
}
