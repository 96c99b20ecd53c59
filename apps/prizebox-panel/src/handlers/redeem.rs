use axum::{Json, extract::State};
use serde::Deserialize;

use crate::AppState;
use crate::services::redeem_service::RedeemResult;

#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub code: String,
}

/// POST /api/redeem
pub async fn redeem_code(
    State(state): State<AppState>,
    Json(req): Json<RedeemRequest>,
) -> Json<RedeemResult> {
    Json(state.redeem_service.redeem(&req.code).await)
}
