use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::{Value, json};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// GET /api/setup-database
pub async fn setup_database(State(state): State<AppState>) -> Json<SetupResponse> {
    let report = state.setup_service.setup_report().await;

    Json(if report.success() {
        SetupResponse {
            success: true,
            message: "Database setup completed successfully",
            details: None,
        }
    } else {
        SetupResponse {
            success: false,
            message: "Failed to set up database",
            details: Some(report.failures.join("; ")),
        }
    })
}

/// GET /api/setup-database/status
pub async fn setup_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "setupNeeded": state.setup_service.setup_needed().await }))
}
