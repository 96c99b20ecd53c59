use axum::{
    Json,
    extract::{Query, State},
};
use prizebox_db::models::activity::Activity;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;
use crate::utils::Page;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

/// GET /api/activities?page=
pub async fn list_activities(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<Page<Activity>> {
    Json(state.activity_service.page(params.page.unwrap_or(1)).await)
}

/// DELETE /api/activities
pub async fn clear_activities(State(state): State<AppState>) -> Json<Value> {
    Json(match state.activity_service.clear().await {
        Some(removed) => json!({ "success": true, "removed": removed }),
        None => json!({ "success": false }),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use prizebox_db::schema::Table;

    use crate::handlers::test_support::{app, json_body, send};
    use crate::services::memory_store::MemoryStore;

    #[tokio::test]
    async fn lists_recent_activity_page() {
        let store = Arc::new(MemoryStore::seeded());
        let response = send(app(&store), Method::GET, "/api/activities", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["page"], 1);
        assert_eq!(body["totalItems"], 3);
        assert_eq!(body["items"][0]["code"], "INVALID");
        assert!(body["items"][0].get("prizeName").is_none());
        assert_eq!(body["items"][1]["prizeName"], "10% Discount Coupon");
    }

    #[tokio::test]
    async fn clear_then_list_is_empty_and_clear_again_succeeds() {
        let store = Arc::new(MemoryStore::seeded());

        let cleared = send(app(&store), Method::DELETE, "/api/activities", None).await;
        assert_eq!(cleared.status(), StatusCode::OK);
        let body = json_body(cleared).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["removed"], 3);

        let listed = json_body(send(app(&store), Method::GET, "/api/activities", None).await).await;
        assert_eq!(listed["totalItems"], 0);
        assert_eq!(listed["totalPages"], 0);

        let again = send(app(&store), Method::DELETE, "/api/activities", None).await;
        assert_eq!(again.status(), StatusCode::OK);
        assert_eq!(json_body(again).await["success"], true);
    }

    #[tokio::test]
    async fn clear_reports_failure_when_table_is_gone() {
        let store = Arc::new(MemoryStore::seeded());
        store.drop_table(Table::Activities);

        let response = send(app(&store), Method::DELETE, "/api/activities", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert!(body.get("removed").is_none());
    }
}
