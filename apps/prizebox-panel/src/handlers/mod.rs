pub mod activities;
pub mod health;
pub mod prizes;
pub mod redeem;
pub mod setup;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("prize not found")]
    NotFound,
    #[error("the datastore could not complete the request")]
    Unavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "success": false, "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, Response};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::AppState;
    use crate::config::PanelConfig;
    use crate::services::memory_store::MemoryStore;

    pub fn app(store: &Arc<MemoryStore>) -> Router {
        let config = PanelConfig {
            database_url: "postgres://localhost/prizebox_test".to_string(),
            listen_port: 0,
            max_connections: 1,
            auto_setup: false,
        };
        crate::routes::router(AppState::new(config, store.clone().into_stores()))
    }

    pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    pub async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
