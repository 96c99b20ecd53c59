use axum::Json;
use serde_json::{Value, json};

use crate::utils::current_version;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": current_version(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok_with_version() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "ok");
        assert!(body["version"].as_str().unwrap().starts_with('v'));
    }
}
