use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub code: String,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_name: Option<String>,
}

impl Activity {
    pub fn succeeded(code: &str, prize_name: &str, at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code: code.to_string(),
            success: true,
            timestamp: at,
            prize_name: Some(prize_name.to_string()),
        }
    }

    pub fn failed(code: &str, at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code: code.to_string(),
            success: false,
            timestamp: at,
            prize_name: None,
        }
    }
}
