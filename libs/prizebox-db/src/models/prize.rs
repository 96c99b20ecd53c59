use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::DbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeCategory {
    Discount,
    Reward,
    Special,
    Other,
}

impl PrizeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrizeCategory::Discount => "discount",
            PrizeCategory::Reward => "reward",
            PrizeCategory::Special => "special",
            PrizeCategory::Other => "other",
        }
    }
}

impl fmt::Display for PrizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrizeCategory {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discount" => Ok(PrizeCategory::Discount),
            "reward" => Ok(PrizeCategory::Reward),
            "special" => Ok(PrizeCategory::Special),
            "other" => Ok(PrizeCategory::Other),
            other => Err(DbError::Decode(format!("unknown prize category `{}`", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: PrizeCategory,
    pub value: i32,
    pub redeemed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeemed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw `prizes` row as stored; converted into [`Prize`] with validation.
#[derive(Debug, Clone, FromRow)]
pub struct PrizeRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub value: i32,
    pub redeemed: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PrizeRow> for Prize {
    type Error = DbError;

    fn try_from(row: PrizeRow) -> Result<Self, Self::Error> {
        if row.id.trim().is_empty() {
            return Err(DbError::Decode("prize row with empty id".to_string()));
        }
        let category = row.category.parse::<PrizeCategory>()?;

        Ok(Prize {
            id: row.id,
            name: row.name,
            description: row.description,
            category,
            value: row.value,
            redeemed: row.redeemed,
            expires_at: row.expires_at,
            redeemed_at: row.redeemed_at,
            // Empty strings are how the old frontend stored "no image"
            image_url: row.image_url.filter(|url| !url.trim().is_empty()),
            created_at: row.created_at,
        })
    }
}

/// Editable fields of a prize; `id` and `created_at` never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizeChanges {
    pub name: String,
    pub description: String,
    pub category: PrizeCategory,
    pub value: i32,
    pub redeemed: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub redeemed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PrizeChanges {
    pub fn apply_to(&self, prize: &mut Prize) {
        prize.name = self.name.clone();
        prize.description = self.description.clone();
        prize.category = self.category;
        prize.value = self.value;
        prize.redeemed = self.redeemed;
        prize.expires_at = self.expires_at;
        prize.redeemed_at = self.redeemed_at;
        prize.image_url = self.image_url.clone();
    }
}
