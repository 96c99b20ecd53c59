use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::prize::Prize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub id: String,
    pub code: String,
    pub prize_id: String,
    pub is_redeemed: bool,
    pub created_at: DateTime<Utc>,
    pub redeemed_at: Option<DateTime<Utc>>,
}

/// What happened to a single redemption attempt at the datastore.
#[derive(Debug, Clone, PartialEq)]
pub enum RedeemOutcome {
    /// Code flipped to redeemed; carries the prize as it now reads.
    Redeemed(Prize),
    InvalidCode,
    AlreadyRedeemed,
    PrizeNotFound,
}

/// Codes are stored upper-case; user input is trimmed and upper-cased
/// before any lookup.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}
