use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::DbError;
use crate::models::prize::{Prize, PrizeRow};
use crate::models::promo::RedeemOutcome;

#[async_trait]
pub trait PromoCodeStore: Send + Sync {
    /// Marks `code` (already normalized) redeemed at `at` along with its prize.
    async fn redeem(&self, code: &str, at: DateTime<Utc>) -> Result<RedeemOutcome, DbError>;
}

#[derive(Debug, Clone)]
pub struct PromoCodeRepository {
    pool: PgPool,
}

impl PromoCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A code joined with its prize. Prize columns are NULL when the reference
/// does not resolve.
#[derive(Debug, FromRow)]
struct CodeWithPrizeRow {
    code_id: String,
    code_redeemed: bool,
    prize_id: Option<String>,
    prize_name: Option<String>,
    prize_description: Option<String>,
    prize_category: Option<String>,
    prize_value: Option<i32>,
    prize_redeemed: Option<bool>,
    prize_expires_at: Option<DateTime<Utc>>,
    prize_redeemed_at: Option<DateTime<Utc>>,
    prize_image_url: Option<String>,
    prize_created_at: Option<DateTime<Utc>>,
}

impl CodeWithPrizeRow {
    fn prize_row(&self) -> Option<PrizeRow> {
        Some(PrizeRow {
            id: self.prize_id.clone()?,
            name: self.prize_name.clone()?,
            description: self.prize_description.clone().unwrap_or_default(),
            category: self.prize_category.clone()?,
            value: self.prize_value.unwrap_or_default(),
            redeemed: self.prize_redeemed.unwrap_or(false),
            expires_at: self.prize_expires_at,
            redeemed_at: self.prize_redeemed_at,
            image_url: self.prize_image_url.clone(),
            created_at: self.prize_created_at.unwrap_or_else(Utc::now),
        })
    }
}

#[async_trait]
impl PromoCodeStore for PromoCodeRepository {
    async fn redeem(&self, code: &str, at: DateTime<Utc>) -> Result<RedeemOutcome, DbError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CodeWithPrizeRow>(
            r#"
            SELECT c.id AS code_id, c.is_redeemed AS code_redeemed,
                   p.id AS prize_id, p.name AS prize_name, p.description AS prize_description,
                   p.category AS prize_category, p.value AS prize_value, p.redeemed AS prize_redeemed,
                   p.expires_at AS prize_expires_at, p.redeemed_at AS prize_redeemed_at,
                   p.image_url AS prize_image_url, p.created_at AS prize_created_at
            FROM promo_codes c
            LEFT JOIN prizes p ON p.id = c.prize_id
            WHERE c.code = $1
            FOR UPDATE OF c
            "#,
        )
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping `tx` on the early returns rolls the row lock back.
        let Some(row) = row else {
            return Ok(RedeemOutcome::InvalidCode);
        };
        if row.code_redeemed {
            return Ok(RedeemOutcome::AlreadyRedeemed);
        }
        let Some(prize_row) = row.prize_row() else {
            return Ok(RedeemOutcome::PrizeNotFound);
        };
        let mut prize = Prize::try_from(prize_row)?;

        let updated = sqlx::query(
            "UPDATE promo_codes SET is_redeemed = TRUE, redeemed_at = $1 WHERE id = $2 AND is_redeemed = FALSE",
        )
        .bind(at)
        .bind(&row.code_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(RedeemOutcome::AlreadyRedeemed);
        }

        if !prize.redeemed {
            sqlx::query("UPDATE prizes SET redeemed = TRUE, redeemed_at = $1 WHERE id = $2")
                .bind(at)
                .bind(&prize.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        prize.redeemed = true;
        prize.redeemed_at = Some(at);
        Ok(RedeemOutcome::Redeemed(prize))
    }
}
