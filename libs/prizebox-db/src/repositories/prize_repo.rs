use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::prize::{Prize, PrizeChanges, PrizeRow};

#[async_trait]
pub trait PrizeStore: Send + Sync {
    /// All prizes, newest first.
    async fn list_all(&self) -> Result<Vec<Prize>, DbError>;

    /// Returns `false` when no prize has this id.
    async fn update(&self, id: &str, changes: &PrizeChanges) -> Result<bool, DbError>;
}

#[derive(Debug, Clone)]
pub struct PrizeRepository {
    pool: PgPool,
}

impl PrizeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Keeps the rows that decode; a bad row is logged and left out of the list.
pub(crate) fn decode_prizes(rows: Vec<PrizeRow>) -> Vec<Prize> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id.clone();
            match Prize::try_from(row) {
                Ok(prize) => Some(prize),
                Err(e) => {
                    tracing::warn!("Skipping prize {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl PrizeStore for PrizeRepository {
    async fn list_all(&self) -> Result<Vec<Prize>, DbError> {
        let rows = sqlx::query_as::<_, PrizeRow>(
            r#"
            SELECT id, name, description, category, value, redeemed, expires_at, redeemed_at, image_url, created_at
            FROM prizes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(decode_prizes(rows))
    }

    async fn update(&self, id: &str, changes: &PrizeChanges) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE prizes
            SET name = $1, description = $2, category = $3, value = $4, redeemed = $5,
                expires_at = $6, redeemed_at = $7, image_url = $8
            WHERE id = $9
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.category.as_str())
        .bind(changes.value)
        .bind(changes.redeemed)
        .bind(changes.expires_at)
        .bind(changes.redeemed_at)
        .bind(&changes.image_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(id: &str, category: &str) -> PrizeRow {
        PrizeRow {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: category.to_string(),
            value: 1,
            redeemed: false,
            expires_at: None,
            redeemed_at: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn decode_skips_bad_rows_and_keeps_order() {
        let prizes = decode_prizes(vec![
            row("a", "discount"),
            row("b", "test"),
            row("c", "special"),
        ]);
        let ids: Vec<&str> = prizes.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
