use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::activity::Activity;

#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn log(&self, activity: &Activity) -> Result<(), DbError>;

    /// Most recent first.
    async fn recent(&self, limit: i64) -> Result<Vec<Activity>, DbError>;

    /// Removes every entry and returns how many were removed.
    async fn clear(&self) -> Result<u64, DbError>;
}

#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for ActivityRepository {
    async fn log(&self, activity: &Activity) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO activities (id, code, success, timestamp, prize_name) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&activity.id)
        .bind(&activity.code)
        .bind(activity.success)
        .bind(activity.timestamp)
        .bind(&activity.prize_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Activity>, DbError> {
        let recs = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, code, success, timestamp, prize_name
            FROM activities
            ORDER BY timestamp DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(recs)
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM activities")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
