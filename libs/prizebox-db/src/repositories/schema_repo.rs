use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbError;
use crate::schema::Table;
use crate::seed::SeedRecord;

/// Table provisioning used by the setup procedure.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// Reads at most one row; fails with `MissingSchema` when the table is absent.
    async fn probe(&self, table: Table) -> Result<(), DbError>;

    async fn create_table(&self, table: Table) -> Result<(), DbError>;

    /// Plain insert; an existing id surfaces as `DbError::Conflict`.
    async fn insert_seed(&self, record: &SeedRecord) -> Result<(), DbError>;
}

#[derive(Debug, Clone)]
pub struct SchemaRepository {
    pool: PgPool,
}

impl SchemaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaStore for SchemaRepository {
    async fn probe(&self, table: Table) -> Result<(), DbError> {
        // Table names come from the closed `Table` enum, never from input.
        let sql = format!("SELECT 1 FROM {} LIMIT 1", table.name());
        sqlx::query(&sql).fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn create_table(&self, table: Table) -> Result<(), DbError> {
        sqlx::query(table.ddl()).execute(&self.pool).await?;
        tracing::info!("Created table {}", table);
        Ok(())
    }

    async fn insert_seed(&self, record: &SeedRecord) -> Result<(), DbError> {
        match record {
            SeedRecord::Prize(p) => {
                sqlx::query(
                    r#"
                    INSERT INTO prizes (id, name, description, category, value, redeemed, expires_at, redeemed_at, image_url, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    "#,
                )
                .bind(&p.id)
                .bind(&p.name)
                .bind(&p.description)
                .bind(p.category.as_str())
                .bind(p.value)
                .bind(p.redeemed)
                .bind(p.expires_at)
                .bind(p.redeemed_at)
                .bind(&p.image_url)
                .bind(p.created_at)
                .execute(&self.pool)
                .await?;
            }
            SeedRecord::PromoCode(c) => {
                sqlx::query(
                    r#"
                    INSERT INTO promo_codes (id, code, prize_id, is_redeemed, created_at, redeemed_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(&c.id)
                .bind(&c.code)
                .bind(&c.prize_id)
                .bind(c.is_redeemed)
                .bind(c.created_at)
                .bind(c.redeemed_at)
                .execute(&self.pool)
                .await?;
            }
            SeedRecord::Activity(a) => {
                sqlx::query(
                    "INSERT INTO activities (id, code, success, timestamp, prize_name) VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(&a.id)
                .bind(&a.code)
                .bind(a.success)
                .bind(a.timestamp)
                .bind(&a.prize_name)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }
}
