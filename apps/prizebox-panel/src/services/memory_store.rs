//! In-memory stand-in for the PostgreSQL repositories, used by tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prizebox_db::DbError;
use prizebox_db::models::activity::Activity;
use prizebox_db::models::prize::{Prize, PrizeChanges};
use prizebox_db::models::promo::{PromoCode, RedeemOutcome};
use prizebox_db::repositories::activity_repo::ActivityStore;
use prizebox_db::repositories::prize_repo::PrizeStore;
use prizebox_db::repositories::promo_repo::PromoCodeStore;
use prizebox_db::repositories::schema_repo::SchemaStore;
use prizebox_db::schema::Table;
use prizebox_db::seed::{self, SeedRecord};

use super::Stores;

#[derive(Default)]
struct Inner {
    tables: HashSet<Table>,
    prizes: Vec<Prize>,
    codes: Vec<PromoCode>,
    activities: Vec<Activity>,
    fail_creates: bool,
    fail_activity_logs: bool,
    redeem_failure: Option<DbError>,
}

impl Inner {
    fn require(&self, table: Table) -> Result<(), DbError> {
        if self.tables.contains(&table) {
            Ok(())
        } else {
            Err(DbError::MissingSchema {
                table: table.name().to_string(),
            })
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// No tables at all, as on a fresh database.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All tables present and filled with the sample data set.
    pub fn seeded() -> Self {
        let store = Self::empty();
        {
            let mut inner = store.lock();
            inner.tables.extend(Table::ALL);
            for record in seed::sample_records(Utc::now()) {
                match record {
                    SeedRecord::Prize(p) => inner.prizes.push(p),
                    SeedRecord::PromoCode(c) => inner.codes.push(c),
                    SeedRecord::Activity(a) => inner.activities.push(a),
                }
            }
        }
        store
    }

    pub fn into_stores(self: Arc<Self>) -> Stores {
        Stores {
            prizes: self.clone(),
            promo_codes: self.clone(),
            activities: self.clone(),
            schema: self,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn has_table(&self, table: Table) -> bool {
        self.lock().tables.contains(&table)
    }

    pub fn drop_table(&self, table: Table) {
        let mut inner = self.lock();
        inner.tables.remove(&table);
        match table {
            Table::Prizes => inner.prizes.clear(),
            Table::PromoCodes => inner.codes.clear(),
            Table::Activities => inner.activities.clear(),
        }
    }

    pub fn code(&self, code: &str) -> Option<PromoCode> {
        self.lock().codes.iter().find(|c| c.code == code).cloned()
    }

    pub fn prize(&self, id: &str) -> Option<Prize> {
        self.lock().prizes.iter().find(|p| p.id == id).cloned()
    }

    pub fn prizes(&self) -> Vec<Prize> {
        self.lock().prizes.clone()
    }

    pub fn activities(&self) -> Vec<Activity> {
        self.lock().activities.clone()
    }

    pub fn mark_code_redeemed(&self, code: &str) {
        if let Some(c) = self.lock().codes.iter_mut().find(|c| c.code == code) {
            c.is_redeemed = true;
            c.redeemed_at = Some(Utc::now());
        }
    }

    pub fn remove_prize(&self, id: &str) {
        self.lock().prizes.retain(|p| p.id != id);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.lock().fail_creates = fail;
    }

    pub fn fail_activity_logs(&self, fail: bool) {
        self.lock().fail_activity_logs = fail;
    }

    pub fn fail_redeems(&self, failure: Option<DbError>) {
        self.lock().redeem_failure = failure;
    }

    pub async fn list_prizes_raw(&self) -> Result<Vec<Prize>, DbError> {
        self.list_all().await
    }
}

#[async_trait]
impl PrizeStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Prize>, DbError> {
        let inner = self.lock();
        inner.require(Table::Prizes)?;
        let mut prizes = inner.prizes.clone();
        prizes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(prizes)
    }

    async fn update(&self, id: &str, changes: &PrizeChanges) -> Result<bool, DbError> {
        let mut inner = self.lock();
        inner.require(Table::Prizes)?;
        match inner.prizes.iter_mut().find(|p| p.id == id) {
            Some(prize) => {
                changes.apply_to(prize);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl PromoCodeStore for MemoryStore {
    async fn redeem(&self, code: &str, at: DateTime<Utc>) -> Result<RedeemOutcome, DbError> {
        let mut inner = self.lock();
        if let Some(failure) = inner.redeem_failure.clone() {
            return Err(failure);
        }
        inner.require(Table::PromoCodes)?;
        inner.require(Table::Prizes)?;

        let Some(code_idx) = inner.codes.iter().position(|c| c.code == code) else {
            return Ok(RedeemOutcome::InvalidCode);
        };
        if inner.codes[code_idx].is_redeemed {
            return Ok(RedeemOutcome::AlreadyRedeemed);
        }
        let prize_id = inner.codes[code_idx].prize_id.clone();
        let Some(prize_idx) = inner.prizes.iter().position(|p| p.id == prize_id) else {
            return Ok(RedeemOutcome::PrizeNotFound);
        };

        inner.codes[code_idx].is_redeemed = true;
        inner.codes[code_idx].redeemed_at = Some(at);

        let prize = &mut inner.prizes[prize_idx];
        if !prize.redeemed {
            prize.redeemed = true;
            prize.redeemed_at = Some(at);
        }
        let mut redeemed = prize.clone();
        redeemed.redeemed_at = Some(at);
        Ok(RedeemOutcome::Redeemed(redeemed))
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn log(&self, activity: &Activity) -> Result<(), DbError> {
        let mut inner = self.lock();
        if inner.fail_activity_logs {
            return Err(DbError::Connection("activity log unavailable".to_string()));
        }
        inner.require(Table::Activities)?;
        inner.activities.push(activity.clone());
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Activity>, DbError> {
        let inner = self.lock();
        inner.require(Table::Activities)?;
        let mut activities = inner.activities.clone();
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        activities.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(activities)
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let mut inner = self.lock();
        inner.require(Table::Activities)?;
        let removed = inner.activities.len() as u64;
        inner.activities.clear();
        Ok(removed)
    }
}

#[async_trait]
impl SchemaStore for MemoryStore {
    async fn probe(&self, table: Table) -> Result<(), DbError> {
        self.lock().require(table)
    }

    async fn create_table(&self, table: Table) -> Result<(), DbError> {
        let mut inner = self.lock();
        if inner.fail_creates {
            return Err(DbError::Other("permission denied".to_string()));
        }
        inner.tables.insert(table);
        Ok(())
    }

    async fn insert_seed(&self, record: &SeedRecord) -> Result<(), DbError> {
        let mut inner = self.lock();
        inner.require(record.table())?;
        let duplicate = match record {
            SeedRecord::Prize(p) => inner.prizes.iter().any(|x| x.id == p.id),
            SeedRecord::PromoCode(c) => inner.codes.iter().any(|x| x.id == c.id || x.code == c.code),
            SeedRecord::Activity(a) => inner.activities.iter().any(|x| x.id == a.id),
        };
        if duplicate {
            return Err(DbError::Conflict(format!("{} {}", record.table(), record.id())));
        }
        match record {
            SeedRecord::Prize(p) => inner.prizes.push(p.clone()),
            SeedRecord::PromoCode(c) => inner.codes.push(c.clone()),
            SeedRecord::Activity(a) => inner.activities.push(a.clone()),
        }
        Ok(())
    }
}
