use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use prizebox_db::DbError;
use prizebox_db::repositories::schema_repo::SchemaStore;
use prizebox_db::schema::Table;
use prizebox_db::seed::{self, SeedRecord};
use tracing::{error, info, warn};

/// Whether this process has already tried to provision the database.
#[derive(Debug, Default)]
pub struct SetupState {
    attempted: AtomicBool,
}

impl SetupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_attempted(&self) -> bool {
        self.attempted.load(Ordering::SeqCst)
    }

    /// Claims the attempt; `true` only for the first caller.
    fn claim(&self) -> bool {
        !self.attempted.swap(true, Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn reset(&self) {
        self.attempted.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupReport {
    /// Failures that were not tolerated, one line each.
    pub failures: Vec<String>,
}

impl SetupReport {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct SetupService {
    schema: Arc<dyn SchemaStore>,
    state: SetupState,
}

impl SetupService {
    pub fn new(schema: Arc<dyn SchemaStore>) -> Self {
        Self {
            schema,
            state: SetupState::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SetupState {
        &self.state
    }

    pub async fn setup_needed(&self) -> bool {
        if self.state.has_attempted() {
            return false;
        }

        match self.schema.probe(Table::Prizes).await {
            Ok(()) => false,
            Err(e) if e.is_missing_schema() => true,
            Err(e) => {
                warn!("Could not check whether setup is needed: {}", e);
                false
            }
        }
    }

    pub async fn setup(&self) -> bool {
        self.setup_report().await.success()
    }

    pub async fn setup_report(&self) -> SetupReport {
        self.state.claim();
        self.run().await
    }

    /// Runs setup only if no attempt has been made yet. Returns whether it ran.
    pub async fn setup_once(&self) -> bool {
        if !self.state.claim() {
            return false;
        }
        let report = self.run().await;
        if !report.success() {
            warn!("Automatic setup finished with {} failure(s)", report.failures.len());
        }
        true
    }

    /// Runs `op`; on a missing table, provisions once and retries `op` once.
    pub async fn with_setup_retry<T, F, Fut>(&self, op: F) -> Result<T, DbError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, DbError>>,
    {
        match op().await {
            Err(e) if e.is_missing_schema() => {
                warn!("{}; attempting database setup", e);
                if self.setup_once().await {
                    op().await
                } else {
                    Err(e)
                }
            }
            other => other,
        }
    }

    async fn run(&self) -> SetupReport {
        info!("Setting up database...");
        let now = Utc::now();
        let mut report = SetupReport::default();

        for table in Table::ALL {
            match self.schema.probe(table).await {
                Ok(()) => info!("Table {} already exists", table),
                Err(e) if e.is_missing_schema() => {
                    info!("Table {} is missing, creating it", table);
                    if let Err(e) = self.schema.create_table(table).await {
                        error!("Error creating table {}: {}", table, e);
                        report.failures.push(format!("create {}: {}", table, e));
                        continue;
                    }
                    for record in seed::marker_records(table, now) {
                        self.insert(&record, &mut report).await;
                    }
                }
                Err(e) => {
                    error!("Error checking table {}: {}", table, e);
                    report.failures.push(format!("probe {}: {}", table, e));
                }
            }
        }

        for record in seed::sample_records(now) {
            self.insert(&record, &mut report).await;
        }

        if report.success() {
            info!("Database setup completed");
        }
        report
    }

    async fn insert(&self, record: &SeedRecord, report: &mut SetupReport) {
        match self.schema.insert_seed(record).await {
            Ok(()) => {}
            Err(e) if e.is_conflict() => {}
            Err(e) => {
                error!("Error inserting {} {}: {}", record.table(), record.id(), e);
                report
                    .failures
                    .push(format!("insert {} {}: {}", record.table(), record.id(), e));
            }
        }
    }
}
