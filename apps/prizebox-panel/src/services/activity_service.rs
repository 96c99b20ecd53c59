use std::sync::Arc;

use prizebox_db::models::activity::Activity;
use prizebox_db::repositories::activity_repo::ActivityStore;
use tracing::{error, warn};

use super::setup_service::SetupService;
use crate::utils::{PAGE_SIZE, Page, paginate};

/// Size of the rolling window shown to visitors.
pub const RECENT_LIMIT: i64 = 50;

pub struct ActivityService {
    store: Arc<dyn ActivityStore>,
    setup: Arc<SetupService>,
}

impl ActivityService {
    pub fn new(store: Arc<dyn ActivityStore>, setup: Arc<SetupService>) -> Self {
        Self { store, setup }
    }

    /// Appends one entry. A failed write is logged and otherwise ignored.
    pub async fn record(&self, activity: &Activity) {
        if let Err(e) = self.store.log(activity).await {
            warn!("Error logging activity for code {}: {}", activity.code, e);
        }
    }

    pub async fn recent(&self) -> Vec<Activity> {
        match self
            .setup
            .with_setup_retry(|| self.store.recent(RECENT_LIMIT))
            .await
        {
            Ok(activities) => activities,
            Err(e) => {
                error!("Failed to fetch activities: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn page(&self, page: usize) -> Page<Activity> {
        paginate(self.recent().await, page, PAGE_SIZE)
    }

    /// Empties the log. `None` when the datastore refused.
    pub async fn clear(&self) -> Option<u64> {
        match self.store.clear().await {
            Ok(removed) => Some(removed),
            Err(e) => {
                error!("Failed to clear activities: {}", e);
                None
            }
        }
    }
}
