pub mod activity_service;
pub mod catalog_service;
pub mod redeem_service;
pub mod setup_service;

#[cfg(test)]
pub mod memory_store;

use std::sync::Arc;

use prizebox_db::repositories::activity_repo::{ActivityRepository, ActivityStore};
use prizebox_db::repositories::prize_repo::{PrizeRepository, PrizeStore};
use prizebox_db::repositories::promo_repo::{PromoCodeRepository, PromoCodeStore};
use prizebox_db::repositories::schema_repo::{SchemaRepository, SchemaStore};
use prizebox_db::sqlx::PgPool;

/// The datastore seams every service is built from.
#[derive(Clone)]
pub struct Stores {
    pub prizes: Arc<dyn PrizeStore>,
    pub promo_codes: Arc<dyn PromoCodeStore>,
    pub activities: Arc<dyn ActivityStore>,
    pub schema: Arc<dyn SchemaStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            prizes: Arc::new(PrizeRepository::new(pool.clone())),
            promo_codes: Arc::new(PromoCodeRepository::new(pool.clone())),
            activities: Arc::new(ActivityRepository::new(pool.clone())),
            schema: Arc::new(SchemaRepository::new(pool)),
        }
    }
}
