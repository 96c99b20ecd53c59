use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use prizebox_db::models::prize::{Prize, PrizeCategory, PrizeChanges};
use prizebox_db::repositories::prize_repo::PrizeStore;
use serde::Deserialize;
use tracing::error;

use super::setup_service::SetupService;
use crate::utils::{PAGE_SIZE, Page, paginate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeFilter {
    #[default]
    All,
    Available,
    Redeemed,
    Discount,
    Reward,
    Special,
}

impl PrizeFilter {
    pub fn matches(&self, prize: &Prize) -> bool {
        match self {
            PrizeFilter::All => true,
            PrizeFilter::Available => !prize.redeemed,
            PrizeFilter::Redeemed => prize.redeemed,
            PrizeFilter::Discount => prize.category == PrizeCategory::Discount,
            PrizeFilter::Reward => prize.category == PrizeCategory::Reward,
            PrizeFilter::Special => prize.category == PrizeCategory::Special,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Redemption time; unredeemed prizes count as redeemed "now".
    #[default]
    Date,
    Name,
    Value,
    Category,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub filter: PrizeFilter,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub page: Option<usize>,
}

fn matches_search(prize: &Prize, needle: &str) -> bool {
    prize.name.to_lowercase().contains(needle) || prize.description.to_lowercase().contains(needle)
}

fn compare(a: &Prize, b: &Prize, key: SortKey, now: DateTime<Utc>) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Date => a
            .redeemed_at
            .unwrap_or(now)
            .cmp(&b.redeemed_at.unwrap_or(now)),
        SortKey::Value => a.value.cmp(&b.value),
        SortKey::Category => a.category.as_str().cmp(b.category.as_str()),
    }
}

/// Search, filter and sort; `now` stands in for a missing redemption time.
/// The sort is stable, so ties keep their incoming order in both directions.
pub fn apply(prizes: Vec<Prize>, query: &CatalogQuery, now: DateTime<Utc>) -> Vec<Prize> {
    let needle = query
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());

    let mut selected: Vec<Prize> = prizes
        .into_iter()
        .filter(|p| needle.as_deref().is_none_or(|n| matches_search(p, n)))
        .filter(|p| query.filter.matches(p))
        .collect();

    selected.sort_by(|a, b| {
        let ord = compare(a, b, query.sort, now);
        match query.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    selected
}

pub enum PrizeUpdate {
    Updated,
    NotFound,
    Failed,
}

pub struct CatalogService {
    store: Arc<dyn PrizeStore>,
    setup: Arc<SetupService>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn PrizeStore>, setup: Arc<SetupService>) -> Self {
        Self { store, setup }
    }

    pub async fn all_prizes(&self) -> Vec<Prize> {
        match self.setup.with_setup_retry(|| self.store.list_all()).await {
            Ok(prizes) => prizes,
            Err(e) => {
                error!("Failed to fetch prizes: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn browse(&self, query: &CatalogQuery) -> Page<Prize> {
        let prizes = apply(self.all_prizes().await, query, Utc::now());
        paginate(prizes, query.page.unwrap_or(1), PAGE_SIZE)
    }

    pub async fn update_prize(&self, id: &str, changes: &PrizeChanges) -> PrizeUpdate {
        match self.store.update(id, changes).await {
            Ok(true) => PrizeUpdate::Updated,
            Ok(false) => PrizeUpdate::NotFound,
            Err(e) => {
                error!("Failed to update prize {}: {}", id, e);
                PrizeUpdate::Failed
            }
        }
    }
}
