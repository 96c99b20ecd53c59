use std::sync::Arc;

use chrono::Utc;
use prizebox_db::models::activity::Activity;
use prizebox_db::models::prize::Prize;
use prizebox_db::models::promo::{RedeemOutcome, normalize_code};
use prizebox_db::repositories::promo_repo::PromoCodeStore;
use serde::Serialize;
use tracing::{error, info};

use super::activity_service::ActivityService;
use super::setup_service::SetupService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedeemFailure {
    InvalidCode,
    AlreadyRedeemed,
    PrizeNotFound,
    Unexpected,
}

impl RedeemFailure {
    pub fn message(&self) -> &'static str {
        match self {
            RedeemFailure::InvalidCode => "Invalid promo code. Please check and try again.",
            RedeemFailure::AlreadyRedeemed => "This code has already been redeemed.",
            RedeemFailure::PrizeNotFound => "Prize not found for this code.",
            RedeemFailure::Unexpected => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedeemResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RedeemFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<Prize>,
}

impl RedeemResult {
    fn redeemed(prize: Prize) -> Self {
        Self {
            success: true,
            message: None,
            reason: None,
            prize: Some(prize),
        }
    }

    fn failed(reason: RedeemFailure) -> Self {
        Self {
            success: false,
            message: Some(reason.message().to_string()),
            reason: Some(reason),
            prize: None,
        }
    }
}

pub struct RedeemService {
    codes: Arc<dyn PromoCodeStore>,
    activities: Arc<ActivityService>,
    setup: Arc<SetupService>,
}

impl RedeemService {
    pub fn new(
        codes: Arc<dyn PromoCodeStore>,
        activities: Arc<ActivityService>,
        setup: Arc<SetupService>,
    ) -> Self {
        Self {
            codes,
            activities,
            setup,
        }
    }

    pub async fn redeem(&self, raw_code: &str) -> RedeemResult {
        let code = normalize_code(raw_code);
        let now = Utc::now();

        let outcome = self
            .setup
            .with_setup_retry(|| self.codes.redeem(&code, now))
            .await;

        let (result, activity) = match outcome {
            Ok(RedeemOutcome::Redeemed(prize)) => {
                info!("Code {} redeemed for prize {}", code, prize.id);
                let activity = Activity::succeeded(&code, &prize.name, now);
                (RedeemResult::redeemed(prize), activity)
            }
            Ok(RedeemOutcome::InvalidCode) => (
                RedeemResult::failed(RedeemFailure::InvalidCode),
                Activity::failed(&code, now),
            ),
            Ok(RedeemOutcome::AlreadyRedeemed) => (
                RedeemResult::failed(RedeemFailure::AlreadyRedeemed),
                Activity::failed(&code, now),
            ),
            Ok(RedeemOutcome::PrizeNotFound) => {
                error!("Code {} points at a prize that does not exist", code);
                (
                    RedeemResult::failed(RedeemFailure::PrizeNotFound),
                    Activity::failed(&code, now),
                )
            }
            Err(e) => {
                error!("Error redeeming promo code {}: {}", code, e);
                return RedeemResult::failed(RedeemFailure::Unexpected);
            }
        };

        self.activities.record(&activity).await;
        result
    }
}
