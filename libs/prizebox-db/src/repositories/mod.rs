pub mod activity_repo;
pub mod prize_repo;
pub mod promo_repo;
pub mod schema_repo;
