pub mod activity;
pub mod prize;
pub mod promo;
