pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod seed;

pub use error::DbError;
pub use sqlx;
