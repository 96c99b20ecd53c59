use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;
use crate::handlers;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/redeem", post(handlers::redeem::redeem_code))
        .route("/prizes", get(handlers::prizes::list_prizes))
        .route("/prizes/{id}", put(handlers::prizes::update_prize))
        .route(
            "/activities",
            get(handlers::activities::list_activities)
                .delete(handlers::activities::clear_activities),
        )
        .route("/setup-database", get(handlers::setup::setup_database))
        .route("/setup-database/status", get(handlers::setup::setup_status));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
