pub mod auth;
pub mod error;
mod recipes;
mod validation;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/check_session", get(auth::check_session))
        .route("/login", post(auth::login))
        .route("/logout", delete(auth::logout))
        .route("/recipes", get(recipes::list_recipes).post(recipes::create_recipe))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
