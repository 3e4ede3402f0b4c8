//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Round timer
        .route("/timer", get(timer_handler))
        .route("/timer/start", post(timer_start_handler))
        .route("/timer/pause", post(timer_pause_handler))
        .route("/timer/toggle", post(timer_toggle_handler))
        .route("/timer/reset", post(timer_reset_handler))
        .route("/timer/config", put(timer_config_handler))
        .route("/timer/config/:field", patch(timer_duration_handler))
        .route("/profiles", get(profiles_handler))
        .route("/profiles/:name", post(profile_apply_handler))
        // Themes
        .route("/themes", get(themes_handler).post(theme_add_handler).delete(theme_delete_handler))
        .route("/themes/current", get(current_theme_handler))
        .route("/themes/select/:name", post(theme_select_handler))
        .route("/themes/export", get(theme_export_handler))
        .route("/themes/import", post(theme_import_handler))
        // External collaborators
        .route("/biometrics", get(biometrics_handler).post(biometrics_update_handler))
        .route("/media", post(media_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
