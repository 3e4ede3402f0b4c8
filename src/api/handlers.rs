//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    services::{HealthReading, MediaCommand},
    state::{AppState, TimerConfig, TimerField, TimerSnapshot, PROFILES},
    theme::PersistedTheme,
};
use super::responses::{
    AddThemeRequest, DeleteThemesRequest, DeleteThemesResponse, DurationEdit, HealthResponse,
    ImportResponse, ProfilesResponse, StatusResponse, ThemeResponse, ThemesResponse, TimerResponse,
};

fn timer_reply(result: Result<TimerSnapshot, String>, message: &str) -> Result<Json<TimerResponse>, StatusCode> {
    match result {
        Ok(snapshot) => Ok(Json(TimerResponse::new(message.to_string(), snapshot))),
        Err(e) => {
            error!("Timer action failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /timer - Return the current timer snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply(state.get_timer_snapshot(), "Current timer")
}

/// Handle POST /timer/start
pub async fn timer_start_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply(state.start_timer(), "Timer started")
}

/// Handle POST /timer/pause
pub async fn timer_pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply(state.pause_timer(), "Timer paused")
}

/// Handle POST /timer/toggle - Start or pause depending on the run flag
pub async fn timer_toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply(state.toggle_timer(), "Timer toggled")
}

/// Handle POST /timer/reset
pub async fn timer_reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply(state.reset_timer(), "Timer reset")
}

/// Handle PUT /timer/config - Replace the whole configuration
pub async fn timer_config_handler(
    State(state): State<Arc<AppState>>,
    Json(config): Json<TimerConfig>,
) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply(state.configure_timer(config), "Timer configured")
}

/// Handle PATCH /timer/config/:field - Edit one duration as minutes and seconds
pub async fn timer_duration_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<TimerField>,
    Json(edit): Json<DurationEdit>,
) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply(
        state.set_timer_duration(field, edit.total_seconds()),
        &format!("{:?} duration set to {}s", field, edit.total_seconds()),
    )
}

/// Handle GET /profiles
pub async fn profiles_handler() -> Json<ProfilesResponse> {
    Json(ProfilesResponse { profiles: PROFILES.to_vec() })
}

/// Handle POST /profiles/:name - Apply a profile and reset the timer
pub async fn profile_apply_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TimerResponse>, StatusCode> {
    match state.apply_profile(&name) {
        Ok(Some(snapshot)) => {
            info!("Applied timer profile {}", name);
            Ok(Json(TimerResponse::new(format!("Profile {} applied", name), snapshot)))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to apply profile {}: {}", name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /themes - List every theme and the selection
pub async fn themes_handler(State(state): State<Arc<AppState>>) -> Result<Json<ThemesResponse>, StatusCode> {
    match state.get_themes() {
        Ok((themes, selected)) => Ok(Json(ThemesResponse {
            selected,
            builtin_count: state.builtin_theme_count(),
            themes: themes.iter().map(PersistedTheme::from).collect(),
            timestamp: Utc::now(),
        })),
        Err(e) => {
            error!("Failed to list themes: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /themes/current
pub async fn current_theme_handler(State(state): State<Arc<AppState>>) -> Result<Json<ThemeResponse>, StatusCode> {
    match state.current_theme() {
        Ok(theme) => Ok(Json(ThemeResponse::new("Current theme".to_string(), PersistedTheme::from(&theme)))),
        Err(e) => {
            error!("Failed to read current theme: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /themes/select/:name
///
/// Unknown names leave the selection unchanged; the response always carries
/// the theme actually in use.
pub async fn theme_select_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ThemeResponse>, StatusCode> {
    let message = match state.select_theme(&name) {
        Ok(true) => format!("Theme {} selected", name),
        Ok(false) => {
            warn!("Select called with unknown theme {}", name);
            format!("Theme {} not found, selection unchanged", name)
        }
        Err(e) => {
            error!("Failed to select theme: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match state.current_theme() {
        Ok(theme) => Ok(Json(ThemeResponse::new(message, PersistedTheme::from(&theme)))),
        Err(e) => {
            error!("Failed to read current theme: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /themes - Add a copy of the current or a named theme
pub async fn theme_add_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<AddThemeRequest>>,
) -> Result<Json<ThemeResponse>, StatusCode> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    match state.add_theme(request.copy_from.as_deref()) {
        Ok(Some(theme)) => Ok(Json(ThemeResponse::new(
            format!("Theme {} added", theme.name),
            PersistedTheme::from(&theme),
        ))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to add theme: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle DELETE /themes - Remove themes by position
pub async fn theme_delete_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeleteThemesRequest>,
) -> Result<Json<DeleteThemesResponse>, StatusCode> {
    let removed = match state.delete_themes(&request.indices) {
        Ok(removed) => removed,
        Err(e) => {
            error!("Failed to delete themes: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match state.get_themes() {
        Ok((_, selected)) => Ok(Json(DeleteThemesResponse {
            removed,
            selected,
            timestamp: Utc::now(),
        })),
        Err(e) => {
            error!("Failed to read selection: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /themes/export - Download every theme as JSON
pub async fn theme_export_handler(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, StatusCode> {
    match state.export_themes() {
        Ok(bytes) => Ok((
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"themes.json\""),
            ],
            bytes,
        )),
        Err(e) => {
            error!("Failed to export themes: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /themes/import - Merge themes from a JSON export
pub async fn theme_import_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ImportResponse>, StatusCode> {
    match state.import_themes(&body) {
        Ok(added) => Ok(Json(ImportResponse { added, timestamp: Utc::now() })),
        Err(e) => {
            error!("Failed to import themes: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /biometrics - Latest health reading
pub async fn biometrics_handler(State(state): State<Arc<AppState>>) -> Json<HealthReading> {
    Json(state.latest_health())
}

/// Handle POST /biometrics - Push a reading from the health data source
pub async fn biometrics_update_handler(
    State(state): State<Arc<AppState>>,
    Json(reading): Json<HealthReading>,
) -> Result<Json<HealthReading>, StatusCode> {
    match state.update_health(reading) {
        Ok(()) => Ok(Json(reading)),
        Err(e) => {
            error!("Failed to store health reading: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /media - Relay a playback command
pub async fn media_handler(
    State(state): State<Arc<AppState>>,
    Json(command): Json<MediaCommand>,
) -> Result<Json<MediaCommand>, StatusCode> {
    match state.send_media(command) {
        Ok(()) => Ok(Json(command)),
        Err(e) => {
            error!("Media transport rejected {:?}: {}", command, e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

/// Handle GET /status - Return current timer, theme and health status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let selected_theme = match state.get_themes() {
        Ok((_, selected)) => selected,
        Err(e) => {
            error!("Failed to get theme selection: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        selected_theme,
        biometrics: state.latest_health(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
