//! Handlers for the `/reminders` resource.
//!
//! `GET` runs the sweep over all projects (the external cron calls this),
//! `POST` handles a manual reminder for one project.

use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use validator::Validate;

use crate::dispatch::preview::preview_reminder;
use crate::dispatch::{ManualReminderRequest, ManualReminderResponse, ReminderPreview, SweepSummary};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/reminders
///
/// Run the reminder sweep. A request carrying `Authorization: Bearer
/// <CRON_SECRET>` is treated as a cron invocation and gets no per-project
/// results.
pub async fn run_sweep(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<SweepSummary>> {
    let dispatcher = state.reminder_dispatcher()?;
    let is_cron = is_cron_request(&headers, state.config.cron_secret.as_deref());

    let summary = dispatcher.run_sweep(Utc::now(), is_cron).await?;
    Ok(Json(summary))
}

/// POST /api/v1/reminders
///
/// Send a deadline or payment reminder for a single project.
pub async fn send_manual_reminder(
    State(state): State<AppState>,
    payload: Result<Json<ManualReminderRequest>, JsonRejection>,
) -> AppResult<Json<ManualReminderResponse>> {
    let dispatcher = state.reminder_dispatcher()?;
    let Json(request) = payload?;

    request.project_id()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let response = dispatcher.send_manual(&request, Utc::now()).await?;
    Ok(Json(response))
}

/// GET /api/v1/reminders/{project_id}/preview
///
/// Evaluate one project without sending anything.
pub async fn preview(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<ReminderPreview>> {
    let store = state.project_store()?;
    let preview = preview_reminder(store, &project_id, Utc::now()).await?;
    Ok(Json(preview))
}

/// `true` only when the request carries the configured cron secret.
fn is_cron_request(headers: &HeaderMap, cron_secret: Option<&str>) -> bool {
    let Some(secret) = cron_secret else {
        return false;
    };
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == secret)
}
