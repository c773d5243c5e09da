// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Hook settings and push notification endpoints

use crate::error::ServerResult;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use jh_api_contract::{HookSettings, PushEvent, PushResponse, Repository};

pub async fn get_settings(
    State(state): State<AppState>,
    Path((project_key, slug)): Path<(String, String)>,
) -> ServerResult<Json<HookSettings>> {
    let repository = Repository::new(project_key, slug);
    Ok(Json(state.hooks.get_settings(&repository).await?))
}

pub async fn put_settings(
    State(state): State<AppState>,
    Path((project_key, slug)): Path<(String, String)>,
    Json(settings): Json<HookSettings>,
) -> ServerResult<Json<HookSettings>> {
    let repository = Repository::new(project_key, slug);
    Ok(Json(state.hooks.put_settings(&repository, settings).await?))
}

pub async fn delete_settings(
    State(state): State<AppState>,
    Path((project_key, slug)): Path<(String, String)>,
) -> ServerResult<StatusCode> {
    let repository = Repository::new(project_key, slug);
    state.hooks.delete_settings(&repository).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fan a push out to Jenkins
pub async fn push(
    State(state): State<AppState>,
    Path((project_key, slug)): Path<(String, String)>,
    Json(event): Json<PushEvent>,
) -> ServerResult<Json<PushResponse>> {
    let repository = Repository::new(project_key, slug);
    Ok(Json(state.hooks.notify_push(&repository, &event).await?))
}
