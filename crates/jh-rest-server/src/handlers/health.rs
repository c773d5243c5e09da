// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Health check endpoints

use crate::ServerResult;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Readiness response, including the host's SSH state
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub status: String,
    pub ssh_enabled: bool,
    pub timestamp: String,
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> ServerResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> ServerResult<Json<ReadinessResponse>> {
    Ok(Json(ReadinessResponse {
        status: "ready".to_string(),
        ssh_enabled: state.host.ssh_config.is_enabled(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Version endpoint
pub async fn version() -> ServerResult<Json<VersionResponse>> {
    Ok(Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
