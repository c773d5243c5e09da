// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Clone URL configuration and notification test endpoints

use crate::error::ServerResult;
use crate::state::AppState;
use axum::{
    extract::{rejection::FormRejection, Path, State},
    Form, Json,
};
use jh_api_contract::{CloneConfig, Repository, TestRequest, TestResult};
use tracing::debug;

/// Clone URLs for the repository's hook settings form
pub async fn get_config(
    State(state): State<AppState>,
    Path((project_key, slug)): Path<(String, String)>,
) -> ServerResult<Json<CloneConfig>> {
    let repository = Repository::new(project_key, slug);
    Ok(Json(state.jenkins.config(&repository)?))
}

/// Test a notification configuration against Jenkins
///
/// Always answers 200 for incomplete or unreadable settings; the outcome is
/// in the body.
pub async fn test_notification(
    State(state): State<AppState>,
    Path((project_key, slug)): Path<(String, String)>,
    form: Result<Form<TestRequest>, FormRejection>,
) -> ServerResult<Json<TestResult>> {
    let repository = Repository::new(project_key, slug);
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            debug!(%repository, error = %rejection, "unreadable notification test form");
            return Ok(Json(TestResult::rejected(rejection.body_text())));
        }
    };
    Ok(Json(state.jenkins.test(&repository, &request).await?))
}
