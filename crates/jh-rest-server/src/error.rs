// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server error types and handling

use crate::host::{PermissionError, SshError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jh_api_contract::{ApiContractError, ProblemDetails};

/// Server result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
///
/// Validation failures of the notification test are not errors: they are
/// reported inside a `TestResult`. Everything here becomes Problem+JSON.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Authorization error: {0}")]
    Authorization(#[from] PermissionError),

    #[error("Validation error: {0}")]
    Validation(#[from] ApiContractError),

    #[error("No hook settings for repository {0}")]
    SettingsNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("SSH error: {0}")]
    Ssh(#[from] SshError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    fn problem(problem_type: &str, title: &str, status: StatusCode, detail: String) -> ProblemDetails {
        ProblemDetails {
            problem_type: format!("https://docs.example.com/errors/{}", problem_type),
            title: title.to_string(),
            status: Some(status.as_u16()),
            detail,
            errors: Default::default(),
        }
    }

    /// Convert error to Problem+JSON response
    pub fn to_problem(&self) -> ProblemDetails {
        match self {
            ServerError::Auth(msg) => Self::problem(
                "auth",
                "Authentication Failed",
                StatusCode::UNAUTHORIZED,
                msg.clone(),
            ),
            ServerError::Authorization(err) => Self::problem(
                "authz",
                "Authorization Failed",
                StatusCode::FORBIDDEN,
                err.to_string(),
            ),
            ServerError::Validation(err) => {
                let mut problem = Self::problem(
                    "validation",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    err.to_string(),
                );
                if let ApiContractError::Validation(errors) = err {
                    problem.detail = "Request validation failed".to_string();
                    problem.errors = ProblemDetails::field_errors(errors);
                }
                problem
            }
            ServerError::SettingsNotFound(repository) => Self::problem(
                "not-found",
                "Hook Settings Not Found",
                StatusCode::NOT_FOUND,
                format!("Repository '{}' has no Jenkins hook settings", repository),
            ),
            ServerError::BadRequest(msg) => Self::problem(
                "bad-request",
                "Bad Request",
                StatusCode::BAD_REQUEST,
                msg.clone(),
            ),
            ServerError::Ssh(err) => Self::problem(
                "ssh",
                "SSH Clone URL Unavailable",
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
            ),
            ServerError::Internal(msg) => Self::problem(
                "internal",
                "Internal Server Error",
                StatusCode::INTERNAL_SERVER_ERROR,
                msg.clone(),
            ),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let problem = self.to_problem();
        let status = StatusCode::from_u16(problem.status.unwrap_or(500))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(problem)).into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {}", err))
    }
}
