// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! API key authentication

use crate::error::ServerError;
use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Paths reachable without credentials
const PUBLIC_PATHS: &[&str] = &["/healthz", "/readyz", "/version"];

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub api_key: Option<String>,
}

impl AuthConfig {
    /// Validate the `Authorization` header value
    pub fn validate_header(&self, header: Option<&str>) -> Result<(), ServerError> {
        let Some(expected) = &self.api_key else {
            return Ok(());
        };

        match header.and_then(|h| h.strip_prefix("ApiKey ")) {
            Some(provided) if provided == expected => Ok(()),
            Some(_) => Err(ServerError::Auth("Invalid API key".to_string())),
            None => Err(ServerError::Auth(
                "Missing or invalid authorization header".to_string(),
            )),
        }
    }
}

/// Authentication middleware
pub async fn auth_middleware(auth_config: AuthConfig, req: Request, next: Next) -> Response {
    if PUBLIC_PATHS.contains(&req.uri().path()) {
        return next.run(req).await;
    }

    let auth_header = req.headers().get(header::AUTHORIZATION).and_then(|h| h.to_str().ok());

    match auth_config.validate_header(auth_header) {
        Ok(()) => next.run(req).await,
        Err(err) => {
            tracing::debug!(path = %req.uri().path(), error = %err, "rejecting unauthenticated request");
            err.into_response()
        }
    }
}
