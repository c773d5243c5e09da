// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Jenkins hook REST API contract types and validation
//!
//! These types are shared between the REST server, its handlers and the
//! integration tests. They describe the clone-URL configuration payload,
//! the ad-hoc notification test request and the persisted hook settings.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;

/// Generate OpenAPI schema for the API contract types
#[cfg(feature = "utoipa")]
pub fn openapi_schema() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi;
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Jenkins Hook REST API"),
        paths(),
        components(schemas(
            CloneType,
            CloneConfig,
            TestRequest,
            TestResult,
            HookSettings,
            RefChange,
            PushEvent,
            NotificationResult,
            PushResponse,
            ProblemDetails
        ))
    )]
    struct ApiDoc;
    ApiDoc::openapi()
}
