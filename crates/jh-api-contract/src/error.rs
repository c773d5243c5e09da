// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for API contract validation and parsing

use thiserror::Error;

/// Errors that can occur during API contract validation and parsing
///
/// The display text of the request-level variants is shown verbatim to the
/// settings UI, so keep it short and user facing.
#[derive(Debug, Error)]
pub enum ApiContractError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Settings must be configured: the Jenkins base URL is missing")]
    MissingJenkinsBase,

    #[error("Settings must be configured: the clone type is missing")]
    MissingCloneType,

    #[error("Invalid clone type: {0}. Use 'http', 'ssh' or 'custom'")]
    InvalidCloneType(String),

    #[error("Settings must be configured: a clone URL is required for the custom clone type")]
    MissingCloneUrl,
}

/// Problem+JSON error response format as per RFC 7807
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub detail: String,
    #[serde(skip_serializing_if = "std::collections::HashMap::is_empty", default)]
    pub errors: std::collections::HashMap<String, Vec<String>>,
}

impl ProblemDetails {
    /// Collect field-level messages from a `validator` failure
    pub fn field_errors(errors: &validator::ValidationErrors) -> std::collections::HashMap<String, Vec<String>> {
        errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect()
    }
}
