// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! API contract types for the Jenkins hook REST service

use crate::error::ApiContractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Which clone URL Jenkins should be told about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CloneType {
    /// The host's HTTP(S) clone URL
    Http,
    /// The host's internal SSH clone URL
    Ssh,
    /// An explicit URL supplied with the settings
    Custom,
}

impl CloneType {
    pub fn as_str(self) -> &'static str {
        match self {
            CloneType::Http => "http",
            CloneType::Ssh => "ssh",
            CloneType::Custom => "custom",
        }
    }

    /// Whether the caller has to supply the clone URL themselves
    pub fn requires_clone_url(self) -> bool {
        matches!(self, CloneType::Custom)
    }
}

impl fmt::Display for CloneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloneType {
    type Err = ApiContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(CloneType::Http),
            "ssh" => Ok(CloneType::Ssh),
            "custom" => Ok(CloneType::Custom),
            _ => Err(ApiContractError::InvalidCloneType(s.to_string())),
        }
    }
}

/// A project/slug pair identifying a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub project_key: String,
    pub slug: String,
}

impl Repository {
    pub fn new(project_key: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            slug: slug.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project_key, self.slug)
    }
}

/// Clone URLs offered to the settings UI
///
/// `ssh` is the empty string when the host's internal SSH server is off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct CloneConfig {
    pub http: String,
    pub ssh: String,
}

/// Ad-hoc notification test submitted from the settings form
///
/// Every field is optional on the wire; validation happens in
/// [`crate::validation::validate_test_request`] so that a missing field
/// produces a failed [`TestResult`] rather than a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jenkins_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_type: Option<String>,
    #[serde(default, rename = "gitRepoUrl", skip_serializing_if = "Option::is_none")]
    pub clone_url: Option<String>,
    #[serde(default, deserialize_with = "form_flag")]
    pub ignore_certs: bool,
    #[serde(default, deserialize_with = "form_flag")]
    pub omit_hash_code: bool,
}

/// Checkbox-style form flag
///
/// `true`, `on` and `1` (any case) are set; every other value, including an
/// empty one, is unset.
fn form_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1"
    ))
}

/// Outcome of a notification test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct TestResult {
    pub successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TestResult {
    /// A failed result that never reached Jenkins
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            successful: false,
            url: None,
            message: Some(message.into()),
        }
    }
}

impl From<NotificationResult> for TestResult {
    fn from(result: NotificationResult) -> Self {
        Self {
            successful: result.successful,
            url: Some(result.url),
            message: Some(result.message),
        }
    }
}

/// Per-repository notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HookSettings {
    #[validate(length(min = 1, message = "jenkinsBase must not be empty"))]
    pub jenkins_base: String,
    pub clone_type: CloneType,
    #[serde(default, rename = "gitRepoUrl", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "gitRepoUrl must not be empty"))]
    pub clone_url: Option<String>,
    #[serde(default)]
    pub ignore_certs: bool,
    #[serde(default)]
    pub omit_hash_code: bool,
    #[serde(default)]
    pub omit_branch_name: bool,
}

/// A single updated ref in a push
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RefChange {
    /// Fully qualified ref, e.g. `refs/heads/main`
    pub ref_id: String,
    /// Commit the ref points at after the push
    pub to_hash: String,
}

/// Push notification delivered by the host after a repository update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PushEvent {
    pub ref_changes: Vec<RefChange>,
}

/// What Jenkins said about a single notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct NotificationResult {
    pub successful: bool,
    pub url: String,
    pub message: String,
}

/// Results of fanning a push out to Jenkins, one per ref change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct PushResponse {
    pub results: Vec<NotificationResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_type_parses_case_insensitively() {
        assert_eq!("HTTP".parse::<CloneType>().unwrap(), CloneType::Http);
        assert_eq!(" ssh ".parse::<CloneType>().unwrap(), CloneType::Ssh);
        assert_eq!("Custom".parse::<CloneType>().unwrap(), CloneType::Custom);
    }

    #[test]
    fn clone_type_rejects_unknown_values() {
        let err = "svn".parse::<CloneType>().unwrap_err();
        assert!(matches!(err, ApiContractError::InvalidCloneType(ref v) if v == "svn"));
    }

    #[test]
    fn only_custom_requires_clone_url() {
        assert!(CloneType::Custom.requires_clone_url());
        assert!(!CloneType::Http.requires_clone_url());
        assert!(!CloneType::Ssh.requires_clone_url());
    }

    #[test]
    fn test_request_reads_settings_form_field_names() {
        let form = "jenkinsBase=http%3A%2F%2Fjenkins.localhost%2Fjenkins&cloneType=custom\
                    &gitRepoUrl=git%40example.com%3Atest.git&ignoreCerts=true";
        let request: TestRequest = serde_urlencoded::from_str(form).unwrap();

        assert_eq!(
            request.jenkins_base.as_deref(),
            Some("http://jenkins.localhost/jenkins")
        );
        assert_eq!(request.clone_type.as_deref(), Some("custom"));
        assert_eq!(request.clone_url.as_deref(), Some("git@example.com:test.git"));
        assert!(request.ignore_certs);
        assert!(!request.omit_hash_code);
    }

    #[test]
    fn test_request_reads_checkbox_flags_leniently() {
        let request: TestRequest =
            serde_urlencoded::from_str("ignoreCerts=on&omitHashCode=1").unwrap();
        assert!(request.ignore_certs);
        assert!(request.omit_hash_code);

        let request: TestRequest =
            serde_urlencoded::from_str("ignoreCerts=&omitHashCode=off").unwrap();
        assert!(!request.ignore_certs);
        assert!(!request.omit_hash_code);
    }

    #[test]
    fn test_request_tolerates_empty_fields() {
        let request: TestRequest =
            serde_urlencoded::from_str("jenkinsBase=&cloneType=&ignoreCerts=&omitHashCode=")
                .unwrap();
        assert_eq!(request.jenkins_base.as_deref(), Some(""));
        assert_eq!(request.clone_type.as_deref(), Some(""));
        assert!(!request.ignore_certs);
    }

    #[test]
    fn test_request_tolerates_missing_fields() {
        let request: TestRequest = serde_urlencoded::from_str("cloneType=http").unwrap();
        assert_eq!(request.jenkins_base, None);
        assert_eq!(request.clone_url, None);
    }

    #[test]
    fn rejected_test_result_omits_url() {
        let json = serde_json::to_value(TestResult::rejected("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"successful": false, "message": "nope"}));
    }

    #[test]
    fn hook_settings_defaults_optional_flags() {
        let settings: HookSettings = serde_json::from_str(
            r#"{"jenkinsBase": "http://jenkins.localhost", "cloneType": "ssh"}"#,
        )
        .unwrap();
        assert_eq!(settings.clone_type, CloneType::Ssh);
        assert_eq!(settings.clone_url, None);
        assert!(!settings.ignore_certs && !settings.omit_hash_code && !settings.omit_branch_name);
    }

    #[test]
    fn repository_displays_as_project_and_slug() {
        assert_eq!(Repository::new("KEY", "SLUG").to_string(), "KEY/SLUG");
    }
}
