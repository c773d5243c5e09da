// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::*;
use validator::Validate;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validate a notification test request
///
/// Checks run in a fixed order: Jenkins base, clone type, then the clone URL
/// when the clone type is `custom`. The first failure wins. On success the
/// request is turned into the settings the notifier understands; test
/// notifications never carry a branch name.
pub fn validate_test_request(request: &TestRequest) -> Result<HookSettings, ApiContractError> {
    let jenkins_base =
        non_empty(request.jenkins_base.as_deref()).ok_or(ApiContractError::MissingJenkinsBase)?;
    let clone_type: CloneType = non_empty(request.clone_type.as_deref())
        .ok_or(ApiContractError::MissingCloneType)?
        .parse()?;
    let clone_url = non_empty(request.clone_url.as_deref());
    if clone_type.requires_clone_url() && clone_url.is_none() {
        return Err(ApiContractError::MissingCloneUrl);
    }

    Ok(HookSettings {
        jenkins_base: jenkins_base.to_string(),
        clone_type,
        clone_url: clone_url.map(str::to_string),
        ignore_certs: request.ignore_certs,
        omit_hash_code: request.omit_hash_code,
        omit_branch_name: true,
    })
}

/// Validate persisted hook settings
pub fn validate_hook_settings(settings: &HookSettings) -> Result<(), ApiContractError> {
    settings.validate()?;
    validate_url(&settings.jenkins_base)?;

    if settings.clone_type.requires_clone_url()
        && non_empty(settings.clone_url.as_deref()).is_none()
    {
        return Err(ApiContractError::MissingCloneUrl);
    }

    Ok(())
}

/// Validate URL format
pub fn validate_url(url_str: &str) -> Result<(), ApiContractError> {
    url::Url::parse(url_str)?;
    Ok(())
}
