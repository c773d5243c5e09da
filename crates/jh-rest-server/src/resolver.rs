// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Clone URL resolution and notification test validation
//!
//! [`JenkinsResource`] backs the two endpoints the hook settings UI talks
//! to: `config`, which offers the repository's clone URLs, and `test`,
//! which checks a not-yet-saved configuration against Jenkins.

use crate::error::ServerResult;
use crate::host::{HostServices, PermissionValidator};
use crate::notifier::{Notifier, NotifyRequest};
use jh_api_contract::validation::validate_test_request;
use jh_api_contract::{CloneConfig, Repository, TestRequest, TestResult};
use std::sync::Arc;
use tracing::debug;

/// SCM name passed to the host's clone URL builder
pub const GIT_SCM: &str = "git";

#[derive(Clone)]
pub struct JenkinsResource {
    notifier: Arc<dyn Notifier>,
    permissions: Arc<dyn PermissionValidator>,
    host: HostServices,
}

impl JenkinsResource {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        permissions: Arc<dyn PermissionValidator>,
        host: HostServices,
    ) -> Self {
        Self {
            notifier,
            permissions,
            host,
        }
    }

    /// Clone URLs for the settings UI
    ///
    /// `ssh` is empty when the internal SSH server is disabled; that case
    /// is never an error.
    pub fn config(&self, repository: &Repository) -> ServerResult<CloneConfig> {
        self.permissions.validate_repo_admin(repository)?;

        let http = self.host.http_urls.absolute_clone_url(repository, GIT_SCM);
        let ssh = self.host.ssh_clone_url(repository)?;

        Ok(CloneConfig { http, ssh })
    }

    /// Validate a test request and, if it is complete, notify Jenkins once
    ///
    /// Incomplete requests produce an unsuccessful result without touching
    /// the notifier.
    pub async fn test(
        &self,
        repository: &Repository,
        request: &TestRequest,
    ) -> ServerResult<TestResult> {
        let settings = match validate_test_request(request) {
            Ok(settings) => settings,
            Err(err) => {
                debug!(%repository, error = %err, "rejecting jenkins notification test");
                return Ok(TestResult::rejected(err.to_string()));
            }
        };

        self.permissions.validate_repo_admin(repository)?;

        debug!(%repository, "triggering jenkins notification test");
        let result = self.notifier.notify(repository, &NotifyRequest::test(settings)).await;
        debug!(?result, "got response from jenkins");

        Ok(result.into())
    }
}
