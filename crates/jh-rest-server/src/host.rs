// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Host platform collaborators
//!
//! The hosting SCM server owns repositories, clone URL construction, the
//! internal SSH endpoint and the permission model. This module describes
//! those capabilities as traits so they can be injected into the resolver
//! and the notifier, and provides [`ConfiguredHost`], a configuration-backed
//! implementation used by the stand-alone server.

use crate::config::HostConfig;
use jh_api_contract::Repository;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Failure to produce an SSH clone URL
#[derive(Debug, thiserror::Error)]
pub enum SshError {
    /// The host's internal SSH server is turned off
    #[error("Internal SSH server is disabled")]
    Disabled,

    #[error("SSH clone URL unavailable: {0}")]
    Other(String),
}

/// Caller is not allowed to administer a repository
#[derive(Debug, thiserror::Error)]
#[error("Repository admin permission required for {0}")]
pub struct PermissionError(pub String);

/// Builds HTTP(S) clone URLs for hosted repositories
#[cfg_attr(test, mockall::automock)]
pub trait HttpCloneUrlProvider: Send + Sync {
    /// Absolute clone URL for `scm` (e.g. `git`), without an embedded username
    fn absolute_clone_url(&self, repository: &Repository, scm: &str) -> String;
}

/// Reports the state of the host's internal SSH server
#[cfg_attr(test, mockall::automock)]
pub trait SshConfigurationProvider: Send + Sync {
    fn is_enabled(&self) -> bool;
}

/// Builds SSH clone URLs for hosted repositories
#[cfg_attr(test, mockall::automock)]
pub trait SshCloneUrlResolver: Send + Sync {
    /// Fails with [`SshError::Disabled`] when the internal SSH server is off
    fn clone_url(&self, repository: &Repository) -> Result<String, SshError>;
}

/// Authorises repository administration
#[cfg_attr(test, mockall::automock)]
pub trait PermissionValidator: Send + Sync {
    fn validate_repo_admin(&self, repository: &Repository) -> Result<(), PermissionError>;
}

/// The host capabilities needed to resolve clone URLs
#[derive(Clone)]
pub struct HostServices {
    pub http_urls: Arc<dyn HttpCloneUrlProvider>,
    pub ssh_config: Arc<dyn SshConfigurationProvider>,
    pub ssh_urls: Arc<dyn SshCloneUrlResolver>,
}

impl HostServices {
    /// Wire every capability to the same configured host
    pub fn from_host(host: Arc<ConfiguredHost>) -> Self {
        Self {
            http_urls: host.clone(),
            ssh_config: host.clone(),
            ssh_urls: host,
        }
    }

    /// SSH clone URL for `repository`, or `""` when SSH is unavailable
    ///
    /// The resolver is only consulted when the SSH configuration reports the
    /// server as enabled. A [`SshError::Disabled`] raised by the resolver
    /// anyway (the host can switch SSH off between the two calls) is also
    /// mapped to the empty string. Other resolver failures are returned.
    pub fn ssh_clone_url(&self, repository: &Repository) -> Result<String, SshError> {
        if !self.ssh_config.is_enabled() {
            debug!(%repository, "internal SSH server disabled, omitting SSH clone URL");
            return Ok(String::new());
        }

        match self.ssh_urls.clone_url(repository) {
            Ok(url) => Ok(url),
            Err(SshError::Disabled) => {
                debug!(%repository, "SSH clone URL resolver reported SSH as disabled");
                Ok(String::new())
            }
            Err(err) => Err(err),
        }
    }
}

/// Clone URL capabilities derived from static host configuration
///
/// HTTP URLs follow `{http-base}/scm/{project}/{slug}.{scm}` and SSH URLs
/// follow `{ssh-base}/{project}/{slug}.git`, with the project key lowercased.
/// Project and slug are percent-encoded as individual path segments.
#[derive(Debug, Clone)]
pub struct ConfiguredHost {
    http_base: Url,
    ssh_base: Url,
    ssh_enabled: bool,
}

impl ConfiguredHost {
    /// Fails when either base URL does not parse
    pub fn new(config: HostConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            http_base: Url::parse(&config.http_base)?,
            ssh_base: Url::parse(&config.ssh_base)?,
            ssh_enabled: config.ssh_enabled,
        })
    }

    fn repo_url(base: &Url, prefix: Option<&str>, repository: &Repository, scm: &str) -> String {
        let mut url = base.clone();
        let project = repository.project_key.to_lowercase();
        let repo = format!("{}.{}", repository.slug, scm);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(prefix)
                .extend([project.as_str(), repo.as_str()]);
        }
        url.to_string()
    }
}

impl HttpCloneUrlProvider for ConfiguredHost {
    fn absolute_clone_url(&self, repository: &Repository, scm: &str) -> String {
        Self::repo_url(&self.http_base, Some("scm"), repository, scm)
    }
}

impl SshConfigurationProvider for ConfiguredHost {
    fn is_enabled(&self) -> bool {
        self.ssh_enabled
    }
}

impl SshCloneUrlResolver for ConfiguredHost {
    fn clone_url(&self, repository: &Repository) -> Result<String, SshError> {
        if !self.ssh_enabled {
            return Err(SshError::Disabled);
        }
        Ok(Self::repo_url(&self.ssh_base, None, repository, "git"))
    }
}

/// Grants repository administration per project key
///
/// An empty allow-list grants every repository.
#[derive(Debug, Clone, Default)]
pub struct ProjectPermissionValidator {
    allowed_projects: Vec<String>,
}

impl ProjectPermissionValidator {
    pub fn new(allowed_projects: Vec<String>) -> Self {
        Self { allowed_projects }
    }
}

impl PermissionValidator for ProjectPermissionValidator {
    fn validate_repo_admin(&self, repository: &Repository) -> Result<(), PermissionError> {
        if self.allowed_projects.is_empty()
            || self
                .allowed_projects
                .iter()
                .any(|key| key.eq_ignore_ascii_case(&repository.project_key))
        {
            Ok(())
        } else {
            Err(PermissionError(repository.to_string()))
        }
    }
}
