// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Jenkins notification
//!
//! Jenkins' git plugin exposes `/git/notifyCommit`, which schedules polling
//! for every job whose repository URL matches the `url` parameter. The
//! notifier builds that trigger URL from the hook settings and reports what
//! Jenkins answered.

use crate::config::NotifierConfig;
use crate::host::HostServices;
use crate::resolver::GIT_SCM;
use async_trait::async_trait;
use jh_api_contract::{CloneType, HookSettings, NotificationResult, RefChange, Repository};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Jenkins replies with this prefix when polling was scheduled
const SCHEDULED_PREFIX: &str = "Scheduled";

/// A single notification to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyRequest {
    pub settings: HookSettings,
    pub ref_id: Option<String>,
    pub sha1: Option<String>,
}

impl NotifyRequest {
    /// Connectivity test: no ref and no commit
    pub fn test(settings: HookSettings) -> Self {
        Self {
            settings,
            ref_id: None,
            sha1: None,
        }
    }

    /// Notification for one updated ref of a push
    pub fn push(settings: HookSettings, change: &RefChange) -> Self {
        Self {
            settings,
            ref_id: Some(change.ref_id.clone()),
            sha1: Some(change.to_hash.clone()),
        }
    }
}

/// Sends notifications to Jenkins
///
/// Implementations never fail: transport problems are reported as an
/// unsuccessful [`NotificationResult`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, repository: &Repository, request: &NotifyRequest) -> NotificationResult;
}

/// Build the `notifyCommit` trigger URL
pub fn notify_url(request: &NotifyRequest, clone_url: &str) -> String {
    let settings = &request.settings;
    let mut url = format!(
        "{}/git/notifyCommit?url={}",
        settings.jenkins_base.trim_end_matches('/'),
        encode(clone_url)
    );

    if let Some(ref_id) = request.ref_id.as_deref().filter(|_| !settings.omit_branch_name) {
        url.push_str("&branches=");
        url.push_str(&encode(ref_id));
    }
    if let Some(sha1) = request.sha1.as_deref().filter(|_| !settings.omit_hash_code) {
        url.push_str("&sha1=");
        url.push_str(sha1);
    }

    url
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// HTTP notifier talking to a real Jenkins
///
/// Holds one pooled client that verifies certificates and one that does not,
/// picked per request from the settings' `ignore_certs` flag.
pub struct JenkinsNotifier {
    host: HostServices,
    verifying: reqwest::Client,
    insecure: reqwest::Client,
}

impl JenkinsNotifier {
    pub fn new(host: HostServices, config: &NotifierConfig) -> reqwest::Result<Self> {
        Ok(Self {
            host,
            verifying: build_client(config.timeout(), false)?,
            insecure: build_client(config.timeout(), true)?,
        })
    }

    fn client(&self, ignore_certs: bool) -> &reqwest::Client {
        if ignore_certs {
            &self.insecure
        } else {
            &self.verifying
        }
    }

    /// Clone URL Jenkins should match its jobs against
    fn clone_url(&self, repository: &Repository, settings: &HookSettings) -> String {
        match settings.clone_type {
            CloneType::Http => self.host.http_urls.absolute_clone_url(repository, GIT_SCM),
            CloneType::Ssh => self.host.ssh_clone_url(repository).unwrap_or_else(|err| {
                warn!(%repository, error = %err, "could not resolve SSH clone URL");
                String::new()
            }),
            CloneType::Custom => settings.clone_url.clone().unwrap_or_default(),
        }
    }

    async fn trigger(&self, url: &str, ignore_certs: bool) -> reqwest::Result<String> {
        self.client(ignore_certs).get(url).send().await?.text().await
    }
}

fn build_client(timeout: Duration, ignore_certs: bool) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(ignore_certs)
        .build()
}

#[async_trait]
impl Notifier for JenkinsNotifier {
    async fn notify(&self, repository: &Repository, request: &NotifyRequest) -> NotificationResult {
        let clone_url = self.clone_url(repository, &request.settings);
        let url = notify_url(request, &clone_url);

        match self.trigger(&url, request.settings.ignore_certs).await {
            Ok(body) => {
                debug!(%url, "triggered jenkins");
                NotificationResult {
                    successful: body.starts_with(SCHEDULED_PREFIX),
                    url,
                    message: format!("Jenkins response: {}", body),
                }
            }
            Err(err) => {
                error!(%url, error = %err, "error triggering jenkins");
                NotificationResult {
                    successful: false,
                    url,
                    message: err.to_string(),
                }
            }
        }
    }
}
