// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dependency wiring for the REST server

use crate::{
    config::ServerConfig,
    host::{ConfiguredHost, HostServices, PermissionValidator, ProjectPermissionValidator},
    models::{InMemorySettingsStore, SettingsStore},
    notifier::{JenkinsNotifier, Notifier},
    resolver::JenkinsResource,
    services::HookService,
    state::AppState,
};
use anyhow::Context;
use std::sync::Arc;

/// Collaborators the server is built from
///
/// Replace individual fields to run the server against a different host
/// integration or a fake notifier.
pub struct ServerDependencies {
    pub host: HostServices,
    pub notifier: Arc<dyn Notifier>,
    pub permissions: Arc<dyn PermissionValidator>,
    pub settings: Arc<dyn SettingsStore>,
}

impl ServerDependencies {
    /// Configuration-backed host, HTTP notifier and in-memory settings
    ///
    /// Fails when a configured base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let host = ConfiguredHost::new(config.host.clone())
            .context("invalid host base URL in configuration")?;
        let host = HostServices::from_host(Arc::new(host));
        let notifier = Arc::new(
            JenkinsNotifier::new(host.clone(), &config.notifier)
                .context("building Jenkins HTTP client")?,
        );
        let permissions = Arc::new(ProjectPermissionValidator::new(
            config.host.allowed_projects.clone(),
        ));

        Ok(Self {
            host,
            notifier,
            permissions,
            settings: Arc::new(InMemorySettingsStore::new()),
        })
    }

    /// Build the app state shared by all handlers
    pub fn into_state(self) -> AppState {
        AppState {
            jenkins: JenkinsResource::new(
                Arc::clone(&self.notifier),
                Arc::clone(&self.permissions),
                self.host.clone(),
            ),
            hooks: HookService::new(self.settings, self.notifier, self.permissions),
            host: self.host,
        }
    }
}
