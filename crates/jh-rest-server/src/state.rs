// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server state management

use crate::host::HostServices;
use crate::resolver::JenkinsResource;
use crate::services::HookService;

/// Shared server state
///
/// Holds the injected collaborators; the only mutable state lives behind
/// the settings store.
#[derive(Clone)]
pub struct AppState {
    /// Clone URL resolution for the settings UI
    pub jenkins: JenkinsResource,

    /// Persisted hook settings and push notifications
    pub hooks: HookService,

    /// Host capabilities, exposed for readiness reporting
    pub host: HostServices,
}
