// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server configuration

use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Server configuration
///
/// Loaded from an optional TOML file; command-line flags override file
/// values in `main`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,

    /// Enable permissive CORS headers for development
    pub enable_cors: bool,

    /// API key required on every non-health request
    pub api_key: Option<String>,

    /// How the hosting SCM server exposes repositories
    pub host: HostConfig,

    /// Outbound Jenkins notification settings
    pub notifier: NotifierConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 7991)),
            enable_cors: false,
            api_key: None,
            host: HostConfig::default(),
            notifier: NotifierConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from a TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Repository hosting configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HostConfig {
    /// Base URL of the SCM web UI, e.g. `https://stash.example.com/stash`
    pub http_base: String,

    /// Base URL of the internal SSH endpoint, e.g. `ssh://git@stash.example.com:7999`
    pub ssh_base: String,

    /// Whether the internal SSH endpoint is turned on
    pub ssh_enabled: bool,

    /// Project keys callers may administer; empty means all
    pub allowed_projects: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            http_base: "http://localhost:7990".to_string(),
            ssh_base: "ssh://git@localhost:7999".to_string(),
            ssh_enabled: true,
            allowed_projects: Vec::new(),
        }
    }
}

/// Jenkins notifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NotifierConfig {
    /// Per-request timeout for calls to Jenkins (seconds)
    pub timeout_secs: u64,
}

impl NotifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}
