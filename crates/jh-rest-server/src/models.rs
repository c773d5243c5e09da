// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Hook settings storage

use async_trait::async_trait;
use jh_api_contract::{HookSettings, Repository};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Settings store interface
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_settings(&self, repository: &Repository) -> anyhow::Result<Option<HookSettings>>;
    async fn put_settings(
        &self,
        repository: &Repository,
        settings: HookSettings,
    ) -> anyhow::Result<()>;
    /// Returns whether settings existed
    async fn delete_settings(&self, repository: &Repository) -> anyhow::Result<bool>;
}

/// In-memory settings store (settings are lost on restart)
#[derive(Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<HashMap<Repository, HookSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get_settings(&self, repository: &Repository) -> anyhow::Result<Option<HookSettings>> {
        Ok(self.settings.read().await.get(repository).cloned())
    }

    async fn put_settings(
        &self,
        repository: &Repository,
        settings: HookSettings,
    ) -> anyhow::Result<()> {
        self.settings.write().await.insert(repository.clone(), settings);
        Ok(())
    }

    async fn delete_settings(&self, repository: &Repository) -> anyhow::Result<bool> {
        Ok(self.settings.write().await.remove(repository).is_some())
    }
}
