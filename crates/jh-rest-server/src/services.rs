// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Business logic services

use crate::error::{ServerError, ServerResult};
use crate::host::PermissionValidator;
use crate::models::SettingsStore;
use crate::notifier::{Notifier, NotifyRequest};
use jh_api_contract::validation::validate_hook_settings;
use jh_api_contract::{HookSettings, PushEvent, PushResponse, Repository};
use std::sync::Arc;
use tracing::{debug, info};

/// Hook settings management and push fan-out
#[derive(Clone)]
pub struct HookService {
    store: Arc<dyn SettingsStore>,
    notifier: Arc<dyn Notifier>,
    permissions: Arc<dyn PermissionValidator>,
}

impl HookService {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        notifier: Arc<dyn Notifier>,
        permissions: Arc<dyn PermissionValidator>,
    ) -> Self {
        Self {
            store,
            notifier,
            permissions,
        }
    }

    pub async fn get_settings(&self, repository: &Repository) -> ServerResult<HookSettings> {
        self.permissions.validate_repo_admin(repository)?;
        self.load(repository).await
    }

    pub async fn put_settings(
        &self,
        repository: &Repository,
        settings: HookSettings,
    ) -> ServerResult<HookSettings> {
        self.permissions.validate_repo_admin(repository)?;
        validate_hook_settings(&settings)?;

        self.store.put_settings(repository, settings.clone()).await?;
        info!(%repository, jenkins_base = %settings.jenkins_base, clone_type = %settings.clone_type, "saved jenkins hook settings");
        Ok(settings)
    }

    pub async fn delete_settings(&self, repository: &Repository) -> ServerResult<()> {
        self.permissions.validate_repo_admin(repository)?;
        if self.store.delete_settings(repository).await? {
            info!(%repository, "removed jenkins hook settings");
            Ok(())
        } else {
            Err(ServerError::SettingsNotFound(repository.to_string()))
        }
    }

    /// Notify Jenkins once per updated ref
    ///
    /// Pushes are reported by the host itself, so no caller permission is
    /// checked here.
    pub async fn notify_push(
        &self,
        repository: &Repository,
        event: &PushEvent,
    ) -> ServerResult<PushResponse> {
        if event.ref_changes.is_empty() {
            return Err(ServerError::BadRequest(
                "push event contains no ref changes".to_string(),
            ));
        }
        let settings = self.load(repository).await?;

        let mut results = Vec::with_capacity(event.ref_changes.len());
        for change in &event.ref_changes {
            let request = NotifyRequest::push(settings.clone(), change);
            let result = self.notifier.notify(repository, &request).await;
            debug!(%repository, ref_id = %change.ref_id, successful = result.successful, "notified jenkins of push");
            results.push(result);
        }

        Ok(PushResponse { results })
    }

    async fn load(&self, repository: &Repository) -> ServerResult<HookSettings> {
        self.store
            .get_settings(repository)
            .await?
            .ok_or_else(|| ServerError::SettingsNotFound(repository.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MockPermissionValidator, PermissionError};
    use crate::models::InMemorySettingsStore;
    use crate::notifier::MockNotifier;
    use jh_api_contract::{ApiContractError, CloneType, NotificationResult, RefChange};
    use tracing_test::traced_test;

    fn settings() -> HookSettings {
        HookSettings {
            jenkins_base: "http://jenkins.localhost/jenkins".to_string(),
            clone_type: CloneType::Http,
            clone_url: None,
            ignore_certs: false,
            omit_hash_code: false,
            omit_branch_name: false,
        }
    }

    fn allow_all() -> MockPermissionValidator {
        let mut permissions = MockPermissionValidator::new();
        permissions.expect_validate_repo_admin().returning(|_| Ok(()));
        permissions
    }

    fn service(notifier: MockNotifier, permissions: MockPermissionValidator) -> HookService {
        HookService::new(
            Arc::new(InMemorySettingsStore::new()),
            Arc::new(notifier),
            Arc::new(permissions),
        )
    }

    fn push(refs: &[&str]) -> PushEvent {
        PushEvent {
            ref_changes: refs
                .iter()
                .map(|r| RefChange {
                    ref_id: r.to_string(),
                    to_hash: "abc123".to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn saved_settings_can_be_read_back() {
        let service = service(MockNotifier::new(), allow_all());
        let repo = Repository::new("KEY", "SLUG");

        service.put_settings(&repo, settings()).await.unwrap();
        assert_eq!(service.get_settings(&repo).await.unwrap(), settings());
        assert!(logs_contain("saved jenkins hook settings"));
    }

    #[tokio::test]
    async fn invalid_settings_are_rejected() {
        let service = service(MockNotifier::new(), allow_all());
        let mut custom = settings();
        custom.clone_type = CloneType::Custom;

        let err = service
            .put_settings(&Repository::new("KEY", "SLUG"), custom)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServerError::Validation(ApiContractError::MissingCloneUrl)
        ));
    }

    #[tokio::test]
    async fn settings_require_repo_admin() {
        let mut permissions = MockPermissionValidator::new();
        permissions
            .expect_validate_repo_admin()
            .returning(|repo| Err(PermissionError(repo.to_string())));
        let service = service(MockNotifier::new(), permissions);

        let err = service
            .put_settings(&Repository::new("KEY", "SLUG"), settings())
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Authorization(_)));
    }

    #[tokio::test]
    async fn deleting_missing_settings_is_not_found() {
        let service = service(MockNotifier::new(), allow_all());
        let err = service
            .delete_settings(&Repository::new("KEY", "SLUG"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::SettingsNotFound(_)));
    }

    #[tokio::test]
    async fn push_notifies_once_per_ref_change() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .times(2)
            .withf(|_, request| request.sha1.as_deref() == Some("abc123"))
            .returning(|_, request| NotificationResult {
                successful: true,
                url: format!("branch={}", request.ref_id.clone().unwrap_or_default()),
                message: "Jenkins response: Scheduled".to_string(),
            });
        let service = service(notifier, allow_all());
        let repo = Repository::new("KEY", "SLUG");
        service.put_settings(&repo, settings()).await.unwrap();

        let response = service
            .notify_push(&repo, &push(&["refs/heads/main", "refs/tags/v1"]))
            .await
            .unwrap();

        let urls: Vec<_> = response.results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["branch=refs/heads/main", "branch=refs/tags/v1"]);
    }

    #[tokio::test]
    async fn push_without_settings_is_not_found() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let service = service(notifier, allow_all());

        let err = service
            .notify_push(&Repository::new("KEY", "SLUG"), &push(&["refs/heads/main"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::SettingsNotFound(_)));
    }

    #[tokio::test]
    async fn empty_push_is_rejected() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let service = service(notifier, allow_all());

        let err = service
            .notify_push(&Repository::new("KEY", "SLUG"), &push(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
    }
}
