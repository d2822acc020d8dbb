use std::sync::Arc;

use crate::clients::{IdentityClient, NewCommit, SourceControlClient};
use crate::config::VendingConfig;
use crate::error::{Result, VendingError};
use crate::render;
use crate::types::{
    AccountRequest, CommitActionInput, CommitActionOutput, CommitResult, DelegatedCredential,
};
use crate::validate;

/// Action id this workflow implements on the scaffolder surface.
pub const ACTION_ID: &str = "codecommit:actions:commit";

// ---------------------------------------------------------------------------
// CommitWorkflow
// ---------------------------------------------------------------------------

/// The commit-generation workflow: one validated request in, at most one
/// atomic commit out.
///
/// All deployment constants come from the injected [`VendingConfig`]; all
/// remote calls go through the injected clients. The workflow holds no
/// mutable state, so one instance can serve concurrent invocations; each
/// invocation assumes its own credential and resolves its own branch head.
pub struct CommitWorkflow {
    config: VendingConfig,
    identity: Arc<dyn IdentityClient>,
    source_control: Arc<dyn SourceControlClient>,
}

impl CommitWorkflow {
    pub fn new(
        config: VendingConfig,
        identity: Arc<dyn IdentityClient>,
        source_control: Arc<dyn SourceControlClient>,
    ) -> Self {
        Self {
            config,
            identity,
            source_control,
        }
    }

    pub fn config(&self) -> &VendingConfig {
        &self.config
    }

    /// Drive one invocation to completion.
    ///
    /// Every failure is logged with its context here and then surfaced
    /// unchanged; nothing is retried and nothing is swallowed.
    pub async fn run(&self, input: CommitActionInput) -> Result<CommitActionOutput> {
        match self.execute(input).await {
            Ok(output) => Ok(output),
            Err(err) => {
                tracing::error!(action = ACTION_ID, error = %err, "workflow failed");
                Err(err)
            }
        }
    }

    async fn execute(&self, input: CommitActionInput) -> Result<CommitActionOutput> {
        validate::check_owner_email(&input.owner_email)?;

        if let Some(path) = &input.directory_path {
            tracing::warn!(
                directory_path = %path,
                "directory upload mode is retired; ignoring directoryPath"
            );
        }

        // Pair up the optional rendering fields before any remote call.
        let request = match (&input.account_name, input.environment) {
            (Some(account_name), Some(environment)) => Some(AccountRequest {
                account_name: account_name.clone(),
                environment,
                owner_email: input.owner_email.clone(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(VendingError::MissingField("environment")),
            (None, Some(_)) => return Err(VendingError::MissingField("accountName")),
        };

        // Fresh delegation on every invocation; the credential dies with it.
        let credential = self
            .identity
            .assume_role(&self.config.role_arn, &self.config.session_name)
            .await?;

        let identity = self.identity.caller_identity(&credential).await?;
        tracing::info!(
            account = identity.account.as_deref().unwrap_or("-"),
            arn = identity.arn.as_deref().unwrap_or("-"),
            "resolved caller identity"
        );

        let commit = match request {
            Some(request) => Some(self.submit(&credential, &request).await?),
            None => None,
        };

        Ok(CommitActionOutput { identity, commit })
    }

    /// Render the request and submit it against the branch head resolved in
    /// this same invocation.
    async fn submit(
        &self,
        credential: &DelegatedCredential,
        request: &AccountRequest,
    ) -> Result<CommitResult> {
        let file = render::render_account_request(request, &self.config);

        let head = self
            .source_control
            .branch_head(credential, &self.config.repository, &self.config.branch)
            .await?;
        let parent_commit_id = head.ok_or_else(|| VendingError::BranchResolution {
            repository: self.config.repository.clone(),
            branch: self.config.branch.clone(),
            reason: "branch has no head commit".to_string(),
        })?;
        tracing::info!(
            repository = %self.config.repository,
            branch = %self.config.branch,
            head = %parent_commit_id,
            "resolved branch head"
        );

        let commit = NewCommit {
            repository: self.config.repository.clone(),
            branch: self.config.branch.clone(),
            parent_commit_id,
            author_name: request.owner_email.clone(),
            author_email: request.owner_email.clone(),
            message: format!(
                "Add account request for {} ({})",
                request.account_name, request.environment
            ),
            file,
        };

        let result = self.source_control.put_commit(credential, commit).await?;
        tracing::info!(commit_id = %result.commit_id, "commit accepted");
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CallerIdentity, DelegatedCredential, Environment};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn config() -> VendingConfig {
        VendingConfig {
            role_arn: "arn:aws:iam::123456789012:role/aft-vendor".into(),
            region: "us-east-1".into(),
            repository: "aft-account-requests".into(),
            branch: "main".into(),
            email_domain: "example.com".into(),
            org_prefix: "acme".into(),
            organizational_unit: "Sandbox".into(),
            session_name: "account-vending".into(),
        }
    }

    #[derive(Default)]
    struct FakeIdentity {
        fail_assume: bool,
        identity: CallerIdentity,
        assume_calls: AtomicUsize,
        identity_calls: AtomicUsize,
    }

    #[async_trait]
    impl IdentityClient for FakeIdentity {
        async fn assume_role(
            &self,
            role_arn: &str,
            _session_name: &str,
        ) -> Result<DelegatedCredential> {
            self.assume_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_assume {
                return Err(VendingError::Credential {
                    role_arn: role_arn.to_string(),
                    reason: "trust policy rejected the caller".into(),
                });
            }
            Ok(DelegatedCredential {
                access_key_id: "AKIATEST".into(),
                secret_access_key: "secret".into(),
                session_token: "token".into(),
            })
        }

        async fn caller_identity(
            &self,
            _credential: &DelegatedCredential,
        ) -> Result<CallerIdentity> {
            self.identity_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.identity.clone())
        }
    }

    #[derive(Default)]
    struct FakeSourceControl {
        head: Option<String>,
        conflict: bool,
        head_calls: AtomicUsize,
        commit_calls: AtomicUsize,
        submitted: Mutex<Option<NewCommit>>,
    }

    #[async_trait]
    impl SourceControlClient for FakeSourceControl {
        async fn branch_head(
            &self,
            _credential: &DelegatedCredential,
            _repository: &str,
            _branch: &str,
        ) -> Result<Option<String>> {
            self.head_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.head.clone())
        }

        async fn put_commit(
            &self,
            _credential: &DelegatedCredential,
            commit: NewCommit,
        ) -> Result<CommitResult> {
            self.commit_calls.fetch_add(1, Ordering::SeqCst);
            if self.conflict {
                return Err(VendingError::CommitConflict {
                    repository: commit.repository.clone(),
                    branch: commit.branch.clone(),
                    parent_commit_id: commit.parent_commit_id.clone(),
                });
            }
            let files = vec![commit.file.file_name.clone()];
            *self.submitted.lock().unwrap() = Some(commit);
            Ok(CommitResult {
                commit_id: "c0ffee42".into(),
                files,
            })
        }
    }

    fn workflow(
        identity: Arc<FakeIdentity>,
        source_control: Arc<FakeSourceControl>,
    ) -> CommitWorkflow {
        CommitWorkflow::new(config(), identity, source_control)
    }

    fn commit_input() -> CommitActionInput {
        CommitActionInput {
            owner_email: "test".into(),
            directory_path: None,
            account_name: Some("acme".into()),
            environment: Some(Environment::Dev),
        }
    }

    #[tokio::test]
    async fn reserved_owner_email_fails_before_any_remote_call() {
        let identity = Arc::new(FakeIdentity::default());
        let source_control = Arc::new(FakeSourceControl::default());
        let wf = workflow(identity.clone(), source_control.clone());

        let err = wf
            .run(CommitActionInput {
                owner_email: "foo".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "ownerEmail cannot be 'foo'");
        assert_eq!(identity.assume_calls.load(Ordering::SeqCst), 0);
        assert_eq!(source_control.head_calls.load(Ordering::SeqCst), 0);
        assert_eq!(source_control.commit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn minimal_mode_resolves_identity_and_skips_commit() {
        let identity = Arc::new(FakeIdentity::default());
        let source_control = Arc::new(FakeSourceControl::default());
        let wf = workflow(identity.clone(), source_control.clone());

        let output = wf
            .run(CommitActionInput {
                owner_email: "test".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(output.identity, CallerIdentity::default());
        assert!(output.commit.is_none());
        assert_eq!(identity.assume_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source_control.head_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn commit_mode_submits_rendered_file_against_resolved_head() {
        let identity = Arc::new(FakeIdentity {
            identity: CallerIdentity {
                account: Some("123456789012".into()),
                arn: Some("arn:aws:sts::123456789012:assumed-role/aft-vendor/s".into()),
                user_id: Some("AROAEXAMPLE:s".into()),
            },
            ..Default::default()
        });
        let source_control = Arc::new(FakeSourceControl {
            head: Some("deadbeef".into()),
            ..Default::default()
        });
        let wf = workflow(identity.clone(), source_control.clone());

        let output = wf.run(commit_input()).await.unwrap();

        let commit = output.commit.expect("commit mode must produce a commit");
        assert!(!commit.commit_id.is_empty());
        assert_eq!(commit.files, vec!["acme.tf".to_string()]);
        assert_eq!(output.identity.account.as_deref(), Some("123456789012"));

        let submitted = source_control.submitted.lock().unwrap();
        let submitted = submitted.as_ref().unwrap();
        assert_eq!(submitted.parent_commit_id, "deadbeef");
        assert_eq!(submitted.branch, "main");
        assert_eq!(submitted.repository, "aft-account-requests");
        assert_eq!(submitted.author_email, "test");
        assert!(submitted.message.contains("acme"));
        assert!(submitted
            .file
            .content
            .contains("awsadmin+aws-acme-dev@example.com"));
    }

    #[tokio::test]
    async fn stale_parent_commit_surfaces_conflict() {
        let identity = Arc::new(FakeIdentity::default());
        let source_control = Arc::new(FakeSourceControl {
            head: Some("deadbeef".into()),
            conflict: true,
            ..Default::default()
        });
        let wf = workflow(identity, source_control.clone());

        let err = wf.run(commit_input()).await.unwrap_err();

        assert!(matches!(
            err,
            VendingError::CommitConflict {
                ref parent_commit_id,
                ..
            } if parent_commit_id == "deadbeef"
        ));
        // The rejected submission left nothing behind.
        assert!(source_control.submitted.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_branch_head_fails_before_submission() {
        let identity = Arc::new(FakeIdentity::default());
        let source_control = Arc::new(FakeSourceControl::default());
        let wf = workflow(identity, source_control.clone());

        let err = wf.run(commit_input()).await.unwrap_err();

        assert!(matches!(err, VendingError::BranchResolution { .. }));
        assert_eq!(source_control.head_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source_control.commit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unpaired_rendering_fields_fail_before_any_remote_call() {
        let identity = Arc::new(FakeIdentity::default());
        let source_control = Arc::new(FakeSourceControl::default());
        let wf = workflow(identity.clone(), source_control);

        let err = wf
            .run(CommitActionInput {
                owner_email: "test".into(),
                account_name: Some("acme".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, VendingError::MissingField("environment")));

        let err = wf
            .run(CommitActionInput {
                owner_email: "test".into(),
                environment: Some(Environment::Dev),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, VendingError::MissingField("accountName")));

        assert_eq!(identity.assume_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn credential_failure_stops_the_run() {
        let identity = Arc::new(FakeIdentity {
            fail_assume: true,
            ..Default::default()
        });
        let source_control = Arc::new(FakeSourceControl {
            head: Some("deadbeef".into()),
            ..Default::default()
        });
        let wf = workflow(identity, source_control.clone());

        let err = wf.run(commit_input()).await.unwrap_err();

        assert!(matches!(err, VendingError::Credential { .. }));
        assert_eq!(source_control.head_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn directory_path_is_ignored() {
        let identity = Arc::new(FakeIdentity::default());
        let source_control = Arc::new(FakeSourceControl::default());
        let wf = workflow(identity, source_control.clone());

        let output = wf
            .run(CommitActionInput {
                owner_email: "test".into(),
                directory_path: Some("testPath".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(output.commit.is_none());
        assert_eq!(source_control.commit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn each_invocation_assumes_a_fresh_credential() {
        let identity = Arc::new(FakeIdentity::default());
        let source_control = Arc::new(FakeSourceControl {
            head: Some("deadbeef".into()),
            ..Default::default()
        });
        let wf = workflow(identity.clone(), source_control);

        wf.run(commit_input()).await.unwrap();
        wf.run(commit_input()).await.unwrap();

        assert_eq!(identity.assume_calls.load(Ordering::SeqCst), 2);
    }
}
