use async_trait::async_trait;
use aws_sdk_codecommit::error::DisplayErrorContext;
use aws_sdk_codecommit::operation::create_commit::CreateCommitError;
use aws_sdk_codecommit::operation::get_branch::GetBranchError;
use aws_sdk_codecommit::primitives::Blob;
use aws_sdk_codecommit::types::PutFileEntry;

use vending_core::clients::{NewCommit, SourceControlClient};
use vending_core::types::{CommitResult, DelegatedCredential};
use vending_core::{Result, VendingError};

// ─── CodeCommitRepo ───────────────────────────────────────────────────────

/// Source-control client backed by AWS CodeCommit.
///
/// Holds only the region; an SDK client is built from the invocation's
/// delegated credential per call, so no credential outlives the workflow
/// invocation that minted it.
pub struct CodeCommitRepo {
    region: String,
}

impl CodeCommitRepo {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    fn delegated_client(&self, credential: &DelegatedCredential) -> aws_sdk_codecommit::Client {
        let creds = aws_sdk_codecommit::config::Credentials::new(
            credential.access_key_id.clone(),
            credential.secret_access_key.clone(),
            Some(credential.session_token.clone()),
            None,
            "account-vending-delegated",
        );
        let config = aws_sdk_codecommit::Config::builder()
            .behavior_version(aws_sdk_codecommit::config::BehaviorVersion::latest())
            .region(aws_sdk_codecommit::config::Region::new(self.region.clone()))
            .credentials_provider(creds)
            .build();
        aws_sdk_codecommit::Client::from_conf(config)
    }
}

#[async_trait]
impl SourceControlClient for CodeCommitRepo {
    async fn branch_head(
        &self,
        credential: &DelegatedCredential,
        repository: &str,
        branch: &str,
    ) -> Result<Option<String>> {
        let response = self
            .delegated_client(credential)
            .get_branch()
            .repository_name(repository)
            .branch_name(branch)
            .send()
            .await
            .map_err(|e| map_get_branch_error(repository, branch, e.into_service_error()))?;

        Ok(response
            .branch()
            .and_then(|b| b.commit_id())
            .map(str::to_string))
    }

    async fn put_commit(
        &self,
        credential: &DelegatedCredential,
        commit: NewCommit,
    ) -> Result<CommitResult> {
        let put_file = PutFileEntry::builder()
            .file_path(&commit.file.file_name)
            .file_content(Blob::new(commit.file.content.as_bytes()))
            .build()
            .map_err(|e| VendingError::Remote(format!("invalid put-file entry: {e}")))?;

        let response = self
            .delegated_client(credential)
            .create_commit()
            .repository_name(&commit.repository)
            .branch_name(&commit.branch)
            .parent_commit_id(&commit.parent_commit_id)
            .author_name(&commit.author_name)
            .email(&commit.author_email)
            .commit_message(&commit.message)
            .put_files(put_file)
            .send()
            .await
            .map_err(|e| {
                map_create_commit_error(
                    &commit.repository,
                    &commit.branch,
                    &commit.parent_commit_id,
                    e.into_service_error(),
                )
            })?;

        let commit_id = response
            .commit_id()
            .ok_or_else(|| {
                VendingError::Remote("CreateCommit response carried no commit id".to_string())
            })?
            .to_string();

        let mut files: Vec<String> = response
            .files_added()
            .iter()
            .filter_map(|f| f.absolute_path())
            .map(str::to_string)
            .collect();
        if files.is_empty() {
            files.push(commit.file.file_name.clone());
        }

        Ok(CommitResult { commit_id, files })
    }
}

// ─── Error mapping ────────────────────────────────────────────────────────

/// Any failure to read the branch head is fatal to the invocation; the
/// workflow does not distinguish an absent branch from a transient read
/// failure beyond the reason text.
fn map_get_branch_error(repository: &str, branch: &str, err: GetBranchError) -> VendingError {
    VendingError::BranchResolution {
        repository: repository.to_string(),
        branch: branch.to_string(),
        reason: format!("{}", DisplayErrorContext(&err)),
    }
}

/// A stale parent commit id is the one concurrency hazard and gets its own
/// variant; everything else surfaces as an unexpected remote failure.
fn map_create_commit_error(
    repository: &str,
    branch: &str,
    parent_commit_id: &str,
    err: CreateCommitError,
) -> VendingError {
    match err {
        CreateCommitError::ParentCommitIdOutdatedException(_) => VendingError::CommitConflict {
            repository: repository.to_string(),
            branch: branch.to_string(),
            parent_commit_id: parent_commit_id.to_string(),
        },
        other => VendingError::Remote(format!(
            "CreateCommit failed for branch '{branch}' in repository '{repository}': {}",
            DisplayErrorContext(&other)
        )),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
