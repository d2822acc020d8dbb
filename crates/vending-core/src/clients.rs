use crate::error::Result;
use crate::types::{CallerIdentity, CommitResult, DelegatedCredential, RenderedFile};
use async_trait::async_trait;

// ---------------------------------------------------------------------------
// NewCommit
// ---------------------------------------------------------------------------

/// One atomic commit to submit: a single rendered file against a freshly
/// resolved parent commit.
#[derive(Debug, Clone)]
pub struct NewCommit {
    pub repository: String,
    pub branch: String,
    pub parent_commit_id: String,
    pub author_name: String,
    pub author_email: String,
    pub message: String,
    pub file: RenderedFile,
}

// ---------------------------------------------------------------------------
// Client traits
// ---------------------------------------------------------------------------

/// Identity service seam: role assumption and caller-identity lookup.
///
/// The workflow owns the policy (fresh delegation per invocation, no retry);
/// implementations only translate calls and map failures into the domain
/// error taxonomy.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Exchange the ambient identity for a short-lived credential scoped to
    /// `role_arn`. Must not cache or persist the result.
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<DelegatedCredential>;

    /// Resolve the identity behind `credential`.
    async fn caller_identity(&self, credential: &DelegatedCredential) -> Result<CallerIdentity>;
}

/// Source-control service seam: branch-head lookup and atomic commit.
#[async_trait]
pub trait SourceControlClient: Send + Sync {
    /// Current head commit id of `branch`, or `None` when the branch exists
    /// without any commit. Unresolvable branches and read failures map to
    /// `BranchResolution`.
    async fn branch_head(
        &self,
        credential: &DelegatedCredential,
        repository: &str,
        branch: &str,
    ) -> Result<Option<String>>;

    /// Submit `commit` as a single all-or-nothing operation. A stale
    /// `parent_commit_id` maps to `CommitConflict`; partial application is
    /// impossible by contract.
    async fn put_commit(
        &self,
        credential: &DelegatedCredential,
        commit: NewCommit,
    ) -> Result<CommitResult>;
}
