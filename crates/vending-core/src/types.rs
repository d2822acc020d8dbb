use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Test,
    Prod,
}

impl Environment {
    pub fn all() -> &'static [Environment] {
        &[Environment::Dev, Environment::Test, Environment::Prod]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Test => "test",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = crate::error::VendingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "test" => Ok(Environment::Test),
            "prod" => Ok(Environment::Prod),
            _ => Err(crate::error::VendingError::InvalidEnvironment(
                s.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// AccountRequest
// ---------------------------------------------------------------------------

/// A validated account-vending request, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRequest {
    pub account_name: String,
    pub environment: Environment,
    pub owner_email: String,
}

// ---------------------------------------------------------------------------
// DelegatedCredential
// ---------------------------------------------------------------------------

/// Short-lived credential returned by the role-assumption step.
///
/// Obtained fresh on every workflow invocation and dropped at the end of it;
/// nothing may cache or persist one.
#[derive(Clone)]
pub struct DelegatedCredential {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

// Secret and token stay out of logs and panic messages.
impl fmt::Debug for DelegatedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatedCredential")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// CallerIdentity
// ---------------------------------------------------------------------------

/// Identity resolved after role assumption. Fields are populated
/// opportunistically; none is guaranteed present in every invocation mode.
///
/// Serialized keys (`Account`, `Arn`, `UserId`) match the declared output
/// schema of the `codecommit:actions:commit` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub account: Option<String>,
    pub arn: Option<String>,
    pub user_id: Option<String>,
}

// ---------------------------------------------------------------------------
// RenderedFile
// ---------------------------------------------------------------------------

/// An immutable commit payload produced by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// CommitResult
// ---------------------------------------------------------------------------

/// Terminal artifact of a successful commit submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResult {
    pub commit_id: String,
    pub files: Vec<String>,
}

// ---------------------------------------------------------------------------
// Action input / output
// ---------------------------------------------------------------------------

/// Input schema of the `codecommit:actions:commit` action.
///
/// `owner_email` is the only required field. Without `account_name` and
/// `environment` the workflow runs in minimal mode: validate, assume the
/// delegated role, resolve caller identity, and stop before any commit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitActionInput {
    pub owner_email: String,
    #[serde(default)]
    pub directory_path: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub environment: Option<Environment>,
}

/// Output schema of the `codecommit:actions:commit` action.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitActionOutput {
    #[serde(flatten)]
    pub identity: CallerIdentity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitResult>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
