use thiserror::Error;

#[derive(Debug, Error)]
pub enum VendingError {
    #[error("{0}")]
    Validation(String),

    #[error("missing field '{0}': accountName and environment must be supplied together")]
    MissingField(&'static str),

    #[error("invalid environment '{0}': expected dev, test, or prod")]
    InvalidEnvironment(String),

    #[error("assume role failed for '{role_arn}': {reason}")]
    Credential { role_arn: String, reason: String },

    #[error("cannot resolve head of branch '{branch}' in repository '{repository}': {reason}")]
    BranchResolution {
        repository: String,
        branch: String,
        reason: String,
    },

    #[error("commit rejected: parent commit {parent_commit_id} is no longer the head of branch '{branch}' in repository '{repository}'")]
    CommitConflict {
        repository: String,
        branch: String,
        parent_commit_id: String,
    },

    #[error("remote call failed: {0}")]
    Remote(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VendingError>;
