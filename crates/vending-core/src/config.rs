use crate::error::Result;
use crate::io;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// VendingConfig
// ---------------------------------------------------------------------------

/// Fixed deployment configuration for the commit workflow.
///
/// Every value the workflow needs beyond the request itself lives here and is
/// injected at construction time: the delegated role, the target repository
/// and branch, and the organization constants baked into rendered files.
/// Read-only at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendingConfig {
    /// Role assumed before talking to the source-control service.
    pub role_arn: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Repository holding the account-request files.
    pub repository: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Domain of the derived per-account admin email.
    pub email_domain: String,
    /// Prefix of the derived account display name.
    pub org_prefix: String,
    #[serde(default = "default_organizational_unit")]
    pub organizational_unit: String,
    #[serde(default = "default_session_name")]
    pub session_name: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_organizational_unit() -> String {
    "Sandbox".to_string()
}

fn default_session_name() -> String {
    "account-vending".to_string()
}

impl VendingConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: VendingConfig = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(path, data.as_bytes())
    }

    /// Check the config for common mistakes. Errors make the workflow
    /// unusable; warnings are suspicious but survivable.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.role_arn.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "role_arn is empty".to_string(),
            });
        } else if !self.role_arn.starts_with("arn:") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("role_arn '{}' does not look like an ARN", self.role_arn),
            });
        }

        if self.repository.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "repository is empty".to_string(),
            });
        }

        if self.branch.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "branch is empty".to_string(),
            });
        }

        if self.email_domain.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "email_domain is empty".to_string(),
            });
        } else if self.email_domain.contains('@') {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "email_domain '{}' should be a bare domain, without '@'",
                    self.email_domain
                ),
            });
        }

        if self.org_prefix.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "org_prefix is empty; account display names will start with '-'"
                    .to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
