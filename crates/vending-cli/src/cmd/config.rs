use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

use crate::output::print_json;
use vending_core::config::{VendingConfig, WarnLevel};

// ---------------------------------------------------------------------------
// Subcommand definition
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the active config
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write a starter config file
    Init {
        /// Role assumed before committing
        #[arg(long)]
        role_arn: String,
        /// Repository holding the account-request files
        #[arg(long)]
        repository: String,
        /// Domain of the derived per-account admin email
        #[arg(long)]
        email_domain: String,
        /// Prefix of the derived account display name
        #[arg(long)]
        org_prefix: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config_path: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(config_path, json),
        ConfigSubcommand::Validate => validate(config_path, json),
        ConfigSubcommand::Init {
            role_arn,
            repository,
            email_domain,
            org_prefix,
        } => init(config_path, role_arn, repository, email_domain, org_prefix),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = VendingConfig::load(config_path).context("failed to load config")?;

    if json {
        print_json(&config)?;
        return Ok(());
    }

    println!("role_arn:             {}", config.role_arn);
    println!("region:               {}", config.region);
    println!("repository:           {}", config.repository);
    println!("branch:               {}", config.branch);
    println!("email_domain:         {}", config.email_domain);
    println!("org_prefix:           {}", config.org_prefix);
    println!("organizational_unit:  {}", config.organizational_unit);
    println!("session_name:         {}", config.session_name);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = VendingConfig::load(config_path).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(
    config_path: &Path,
    role_arn: String,
    repository: String,
    email_domain: String,
    org_prefix: String,
) -> anyhow::Result<()> {
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    let config = config_with_defaults(role_arn, repository, email_domain, org_prefix)?;
    config.save(config_path).context("failed to write config")?;
    println!("Wrote {}", config_path.display());
    Ok(())
}

/// Build a config with the four required values and serde defaults for the
/// rest, by deserializing a minimal document.
fn config_with_defaults(
    role_arn: String,
    repository: String,
    email_domain: String,
    org_prefix: String,
) -> anyhow::Result<VendingConfig> {
    let value = serde_json::json!({
        "role_arn": role_arn,
        "repository": repository,
        "email_domain": email_domain,
        "org_prefix": org_prefix,
    });
    Ok(serde_json::from_value(value)?)
}
