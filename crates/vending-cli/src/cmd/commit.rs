use anyhow::Context;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::output::print_json;
use codecommit_client::{CodeCommitRepo, StsIdentity};
use vending_core::config::VendingConfig;
use vending_core::types::{CommitActionInput, Environment};
use vending_core::workflow::CommitWorkflow;

pub fn run(
    config_path: &Path,
    owner_email: String,
    account_name: Option<String>,
    environment: Option<String>,
    directory_path: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let config = VendingConfig::load(config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let environment = environment
        .as_deref()
        .map(Environment::from_str)
        .transpose()?;

    let input = CommitActionInput {
        owner_email,
        account_name,
        environment,
        directory_path,
    };

    let rt = tokio::runtime::Runtime::new()?;
    let output = rt.block_on(async move {
        let identity = Arc::new(StsIdentity::from_env(&config.region).await);
        let source_control = Arc::new(CodeCommitRepo::new(config.region.clone()));
        let workflow = CommitWorkflow::new(config, identity, source_control);
        workflow.run(input).await
    })?;

    if json {
        print_json(&output)?;
        return Ok(());
    }

    println!(
        "Caller:  {} ({})",
        output.identity.arn.as_deref().unwrap_or("-"),
        output.identity.account.as_deref().unwrap_or("-")
    );
    match output.commit {
        Some(commit) => {
            println!("Commit:  {}", commit.commit_id);
            for file in commit.files {
                println!("  {file}");
            }
        }
        None => println!("No file rendered (minimal mode); nothing committed."),
    }
    Ok(())
}
