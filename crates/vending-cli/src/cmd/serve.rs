use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

use codecommit_client::{CodeCommitRepo, StsIdentity};
use vending_core::config::{VendingConfig, WarnLevel};
use vending_core::workflow::CommitWorkflow;
use vending_server::AppState;

pub fn run(config_path: &Path, port: u16) -> anyhow::Result<()> {
    let config = VendingConfig::load(config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    // A broken deployment config should fail at startup, not per request.
    let errors: Vec<String> = config
        .validate()
        .into_iter()
        .filter(|w| w.level == WarnLevel::Error)
        .map(|w| w.message)
        .collect();
    if !errors.is_empty() {
        anyhow::bail!("invalid config: {}", errors.join("; "));
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let identity = Arc::new(StsIdentity::from_env(&config.region).await);
        let source_control = Arc::new(CodeCommitRepo::new(config.region.clone()));
        let workflow = CommitWorkflow::new(config, identity, source_control);

        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let state = AppState::new(workflow);

        tokio::select! {
            res = vending_server::serve_on(state, listener) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
