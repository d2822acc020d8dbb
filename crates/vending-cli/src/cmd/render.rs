use anyhow::Context;
use std::path::Path;
use std::str::FromStr;

use crate::output::print_json;
use vending_core::config::VendingConfig;
use vending_core::render;
use vending_core::types::{AccountRequest, Environment};
use vending_core::validate;

/// Local dry run: render exactly what `commit` would submit, without touching
/// AWS.
pub fn run(
    config_path: &Path,
    owner_email: String,
    account_name: String,
    environment: &str,
    json: bool,
) -> anyhow::Result<()> {
    let config = VendingConfig::load(config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    validate::check_owner_email(&owner_email)?;
    let environment = Environment::from_str(environment)?;

    let request = AccountRequest {
        account_name,
        environment,
        owner_email,
    };
    let file = render::render_account_request(&request, &config);

    if json {
        let value = serde_json::json!({
            "fileName": file.file_name,
            "content": file.content,
        });
        print_json(&value)?;
    } else {
        println!("# {}", file.file_name);
        print!("{}", file.content);
    }
    Ok(())
}
