use axum::extract::State;
use axum::Json;
use std::str::FromStr;

use crate::error::AppError;
use crate::state::AppState;
use vending_core::types::{CommitActionInput, Environment};

/// Wire payload of the intake form, exactly as the form posts it.
///
/// `environment` arrives as a free string and is parsed here, once, so a bad
/// value becomes a 400 with a domain message instead of a serde rejection.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendingRequestBody {
    pub owner_email: String,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub directory_path: Option<String>,
}

/// POST /api/account-vending — run the commit workflow for one request.
pub async fn submit_request(
    State(app): State<AppState>,
    Json(body): Json<VendingRequestBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let environment = body
        .environment
        .as_deref()
        .map(Environment::from_str)
        .transpose()?;

    let input = CommitActionInput {
        owner_email: body.owner_email,
        account_name: body.account_name,
        environment,
        directory_path: body.directory_path,
    };

    let output = app.workflow.run(input).await?;
    Ok(Json(serde_json::to_value(&output)?))
}
