use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config — the active deployment configuration.
///
/// The config carries no secret material (the role ARN is an identifier, not
/// a credential), so it is returned verbatim.
pub async fn get_config(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let value = serde_json::to_value(app.workflow.config())?;
    Ok(Json(value))
}
