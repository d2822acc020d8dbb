use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use vending_core::VendingError;

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<VendingError>() {
            match e {
                VendingError::Validation(_)
                | VendingError::MissingField(_)
                | VendingError::InvalidEnvironment(_) => StatusCode::BAD_REQUEST,
                VendingError::CommitConflict { .. } => StatusCode::CONFLICT,
                VendingError::Credential { .. }
                | VendingError::BranchResolution { .. }
                | VendingError::Remote(_) => StatusCode::BAD_GATEWAY,
                VendingError::Io(_) | VendingError::Yaml(_) | VendingError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn validation_maps_to_400() {
        let err = AppError(VendingError::Validation("ownerEmail cannot be 'foo'".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_field_maps_to_400() {
        let err = AppError(VendingError::MissingField("environment").into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_environment_maps_to_400() {
        let err = AppError(VendingError::InvalidEnvironment("staging".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn commit_conflict_maps_to_409() {
        let err = AppError(
            VendingError::CommitConflict {
                repository: "aft-account-requests".into(),
                branch: "main".into(),
                parent_commit_id: "deadbeef".into(),
            }
            .into(),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn credential_failure_maps_to_502() {
        let err = AppError(
            VendingError::Credential {
                role_arn: "arn:aws:iam::123456789012:role/aft-vendor".into(),
                reason: "access denied".into(),
            }
            .into(),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn branch_resolution_maps_to_502() {
        let err = AppError(
            VendingError::BranchResolution {
                repository: "aft-account-requests".into(),
                branch: "main".into(),
                reason: "branch has no head commit".into(),
            }
            .into(),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn io_error_maps_to_500() {
        let io_err = std::io::Error::other("disk full");
        let err = AppError(VendingError::Io(io_err).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_domain_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_body_contains_error_field() {
        let err = AppError(VendingError::Validation("ownerEmail cannot be 'foo'".into()).into());
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(
            ct.to_str().unwrap().contains("application/json"),
            "expected JSON content type, got {:?}",
            ct
        );
    }
}
