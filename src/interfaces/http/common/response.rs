//! Common API response envelope

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard response wrapper returned by every REST endpoint.
///
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload, `null` on failure
    pub data: Option<T>,
    /// Error description, `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Map a domain error onto the HTTP error shape used by all handlers.
///
/// Validation is the caller's fault (400), a missing aggregate is 404,
/// a state clash (occupied slot, duplicate name, guarded delete) is 409,
/// and anything the storage layer reports is a 500.
pub fn domain_error_response(err: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_carries_data() {
        let resp = ApiResponse::success(42);
        assert!(resp.success);
        assert_eq!(resp.data, Some(42));
        assert!(resp.error.is_none());
    }

    #[test]
    fn error_envelope_omits_data() {
        let resp: ApiResponse<()> = ApiResponse::error("boom");
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.error.as_deref(), Some("boom"));
    }

    #[test]
    fn error_field_is_skipped_when_absent() {
        let json = serde_json::to_value(ApiResponse::success("ok")).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["success"], true);
    }

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                DomainError::NotFound {
                    entity: "Booking",
                    field: "id",
                    value: "7".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (DomainError::conflict("taken"), StatusCode::CONFLICT),
            (
                DomainError::Storage("disk".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, _) = domain_error_response(err);
            assert_eq!(status, expected);
        }
    }
}
