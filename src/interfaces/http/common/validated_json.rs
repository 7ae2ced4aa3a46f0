//! Validated JSON extractor
//!
//! `ValidatedJson<T>` stands in for `axum::Json<T>` on the booking and
//! table-location write routes: it deserializes the body, then runs the
//! DTO's `validator` rules before the handler sees the value. A body that
//! is not JSON at all is a 400; well-formed JSON that breaks a field rule
//! is a 422 listing the offending fields.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// An extractor that deserializes JSON and validates it.
///
/// # Usage
///
/// ```ignore
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateBookingRequest {
///     #[validate(length(min = 1, max = 50))]
///     customer_name: String,
///     #[validate(email)]
///     customer_email: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateBookingRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Why extraction failed; rendered into the `ApiResponse` envelope.
pub enum ValidatedJsonRejection {
    /// The body never deserialized.
    Malformed(JsonRejection),
    /// The body deserialized but broke a field rule.
    Invalid(ValidationErrors),
}

/// One line per failed rule, `field: message`, sorted so the response
/// text does not depend on hash order.
fn field_error_summary(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: {:?}", field, err.code),
            })
        })
        .collect();
    lines.sort();

    if lines.is_empty() {
        "Validation failed".to_string()
    } else {
        lines.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Malformed(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", rejection),
            ),
            Self::Invalid(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                field_error_summary(errors),
            ),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Malformed)?;
        payload.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(Self(payload))
    }
}

// ── Tests ──────────────────────────────────────────────────────
