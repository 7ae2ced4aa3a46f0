//! Shared HTTP plumbing: response envelope and validated JSON extraction.

pub mod response;
pub mod validated_json;

pub use response::{domain_error_response, ApiResponse};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
