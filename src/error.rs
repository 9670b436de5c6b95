//! Error type shared by the trace generators and both request bindings.

use thiserror::Error;

/// Failures surfaced to callers of the generators.
///
/// Malformed operation-script lines and, in the lenient parser, malformed
/// array text never produce one of these; they are recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisualizerError {
    /// No catalog entry with this id.
    #[error("algorithm {0} not found")]
    AlgorithmNotFound(u32),

    /// Sorting algorithm name not known to the dispatcher.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Data structure name not known to the dispatcher.
    #[error("unsupported data structure: {0}")]
    UnsupportedStructure(String),

    /// Catalog entry exists but has no trace generator wired to it.
    #[error("algorithm '{0}' is not yet implemented")]
    NotImplemented(String),

    /// A token of a textual array is not an integer (strict parsing only).
    #[error("malformed array element: '{0}'")]
    MalformedArray(String),

    /// Input array or operation script longer than the configured limit.
    #[error("input has {len} entries, at most {max} are allowed")]
    InputTooLarge { len: usize, max: usize },
}

impl VisualizerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, VisualizerError::AlgorithmNotFound(_))
    }
}

#[cfg(feature = "web")]
pub use web::{ApiError, ApiErrorDetail};

#[cfg(feature = "web")]
mod web {
    use axum::Json;
    use axum::extract::rejection::{JsonRejection, PathRejection};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    use super::VisualizerError;

    /// Error body returned by every API endpoint.
    #[derive(Debug, Clone, Serialize)]
    pub struct ApiErrorDetail {
        /// Machine-readable code, `NOT_FOUND` or `BAD_REQUEST`.
        pub code: &'static str,
        pub message: String,
    }

    #[derive(Debug, thiserror::Error)]
    pub enum ApiError {
        #[error("not found: {0}")]
        NotFound(String),

        #[error("bad request: {0}")]
        BadRequest(String),
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let (status, detail) = match self {
                ApiError::NotFound(message) => (
                    StatusCode::NOT_FOUND,
                    ApiErrorDetail {
                        code: "NOT_FOUND",
                        message,
                    },
                ),
                ApiError::BadRequest(message) => (
                    StatusCode::BAD_REQUEST,
                    ApiErrorDetail {
                        code: "BAD_REQUEST",
                        message,
                    },
                ),
            };

            let body = serde_json::json!({
                "success": false,
                "error": detail,
            });

            (status, Json(body)).into_response()
        }
    }

    impl From<VisualizerError> for ApiError {
        fn from(err: VisualizerError) -> Self {
            if err.is_not_found() {
                ApiError::NotFound(err.to_string())
            } else {
                ApiError::BadRequest(err.to_string())
            }
        }
    }

    impl From<JsonRejection> for ApiError {
        fn from(rejection: JsonRejection) -> Self {
            ApiError::BadRequest(rejection.body_text())
        }
    }

    impl From<PathRejection> for ApiError {
        fn from(rejection: PathRejection) -> Self {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}
