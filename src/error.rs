//! Error taxonomy for the prediction pipeline and its single point of
//! translation to HTTP responses.
//!
//! Internal failures (decode, inference, persistence, malformed multipart)
//! are deliberately collapsed into one opaque 400 response; the underlying
//! cause is only logged server-side.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub const SIZE_LIMIT_MESSAGE: &str =
    "Payload content length greater than maximum allowed: 1000000";
pub const MISSING_IMAGE_MESSAGE: &str = "\"image\" is required";
pub const GENERIC_FAIL_MESSAGE: &str = "An error occurred while making the prediction";

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("payload exceeds the maximum allowed size")]
    PayloadTooLarge,

    #[error("multipart field \"image\" is missing or empty")]
    MissingImage,

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("model inference failed: {0}")]
    Inference(String),

    #[error("prediction store write failed: {0}")]
    Persistence(String),

    #[error("malformed multipart payload: {0}")]
    Multipart(String),

    #[error("blocking task failed: {0}")]
    Blocking(String),
}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        PredictError::Persistence(err.to_string())
    }
}

impl From<actix_multipart::MultipartError> for PredictError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        PredictError::Multipart(err.to_string())
    }
}

impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        match self {
            PredictError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            PredictError::PayloadTooLarge => SIZE_LIMIT_MESSAGE,
            PredictError::MissingImage => MISSING_IMAGE_MESSAGE,
            PredictError::Decode(_)
            | PredictError::Inference(_)
            | PredictError::Persistence(_)
            | PredictError::Multipart(_)
            | PredictError::Blocking(_) => {
                tracing::error!(error = %self, "prediction pipeline failed");
                GENERIC_FAIL_MESSAGE
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "status": "fail",
            "message": message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_payload_maps_to_413() {
        assert_eq!(
            PredictError::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn pipeline_failures_map_to_400() {
        for err in [
            PredictError::MissingImage,
            PredictError::Inference("shape mismatch".into()),
            PredictError::Persistence("store unreachable".into()),
            PredictError::Multipart("truncated stream".into()),
            PredictError::Blocking("thread pool is gone".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn blocking_failure_is_not_reported_as_inference() {
        let err = PredictError::Blocking("thread pool is gone".into());
        assert!(err.to_string().starts_with("blocking task failed"));
    }
}
