use crate::core::imagga::TaggingError;
use crate::server::types::ErrorResponse;
use crate::utils::constants::{NO_FILE_MESSAGE, RECOGNITION_FAILED_MESSAGE};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("no image field in request")]
    NoFile,

    #[error("failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),

    #[error(transparent)]
    Upstream(#[from] TaggingError),
}

impl IntoResponse for RecognitionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RecognitionError::NoFile => (StatusCode::BAD_REQUEST, NO_FILE_MESSAGE),
            RecognitionError::Staging(e) => {
                tracing::error!("Error staging image: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, RECOGNITION_FAILED_MESSAGE)
            }
            RecognitionError::Upstream(e) => {
                tracing::error!("Error recognizing image: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, RECOGNITION_FAILED_MESSAGE)
            }
        };

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::RecognitionError;
    use crate::core::imagga::TaggingError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    async fn render(err: RecognitionError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_no_file_is_bad_request() {
        let (status, body) = render(RecognitionError::NoFile).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"No file uploaded"}"#);
    }

    #[tokio::test]
    async fn test_upstream_detail_is_not_leaked() {
        let err = TaggingError::Status {
            status: reqwest::StatusCode::FORBIDDEN,
            body: "invalid api secret".to_string(),
        };
        let (status, body) = render(RecognitionError::from(err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Error recognizing image"}"#);
    }

    #[tokio::test]
    async fn test_staging_failure_is_server_error() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let (status, body) = render(RecognitionError::from(err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Error recognizing image"}"#);
    }
}
