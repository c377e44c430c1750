use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::evaluation::normalizer::NormalizeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`;
/// no error crosses the transport boundary unconverted.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No resume file part")]
    MissingResume,

    #[error("No selected file")]
    EmptyFilename,

    #[error("No job description provided")]
    MissingJobDescription,

    #[error("{0}")]
    Multipart(#[from] MultipartError),

    #[error("AI response format issue")]
    ResponseFormat { raw_response: String },

    #[error("Invalid JSON response from AI")]
    InvalidJson {
        raw_response: String,
        json_error: String,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::NoJsonObject { excerpt } => AppError::ResponseFormat {
                raw_response: excerpt,
            },
            NormalizeError::InvalidJson { excerpt, detail } => AppError::InvalidJson {
                raw_response: excerpt,
                json_error: detail,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingResume
            | AppError::EmptyFilename
            | AppError::MissingJobDescription
            | AppError::Multipart(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            AppError::ResponseFormat { raw_response } => {
                tracing::error!("model reply contained no JSON object");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": self.to_string(),
                        "raw_response": raw_response,
                    }),
                )
            }
            AppError::InvalidJson {
                raw_response,
                json_error,
            } => {
                tracing::error!("model reply failed JSON parsing: {json_error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": self.to_string(),
                        "raw_response": raw_response,
                        "json_error": json_error,
                    }),
                )
            }
            AppError::Unexpected(msg) => {
                tracing::error!("evaluation failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn response_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_errors_are_400_with_verbatim_message() {
        let response = AppError::MissingResume.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response_body(response).await,
            json!({ "error": "No resume file part" })
        );

        let response = AppError::EmptyFilename.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response_body(response).await,
            json!({ "error": "No selected file" })
        );

        let response = AppError::MissingJobDescription.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response_body(response).await,
            json!({ "error": "No job description provided" })
        );
    }

    #[tokio::test]
    async fn test_response_format_error_carries_raw_response() {
        let response = AppError::ResponseFormat {
            raw_response: "Sorry, I cannot help.".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_body(response).await,
            json!({
                "error": "AI response format issue",
                "raw_response": "Sorry, I cannot help.",
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_json_error_carries_excerpt_and_detail() {
        let response = AppError::InvalidJson {
            raw_response: "{\"JD Match\": \"80%\",}".to_string(),
            json_error: "trailing comma at line 1 column 20".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response_body(response).await;
        assert_eq!(body["error"], "Invalid JSON response from AI");
        assert_eq!(body["raw_response"], "{\"JD Match\": \"80%\",}");
        assert_eq!(body["json_error"], "trailing comma at line 1 column 20");
    }

    #[tokio::test]
    async fn test_unexpected_error_prefixes_message() {
        let response = AppError::Unexpected("PDF parse failed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_body(response).await,
            json!({ "error": "Unexpected error: PDF parse failed" })
        );
    }
}
