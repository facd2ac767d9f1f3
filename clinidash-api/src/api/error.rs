//! Error responses for the dashboard endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinidash_common::Error as DatasetError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Dashboard API errors
///
/// The client only ever sees the generic message; the underlying cause is
/// logged.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Error fetching dashboard data")]
    Dashboard(#[source] DatasetError),

    #[error("Error fetching patient sentiment data")]
    PatientSentiment(#[source] DatasetError),
}

impl ApiError {
    fn cause(&self) -> &DatasetError {
        match self {
            ApiError::Dashboard(e) | ApiError::PatientSentiment(e) => e,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}: {}", self, self.cause());

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_response_hides_cause() {
        let cause = clinidash_common::Dataset::from_slice(b"invalid json").unwrap_err();
        let response = ApiError::Dashboard(cause).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "Error fetching dashboard data" }));
    }
}
