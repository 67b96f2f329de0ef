use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The main error type for signalhub
#[derive(Debug, thiserror::Error)]
pub enum SignalHubError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A write to a peer's outbound channel failed because the
    /// connection is gone. Recovered locally by the relay (close +
    /// evict); never surfaced to the sender.
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl SignalHubError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn delivery_failed(msg: impl Into<String>) -> Self {
        Self::DeliveryFailed(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::DeliveryFailed(_) | Self::Internal(_) | Self::Anyhow(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message safe to expose to clients.
    ///
    /// Client errors (4xx) keep their message; server errors collapse
    /// to a generic string so transport details never leak. Full
    /// details are logged server-side.
    fn safe_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => format!("Bad request: {}", msg),
            Self::DeliveryFailed(_) | Self::Internal(_) | Self::Anyhow(_) => {
                "Internal server error".to_string()
            }
            Self::ServiceUnavailable(_) => "Service unavailable".to_string(),
        }
    }
}

/// Standard error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    error_id: String,
}

impl IntoResponse for SignalHubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            status = status.as_u16(),
            error_id = %error_id,
            error = %self,
            "Request failed"
        );

        let body = Json(ErrorResponse {
            error: self.safe_message(),
            error_id,
        });

        (status, body).into_response()
    }
}

/// Result type alias for signalhub
pub type Result<T> = std::result::Result<T, SignalHubError>;

impl From<serde_json::Error> for SignalHubError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            SignalHubError::BadRequest(format!("JSON error: {}", err))
        } else {
            SignalHubError::Internal(format!("JSON serialization error: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_error() {
        let err = SignalHubError::bad_request("roomID is required");
        assert!(matches!(err, SignalHubError::BadRequest(_)));
        assert_eq!(err.to_string(), "Bad request: roomID is required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_delivery_failed_error() {
        let err = SignalHubError::delivery_failed("peer channel closed");
        assert!(matches!(err, SignalHubError::DeliveryFailed(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error() {
        let err = SignalHubError::internal("something went wrong");
        assert_eq!(
            err.to_string(),
            "Internal server error: something went wrong"
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_service_unavailable_error() {
        let err = SignalHubError::service_unavailable("relay is down");
        assert!(matches!(err, SignalHubError::ServiceUnavailable(_)));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_anyhow_error() {
        let anyhow_err = anyhow::anyhow!("unexpected");
        let err: SignalHubError = anyhow_err.into();
        assert!(matches!(err, SignalHubError::Anyhow(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_serde_json_syntax_error() {
        let result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("{ not json }");
        let err: SignalHubError = result.unwrap_err().into();
        assert!(matches!(err, SignalHubError::BadRequest(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_safe_message_client_errors_exposed() {
        assert_eq!(
            SignalHubError::bad_request("roomID is required").safe_message(),
            "Bad request: roomID is required"
        );
    }

    #[test]
    fn test_safe_message_server_errors_hidden() {
        assert_eq!(
            SignalHubError::internal("peer 10.0.0.3:9443 unreachable").safe_message(),
            "Internal server error"
        );
        assert_eq!(
            SignalHubError::delivery_failed("channel closed for conn abc").safe_message(),
            "Internal server error"
        );
        assert_eq!(
            SignalHubError::service_unavailable("intake queue gone").safe_message(),
            "Service unavailable"
        );
    }

    #[tokio::test]
    async fn test_into_response_bad_request() {
        let err = SignalHubError::bad_request("roomID is required");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Bad request: roomID is required");
        assert!(uuid::Uuid::parse_str(json["error_id"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_into_response_hides_internal_details() {
        let err = SignalHubError::internal("db password is 'hunter2'");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
        assert!(!json["error"].as_str().unwrap().contains("hunter2"));
    }
}
