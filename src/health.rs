use crate::app::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response with live relay counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub active_rooms: usize,
    pub active_connections: usize,
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let status_code = match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status_code, Json(self)).into_response()
    }
}

/// Handler for the health endpoint
pub async fn health_handler(State(state): State<AppState>) -> HealthResponse {
    let metrics = state.registry.metrics();
    HealthResponse {
        status: HealthStatus::Healthy,
        active_rooms: metrics.active_rooms,
        active_connections: metrics.active_connections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serializes_lowercase() {
        let json = serde_json::to_string(&HealthStatus::Healthy).unwrap();
        assert_eq!(json, "\"healthy\"");
    }

    #[tokio::test]
    async fn test_healthy_response_is_200() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            active_rooms: 2,
            active_connections: 5,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unhealthy_response_is_503() {
        let response = HealthResponse {
            status: HealthStatus::Unhealthy,
            active_rooms: 0,
            active_connections: 0,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
