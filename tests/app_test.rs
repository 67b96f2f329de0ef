use axum::body::Body;
use axum::http::{Request, StatusCode};
use signalhub::{App, ConfigBuilder};
use tower::ServiceExt;

fn test_app() -> App {
    let config = ConfigBuilder::new()
        .with_host("127.0.0.1")
        .with_port(9000)
        .build()
        .unwrap();
    App::with_config(config)
}

#[tokio::test]
async fn test_create_room_returns_room_id() {
    let router = test_app().into_test_router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/create-room")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let room_id = json["room_id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(room_id).is_ok());
}

#[tokio::test]
async fn test_create_room_ids_are_distinct() {
    let router = test_app().into_test_router();

    let mut ids = std::collections::HashSet::new();
    for _ in 0..5 {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/create-room")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(ids.insert(json["room_id"].as_str().unwrap().to_string()));
    }
}

#[tokio::test]
async fn test_join_room_requires_an_upgrade() {
    // A plain GET cannot become a signaling connection
    let router = test_app().into_test_router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/join-room?roomID=some-room")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_health_reports_counts() {
    let router = test_app().into_test_router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["active_rooms"], 0);
    assert_eq!(json["active_connections"], 0);
}

#[tokio::test]
async fn test_apps_do_not_share_rooms() {
    // Two independent App instances have independent registries
    let router1 = test_app().into_test_router();
    let router2 = test_app().into_test_router();

    router1
        .clone()
        .oneshot(
            Request::builder()
                .uri("/create-room")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = router2
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["active_rooms"], 0);
}
