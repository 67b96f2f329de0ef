use crate::{
    app::AppState,
    config::Config,
    cors::build_cors_layer,
    health,
    relay::{BroadcastRelay, RoomRegistry},
};
use axum::Router;
use axum::http::Request;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

/// Request-id generator for the x-request-id headers
#[derive(Clone, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        uuid::Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
    }
}

/// The signalhub server
///
/// Construction wires together the room registry, the single broadcast
/// dispatch task, and the HTTP/WebSocket routes. Each `App` owns its
/// own relay, so independent instances can run side by side.
pub struct App {
    router: Router<AppState>,
    config: Arc<Config>,
    state: AppState,
}

impl App {
    /// Creates a new App with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new App with the provided configuration
    pub fn with_config(config: Config) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let (relay, dispatcher) = BroadcastRelay::new(registry.clone(), config.relay.intake_capacity);

        // The one dispatch task shared by every connection of this App.
        // It runs until the last RelayHandle drops with the App's state.
        let _dispatch_task = dispatcher.spawn();

        let config = Arc::new(config);
        let state = AppState::new(config.clone(), registry, relay);

        let router = crate::relay::router()
            .route("/health", axum::routing::get(health::health_handler));

        Self {
            router,
            config,
            state,
        }
    }

    /// Apply the middleware stack and produce the final router
    fn into_router(self) -> Router {
        let mut router = self.router.with_state(self.state);

        // Middleware order (from outer to inner): CORS, request ids,
        // HTTP tracing.
        if let Some(cors_layer) = build_cors_layer(&self.config.cors) {
            router = router.layer(cors_layer);
        }

        router = router
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id());

        router.layer(TraceLayer::new_for_http())
    }

    /// Get the finished router for in-process testing
    pub fn into_test_router(self) -> Router {
        self.into_router()
    }

    /// Start the server
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let addr = self
            .config
            .server
            .addr()
            .expect("Invalid server address in config");

        let router = self.into_router();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("Server starting on http://{}", addr);
        tracing::info!("Health check available at http://{}/health", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give in-flight dispatches a moment to drain
    tokio::time::sleep(Duration::from_secs(1)).await;
    tracing::info!("Shutdown complete");
}
