//! signalhub - a WebSocket signaling relay
//!
//! signalhub lets peers discover each other inside a shared room and
//! exchange opaque JSON signaling payloads (offers, answers, ICE
//! candidates) over persistent WebSocket connections. The server never
//! interprets message contents; it tracks room membership and fans
//! each message out to the sender's room-mates through a single
//! broadcast dispatch task.
//!
//! # Endpoints
//!
//! - `GET /create-room` - allocate a room, returns `{"room_id": "..."}`
//! - `GET /join-room?roomID=<id>` - WebSocket upgrade into the room
//! - `GET /health` - liveness plus active room/connection counts
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use signalhub::{App, ConfigBuilder};
//!
//! #[tokio::main]
//! async fn main() {
//!     signalhub::init_tracing();
//!
//!     let config = ConfigBuilder::new()
//!         .from_env()
//!         .build()
//!         .expect("invalid configuration");
//!
//!     App::with_config(config).serve().await.unwrap();
//! }
//! ```

mod app;
mod config;
mod core;
pub mod cors;
mod error;
pub mod health;
pub mod relay;
pub mod utils;

// Re-exports for public API
pub use app::AppState;
pub use config::{Config, ConfigBuilder, LoggingConfig, RelayConfig, ServerConfig};
pub use core::App;
pub use cors::{CorsConfig, CorsConfigBuilder};
pub use error::{Result, SignalHubError};
pub use health::{HealthResponse, HealthStatus};
pub use relay::{
    BroadcastRelay, ConnectionHandle, Envelope, RegistryMetrics, RelayHandle, RoomRegistry,
    SignalPayload,
};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging with sensible defaults
///
/// Call early in main(), before creating the App.
///
/// # Environment Variables
///
/// - `RUST_LOG`: log level filter (e.g. "info", "signalhub=debug")
/// - `SIGNALHUB_LOG_JSON`: set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("SIGNALHUB_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Initialize tracing from a loaded configuration
pub fn init_tracing_with_config(config: &Config) {
    let env_filter = EnvFilter::new(&config.logging.level);

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
