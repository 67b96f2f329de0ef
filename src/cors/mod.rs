//! Cross-Origin Resource Sharing (CORS) middleware.
//!
//! Browser clients fetch the room-creation endpoint cross-origin, so
//! the server needs controlled CORS headers on its HTTP surface.

mod config;
mod layer;

pub use config::{CorsConfig, CorsConfigBuilder};
pub use layer::build_cors_layer;
