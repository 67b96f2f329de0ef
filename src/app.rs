use crate::config::Config;
use crate::relay::{RelayHandle, RoomRegistry};
use std::sync::Arc;

/// Shared state handed to every handler
///
/// Holds the server's three long-lived pieces: the configuration, the
/// room registry, and the intake handle of the broadcast relay. All of
/// them are explicitly constructed per [`crate::App`], so independent
/// server instances (and tests) never share state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<RoomRegistry>,
    pub relay: RelayHandle,
}

impl AppState {
    pub fn new(config: Arc<Config>, registry: Arc<RoomRegistry>, relay: RelayHandle) -> Self {
        Self {
            config,
            registry,
            relay,
        }
    }
}
