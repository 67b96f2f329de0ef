//! HTTP surface of the signaling relay

use super::socket::join_room_handler;
use crate::app::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

#[derive(Serialize)]
struct CreateRoomResponse {
    room_id: String,
}

/// `GET /create-room` - allocate a fresh room id.
async fn create_room_handler(State(state): State<AppState>) -> Json<CreateRoomResponse> {
    let room_id = state.registry.create_room();
    tracing::info!(room_id = %room_id, "Room allocated");
    Json(CreateRoomResponse { room_id })
}

/// Signaling routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-room", get(create_room_handler))
        .route("/join-room", get(join_room_handler))
}
