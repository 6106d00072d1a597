//! v1 API endpoints

pub mod sessions;

use axum::{
    routing::{delete, post},
    Router,
};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/sessions/{session_id}/query", post(sessions::query_session))
        .route("/sessions/{session_id}", delete(sessions::reset_session))
}
