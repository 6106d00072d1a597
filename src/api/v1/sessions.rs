//! Session query endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, QueryRequest, QueryResponse};
use crate::domain::policy::PolicyRequest;
use crate::domain::DomainError;

static SESSION_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap());

/// POST /v1/sessions/{session_id}/query
pub async fn query_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    validate_session_id(&session_id).map_err(|e| ApiError::from(e).with_param("session_id"))?;

    let request = PolicyRequest::from(request);

    // Held across the agent call so concurrent turns on this session queue up
    let mut session = state.sessions.lock(&session_id).await;
    let (next, outcome) = state.agent.handle(session.clone(), &request).await;

    let awaiting_confirmation = next.is_awaiting_confirmation();
    *session = next;
    drop(session);

    info!(
        session_id = %session_id,
        decision = %outcome.decision,
        awaiting_confirmation,
        "Session query handled"
    );

    Ok(Json(QueryResponse::new(
        session_id,
        outcome,
        awaiting_confirmation,
    )))
}

/// DELETE /v1/sessions/{session_id}
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_session_id(&session_id).map_err(|e| ApiError::from(e).with_param("session_id"))?;

    if state.sessions.remove(&session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DomainError::not_found(format!("Session '{}' not found", session_id)).into())
    }
}

fn validate_session_id(session_id: &str) -> Result<(), DomainError> {
    if SESSION_ID_PATTERN.is_match(session_id) {
        Ok(())
    } else {
        Err(DomainError::validation(
            "Session id must be 1-128 characters of letters, digits, '-' or '_'",
        ))
    }
}
