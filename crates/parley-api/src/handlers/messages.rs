//! Message history, send, delete, and sidebar handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use parley_entity::{Message, User};

use crate::dto::request::SendMessageRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{Caller, ValidatedJson};
use crate::extractors::path::{parse_identity, parse_message_id};
use crate::state::AppState;

/// GET /api/messages/users
pub async fn sidebar_users(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.message_service.sidebar_users(&caller).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// GET /api/messages/{id}
pub async fn conversation(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Message>>>, ApiError> {
    let other = parse_identity(&id)?;
    let messages = state.message_service.conversation(&caller, &other).await?;
    Ok(Json(ApiResponse::ok(messages)))
}

/// POST /api/messages/send/{id}
pub async fn send_message(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), ApiError> {
    let receiver = parse_identity(&id)?;

    let message = state
        .message_service
        .send_message(&caller, receiver, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}

/// DELETE /api/messages/delete/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_message_id(&id)?;
    state.message_service.delete_message(&caller, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Message deleted"))))
}
