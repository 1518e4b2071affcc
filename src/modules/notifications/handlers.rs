use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::app_state::AppState;
use crate::error::AppResult;

pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let notifications = state.dispatcher.list_for_user(&user_id).await?;
    Ok(Json(notifications))
}

pub async fn unread_count(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let count = state.dispatcher.unread_count(&user_id).await?;
    Ok(Json(json!({ "unreadCount": count })))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.dispatcher.mark_read(&notification_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let updated = state.dispatcher.mark_all_read(&user_id).await?;
    Ok(Json(json!({ "updated": updated })))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.dispatcher.delete(&notification_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_all(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let removed = state.dispatcher.clear_all(&user_id).await?;
    Ok(Json(json!({ "removed": removed })))
}
