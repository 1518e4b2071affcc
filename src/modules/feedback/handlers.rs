use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::app_state::AppState;
use crate::db::models::NewFeedback;
use crate::error::AppResult;

pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<NewFeedback>,
) -> AppResult<impl IntoResponse> {
    let feedback = state.lifecycle.submit_feedback(request).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

pub async fn list_feedback(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let feedback = state.lifecycle.list_feedback().await?;
    Ok(Json(feedback))
}

pub async fn feedback_for_report(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let feedback = state.lifecycle.feedback_for_report(&report_id).await?;
    Ok(Json(feedback))
}
