use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::app_state::AppState;
use crate::db::models::{AssignReport, NewReport, ReportStatus, UpdateReportStatus};
use crate::error::{AppError, AppResult};
use crate::services::{CommandOutcome, ReportCommand};

#[derive(Debug, Deserialize)]
pub struct ReportListQuery {
    pub status: Option<ReportStatus>,
}

pub async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<NewReport>,
) -> AppResult<impl IntoResponse> {
    let report = state.lifecycle.submit(request).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportListQuery>,
) -> AppResult<impl IntoResponse> {
    let reports = match query.status {
        Some(status) => state.lifecycle.list_by_status(status).await?,
        None => state.lifecycle.list_all().await?,
    };
    Ok(Json(reports))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    match state
        .lifecycle
        .dispatch(ReportCommand::ViewDetails { report_id })
        .await?
    {
        CommandOutcome::Report(report) => Ok(Json(report)),
        _ => Err(AppError::Internal("unexpected command outcome".to_string())),
    }
}

pub async fn report_history(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let history = state.lifecycle.history(&report_id).await?;
    Ok(Json(history))
}

pub async fn assign_report(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    Json(request): Json<AssignReport>,
) -> AppResult<impl IntoResponse> {
    match state
        .lifecycle
        .dispatch(ReportCommand::Assign { report_id, request })
        .await?
    {
        CommandOutcome::Report(report) => Ok(Json(report)),
        _ => Err(AppError::Internal("unexpected command outcome".to_string())),
    }
}

pub async fn update_report_status(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    Json(request): Json<UpdateReportStatus>,
) -> AppResult<impl IntoResponse> {
    match state
        .lifecycle
        .dispatch(ReportCommand::UpdateStatus { report_id, request })
        .await?
    {
        CommandOutcome::Report(report) => Ok(Json(report)),
        _ => Err(AppError::Internal("unexpected command outcome".to_string())),
    }
}

pub async fn delete_report(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state
        .lifecycle
        .dispatch(ReportCommand::Delete { report_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
