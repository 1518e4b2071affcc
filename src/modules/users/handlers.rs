use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{NewUser, UpdateUserStatus, User, UserRole, UserStatus};
use crate::error::{AppError, AppResult};

fn build_user(request: NewUser, role: UserRole) -> User {
    let user_id = request
        .user_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("USR-{}", uuid::Uuid::now_v7()));
    User {
        user_id,
        login_uid: request.login_uid,
        name: request.name,
        email: request.email,
        phone: request.phone,
        role,
        status: UserStatus::Active,
        created_at: Utc::now().timestamp_millis(),
    }
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> AppResult<impl IntoResponse> {
    request.validate()?;
    let role = request.role.unwrap_or(UserRole::Student);
    let user = build_user(request, role);
    state.users.insert(&user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Staff account created by an admin; the role in the payload is ignored.
pub async fn create_technician(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> AppResult<impl IntoResponse> {
    request.validate()?;
    let user = build_user(request, UserRole::Staff);
    state.users.insert(&user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Active staff only, for the assignment picker.
pub async fn list_technicians(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let technicians = state.users.list_active_by_role(UserRole::Staff).await?;
    Ok(Json(technicians))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .users
        .find(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;
    Ok(Json(user))
}

pub async fn set_user_status(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserStatus>,
) -> AppResult<impl IntoResponse> {
    state.users.set_status(&user_id, request.status).await?;
    let user = state
        .users
        .find(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;
    Ok(Json(user))
}
