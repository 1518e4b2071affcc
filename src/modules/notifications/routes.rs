use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    clear_all, delete_notification, list_notifications, mark_all_read, mark_read, unread_count,
};
use crate::app_state::AppState;

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/user/{id}",
            get(list_notifications).delete(clear_all),
        )
        .route("/notifications/user/{id}/unread-count", get(unread_count))
        .route("/notifications/user/{id}/read-all", post(mark_all_read))
        .route("/notifications/{id}/read", post(mark_read))
        .route("/notifications/{id}", delete(delete_notification))
}
