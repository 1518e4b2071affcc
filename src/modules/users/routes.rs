use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    create_technician, get_user, list_technicians, register_user, set_user_status,
};
use crate::app_state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route(
            "/users/technicians",
            post(create_technician).get(list_technicians),
        )
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/status", patch(set_user_status))
}
