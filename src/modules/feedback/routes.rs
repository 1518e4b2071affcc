use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{feedback_for_report, list_feedback, submit_feedback};
use crate::app_state::AppState;

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(submit_feedback).get(list_feedback))
        .route("/feedback/report/{id}", get(feedback_for_report))
}
