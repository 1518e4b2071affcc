use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    assign_report, create_report, delete_report, get_report, list_reports, report_history,
    update_report_status,
};
use crate::app_state::AppState;

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", post(create_report).get(list_reports))
        .route("/reports/{id}", get(get_report).delete(delete_report))
        .route("/reports/{id}/history", get(report_history))
        .route("/reports/{id}/assign", post(assign_report))
        .route("/reports/{id}/status", post(update_report_status))
}
