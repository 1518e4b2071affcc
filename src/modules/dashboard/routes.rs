use axum::{routing::get, Router};

use super::handlers::{admin_dashboard, student_dashboard, technician_dashboard};
use crate::app_state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/student/{id}", get(student_dashboard))
        .route("/dashboard/technician/{id}", get(technician_dashboard))
        .route("/dashboard/admin", get(admin_dashboard))
}
