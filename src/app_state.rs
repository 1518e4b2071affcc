use std::sync::Arc;

use sqlx::PgPool;

use crate::db::repositories::{
    FeedbackStore, NotificationStore, PgFeedbackRepository, PgNotificationRepository,
    PgReportRepository, PgUserRepository, ReportStore, UserStore,
};
use crate::events::EventBus;
use crate::services::{NotificationDispatcher, ReportLifecycle};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub users: Arc<dyn UserStore>,
    pub lifecycle: Arc<ReportLifecycle>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub bus: EventBus,
}

impl AppState {
    pub fn new(db: PgPool, bus: EventBus) -> Self {
        let users: Arc<dyn UserStore> = Arc::new(PgUserRepository::new(db.clone()));
        let reports: Arc<dyn ReportStore> = Arc::new(PgReportRepository::new(db.clone()));
        let notifications: Arc<dyn NotificationStore> =
            Arc::new(PgNotificationRepository::new(db.clone()));
        let feedback: Arc<dyn FeedbackStore> = Arc::new(PgFeedbackRepository::new(db.clone()));

        let dispatcher = Arc::new(NotificationDispatcher::new(
            notifications,
            users.clone(),
            bus.clone(),
        ));
        let lifecycle = Arc::new(ReportLifecycle::new(
            reports,
            users.clone(),
            feedback,
            dispatcher.clone(),
            bus.clone(),
        ));

        Self {
            db,
            users,
            lifecycle,
            dispatcher,
            bus,
        }
    }
}
