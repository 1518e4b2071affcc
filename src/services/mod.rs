pub mod dispatcher;
pub mod lifecycle;

pub use dispatcher::NotificationDispatcher;
pub use lifecycle::{CommandOutcome, ReportCommand, ReportLifecycle};
