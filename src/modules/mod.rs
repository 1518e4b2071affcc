pub mod dashboard;
pub mod feedback;
pub mod notifications;
pub mod reports;
pub mod users;
