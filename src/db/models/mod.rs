mod feedback;
mod notification;
mod report;
mod user;

pub use feedback::*;
pub use notification::*;
pub use report::*;
pub use user::*;
