pub mod app_controller;
pub mod page_controller;
pub mod notifications;

// Re-export key functions
pub use app_controller::{show_post, start_app, Exit};
pub use page_controller::{Outcome, PageController, Route, UiState};
pub use notifications::{Notification, NotificationKind, Notifications};
