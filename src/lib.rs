pub mod models;
pub mod views;
pub mod controllers;
pub mod cli;
pub mod clipboard;
pub mod error;
pub mod locale;

// Re-exports for convenience
pub use models::{Config, HttpClient, Message, Post, RollingApi};
pub use controllers::{show_post, start_app, PageController};
pub use error::RollingError;
