pub mod post;
pub mod message;
pub mod reaction;
pub mod page;
pub mod client;
pub mod config;
pub mod cache;

// Re-export important structs for convenience
pub use post::{Post, PostId};
pub use message::{Message, MessageId, MessageList};
pub use reaction::{Reaction, ReactionRequest};
pub use page::Page;
pub use client::{HttpClient, RollingApi};
pub use config::Config;
pub use cache::{PostResources, Provider};
