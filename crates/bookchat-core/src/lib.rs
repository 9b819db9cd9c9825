pub mod client;
pub mod config;
pub mod conversation;
pub mod session;
pub mod state;

// Re-export main types for convenience
pub use client::{ChatClient, DEFAULT_BASE_URL};
pub use config::Config;
pub use conversation::Conversation;
pub use session::{ChatSession, SubmitOutcome};
pub use state::{ChatMessage, ChatRole};
