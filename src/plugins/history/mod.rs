//! Conversation history persistence: one snapshot file per conversation.
//!
//! The orchestration surface lives in `crate::services::controller`.

mod error;
mod store;
mod title;
mod types;

pub use error::HistoryError;
pub use store::HistoryStore;
pub use title::{display_name_from_messages, slug_from_display_name};
pub use types::{ChatMessage, Role, StoredConversation};
