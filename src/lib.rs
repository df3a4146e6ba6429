//! Engine for a small multi-turn chat client: session state, on-disk
//! conversation history keyed by name-derived slugs, and a streaming
//! client for OpenAI-compatible completion services.
//!
//! The rendering front-end stays outside the crate and talks to the
//! engine through [`services::controller::Presenter`].

pub mod plugins;
pub mod services;

pub use plugins::history::{
    display_name_from_messages, slug_from_display_name, ChatMessage, HistoryError, HistoryStore,
    Role, StoredConversation,
};
pub use services::ai::{
    ChatStreamPayload, CompletionBackend, CompletionClient, CompletionDelta, CompletionRequest,
};
pub use services::config::{DEFAULT_API_BASE, DEFAULT_MODEL};
pub use services::controller::{
    ChatController, ConversationListItem, Presenter, MISSING_API_KEY_WARNING,
};
pub use services::credentials::CredentialStore;
pub use services::session::SessionState;
