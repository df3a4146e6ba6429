//! Completion-service integration for OpenAI-compatible endpoints.
//!
//! Notes:
//! - `async-openai` supplies the HTTP client and stream handling.
//! - Requests are built with its `byot` ("bring your own types") methods so
//!   vendors that add extra delta fields still deserialize cleanly.
//! - Transport and service errors never escape this module; they surface
//!   as [`CompletionDelta::Failed`] fragments.

mod client;
mod types;

pub use client::{CompletionBackend, CompletionClient};
pub use types::{ChatStreamPayload, CompletionDelta, CompletionRequest};
