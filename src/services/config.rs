//! Defaults for the completion-service connection.

/// Model a fresh session talks to until the user picks another one.
pub const DEFAULT_MODEL: &str = "o4-mini-2025-04-16";

/// Endpoint for OpenAI-compatible chat completions.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
