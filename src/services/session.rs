//! Per-session mutable state.
//!
//! Exactly one `SessionState` exists per active UI session; it is the only
//! mutable shared state in the system and every read or write goes through
//! the accessors below.

use crate::plugins::history::ChatMessage;

use super::config::DEFAULT_MODEL;
use super::credentials::CredentialStore;

pub struct SessionState {
    messages: Vec<ChatMessage>,
    current_conversation_file_id: String,
    selected_model: String,
    api_key: String,
    credentials: CredentialStore,
}

impl SessionState {
    /// Fresh session defaults. The API key is picked up from the
    /// credential store when one was saved on a previous run.
    pub fn new(credentials: CredentialStore) -> Self {
        let api_key = credentials.load();
        Self {
            messages: Vec::new(),
            current_conversation_file_id: String::new(),
            selected_model: DEFAULT_MODEL.to_string(),
            api_key,
            credentials,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn set_messages(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    pub fn current_conversation_file_id(&self) -> &str {
        &self.current_conversation_file_id
    }

    pub fn set_current_conversation_file_id(&mut self, file_id: impl Into<String>) {
        self.current_conversation_file_id = file_id.into();
    }

    pub fn selected_model(&self) -> &str {
        &self.selected_model
    }

    pub fn set_selected_model(&mut self, model: impl Into<String>) {
        self.selected_model = model.into();
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Setting the key also persists it, so the in-memory value and the
    /// credential store never diverge.
    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = key.into();
        if let Err(err) = self.credentials.save(&self.api_key) {
            log::warn!("Failed to persist API key: {err}");
        }
    }

    /// The no-conversation-selected state: empty messages, no active file.
    pub fn clear_conversation(&mut self) {
        self.messages.clear();
        self.current_conversation_file_id.clear();
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_fresh_session_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let credentials = CredentialStore::open(dir.path()).expect("open");
        let session = SessionState::new(credentials);

        assert!(session.messages().is_empty());
        assert_eq!(session.current_conversation_file_id(), "");
        assert_eq!(session.selected_model(), DEFAULT_MODEL);
        assert_eq!(session.api_key(), "");
    }

    #[test]
    fn test_set_api_key_writes_through_to_credential_store() {
        let dir = TempDir::new().expect("tempdir");
        let credentials = CredentialStore::open(dir.path()).expect("open");
        let mut session = SessionState::new(credentials);

        session.set_api_key("sk-live-1");
        assert_eq!(session.api_key(), "sk-live-1");

        // A later session sees the persisted key.
        let credentials = CredentialStore::open(dir.path()).expect("open");
        let session = SessionState::new(credentials);
        assert_eq!(session.api_key(), "sk-live-1");
    }

    #[test]
    fn test_clear_conversation_resets_both_fields() {
        let dir = TempDir::new().expect("tempdir");
        let credentials = CredentialStore::open(dir.path()).expect("open");
        let mut session = SessionState::new(credentials);

        session.set_messages(vec![ChatMessage::user("hi")]);
        session.set_current_conversation_file_id("hi");
        session.clear_conversation();

        assert!(session.messages().is_empty());
        assert_eq!(session.current_conversation_file_id(), "");
    }
}
