//! User-action orchestration: the glue between session state, the
//! conversation store, and the completion service.

use futures_util::StreamExt;

use crate::plugins::history::{ChatMessage, HistoryError, HistoryStore};

use super::ai::{ChatStreamPayload, CompletionBackend, CompletionDelta, CompletionRequest};
use super::session::SessionState;

pub const MISSING_API_KEY_WARNING: &str = "Please add an API key in the settings tab.";

/// Rendering surface driven by the controller.
///
/// Implemented by whatever hosts the UI; the controller only pushes
/// incremental updates and warnings through it.
pub trait Presenter {
    /// Progressive rendering of the assistant's reply.
    fn stream_update(&self, payload: ChatStreamPayload);

    /// User-visible warning outside the conversation itself.
    fn warning(&self, message: &str);
}

/// Sidebar entry for one stored conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationListItem {
    pub file_id: String,
    pub display_name: String,
}

pub struct ChatController<B, P> {
    session: SessionState,
    store: HistoryStore,
    backend: B,
    presenter: P,
}

impl<B: CompletionBackend, P: Presenter> ChatController<B, P> {
    pub fn new(session: SessionState, store: HistoryStore, backend: B, presenter: P) -> Self {
        Self {
            session,
            store,
            backend,
            presenter,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Switch the session to `file_id`, or to a fresh conversation when
    /// the id is empty.
    pub fn select_conversation(&mut self, file_id: &str) -> Result<(), HistoryError> {
        if file_id.is_empty() {
            self.session.set_messages(Vec::new());
        } else {
            let messages = self.store.load_messages(file_id)?;
            self.session.set_messages(messages);
        }
        self.session.set_current_conversation_file_id(file_id);
        Ok(())
    }

    pub fn update_selected_model(&mut self, model: &str) {
        self.session.set_selected_model(model);
    }

    pub fn update_api_key(&mut self, api_key: &str) {
        self.session.set_api_key(api_key);
    }

    /// Delete a stored conversation. When the deleted conversation was the
    /// active one, the session falls back to the fresh-conversation state.
    pub fn delete_conversation(&mut self, file_id: &str) -> bool {
        if !self.store.delete(file_id) {
            log::warn!("Failed to delete conversation {file_id}");
            return false;
        }

        if self.session.current_conversation_file_id() == file_id {
            self.session.clear_conversation();
        }
        true
    }

    /// Stored conversations for the sidebar, most recent first.
    ///
    /// A record whose name cannot be resolved is listed under its file id
    /// instead of failing the whole listing.
    pub fn conversation_labels(&self) -> Vec<ConversationListItem> {
        let file_ids = match self.store.list() {
            Ok(file_ids) => file_ids,
            Err(err) => {
                log::warn!("Failed to list conversations: {err}");
                return Vec::new();
            }
        };

        file_ids
            .into_iter()
            .map(|file_id| {
                let display_name = match self.store.display_name_for(&file_id) {
                    Ok(name) if !name.is_empty() => name,
                    Ok(_) => file_id.clone(),
                    Err(err) => {
                        log::warn!("Failed to resolve conversation name for {file_id}: {err}");
                        file_id.clone()
                    }
                };
                ConversationListItem {
                    file_id,
                    display_name,
                }
            })
            .collect()
    }

    /// Handle one submitted prompt end to end: append the user turn,
    /// stream the assistant's reply, persist the updated conversation.
    ///
    /// Without a configured API key this is a no-op beyond the warning.
    pub async fn handle_user_prompt(&mut self, prompt: &str) {
        if self.session.api_key().is_empty() {
            self.presenter.warning(MISSING_API_KEY_WARNING);
            return;
        }

        let mut messages = self.session.messages().to_vec();
        messages.push(ChatMessage::user(prompt));

        let request = CompletionRequest {
            messages: messages.clone(),
            api_key: self.session.api_key().to_string(),
            model: self.session.selected_model().to_string(),
            stream: true,
        };

        let mut fragments = self.backend.complete(request);
        let mut full_response = String::new();
        while let Some(delta) = fragments.next().await {
            let text = match delta {
                CompletionDelta::Content(text) => text,
                CompletionDelta::Failed(reason) => format!("Error: {reason}"),
            };
            full_response.push_str(&text);
            self.presenter.stream_update(ChatStreamPayload {
                delta: text,
                done: false,
            });
        }
        self.presenter.stream_update(ChatStreamPayload {
            delta: String::new(),
            done: true,
        });

        messages.push(ChatMessage::assistant(full_response));

        self.session.set_messages(messages);
        if let Err(err) = self.store.save(self.session.messages()) {
            log::warn!("Failed to persist conversation: {err}");
        }
    }
}
