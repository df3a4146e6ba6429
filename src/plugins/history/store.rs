//! Conversation history storage: one JSON snapshot file per conversation.
//!
//! Records live under `<data_dir>/messages/<file_id>`, keyed by a slug
//! derived from the conversation's display name, so re-saving a
//! conversation overwrites its previous snapshot in place.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use super::title;
use super::types::{ChatMessage, StoredConversation};
use super::HistoryError;

const NAME_CACHE_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct HistoryStore {
    inner: Arc<HistoryStoreInner>,
}

struct HistoryStoreInner {
    messages_dir: PathBuf,
    /// file_id -> display_name, filled lazily for list rendering.
    /// Invalidated on delete of the corresponding record.
    name_cache: Mutex<HashMap<String, String>>,
}

impl HistoryStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open(messages_dir: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let messages_dir = messages_dir.as_ref().to_path_buf();
        fs::create_dir_all(&messages_dir)?;
        Ok(Self {
            inner: Arc::new(HistoryStoreInner {
                messages_dir,
                name_cache: Mutex::new(HashMap::new()),
            }),
        })
    }

    /// Open the store at the default on-disk location.
    pub fn open_default() -> Result<Self, HistoryError> {
        let dir = crate::services::paths::data_dir().map_err(HistoryError::internal)?;
        Self::open(dir.join(crate::services::paths::MESSAGES_DIR_NAME))
    }

    fn record_path(&self, file_id: &str) -> PathBuf {
        self.inner.messages_dir.join(file_id)
    }

    /// Persist a complete snapshot of `messages`.
    ///
    /// Returns `Ok(false)` without touching disk when `messages` is empty.
    /// A record with the same derived file id is overwritten.
    pub fn save(&self, messages: &[ChatMessage]) -> Result<bool, HistoryError> {
        if messages.is_empty() {
            return Ok(false);
        }

        let display_name = title::display_name_from_messages(messages);
        let file_id = title::slug_from_display_name(&display_name);
        let record = StoredConversation {
            display_name: display_name.clone(),
            file_id: file_id.clone(),
            messages: messages.to_vec(),
        };

        let json = serde_json::to_string_pretty(&record)?;
        fs::write(self.record_path(&file_id), json)?;
        self.cache_name(&file_id, display_name);
        Ok(true)
    }

    /// Load the full record stored under `file_id`.
    pub fn load(&self, file_id: &str) -> Result<StoredConversation, HistoryError> {
        let path = self.record_path(file_id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(HistoryError::not_found(format!(
                    "No conversation record for {file_id}"
                )));
            }
            Err(err) => return Err(err.into()),
        };
        let record: StoredConversation = serde_json::from_str(&raw)?;
        Ok(record)
    }

    /// The message sequence stored under `file_id`.
    pub fn load_messages(&self, file_id: &str) -> Result<Vec<ChatMessage>, HistoryError> {
        Ok(self.load(file_id)?.messages)
    }

    /// Re-read the on-disk snapshot matching the given in-memory messages,
    /// or empty when that conversation was never saved.
    pub fn load_snapshot_of(
        &self,
        messages: &[ChatMessage],
    ) -> Result<Vec<ChatMessage>, HistoryError> {
        if messages.is_empty() {
            return Ok(Vec::new());
        }

        let display_name = title::display_name_from_messages(messages);
        let file_id = title::slug_from_display_name(&display_name);
        match self.load(&file_id) {
            Ok(record) => Ok(record.messages),
            Err(HistoryError::NotFound { .. }) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    /// All stored file ids, most recently modified first.
    /// Ties are broken by ascending file id so the order is stable.
    pub fn list(&self) -> Result<Vec<String>, HistoryError> {
        let mut entries: Vec<(SystemTime, String)> = Vec::new();
        for entry in fs::read_dir(&self.inner.messages_dir)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            let Some(file_id) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            entries.push((modified, file_id));
        }

        entries.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        Ok(entries.into_iter().map(|(_, file_id)| file_id).collect())
    }

    /// Delete the record stored under `file_id`.
    ///
    /// Returns false when no record exists or the delete fails; an I/O
    /// failure is logged rather than raised.
    pub fn delete(&self, file_id: &str) -> bool {
        let path = self.record_path(file_id);
        if !path.is_file() {
            log::warn!("No conversation record to delete at {}", path.display());
            return false;
        }

        if let Err(err) = fs::remove_file(&path) {
            log::warn!(
                "Failed to delete conversation record {}: {}",
                path.display(),
                err
            );
            return false;
        }

        self.evict_name(file_id);
        true
    }

    /// Human-readable name of a stored conversation, memoized for the
    /// lifetime of the store so list rendering avoids a full record load.
    pub fn display_name_for(&self, file_id: &str) -> Result<String, HistoryError> {
        if let Ok(cache) = self.inner.name_cache.lock() {
            if let Some(name) = cache.get(file_id) {
                return Ok(name.clone());
            }
        }

        let name = self.load(file_id)?.display_name;
        self.cache_name(file_id, name.clone());
        Ok(name)
    }

    fn cache_name(&self, file_id: &str, display_name: String) {
        let Ok(mut cache) = self.inner.name_cache.lock() else {
            return;
        };
        if cache.len() >= NAME_CACHE_CAPACITY && !cache.contains_key(file_id) {
            return;
        }
        cache.insert(file_id.to_string(), display_name);
    }

    fn evict_name(&self, file_id: &str) {
        if let Ok(mut cache) = self.inner.name_cache.lock() {
            cache.remove(file_id);
        }
    }
}
