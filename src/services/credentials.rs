//! Persistence for the single API credential.
//!
//! One secret per installation, stored at a fixed location. A missing
//! credential file is the normal first-run state, never an error.

use std::fs;
use std::path::{Path, PathBuf};

const API_KEY_FILE_NAME: &str = "api_key";

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Open a credential store inside the given directory, creating the
    /// directory if needed.
    pub fn open(config_dir: impl AsRef<Path>) -> Result<Self, String> {
        let config_dir = config_dir.as_ref().to_path_buf();
        fs::create_dir_all(&config_dir)
            .map_err(|e| format!("Failed to create configuration directory: {e}"))?;
        Ok(Self {
            path: config_dir.join(API_KEY_FILE_NAME),
        })
    }

    /// Open the store at the default on-disk location.
    pub fn open_default() -> Result<Self, String> {
        let dir = crate::services::paths::data_dir()?;
        Self::open(dir.join(crate::services::paths::CONFIG_DIR_NAME))
    }

    /// Overwrite the stored credential.
    pub fn save(&self, secret: &str) -> Result<(), String> {
        let json = serde_json::to_string(&secret)
            .map_err(|e| format!("Failed to serialize credential: {e}"))?;
        fs::write(&self.path, json).map_err(|e| format!("Failed to write credential file: {e}"))
    }

    /// The stored credential, or an empty string when none was ever saved.
    pub fn load(&self) -> String {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to read credential file: {err}");
                }
                return String::new();
            }
        };

        match serde_json::from_str::<String>(&raw) {
            Ok(secret) => secret,
            Err(err) => {
                log::warn!("Ignoring unreadable credential file: {err}");
                String::new()
            }
        }
    }
}
