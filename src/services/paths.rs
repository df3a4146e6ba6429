use std::path::PathBuf;
use std::sync::OnceLock;

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

const SAVEDATA_DIR_NAME: &str = "savedata";

/// Conversation snapshot files live here, one per conversation.
pub(crate) const MESSAGES_DIR_NAME: &str = "messages";
/// Fixed-location configuration files (the API credential).
pub(crate) const CONFIG_DIR_NAME: &str = "configurations";

fn exe_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(|p| p.to_path_buf())
}

/// Resolve and create the application's data directory.
///
/// Single source of truth:
/// - `<exe_dir>/savedata`
pub(crate) fn init_data_dir() -> Result<PathBuf, String> {
    if let Some(dir) = DATA_DIR.get() {
        return Ok(dir.clone());
    }

    let dir = exe_dir()
        .ok_or_else(|| "Failed to resolve executable directory".to_string())?
        .join(SAVEDATA_DIR_NAME);

    std::fs::create_dir_all(&dir).map_err(|e| format!("Failed to create data directory: {e}"))?;
    let _ = DATA_DIR.set(dir.clone());
    Ok(dir)
}

pub(crate) fn data_dir() -> Result<PathBuf, String> {
    if let Some(dir) = DATA_DIR.get() {
        return Ok(dir.clone());
    }
    init_data_dir()
}
