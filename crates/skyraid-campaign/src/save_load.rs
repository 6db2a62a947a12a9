use std::fs;
use std::path::Path;

use crate::progress::Progress;

/// Failure writing or reading the progress file.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Failed to access save file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse save data: {0}")]
    Parse(serde_json::Error),

    #[error("Failed to serialize save data: {0}")]
    Serialize(serde_json::Error),
}

pub fn save(path: &Path, progress: &Progress) -> Result<(), SaveError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(progress).map_err(SaveError::Serialize)?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "progress saved");
    Ok(())
}

pub fn load(path: &Path) -> Result<Progress, SaveError> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(SaveError::Parse)
}

/// Load progress, falling back to defaults when the file is missing or
/// unreadable. The fallback is written back so the next load succeeds.
pub fn load_or_default(path: &Path) -> Progress {
    match load(path) {
        Ok(progress) => {
            tracing::info!(
                path = %path.display(),
                levels_unlocked = progress.levels_unlocked,
                "progress loaded"
            );
            progress
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using default progress");
            let progress = Progress::default();
            if let Err(e) = save(path, &progress) {
                tracing::warn!(path = %path.display(), error = %e, "could not write default progress");
            }
            progress
        }
    }
}
