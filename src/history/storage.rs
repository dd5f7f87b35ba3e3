use super::types::{SavedDiagnostic, CURRENT_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default last-result file path (~/.config/diag-express/last-result.json)
pub fn get_last_result_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("last-result.json"))
}

/// Load the last saved diagnostic
///
/// Returns `None` if nothing has been saved yet.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_last_result(path: &Path) -> Result<Option<SavedDiagnostic>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open last result file at {}", path.display()))?;

    let saved: SavedDiagnostic =
        serde_json::from_reader(file).context("Failed to load last result")?;

    if saved.version != CURRENT_VERSION {
        anyhow::bail!("Unsupported last result version: {}", saved.version);
    }

    Ok(Some(saved))
}

/// Save a diagnostic atomically, replacing the previous one
pub fn save_last_result(path: &Path, saved: &SavedDiagnostic) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, saved).context("Failed to serialize last result")?;

    file.commit().context("Failed to save last result")?;

    tracing::debug!(path = %path.display(), "saved last result");
    Ok(())
}
