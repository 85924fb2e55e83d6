//! Startup steps run before any hook fires.

use std::path::Path;

use crate::error::AppError;

/// Ensure the data directory exists, creating parents as needed.
///
/// Succeeds when the directory is already there.
pub fn ensure_data_dir(path: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(path).map_err(|source| AppError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(data_dir = %path.display(), "Data directory ready");
    Ok(())
}
