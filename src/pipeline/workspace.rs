//! Workspace preparation: make sure the image directory exists and is empty.
//!
//! Only plain files directly inside the directory are removed. Nested
//! directories and symlinks are left alone, so pointing the workspace at a
//! directory that holds other material never deletes more than stale images.

use crate::error::StickerError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Create `directory` (and its parents) unless it already exists.
///
/// A path that exists but is not a directory is an error.
pub async fn ensure(directory: &Path) -> Result<(), StickerError> {
    match tokio::fs::metadata(directory).await {
        Ok(meta) if meta.is_dir() => {
            debug!("Workspace exists: {}", directory.display());
            Ok(())
        }
        Ok(_) => Err(StickerError::NotADirectory {
            path: directory.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tokio::fs::create_dir_all(directory)
                .await
                .map_err(|e| StickerError::io(directory, e))?;
            info!("Created workspace {}", directory.display());
            Ok(())
        }
        Err(e) => Err(StickerError::io(directory, e)),
    }
}

/// Remove every plain file directly inside `directory`.
///
/// Returns the number of files removed. The first failure aborts the sweep.
pub async fn clear(directory: &Path) -> Result<usize, StickerError> {
    let mut entries = tokio::fs::read_dir(directory)
        .await
        .map_err(|e| StickerError::io(directory, e))?;

    let mut removed = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StickerError::io(directory, e))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| StickerError::io(&path, e))?;
        if !file_type.is_file() {
            continue;
        }
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| StickerError::io(&path, e))?;
        debug!("Removed stale file {}", path.display());
        removed += 1;
    }

    if removed > 0 {
        info!(
            "Cleared {} stale file(s) from {}",
            removed,
            directory.display()
        );
    }
    Ok(removed)
}

/// [`ensure`] followed by [`clear`].
pub async fn prepare(directory: &Path) -> Result<usize, StickerError> {
    ensure(directory).await?;
    clear(directory).await
}
