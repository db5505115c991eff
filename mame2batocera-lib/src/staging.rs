//! Scoped temporary directory for extracted media.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use mame2batocera_core::{GameId, MediaCategory};

/// Temporary directory holding extracted PNGs until they are copied into
/// the ROMs directory. Removed when dropped.
#[derive(Debug)]
pub struct StagingArea {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl StagingArea {
    /// Create the staging directory inside `parent`, or the system temp dir.
    pub fn create(parent: Option<&Path>) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("mame2batocera_");
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        let path = dir.path().to_path_buf();
        log::debug!("Staging media in {}", path.display());
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Staged location of a media file: `<staging>/<subdir>/<id>.png`.
    pub fn asset_path(&self, category: MediaCategory, id: &GameId) -> PathBuf {
        self.path.join(category.subdir()).join(category.file_name(id))
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        match dir.close() {
            Ok(()) => log::debug!("Removed staging directory {}", self.path.display()),
            Err(e) => log::warn!(
                "Failed to remove staging directory {}: {e}",
                self.path.display()
            ),
        }
    }
}
