//! Media extraction from the MAME extras archives.
//!
//! `snap.zip` provides screenshots, `flyers.zip` covers and `artwork.zip`
//! marquees. Each archive is indexed for PNG entries, then every indexed
//! entry is streamed into the [`StagingArea`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use mame2batocera_core::{GameId, MediaAsset, MediaCategory, MediaIndex};

use crate::error::ExtrasError;
use crate::progress::PipelineProgress;
use crate::settings::ExtrasSettings;
use crate::staging::StagingArea;

/// Where one media category comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrasSource {
    pub category: MediaCategory,
    pub path: PathBuf,
    /// Named in the settings rather than the built-in default
    pub explicit: bool,
}

/// Resolve the archive path of every media category.
pub fn extras_sources(extras_dir: &Path, settings: &ExtrasSettings) -> Vec<ExtrasSource> {
    MediaCategory::all()
        .iter()
        .map(|&category| {
            let configured = settings.archive_for(category);
            ExtrasSource {
                category,
                path: extras_dir.join(configured.unwrap_or(category.default_archive())),
                explicit: configured.is_some(),
            }
        })
        .collect()
}

/// Game identifier for an archive entry, or `None` if the entry is not
/// media for `category`.
///
/// Screenshot and cover archives map `<id>.png` (at any depth) directly. The
/// artwork archive holds many kinds of art; only marquees are taken, named
/// `<id>_marquee.png`, `<id>/marquee.png`, or a bare `<id>.png` at the root.
pub fn media_id_for_entry(category: MediaCategory, entry_name: &str) -> Option<GameId> {
    let lower = entry_name.to_lowercase();
    if lower.ends_with('/') || !lower.ends_with(".png") {
        return None;
    }

    match category {
        MediaCategory::Screenshot | MediaCategory::Cover => GameId::from_path_like(entry_name),
        MediaCategory::Marquee => {
            let mut components = lower.rsplit(['/', '\\']);
            let file = components.next()?;
            let stem = file.strip_suffix(".png")?;
            let parent = components.next();

            if lower.contains("marquee") {
                if stem == "marquee" {
                    return parent.and_then(GameId::new);
                }
                return stem.split('_').next().and_then(GameId::new);
            }
            if lower.contains("bezel") || lower.contains("snap") || lower.contains("flyer") {
                return None;
            }
            match parent {
                None => GameId::new(stem),
                Some(_) => None,
            }
        }
    }
}

/// An opened extras archive and the media entries found in it.
pub struct ExtrasArchive {
    source: ExtrasSource,
    archive: ZipArchive<BufReader<File>>,
    /// (identifier, zip entry index, entry name), first entry per identifier
    entries: Vec<(GameId, usize, String)>,
}

impl ExtrasArchive {
    /// Open and index the archive of `source`.
    pub fn open(source: ExtrasSource) -> Result<Self, ExtrasError> {
        if !source.path.is_file() {
            return Err(ExtrasError::MissingExtrasArchive(source.path));
        }
        let file = File::open(&source.path).map_err(|e| ExtrasError::io(&source.path, e))?;
        let archive =
            ZipArchive::new(BufReader::new(file)).map_err(|e| ExtrasError::zip(&source.path, e))?;

        let mut extras = Self {
            source,
            archive,
            entries: Vec::new(),
        };
        extras.index();
        Ok(extras)
    }

    fn index(&mut self) {
        let mut seen = std::collections::HashSet::new();
        for i in 0..self.archive.len() {
            let name = match self.archive.by_index_raw(i) {
                Ok(entry) if entry.is_dir() => continue,
                Ok(entry) => entry.name().to_string(),
                Err(e) => {
                    log::warn!(
                        "Skipping unreadable entry {i} in {}: {e}",
                        self.source.path.display()
                    );
                    continue;
                }
            };
            let Some(id) = media_id_for_entry(self.source.category, &name) else {
                continue;
            };
            if seen.insert(id.clone()) {
                self.entries.push((id, i, name));
            } else {
                log::debug!("Ignoring duplicate {} entry {name}", self.source.category);
            }
        }
        log::debug!(
            "Indexed {} {} in {}",
            self.entries.len(),
            self.source.category,
            self.source.path.display()
        );
    }

    pub fn path(&self) -> &Path {
        &self.source.path
    }

    pub fn category(&self) -> MediaCategory {
        self.source.category
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extract every indexed entry into `staging`, or only record the assets
    /// when `staging` is `None`. A failing entry is logged and left out.
    pub fn extract_all(
        &mut self,
        staging: Option<&StagingArea>,
        index: &mut MediaIndex,
        progress: &dyn PipelineProgress,
    ) -> usize {
        let category = self.source.category;
        let total = self.entries.len();
        let entries = std::mem::take(&mut self.entries);
        let mut count = 0;

        progress.on_media_start(category, total);
        for (n, (id, zip_index, name)) in entries.into_iter().enumerate() {
            progress.on_media(n + 1, total, &name);

            let staged_path = match staging {
                Some(staging) => {
                    let dest = staging.asset_path(category, &id);
                    match self.extract_entry(zip_index, &dest) {
                        Ok(path) => Some(path),
                        Err(e) => {
                            log::warn!("Failed to extract {name}: {e}");
                            continue;
                        }
                    }
                }
                None => None,
            };

            if index.insert(MediaAsset {
                id,
                category,
                entry_name: name,
                staged_path,
            }) {
                count += 1;
            }
        }
        progress.on_media_done();
        count
    }

    fn extract_entry(&mut self, zip_index: usize, dest: &Path) -> Result<PathBuf, ExtrasError> {
        let mut entry = self
            .archive
            .by_index(zip_index)
            .map_err(|e| ExtrasError::zip(&self.source.path, e))?;
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ExtrasError::io(parent, e))?;
        }
        let mut out = File::create(dest).map_err(|e| ExtrasError::io(dest, e))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| ExtrasError::io(dest, e))?;
        Ok(dest.to_path_buf())
    }
}

/// Index (and extract, unless `staging` is `None`) media from every extras
/// archive under `extras_dir`.
///
/// Categories are independent: a missing or unreadable archive only removes
/// that category's media.
pub fn collect_media(
    extras_dir: &Path,
    settings: &ExtrasSettings,
    staging: Option<&StagingArea>,
    progress: &dyn PipelineProgress,
) -> MediaIndex {
    let mut index = MediaIndex::new();

    for source in extras_sources(extras_dir, settings) {
        let category = source.category;
        let explicit = source.explicit;

        let mut archive = match ExtrasArchive::open(source) {
            Ok(archive) => archive,
            Err(ExtrasError::MissingExtrasArchive(path)) if !explicit => {
                log::debug!("No {category} archive at {}", path.display());
                continue;
            }
            Err(e) => {
                log::warn!("Skipping {category}: {e}");
                continue;
            }
        };

        if archive.is_empty() {
            log::warn!("No {category} found in {}", archive.path().display());
            continue;
        }
        log::debug!(
            "{} {category} to collect from {}",
            archive.len(),
            archive.path().display()
        );
        let count = archive.extract_all(staging, &mut index, progress);
        log::debug!("Collected {count} {category}");
    }

    index
}

#[cfg(test)]
#[path = "tests/extras_tests.rs"]
mod tests;
