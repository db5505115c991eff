//! The conversion run: DAT loading, media extraction, mapping, merging and
//! writing, in that order.

use std::path::{Path, PathBuf};

use mame2batocera_core::{MediaCategory, MediaIndex};
use mame2batocera_dat::{DatCategory, load_dat_set};
use mame2batocera_frontend::{BatoceraFrontend, Frontend, read_gamelist};

use crate::error::PipelineError;
use crate::extras::collect_media;
use crate::mapper::{MappedGame, map_games};
use crate::merge::{MergeStats, merge_gamelist};
use crate::progress::PipelineProgress;
use crate::settings::{ExtrasSettings, MappingSettings};
use crate::staging::StagingArea;

/// Inputs of one conversion run, already resolved from flags and settings.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// DAT zip or directory of DAT zips; the extras directory when `None`
    pub dat_source: Option<PathBuf>,
    pub extras_dir: PathBuf,
    pub roms_dir: PathBuf,
    /// Parent of the staging directory; the system temp dir when `None`
    pub extract_temp: Option<PathBuf>,
    pub no_merge: bool,
    pub dry_run: bool,
    pub extras: ExtrasSettings,
    pub mapping: MappingSettings,
}

/// What a run did (or, in dry-run mode, would have done).
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub dat_build: Option<String>,
    pub dats_loaded: Vec<(DatCategory, usize)>,
    pub dats_skipped: Vec<(DatCategory, String)>,
    pub games: usize,
    pub media_found: Vec<(MediaCategory, usize)>,
    pub media_installed: usize,
    /// Staged files that could not be copied into the ROMs directory
    pub media_failed: usize,
    pub existing_entries: Option<usize>,
    pub merge: MergeStats,
    pub gamelist_path: PathBuf,
    pub dry_run: bool,
}

fn require_dir(path: &Path) -> Result<(), PipelineError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(PipelineError::MissingDirectory(path.to_path_buf()))
    }
}

/// Run a full conversion.
///
/// The staging directory lives until this function returns, on success and
/// on error alike.
pub fn convert(
    options: &ConvertOptions,
    progress: &dyn PipelineProgress,
) -> Result<ConvertSummary, PipelineError> {
    require_dir(&options.extras_dir)?;
    require_dir(&options.roms_dir)?;

    let frontend = BatoceraFrontend::new();
    let gamelist_path = frontend.gamelist_path(&options.roms_dir);

    progress.on_phase("Loading DAT archives");
    let dat_source = options.dat_source.as_deref().unwrap_or(options.extras_dir.as_path());
    let dats = load_dat_set(dat_source)?;
    log::debug!(
        "Loaded {} games from {} DAT categories",
        dats.set.len(),
        dats.loaded.len()
    );

    let staging = if options.dry_run {
        None
    } else {
        let staging = StagingArea::create(options.extract_temp.as_deref())
            .map_err(PipelineError::Staging)?;
        Some(staging)
    };

    progress.on_phase("Collecting media");
    let media = collect_media(
        &options.extras_dir,
        &options.extras,
        staging.as_ref(),
        progress,
    );

    if media.is_empty() {
        log::warn!("No media found in {}", options.extras_dir.display());
    } else {
        log::debug!("Collected {} media files", media.len());
    }

    progress.on_phase("Mapping games");
    let mapped = map_games(&dats.set, &media, &options.mapping);

    let existing = if options.no_merge {
        log::debug!("Not reading {} (--no-merge)", gamelist_path.display());
        None
    } else {
        let existing = read_gamelist(&gamelist_path)?;
        match &existing {
            Some(entries) => log::debug!(
                "Read {} entries from {}",
                entries.len(),
                gamelist_path.display()
            ),
            None => log::debug!("No existing gamelist at {}", gamelist_path.display()),
        }
        existing
    };

    progress.on_phase("Merging gamelist");
    let outcome = merge_gamelist(&mapped, existing.as_deref());

    if options.dry_run {
        log::info!(
            "Would write {} entries to {}",
            outcome.entries.len(),
            gamelist_path.display()
        );
    } else {
        progress.on_phase(&format!("Writing {} gamelist", frontend.name()));
        frontend.write_gamelist(&outcome.entries, &options.roms_dir)?;
    }

    let (media_installed, media_failed) =
        install_media(&frontend, &mapped, &media, options, progress);

    Ok(ConvertSummary {
        dat_build: dats.build,
        dats_loaded: dats.loaded,
        dats_skipped: dats.skipped,
        games: mapped.len(),
        media_found: MediaCategory::all()
            .iter()
            .map(|&c| (c, media.count(c)))
            .collect(),
        media_installed,
        media_failed,
        existing_entries: existing.as_ref().map(Vec::len),
        merge: outcome.stats,
        gamelist_path,
        dry_run: options.dry_run,
    })
}

/// Copy the staged media of every mapped game into the ROMs directory.
///
/// A file that cannot be copied is logged and skipped. Returns the number
/// of files installed and failed.
fn install_media(
    frontend: &BatoceraFrontend,
    mapped: &[MappedGame],
    media: &MediaIndex,
    options: &ConvertOptions,
    progress: &dyn PipelineProgress,
) -> (usize, usize) {
    let mut installed = 0;
    let mut failed = 0;

    for &(_, category) in frontend.media_subdirs() {
        let assets: Vec<_> = mapped
            .iter()
            .filter(|game| game.media(category).is_some())
            .filter_map(|game| media.get(&game.id, category))
            .collect();
        if assets.is_empty() {
            continue;
        }

        progress.on_media_start(category, assets.len());
        for (i, asset) in assets.iter().enumerate() {
            progress.on_media(i + 1, assets.len(), asset.id.as_str());
            match (&asset.staged_path, options.dry_run) {
                (Some(staged), false) => {
                    match frontend.install_media(staged, category, &asset.id, &options.roms_dir) {
                        Ok(_) => installed += 1,
                        Err(e) => {
                            log::warn!("Failed to install {} {}: {e}", asset.id, category);
                            failed += 1;
                        }
                    }
                }
                _ => log::debug!(
                    "Would copy {} to {}",
                    asset.entry_name,
                    category.destination(&options.roms_dir, &asset.id).display()
                ),
            }
        }
        progress.on_media_done();
    }

    (installed, failed)
}
