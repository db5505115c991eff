//! Locating DAT archives on disk and reading the XML inside them.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use mame2batocera_core::MediaCategory;

use crate::dat::{DatFile, parse_dat};
use crate::error::DatError;

/// The three kinds of MAME DAT distributed alongside a romset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatCategory {
    Rom,
    Chd,
    Artwork,
}

const ALL_CATEGORIES: &[DatCategory] = &[DatCategory::Rom, DatCategory::Chd, DatCategory::Artwork];

impl DatCategory {
    /// All categories in load order (most complete first).
    pub fn all() -> &'static [DatCategory] {
        ALL_CATEGORIES
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rom => "ROM",
            Self::Chd => "CHD",
            Self::Artwork => "artwork",
        }
    }

    /// Classify an archive by its file name (case-insensitive).
    ///
    /// The extras archives (`snap.zip`, `flyers.zip`, `artwork.zip`) are never
    /// DATs, even when they sit in the same directory.
    pub fn classify(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if MediaCategory::all()
            .iter()
            .any(|c| c.default_archive() == lower)
        {
            return None;
        }
        if lower.contains("rom") {
            Some(Self::Rom)
        } else if lower.contains("chd") {
            Some(Self::Chd)
        } else if lower.contains("artwork") {
            Some(Self::Artwork)
        } else {
            None
        }
    }
}

impl std::fmt::Display for DatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A DAT archive selected for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatArchive {
    pub category: DatCategory,
    pub path: PathBuf,
}

/// Find DAT archives from either a zip file or a directory of zips.
///
/// A zip file path scans its siblings too, so pointing at any one DAT picks
/// up the others. At most one archive is returned per category: the first
/// in sorted file-name order.
pub fn discover_dat_archives(source: &Path) -> Result<Vec<DatArchive>, DatError> {
    let dir = if source.is_dir() {
        source
    } else if source.is_file() {
        source.parent().unwrap_or(Path::new("."))
    } else {
        return Err(DatError::SourceNotFound(source.to_path_buf()));
    };

    let mut zips: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
        })
        .collect();
    zips.sort();

    let mut archives: Vec<DatArchive> = Vec::new();
    for path in zips {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let Some(category) = DatCategory::classify(&file_name) else {
            log::debug!("Ignoring {file_name}: not a recognized DAT archive");
            continue;
        };
        if let Some(existing) = archives.iter().find(|a| a.category == category) {
            log::warn!(
                "Multiple {category} DAT archives found, using {} and ignoring {file_name}",
                existing.path.display(),
            );
            continue;
        }
        archives.push(DatArchive { category, path });
    }

    archives.sort_by_key(|a| a.category);
    Ok(archives)
}

/// Open a zip archive and parse the single XML DAT inside it.
pub fn load_dat_archive(path: &Path) -> Result<DatFile, DatError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| DatError::zip(path, e))?;

    let mut xml_members = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(|e| DatError::zip(path, e))?;
        if !entry.is_dir() && entry.name().to_lowercase().ends_with(".xml") {
            xml_members.push(entry.name().to_string());
        }
    }

    let Some(member) = xml_members.first() else {
        return Err(DatError::MissingXml(path.to_path_buf()));
    };
    if xml_members.len() > 1 {
        log::warn!(
            "Multiple XML files found in {}, using {member}",
            path.display(),
        );
    }

    log::debug!("Parsing {member} from {}", path.display());
    let entry = archive.by_name(member).map_err(|e| DatError::zip(path, e))?;
    parse_dat(BufReader::new(entry))
}
