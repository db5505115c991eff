use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::GameId;

/// Media categories sourced from the MAME extras archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaCategory {
    /// In-game screenshot (`snap.zip`)
    Screenshot,
    /// Arcade flyer, used as cover art (`flyers.zip`)
    Cover,
    /// Cabinet marquee (`artwork.zip`)
    Marquee,
}

const ALL_CATEGORIES: &[MediaCategory] = &[
    MediaCategory::Screenshot,
    MediaCategory::Cover,
    MediaCategory::Marquee,
];

impl MediaCategory {
    pub fn all() -> &'static [MediaCategory] {
        ALL_CATEGORIES
    }

    /// Subdirectory of `media/` holding this category.
    pub fn subdir(&self) -> &'static str {
        match self {
            Self::Screenshot => "screenshots",
            Self::Cover => "covers",
            Self::Marquee => "marquees",
        }
    }

    /// Batocera gamelist element that references this category.
    pub fn gamelist_tag(&self) -> &'static str {
        match self {
            Self::Screenshot => "image",
            Self::Cover => "thumbnail",
            Self::Marquee => "marquee",
        }
    }

    /// Well-known extras archive name for this category.
    pub fn default_archive(&self) -> &'static str {
        match self {
            Self::Screenshot => "snap.zip",
            Self::Cover => "flyers.zip",
            Self::Marquee => "artwork.zip",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Screenshot => "screenshots",
            Self::Cover => "flyers",
            Self::Marquee => "marquees",
        }
    }

    /// File extension of the media files.
    pub fn default_extension(&self) -> &'static str {
        "png"
    }

    /// File name of the media file for a game, e.g. `pacman.png`.
    pub fn file_name(&self, id: &GameId) -> String {
        format!("{}.{}", id, self.default_extension())
    }

    /// Path written into the gamelist, relative to the ROMs directory.
    pub fn gamelist_path(&self, id: &GameId) -> String {
        format!("./media/{}/{}", self.subdir(), self.file_name(id))
    }

    /// Final on-disk location of the media file under `roms_dir`.
    pub fn destination(&self, roms_dir: &Path, id: &GameId) -> PathBuf {
        roms_dir
            .join("media")
            .join(self.subdir())
            .join(self.file_name(id))
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A PNG from an extras archive, keyed by game and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub id: GameId,
    pub category: MediaCategory,
    /// Entry name inside the source archive
    pub entry_name: String,
    /// Location in the staging area once extracted (`None` in dry-run mode)
    pub staged_path: Option<PathBuf>,
}

/// All media found for a run, grouped by category.
#[derive(Debug, Clone, Default)]
pub struct MediaIndex {
    by_category: BTreeMap<MediaCategory, BTreeMap<GameId, MediaAsset>>,
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset. The first asset for a game and category wins.
    pub fn insert(&mut self, asset: MediaAsset) -> bool {
        let assets = self.by_category.entry(asset.category).or_default();
        if assets.contains_key(&asset.id) {
            return false;
        }
        assets.insert(asset.id.clone(), asset);
        true
    }

    pub fn get(&self, id: &GameId, category: MediaCategory) -> Option<&MediaAsset> {
        self.by_category.get(&category)?.get(id)
    }

    pub fn contains(&self, id: &GameId, category: MediaCategory) -> bool {
        self.get(id, category).is_some()
    }

    pub fn count(&self, category: MediaCategory) -> usize {
        self.by_category.get(&category).map_or(0, BTreeMap::len)
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> GameId {
        GameId::new(name).unwrap()
    }

    #[test]
    fn categories_map_to_batocera_layout() {
        let pacman = id("pacman");
        assert_eq!(
            MediaCategory::Screenshot.gamelist_path(&pacman),
            "./media/screenshots/pacman.png"
        );
        assert_eq!(
            MediaCategory::Cover.gamelist_path(&pacman),
            "./media/covers/pacman.png"
        );
        assert_eq!(
            MediaCategory::Marquee.destination(Path::new("/roms/mame"), &pacman),
            PathBuf::from("/roms/mame/media/marquees/pacman.png")
        );
    }

    #[test]
    fn index_keeps_first_asset_per_game() {
        let mut index = MediaIndex::new();
        let first = MediaAsset {
            id: id("pacman"),
            category: MediaCategory::Screenshot,
            entry_name: "pacman.png".to_string(),
            staged_path: None,
        };
        let second = MediaAsset {
            entry_name: "snap/pacman.png".to_string(),
            ..first.clone()
        };
        assert!(index.insert(first));
        assert!(!index.insert(second));
        assert_eq!(
            index.get(&id("pacman"), MediaCategory::Screenshot).unwrap().entry_name,
            "pacman.png"
        );
        assert!(!index.contains(&id("pacman"), MediaCategory::Marquee));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn counts_are_per_category() {
        let mut index = MediaIndex::new();
        for (name, category) in [
            ("mspacman", MediaCategory::Marquee),
            ("galaga", MediaCategory::Screenshot),
            ("dkong", MediaCategory::Screenshot),
        ] {
            index.insert(MediaAsset {
                id: id(name),
                category,
                entry_name: format!("{name}.png"),
                staged_path: None,
            });
        }
        assert_eq!(index.count(MediaCategory::Screenshot), 2);
        assert_eq!(index.count(MediaCategory::Cover), 0);
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }
}
