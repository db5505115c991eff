//! Combining the ROM, CHD and artwork DATs into one ordered record set.

use std::collections::HashMap;
use std::path::Path;

use mame2batocera_core::GameId;

use crate::archive::{DatCategory, discover_dat_archives, load_dat_archive};
use crate::dat::DatGame;
use crate::error::DatError;

/// Games from every loaded DAT category, unique by identifier, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct DatSet {
    games: Vec<DatGame>,
    index: HashMap<GameId, usize>,
}

impl DatSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DatGame> {
        self.index.get(id).map(|&i| &self.games[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatGame> {
        self.games.iter()
    }

    /// Merge the games of one DAT category into the set.
    ///
    /// New identifiers are appended. For identifiers already present, ROM and
    /// CHD data overwrite with their non-empty values while artwork data only
    /// fills gaps. Returns the number of identifiers added.
    pub fn merge_category(&mut self, category: DatCategory, games: Vec<DatGame>) -> usize {
        let mut added = 0;
        for game in games {
            match self.index.get(&game.id) {
                Some(&i) => match category {
                    DatCategory::Rom | DatCategory::Chd => self.games[i].overlay(&game),
                    DatCategory::Artwork => self.games[i].fill_missing(&game),
                },
                None => {
                    self.index.insert(game.id.clone(), self.games.len());
                    self.games.push(game);
                    added += 1;
                }
            }
        }
        added
    }
}

/// Result of loading every DAT category found at a source path.
#[derive(Debug, Default)]
pub struct LoadedDats {
    pub set: DatSet,
    /// Categories that loaded, with the number of games each contained
    pub loaded: Vec<(DatCategory, usize)>,
    /// Categories that were missing or failed, with the reason
    pub skipped: Vec<(DatCategory, String)>,
    pub build: Option<String>,
}

/// Discover, parse and merge the ROM, CHD and artwork DATs under `source`.
///
/// Each category is isolated: a missing or broken archive is logged and
/// skipped. Only when no category yields data does this fail with
/// [`DatError::NoDatData`].
pub fn load_dat_set(source: &Path) -> Result<LoadedDats, DatError> {
    let archives = discover_dat_archives(source)?;
    let mut result = LoadedDats::default();

    for &category in DatCategory::all() {
        let Some(archive) = archives.iter().find(|a| a.category == category) else {
            log::warn!("No {category} DAT archive found in {}", source.display());
            result
                .skipped
                .push((category, "archive not found".to_string()));
            continue;
        };

        match load_dat_archive(&archive.path) {
            Ok(dat) => {
                let count = dat.games.len();
                let added = result.set.merge_category(category, dat.games);
                log::debug!(
                    "{category} DAT {}: {count} entries, {added} new",
                    archive.path.display(),
                );
                if result.build.is_none() {
                    result.build = dat.build;
                }
                result.loaded.push((category, count));
            }
            Err(e) => {
                log::warn!(
                    "Skipping {category} DAT {}: {e}",
                    archive.path.display(),
                );
                result.skipped.push((category, e.to_string()));
            }
        }
    }

    if result.loaded.is_empty() {
        return Err(DatError::NoDatData);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, description: &str) -> DatGame {
        let mut game = DatGame::new(GameId::new(name).unwrap());
        game.description = description.to_string();
        game
    }

    #[test]
    fn first_seen_order_is_kept_across_categories() {
        let mut set = DatSet::new();
        set.merge_category(
            DatCategory::Rom,
            vec![game("pacman", "Pac-Man"), game("galaga", "Galaga")],
        );
        set.merge_category(
            DatCategory::Chd,
            vec![game("kinst", "Killer Instinct"), game("pacman", "")],
        );
        set.merge_category(DatCategory::Artwork, vec![game("dkong", "Donkey Kong")]);

        let order: Vec<&str> = set.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(order, vec!["pacman", "galaga", "kinst", "dkong"]);
        assert_eq!(set.get("pacman").unwrap().description, "Pac-Man");
    }

    #[test]
    fn chd_overwrites_but_artwork_only_fills() {
        let mut set = DatSet::new();
        set.merge_category(DatCategory::Rom, vec![game("area51", "Area 51")]);
        set.merge_category(DatCategory::Chd, vec![game("area51", "Area 51 (R3000)")]);
        assert_eq!(set.get("area51").unwrap().description, "Area 51 (R3000)");

        let added = set.merge_category(DatCategory::Artwork, vec![game("area51", "Artwork")]);
        assert_eq!(added, 0);
        assert_eq!(set.get("area51").unwrap().description, "Area 51 (R3000)");
        assert_eq!(set.len(), 1);
    }
}
