//! Merging freshly mapped games with an existing gamelist.
//!
//! Scraped metadata already in the gamelist (typically from ScreenScraper)
//! is better than what a DAT can offer for some fields and worse for others:
//!
//! - `name`, `desc`, `rating`, `genre`, `video`: the existing value is kept;
//!   the DAT value only fills a missing or blank field.
//! - `image`, `thumbnail`, `marquee`, `releasedate`, `developer`,
//!   `publisher`, `players`, `hidden`: refreshed from the DAT whenever the
//!   current run has a value.
//! - `path` and every other field or attribute are kept as they are.

use std::collections::HashMap;

use mame2batocera_core::GameId;
use mame2batocera_frontend::{GamelistEntry, tags};

use crate::mapper::{MappedGame, bool_text};

/// Counts reported after a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// DAT games matched to an existing entry
    pub merged: usize,
    /// DAT games with no existing entry
    pub added: usize,
    /// Existing entries with no DAT game, kept unchanged
    pub preserved: usize,
    /// Later duplicates of an existing entry matched to a DAT game, dropped
    pub duplicates_dropped: usize,
}

impl MergeStats {
    pub fn total(&self) -> usize {
        self.merged + self.added + self.preserved
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub entries: Vec<GamelistEntry>,
    pub stats: MergeStats,
}

/// Merge one mapped game into a copy of its existing entry.
pub fn merge_entry(existing: &GamelistEntry, fresh: &MappedGame) -> GamelistEntry {
    let mut entry = existing.clone();

    fresh.set_media(&mut entry);
    let refreshed = [
        (tags::RELEASEDATE, fresh.releasedate.as_deref()),
        (tags::DEVELOPER, fresh.developer.as_deref()),
        (tags::PUBLISHER, fresh.publisher.as_deref()),
    ];
    for (tag, value) in refreshed {
        if let Some(value) = value {
            entry.set(tag, value);
        }
    }
    if let Some(players) = fresh.players {
        entry.set(tags::PLAYERS, players.to_string());
    }
    entry.set(tags::HIDDEN, bool_text(fresh.hidden));

    entry.set_if_empty(tags::NAME, fresh.name.as_str());
    if let Some(desc) = &fresh.desc {
        entry.set_if_empty(tags::DESC, desc.as_str());
    }
    entry.set_if_empty(tags::GENRE, fresh.genre.as_str());

    entry
}

/// Merge mapped games (in DAT order) with the entries of an existing
/// gamelist.
///
/// Output order: one entry per mapped game, then every existing entry that
/// was not matched, in its original order. Existing entries without an
/// identifier (folders, entries lacking `<path>`) are kept verbatim. When an
/// identifier appears more than once, the first entry is the one merged; later
/// duplicates are dropped if the DAT has the game and kept otherwise, so each
/// DAT game is written exactly once.
pub fn merge_gamelist(mapped: &[MappedGame], existing: Option<&[GamelistEntry]>) -> MergeOutcome {
    let existing = existing.unwrap_or_default();

    let mut by_id: HashMap<GameId, usize> = HashMap::new();
    let mut duplicate_of: Vec<Option<GameId>> = vec![None; existing.len()];
    for (i, entry) in existing.iter().enumerate() {
        let Some(id) = entry.game_id() else {
            continue;
        };
        if by_id.contains_key(&id) {
            duplicate_of[i] = Some(id);
        } else {
            by_id.insert(id, i);
        }
    }

    let mut matched = vec![false; existing.len()];
    let mut outcome = MergeOutcome::default();

    for game in mapped {
        match by_id.get(&game.id) {
            Some(&i) => {
                matched[i] = true;
                outcome.entries.push(merge_entry(&existing[i], game));
                outcome.stats.merged += 1;
            }
            None => {
                outcome.entries.push(game.to_entry());
                outcome.stats.added += 1;
            }
        }
    }

    for (i, entry) in existing.iter().enumerate() {
        if matched[i] {
            continue;
        }
        let merged_first = duplicate_of[i]
            .as_ref()
            .and_then(|id| by_id.get(id))
            .is_some_and(|&first| matched[first]);
        if merged_first {
            log::warn!(
                "Dropping duplicate gamelist entry {}",
                entry.get(tags::PATH).unwrap_or_default()
            );
            outcome.stats.duplicates_dropped += 1;
            continue;
        }
        outcome.entries.push(entry.clone());
        outcome.stats.preserved += 1;
    }

    log::debug!(
        "Merge: {} merged, {} new, {} preserved, {} duplicates dropped",
        outcome.stats.merged,
        outcome.stats.added,
        outcome.stats.preserved,
        outcome.stats.duplicates_dropped
    );
    outcome
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
