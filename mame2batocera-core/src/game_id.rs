//! Canonical game identifiers.
//!
//! DAT `name` attributes, extras PNG file names, and gamelist `<path>` values
//! all refer to the same MAME set name, but each source spells it slightly
//! differently (`pacman`, `snap/PacMan.png`, `./pacman.zip`). Every input is
//! funnelled through [`GameId`] so the three sources join on one key.

use std::borrow::Borrow;
use std::fmt;

/// Normalized MAME set name: trimmed and ASCII-lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(String);

impl GameId {
    /// Normalize a bare set name, such as a DAT `name` attribute.
    ///
    /// Returns `None` when nothing is left after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_ascii_lowercase()))
    }

    /// Normalize a file name or relative path: the last path component with
    /// its extension removed.
    ///
    /// `./roms/PacMan.zip` and `snap\pacman.png` both yield `pacman`.
    pub fn from_path_like(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let file_name = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
        let stem = match file_name.rfind('.') {
            Some(0) | None => file_name,
            Some(idx) => &file_name[..idx],
        };
        Self::new(stem)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GameId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "tests/game_id_tests.rs"]
mod tests;
