//! In-memory model of a Batocera `gamelist.xml`.
//!
//! Entries keep every attribute and child element in document order, so
//! fields this tool never produces (`rating`, `video`, `lastplayed`, scraper
//! bookkeeping, ...) survive a read/merge/write cycle untouched. Only the
//! entries themselves are modeled: other children of `<gameList>` and the
//! root's attributes are not kept.

use mame2batocera_core::GameId;

/// Child element names used by Batocera.
pub mod tags {
    pub const PATH: &str = "path";
    pub const NAME: &str = "name";
    pub const DESC: &str = "desc";
    pub const IMAGE: &str = "image";
    pub const THUMBNAIL: &str = "thumbnail";
    pub const MARQUEE: &str = "marquee";
    pub const VIDEO: &str = "video";
    pub const RATING: &str = "rating";
    pub const RELEASEDATE: &str = "releasedate";
    pub const DEVELOPER: &str = "developer";
    pub const PUBLISHER: &str = "publisher";
    pub const GENRE: &str = "genre";
    pub const PLAYERS: &str = "players";
    pub const HIDDEN: &str = "hidden";
}

/// A single child element of a `<game>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GamelistField {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
}

impl GamelistField {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: text.into(),
        }
    }
}

/// A `<game>` (or `<folder>`) element of a gamelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamelistEntry {
    /// Element name, `game` unless read from a `<folder>`
    pub element: String,
    pub attributes: Vec<(String, String)>,
    pub fields: Vec<GamelistField>,
}

impl Default for GamelistEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl GamelistEntry {
    pub fn new() -> Self {
        Self::with_element("game")
    }

    pub fn with_element(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            attributes: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn is_game(&self) -> bool {
        self.element == "game"
    }

    /// Text of the first field named `tag`.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.text.as_str())
    }

    /// Whether `tag` is present with non-blank text.
    pub fn has_value(&self, tag: &str) -> bool {
        self.get(tag).is_some_and(|v| !v.trim().is_empty())
    }

    /// Set the text of `tag`, replacing the first occurrence in place or
    /// appending a new field.
    pub fn set(&mut self, tag: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.tag == tag) {
            Some(field) => field.text = value,
            None => self.fields.push(GamelistField::new(tag, value)),
        }
    }

    /// Set `tag` only when it is absent or blank. Returns whether it was set.
    pub fn set_if_empty(&mut self, tag: &str, value: impl Into<String>) -> bool {
        if self.has_value(tag) {
            return false;
        }
        self.set(tag, value);
        true
    }

    /// Identifier derived from `<path>`, for `<game>` entries only.
    pub fn game_id(&self) -> Option<GameId> {
        if !self.is_game() {
            return None;
        }
        self.get(tags::PATH).and_then(GameId::from_path_like)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut entry = GamelistEntry::new();
        entry.set(tags::PATH, "./pacman.zip");
        entry.set(tags::NAME, "Pac-Man");
        entry.set(tags::PATH, "./puckman.zip");

        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.fields[0].tag, "path");
        assert_eq!(entry.get(tags::PATH), Some("./puckman.zip"));
    }

    #[test]
    fn set_if_empty_respects_existing_values() {
        let mut entry = GamelistEntry::new();
        entry.set(tags::DESC, "Classic maze game");
        entry.set(tags::GENRE, "  ");

        assert!(!entry.set_if_empty(tags::DESC, "Pac-Man"));
        assert!(entry.set_if_empty(tags::GENRE, "Arcade"));
        assert!(entry.set_if_empty(tags::RATING, "0.5"));
        assert_eq!(entry.get(tags::DESC), Some("Classic maze game"));
        assert_eq!(entry.get(tags::GENRE), Some("Arcade"));
    }

    #[test]
    fn game_id_comes_from_path() {
        let mut entry = GamelistEntry::new();
        assert_eq!(entry.game_id(), None);
        entry.set(tags::PATH, "./PacMan.zip");
        assert_eq!(entry.game_id().unwrap().as_str(), "pacman");

        let mut folder = GamelistEntry::with_element("folder");
        folder.set(tags::PATH, "./bios");
        assert_eq!(folder.game_id(), None);
    }
}
