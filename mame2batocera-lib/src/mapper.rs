//! MAME DAT record to Batocera gamelist field mapping.
//!
//! Pure functions only; media presence is decided by the caller's
//! [`MediaIndex`].

use chrono::NaiveDate;

use mame2batocera_core::{GameId, MediaCategory, MediaIndex};
use mame2batocera_dat::{DatGame, DatSet};
use mame2batocera_frontend::{GamelistEntry, tags};

use crate::settings::MappingSettings;

/// Emulation status from `<driver status="...">`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Good,
    Imperfect,
    Preliminary,
    /// Any other non-empty status value
    Unknown,
}

impl DriverStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "good" => Self::Good,
            "imperfect" => Self::Imperfect,
            "preliminary" => Self::Preliminary,
            _ => Self::Unknown,
        }
    }

    /// Whether games with this status should be hidden in the frontend.
    pub fn hides_game(&self) -> bool {
        !matches!(self, Self::Good | Self::Imperfect)
    }
}

/// A game shaped like a Batocera `<game>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedGame {
    pub id: GameId,
    pub path: String,
    pub name: String,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub marquee: Option<String>,
    pub releasedate: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub genre: String,
    pub players: Option<u32>,
    pub hidden: bool,
}

impl MappedGame {
    /// Media path for a category, if the asset exists.
    pub fn media(&self, category: MediaCategory) -> Option<&str> {
        match category {
            MediaCategory::Screenshot => self.image.as_deref(),
            MediaCategory::Cover => self.thumbnail.as_deref(),
            MediaCategory::Marquee => self.marquee.as_deref(),
        }
    }

    /// Set the media fields of `entry` for every asset this game has.
    pub fn set_media(&self, entry: &mut GamelistEntry) {
        for &category in MediaCategory::all() {
            if let Some(path) = self.media(category) {
                entry.set(category.gamelist_tag(), path);
            }
        }
    }

    /// Convert to a gamelist entry with fields in canonical order.
    pub fn to_entry(&self) -> GamelistEntry {
        let mut entry = GamelistEntry::new();
        entry.set(tags::PATH, self.path.as_str());
        entry.set(tags::NAME, self.name.as_str());

        if let Some(desc) = &self.desc {
            entry.set(tags::DESC, desc.as_str());
        }
        self.set_media(&mut entry);

        let optional = [
            (tags::RELEASEDATE, self.releasedate.as_deref()),
            (tags::DEVELOPER, self.developer.as_deref()),
            (tags::PUBLISHER, self.publisher.as_deref()),
        ];
        for (tag, value) in optional {
            if let Some(value) = value {
                entry.set(tag, value);
            }
        }

        entry.set(tags::GENRE, self.genre.as_str());
        if let Some(players) = self.players {
            entry.set(tags::PLAYERS, players.to_string());
        }
        entry.set(tags::HIDDEN, bool_text(self.hidden));
        entry
    }
}

pub(crate) fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Map a DAT year to a Batocera release date (`YYYY0101T000000`).
///
/// Only a year whose first four characters are digits is usable; MAME's
/// `198?` and `19??` placeholders give `None`.
pub fn release_date(year: &str) -> Option<String> {
    let digits = year.trim().get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = digits.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    Some(date.format("%Y%m%dT%H%M%S").to_string())
}

/// Parse a player count, collapsing a range (`1-2`, `1~4`) to its maximum.
///
/// Zero and unparsable values give `None`.
pub fn player_count(raw: &str) -> Option<u32> {
    raw.split(['-', '~'])
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?
        .into_iter()
        .max()
        .filter(|&n| n > 0)
}

/// Whether a game is hidden, given its optional driver status.
pub fn hidden_for_status(status: Option<&str>) -> bool {
    match status.map(str::trim) {
        None | Some("") => false,
        Some(raw) => DriverStatus::parse(raw).hides_game(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Map one DAT record.
pub fn map_game(game: &DatGame, media: &MediaIndex, settings: &MappingSettings) -> MappedGame {
    let id = &game.id;
    let description = non_empty(&game.description);
    let manufacturer = non_empty(&game.manufacturer);
    let media_path = |category: MediaCategory| {
        media
            .contains(id, category)
            .then(|| category.gamelist_path(id))
    };

    let mut hidden = hidden_for_status(game.driver_status.as_deref());
    if settings.hide_system_entries && game.is_system_entry() {
        hidden = true;
    }

    MappedGame {
        id: id.clone(),
        path: format!("./{id}.zip"),
        name: description.clone().unwrap_or_else(|| id.to_string()),
        desc: description,
        image: media_path(MediaCategory::Screenshot),
        thumbnail: media_path(MediaCategory::Cover),
        marquee: media_path(MediaCategory::Marquee),
        releasedate: release_date(&game.year),
        developer: manufacturer.clone(),
        publisher: manufacturer,
        genre: game
            .genre
            .as_deref()
            .and_then(non_empty)
            .unwrap_or_else(|| settings.default_genre.clone()),
        players: game.players.as_deref().and_then(player_count),
        hidden,
    }
}

/// Map every DAT record, in DAT order.
pub fn map_games(dats: &DatSet, media: &MediaIndex, settings: &MappingSettings) -> Vec<MappedGame> {
    let mapped: Vec<MappedGame> = dats.iter().map(|g| map_game(g, media, settings)).collect();
    log::debug!(
        "Mapped {} games ({} hidden)",
        mapped.len(),
        mapped.iter().filter(|g| g.hidden).count()
    );
    mapped
}

#[cfg(test)]
#[path = "tests/mapper_tests.rs"]
mod tests;
