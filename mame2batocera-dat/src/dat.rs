use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use mame2batocera_core::GameId;

use crate::error::DatError;

/// A parsed MAME DAT (supports both `-listxml` and Logiqx layouts).
#[derive(Debug, Clone, Default)]
pub struct DatFile {
    /// MAME build (`<mame build="...">`) or Logiqx header version, if present
    pub build: Option<String>,
    pub games: Vec<DatGame>,
}

/// A single `<machine>` / `<game>` entry from a DAT file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatGame {
    pub id: GameId,
    pub description: String,
    /// Raw year text, may contain wildcards such as `198?`
    pub year: String,
    pub manufacturer: String,
    /// Raw `<input players="...">` value
    pub players: Option<String>,
    /// Raw `<driver status="...">` value
    pub driver_status: Option<String>,
    /// Genre, when the DAT carries one (stock MAME DATs do not)
    pub genre: Option<String>,
    pub clone_of: Option<String>,
    pub is_bios: bool,
    pub is_device: bool,
    pub is_mechanical: bool,
}

impl DatGame {
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            description: String::new(),
            year: String::new(),
            manufacturer: String::new(),
            players: None,
            driver_status: None,
            genre: None,
            clone_of: None,
            is_bios: false,
            is_device: false,
            is_mechanical: false,
        }
    }

    /// Whether this entry is a BIOS, device or mechanical set rather than a game.
    pub fn is_system_entry(&self) -> bool {
        self.is_bios || self.is_device || self.is_mechanical
    }

    /// Overwrite fields with every non-empty value from `other`.
    pub fn overlay(&mut self, other: &DatGame) {
        overlay_text(&mut self.description, &other.description);
        overlay_text(&mut self.year, &other.year);
        overlay_text(&mut self.manufacturer, &other.manufacturer);
        overlay_opt(&mut self.players, &other.players);
        overlay_opt(&mut self.driver_status, &other.driver_status);
        overlay_opt(&mut self.genre, &other.genre);
        overlay_opt(&mut self.clone_of, &other.clone_of);
        self.merge_flags(other);
    }

    /// Fill only the fields that are still empty with values from `other`.
    pub fn fill_missing(&mut self, other: &DatGame) {
        if self.description.is_empty() {
            self.description = other.description.clone();
        }
        if self.year.is_empty() {
            self.year = other.year.clone();
        }
        if self.manufacturer.is_empty() {
            self.manufacturer = other.manufacturer.clone();
        }
        fill_opt(&mut self.players, &other.players);
        fill_opt(&mut self.driver_status, &other.driver_status);
        fill_opt(&mut self.genre, &other.genre);
        fill_opt(&mut self.clone_of, &other.clone_of);
        self.merge_flags(other);
    }

    fn merge_flags(&mut self, other: &DatGame) {
        self.is_bios |= other.is_bios;
        self.is_device |= other.is_device;
        self.is_mechanical |= other.is_mechanical;
    }
}

fn overlay_text(target: &mut String, value: &str) {
    if !value.is_empty() {
        *target = value.to_string();
    }
}

fn overlay_opt(target: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
        *target = Some(v.to_string());
    }
}

fn fill_opt(target: &mut Option<String>, value: &Option<String>) {
    if target.as_deref().is_none_or(str::is_empty) {
        overlay_opt(target, value);
    }
}

/// Parse a MAME DAT from any buffered reader.
pub fn parse_dat<R: BufRead>(reader: R) -> Result<DatFile, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut dat = DatFile::default();

    let mut saw_root = false;
    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_game: Option<DatGame> = None;

    loop {
        let event = xml.read_event_into(&mut buf).map_err(|e| {
            DatError::malformed(format!("{e} (at byte {})", xml.buffer_position()))
        })?;

        match event {
            Event::Start(ref e) => {
                saw_root = true;
                let tag_name = tag_name(e);
                match tag_name.as_str() {
                    "mame" | "datafile" => {
                        if let Some(build) = attribute(e, b"build")? {
                            dat.build = Some(build);
                        }
                    }
                    "header" => in_header = true,
                    "game" | "machine" => current_game = start_game(e)?,
                    "input" | "driver" => apply_child_attributes(&mut current_game, e)?,
                    _ => current_tag = tag_name,
                }
            }
            Event::Empty(ref e) => {
                saw_root = true;
                match tag_name(e).as_str() {
                    "input" | "driver" => apply_child_attributes(&mut current_game, e)?,
                    // A machine with no children at all
                    "game" | "machine" => {
                        if let Some(game) = start_game(e)? {
                            dat.games.push(game);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                apply_text(&mut dat, &mut current_game, in_header, &current_tag, &text);
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                let text = String::from_utf8_lossy(&raw);
                apply_text(&mut dat, &mut current_game, in_header, &current_tag, &text);
            }
            Event::End(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = false,
                    "game" | "machine" => {
                        if let Some(game) = current_game.take() {
                            dat.games.push(game);
                        }
                    }
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(DatError::malformed("document has no root element"));
    }

    Ok(dat)
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, DatError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn start_game(e: &BytesStart<'_>) -> Result<Option<DatGame>, DatError> {
    let mut game: Option<DatGame> = None;
    let mut clone_of = None;
    let mut flags = (false, false, false);

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"name" => game = GameId::new(&value).map(DatGame::new),
            b"cloneof" => clone_of = Some(value.into_owned()),
            b"isbios" => flags.0 = value == "yes",
            b"isdevice" => flags.1 = value == "yes",
            b"ismechanical" => flags.2 = value == "yes",
            _ => {}
        }
    }

    match game.as_mut() {
        Some(game) => {
            game.clone_of = clone_of;
            (game.is_bios, game.is_device, game.is_mechanical) = flags;
        }
        None => log::debug!("Skipping DAT entry without a name"),
    }
    Ok(game)
}

fn apply_child_attributes(
    current_game: &mut Option<DatGame>,
    e: &BytesStart<'_>,
) -> Result<(), DatError> {
    let Some(game) = current_game.as_mut() else {
        return Ok(());
    };
    match e.name().as_ref() {
        b"input" => {
            if let Some(players) = attribute(e, b"players")? {
                game.players = Some(players);
            }
        }
        b"driver" => {
            if let Some(status) = attribute(e, b"status")? {
                game.driver_status = Some(status);
            }
        }
        _ => {}
    }
    Ok(())
}

fn apply_text(
    dat: &mut DatFile,
    current_game: &mut Option<DatGame>,
    in_header: bool,
    current_tag: &str,
    text: &str,
) {
    if in_header {
        if current_tag == "version" && dat.build.is_none() {
            dat.build = Some(text.to_string());
        }
        return;
    }
    let Some(game) = current_game.as_mut() else {
        return;
    };
    match current_tag {
        "description" => game.description.push_str(text),
        "year" => game.year.push_str(text),
        "manufacturer" => game.manufacturer.push_str(text),
        "genre" => game.genre.get_or_insert_with(String::new).push_str(text),
        _ => {}
    }
}

#[cfg(test)]
#[path = "tests/dat_tests.rs"]
mod tests;
