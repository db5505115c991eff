use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::FrontendError;
use crate::gamelist::{GamelistEntry, GamelistField};

/// Read an existing gamelist from disk.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_gamelist(path: &Path) -> Result<Option<Vec<GamelistEntry>>, FrontendError> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let entries = parse_gamelist(std::io::BufReader::new(file))?;
    Ok(Some(entries))
}

/// Parse a `<gameList>` document.
///
/// Each `<game>` and `<folder>` becomes a [`GamelistEntry`]. Elements nested
/// deeper than a field, other children of the root, and the root's own
/// attributes are logged at debug level and dropped.
pub fn parse_gamelist<R: BufRead>(reader: R) -> Result<Vec<GamelistEntry>, FrontendError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut saw_root = false;

    let mut current: Option<GamelistEntry> = None;
    let mut field: Option<GamelistField> = None;
    // Depth of elements being skipped
    let mut skip_depth = 0usize;

    loop {
        let event = xml.read_event_into(&mut buf).map_err(|e| {
            FrontendError::gamelist(format!("{e} (at byte {})", xml.buffer_position()))
        })?;

        match event {
            Event::Start(ref e) => {
                let tag = tag_name(e);
                if skip_depth > 0 {
                    skip_depth += 1;
                } else if field.is_some() {
                    log::debug!("Ignoring nested <{tag}> in gamelist field");
                    skip_depth = 1;
                } else if current.is_some() {
                    field = Some(GamelistField {
                        tag,
                        attributes: read_attributes(e)?,
                        text: String::new(),
                    });
                } else if is_entry_element(&tag) {
                    let mut entry = GamelistEntry::with_element(tag);
                    entry.attributes = read_attributes(e)?;
                    current = Some(entry);
                } else if tag == "gameList" && !saw_root {
                    saw_root = true;
                    log_root_attributes(e)?;
                } else {
                    log::debug!("Ignoring <{tag}> outside gamelist entries");
                    skip_depth = 1;
                }
            }
            Event::Empty(ref e) => {
                let tag = tag_name(e);
                if skip_depth > 0 || field.is_some() {
                    log::debug!("Ignoring nested <{tag}/> in gamelist field");
                } else if let Some(entry) = current.as_mut() {
                    entry.fields.push(GamelistField {
                        tag,
                        attributes: read_attributes(e)?,
                        text: String::new(),
                    });
                } else if is_entry_element(&tag) {
                    let mut entry = GamelistEntry::with_element(tag);
                    entry.attributes = read_attributes(e)?;
                    entries.push(entry);
                } else if tag == "gameList" && !saw_root {
                    saw_root = true;
                    log_root_attributes(e)?;
                } else {
                    log::debug!("Ignoring <{tag}/> outside gamelist entries");
                }
            }
            Event::Text(ref e) => {
                if skip_depth == 0 {
                    if let Some(f) = field.as_mut() {
                        f.text.push_str(&e.unescape()?);
                    }
                }
            }
            Event::CData(e) => {
                if skip_depth == 0 {
                    if let Some(f) = field.as_mut() {
                        f.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
            }
            Event::End(_) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                } else if let Some(f) = field.take() {
                    if let Some(entry) = current.as_mut() {
                        entry.fields.push(f);
                    }
                } else if let Some(entry) = current.take() {
                    entries.push(entry);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(FrontendError::gamelist("missing <gameList> root element"));
    }

    Ok(entries)
}

fn is_entry_element(tag: &str) -> bool {
    tag == "game" || tag == "folder"
}

fn log_root_attributes(e: &BytesStart<'_>) -> Result<(), FrontendError> {
    for (key, value) in read_attributes(e)? {
        log::debug!("Ignoring <gameList> attribute {key}=\"{value}\"");
    }
    Ok(())
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn read_attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, FrontendError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
mod tests;
