use std::fs;
use std::path::{Path, PathBuf};

use mame2batocera_core::{GameId, MediaCategory};

use crate::gamelist::{GamelistEntry, GamelistField};
use crate::{Frontend, FrontendError};

/// Batocera (EmulationStation) frontend.
pub struct BatoceraFrontend;

impl BatoceraFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Copy a staged media file to its final place under `roms_dir`.
    pub fn install_media(
        &self,
        staged: &Path,
        category: MediaCategory,
        id: &GameId,
        roms_dir: &Path,
    ) -> Result<PathBuf, FrontendError> {
        let dest = category.destination(roms_dir, id);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| FrontendError::write(parent, e))?;
        }
        fs::copy(staged, &dest).map_err(|e| FrontendError::write(&dest, e))?;
        Ok(dest)
    }
}

impl Default for BatoceraFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for BatoceraFrontend {
    fn name(&self) -> &'static str {
        "Batocera"
    }

    fn gamelist_path(&self, roms_dir: &Path) -> PathBuf {
        roms_dir.join("gamelist.xml")
    }

    fn render(&self, entries: &[GamelistEntry]) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\"?>\n");
        xml.push_str("<gameList>\n");

        for entry in entries {
            xml.push_str("  <");
            xml.push_str(&entry.element);
            write_attributes(&mut xml, &entry.attributes);
            xml.push_str(">\n");

            for field in &entry.fields {
                write_field(&mut xml, field);
            }

            xml.push_str("  </");
            xml.push_str(&entry.element);
            xml.push_str(">\n");
        }

        xml.push_str("</gameList>\n");
        xml
    }

    fn write_gamelist(
        &self,
        entries: &[GamelistEntry],
        roms_dir: &Path,
    ) -> Result<PathBuf, FrontendError> {
        if !roms_dir.is_dir() {
            return Err(FrontendError::write(
                roms_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "directory does not exist"),
            ));
        }

        let gamelist_path = self.gamelist_path(roms_dir);
        let xml = self.render(entries);

        // Write atomically
        let tmp = gamelist_path.with_extension("xml.tmp");
        fs::write(&tmp, xml.as_bytes()).map_err(|e| FrontendError::write(&tmp, e))?;
        fs::rename(&tmp, &gamelist_path).map_err(|e| FrontendError::write(&gamelist_path, e))?;

        Ok(gamelist_path)
    }

    fn media_subdirs(&self) -> &[(&str, MediaCategory)] {
        &[
            ("screenshots", MediaCategory::Screenshot),
            ("covers", MediaCategory::Cover),
            ("marquees", MediaCategory::Marquee),
        ]
    }
}

fn write_attributes(xml: &mut String, attributes: &[(String, String)]) {
    for (key, value) in attributes {
        xml.push(' ');
        xml.push_str(key);
        xml.push_str("=\"");
        xml.push_str(&escape_xml(value));
        xml.push('"');
    }
}

fn write_field(xml: &mut String, field: &GamelistField) {
    xml.push_str("    <");
    xml.push_str(&field.tag);
    write_attributes(xml, &field.attributes);
    if field.text.is_empty() {
        xml.push_str("/>\n");
        return;
    }
    xml.push('>');
    xml.push_str(&escape_xml(&field.text));
    xml.push_str("</");
    xml.push_str(&field.tag);
    xml.push_str(">\n");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
#[path = "tests/batocera_tests.rs"]
mod tests;
