pub mod batocera;
pub mod error;
pub mod gamelist;
pub mod reader;

pub use batocera::BatoceraFrontend;
pub use error::FrontendError;
pub use gamelist::{GamelistEntry, GamelistField, tags};
pub use reader::{parse_gamelist, read_gamelist};

use std::path::{Path, PathBuf};

use mame2batocera_core::MediaCategory;

/// Trait for gaming frontend metadata writers.
pub trait Frontend {
    fn name(&self) -> &'static str;

    /// Location of the metadata file for a ROMs directory.
    fn gamelist_path(&self, roms_dir: &Path) -> PathBuf;

    /// Serialize `entries` into the frontend's metadata format.
    fn render(&self, entries: &[GamelistEntry]) -> String;

    /// Write the metadata file for `roms_dir`, returning its path.
    fn write_gamelist(
        &self,
        entries: &[GamelistEntry],
        roms_dir: &Path,
    ) -> Result<PathBuf, FrontendError>;

    /// Return the expected media subdirectory layout for this frontend.
    fn media_subdirs(&self) -> &[(&str, MediaCategory)];
}
