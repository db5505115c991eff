pub mod archive;
pub mod dat;
pub mod error;
pub mod set;

pub use archive::{DatArchive, DatCategory, discover_dat_archives, load_dat_archive};
pub use dat::{DatFile, DatGame, parse_dat};
pub use error::DatError;
pub use set::{DatSet, LoadedDats, load_dat_set};
