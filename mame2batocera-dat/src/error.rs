use std::path::PathBuf;

/// Errors that can occur while locating and parsing MAME DAT files.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read zip archive {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("No XML file found in {0}")]
    MissingXml(PathBuf),

    #[error("Malformed DAT XML: {0}")]
    MalformedDat(String),

    #[error("DAT source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("No usable DAT data: every DAT category was missing or failed to load")]
    NoDatData,
}

impl DatError {
    pub fn zip(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Zip {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDat(msg.into())
    }
}

impl From<quick_xml::Error> for DatError {
    fn from(e: quick_xml::Error) -> Self {
        Self::MalformedDat(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for DatError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::MalformedDat(e.to_string())
    }
}
