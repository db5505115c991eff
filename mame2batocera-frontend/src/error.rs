use std::path::PathBuf;

/// Errors that can occur while reading or writing frontend metadata.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed gamelist: {0}")]
    Gamelist(String),
}

impl FrontendError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn gamelist(msg: impl Into<String>) -> Self {
        Self::Gamelist(msg.into())
    }
}

impl From<quick_xml::Error> for FrontendError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Gamelist(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for FrontendError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Gamelist(e.to_string())
    }
}
