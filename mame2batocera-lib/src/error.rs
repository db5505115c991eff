use std::path::PathBuf;

use thiserror::Error;

use mame2batocera_dat::DatError;
use mame2batocera_frontend::FrontendError;

/// Errors from reading one extras archive.
#[derive(Debug, Error)]
pub enum ExtrasError {
    #[error("Extras archive not found: {0}")]
    MissingExtrasArchive(PathBuf),

    #[error("Cannot read zip archive {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtrasError {
    pub fn zip(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Zip {
            path: path.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Fatal errors that stop a conversion run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Required directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error(transparent)]
    Dat(#[from] DatError),

    #[error(transparent)]
    Frontend(#[from] FrontendError),

    #[error("Cannot create staging directory: {0}")]
    Staging(#[source] std::io::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
