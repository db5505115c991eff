pub mod error;
pub mod extras;
pub mod mapper;
pub mod merge;
pub mod pipeline;
pub mod progress;
pub mod settings;
pub mod staging;

pub use error::{ExtrasError, PipelineError, SettingsError};
pub use mapper::{DriverStatus, MappedGame, map_game, map_games};
pub use merge::{MergeOutcome, MergeStats, merge_gamelist};
pub use pipeline::{ConvertOptions, ConvertSummary, convert};
pub use progress::{PipelineProgress, SilentProgress};
pub use settings::{ExtrasSettings, MappingSettings, PathSettings, Settings};
pub use staging::StagingArea;

pub use mame2batocera_core::{GameId, MediaAsset, MediaCategory, MediaIndex};
pub use mame2batocera_dat::{DatCategory, DatError};
pub use mame2batocera_frontend::{FrontendError, GamelistEntry};
