//! Pipeline progress reporting.

use mame2batocera_core::MediaCategory;

/// Trait for receiving progress updates from a conversion run.
pub trait PipelineProgress {
    /// Called when a pipeline stage starts (e.g., "Loading DAT archives").
    fn on_phase(&self, message: &str);

    /// Called before a batch of media files is extracted or installed.
    fn on_media_start(&self, category: MediaCategory, total: usize);

    /// Called after each media file in the current batch.
    fn on_media(&self, current: usize, total: usize, name: &str);

    /// Called when the current media batch is finished.
    fn on_media_done(&self);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl PipelineProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_media_start(&self, _category: MediaCategory, _total: usize) {}
    fn on_media(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_media_done(&self) {}
}
