//! Progress bar for media extraction and installation.

use std::cell::RefCell;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mame2batocera_lib::{MediaCategory, PipelineProgress};

pub(crate) struct BarProgress {
    bar: RefCell<Option<ProgressBar>>,
    hidden: bool,
}

impl BarProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        Self {
            bar: RefCell::new(None),
            hidden: quiet,
        }
    }
}

impl PipelineProgress for BarProgress {
    fn on_phase(&self, message: &str) {
        log::info!(
            "{} {}",
            "\u{25B8}".if_supports_color(Stdout, |t| t.cyan()),
            message
        );
    }

    fn on_media_start(&self, category: MediaCategory, total: usize) {
        if self.hidden || total == 0 {
            return;
        }
        let style = ProgressStyle::with_template("  {bar:30.cyan/dim} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let pb = ProgressBar::new(total as u64);
        pb.set_style(style.progress_chars("=> "));
        pb.set_message(category.to_string());
        *self.bar.borrow_mut() = Some(pb);
    }

    fn on_media(&self, current: usize, _total: usize, _name: &str) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_position(current as u64);
        }
    }

    fn on_media_done(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}
