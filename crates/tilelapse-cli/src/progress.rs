use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tilelapse_core::pipeline::{PipelineStage, ProgressReporter};

/// Drives one indicatif bar per pipeline stage. Stages without a known
/// item count get a spinner.
#[derive(Default)]
pub struct BarReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn counted(total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{msg:20} [{bar:40}] {pos}/{len}") {
            pb.set_style(style.progress_chars("=> "));
        }
        pb
    }

    fn spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg:20} {spinner}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        let pb = match total_items {
            Some(total) => Self::counted(total),
            None => Self::spinner(),
        };
        pb.set_message(stage.to_string());
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn advance(&self, items_done: usize) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.set_position(items_done as u64);
            }
        }
    }

    fn finish_stage(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish();
            }
        }
    }
}
