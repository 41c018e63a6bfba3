//! Terminal progress display for a synthesis run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{percent:>3}}% {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks pixels assigned across all traversal passes
pub struct ProgressManager {
    bar: ProgressBar,
    pass_count: usize,
}

impl ProgressManager {
    /// Create a bar spanning `pixels` assignments over `pass_count` passes
    pub fn new(pixels: usize, pass_count: usize) -> Self {
        let bar = ProgressBar::new(pixels as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.enable_steady_tick(Duration::from_millis(250));

        let manager = Self { bar, pass_count };
        manager.update(0, 0);
        manager
    }

    /// Report pixels assigned so far and the pass in progress
    pub fn update(&self, assigned: usize, pass_index: usize) {
        self.bar.set_position(assigned as u64);
        let pass = (pass_index + 1).min(self.pass_count);
        let max_width = self.pass_count.to_string().len();
        self.bar
            .set_message(format!("pass {pass:>max_width$}/{}", self.pass_count));
    }

    /// Label the bar with the file being drawn
    pub fn set_label(&self, label: &str) {
        self.bar.set_prefix(label.to_string());
    }

    /// Mark the run as complete and remove the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
