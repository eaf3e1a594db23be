//! Console progress reporting using indicatif.
//!
//! [`ConsoleObserver`] implements [`RunObserver`] for the binary: a progress
//! bar over the scanned files on stderr, and each per-file description
//! printed above it on stdout.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::pipeline::RunObserver;
use crate::record::FileRecord;
use crate::report::RunSummary;

/// Terminal observer for pipeline runs.
pub struct ConsoleObserver {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
    show_actions: bool,
}

impl ConsoleObserver {
    /// Create a console observer.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, neither the bar nor per-file lines are shown.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldersweep::progress::ConsoleObserver;
    ///
    /// let observer = ConsoleObserver::new(false).with_actions(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
            show_actions: true,
        }
    }

    /// Print (or suppress) the per-file descriptions.
    #[must_use]
    pub fn with_actions(mut self, show: bool) -> Self {
        self.show_actions = show;
        self
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl RunObserver for ConsoleObserver {
    fn on_start(&self, total: usize) {
        if self.quiet {
            return;
        }
        let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        pb.set_style(Self::style());
        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_record(&self, _record: &FileRecord, description: &str) {
        if self.quiet {
            return;
        }
        let Ok(bar) = self.bar.lock() else {
            return;
        };
        match bar.as_ref() {
            Some(pb) => {
                if self.show_actions {
                    pb.suspend(|| print!("{description}"));
                }
                pb.inc(1);
            }
            None if self.show_actions => print!("{description}"),
            None => {}
        }
    }

    fn on_finish(&self, _summary: &RunSummary) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
            }
        }
    }
}
