//! Progress bar adapter using indicatif.

use frameq_core::{ProgressEvent, ProgressSink};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar adapter for CLI output.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl ProgressBar {
    /// Creates a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show a spinner; otherwise print one line per batch
    #[must_use]
    pub fn new(quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self {
                bar: None,
                quiet: true,
            };
        }

        let bar = show_bar.then(|| {
            let bar = IndicatifBar::new_spinner();
            if let Ok(style) =
                ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
            {
                bar.set_style(style);
            }
            bar
        });

        Self { bar, quiet }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event {
            ProgressEvent::Started { directory, total } => {
                if let Some(bar) = &self.bar {
                    match total {
                        Some(t) => bar.set_message(format!("Draining {directory} ({t} candidates)")),
                        None => bar.set_message(format!("Draining {directory}")),
                    }
                }
            }
            ProgressEvent::BatchLoaded { batch, summary } => {
                let first = summary.frames.first().map_or("-", |f| f.name.as_str());
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                    bar.set_message(format!("batch {batch} starting at {first}"));
                } else {
                    eprintln!(
                        "batch {batch}: {} frame(s) from {first}",
                        summary.frames.len()
                    );
                }
            }
            ProgressEvent::Finished { batches, frames } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!("Done: {batches} batches, {frames} frames"));
                }
            }
        }
    }
}
