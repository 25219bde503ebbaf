use indicatif::{ProgressBar, ProgressStyle};

use crate::core::observe::{Observation, Observer};

/// Builds the observer for a CLI invocation: JSON lines for pipelines, a
/// terminal progress bar otherwise.
pub fn make_observer(json: bool) -> Box<dyn Observer> {
    if json {
        Box::new(JsonLinesObserver)
    } else {
        Box::new(TermObserver::new())
    }
}

/// Emits each observation as one JSON object per line on stdout.
pub struct JsonLinesObserver;

impl Observer for JsonLinesObserver {
    fn observe(&mut self, observation: Observation) {
        if let Ok(line) = serde_json::to_string(&observation) {
            println!("{line}");
        }
    }
}

/// Renders transfer observations as a byte-count progress bar and duration
/// observations as a summary line. The bar is created lazily on the first
/// transfer, sized when the total is known, a plain byte counter when not.
pub struct TermObserver {
    bar: Option<ProgressBar>,
}

impl Default for TermObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TermObserver {
    pub fn new() -> Self {
        Self { bar: None }
    }

    fn bar_for(&mut self, total: Option<u64>) -> &ProgressBar {
        self.bar.get_or_insert_with(|| match total {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template("{bytes:>10} [{bar:40}] {percent:>3}%")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("{bytes:>10} downloaded")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        })
    }
}

impl Observer for TermObserver {
    fn observe(&mut self, observation: Observation) {
        match observation {
            Observation::Transfer { bytes, total, .. } => {
                self.bar_for(total).set_position(bytes);
            }
            Observation::Duration {
                operation,
                elapsed_ms,
            } => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
                println!("{operation} took {elapsed_ms} ms");
            }
        }
    }
}

impl Drop for TermObserver {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
