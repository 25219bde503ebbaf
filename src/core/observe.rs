use std::time::Instant;

use serde::Serialize;

use crate::error::Result;

/// A single measurement emitted by a running operation.
///
/// `Transfer` is emitted once per chunk during a download; `Duration` is
/// emitted once, after an operation completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Observation {
    Transfer {
        bytes: u64,
        total: Option<u64>,
        percent: Option<f64>,
    },
    Duration {
        operation: String,
        elapsed_ms: u128,
    },
}

impl Observation {
    /// Builds a transfer observation, computing the percentage only when the
    /// total is known and non-zero.
    pub fn transfer(bytes: u64, total: Option<u64>) -> Self {
        let percent = total
            .filter(|total| *total > 0)
            .map(|total| bytes as f64 * 100.0 / total as f64);
        Observation::Transfer {
            bytes,
            total,
            percent,
        }
    }
}

/// Caller-supplied sink for observations. The core never mandates a display
/// mechanism; the CLI renders these, tests record them.
pub trait Observer {
    fn observe(&mut self, observation: Observation);
}

/// Observer that discards everything.
pub struct NullObserver;

impl Observer for NullObserver {
    fn observe(&mut self, _observation: Observation) {}
}

/// Runs `work` and, only when it succeeds, reports its wall-clock duration
/// to the observer.
pub fn timed<T>(
    operation: &str,
    observer: &mut dyn Observer,
    work: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let start = Instant::now();
    let value = work()?;
    observer.observe(Observation::Duration {
        operation: operation.to_string(),
        elapsed_ms: start.elapsed().as_millis(),
    });
    Ok(value)
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingObserver {
    pub observations: Vec<Observation>,
}

#[cfg(test)]
impl Observer for RecordingObserver {
    fn observe(&mut self, observation: Observation) {
        self.observations.push(observation);
    }
}
