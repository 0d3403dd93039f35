//! Wall-clock timing for comparing strategies against each other.

use std::fmt;
use std::time::{Duration, Instant};

/// Run `f` once and report how long it took.
pub fn time<T, F: FnOnce() -> T>(f: F) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

fn seconds(d: Duration) -> f64 {
    d.as_secs() as f64 + f64::from(d.subsec_nanos()) * 1e-9
}

/// Summary of a set of timed runs, in seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Summary {
    /// Number of samples
    pub runs: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Fastest run
    pub min: f64,
    /// Slowest run
    pub max: f64,
}

impl Summary {
    /// Summarize `samples`; `None` if there are none.
    pub fn from_samples(samples: &[Duration]) -> Option<Summary> {
        if samples.is_empty() {
            return None;
        }
        let secs: Vec<f64> = samples.iter().cloned().map(seconds).collect();
        let n = secs.len() as f64;
        let mean = secs.iter().sum::<f64>() / n;
        let variance = secs.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
        Some(Summary {
            runs: secs.len(),
            mean,
            std_dev: variance.sqrt(),
            min: secs.iter().cloned().fold(::std::f64::INFINITY, f64::min),
            max: secs.iter().cloned().fold(0.0, f64::max),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} runs: mean {:.6}s, std dev {:.6}s, min {:.6}s, max {:.6}s",
            self.runs, self.mean, self.std_dev, self.min, self.max
        )
    }
}
