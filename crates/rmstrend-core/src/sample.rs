//! Recorded samples: the bounded live window and the unbounded full history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default capacity of the live strip-chart window.
pub const DEFAULT_WINDOW_CAPACITY: usize = 20_000;

/// One simulated measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Simulated elapsed time in minutes.
    pub simulated_minutes: f64,
    /// RMS value in mm/s.
    pub value: f64,
    /// Simulated wall-clock time of the sample, `HH:MM:SS`.
    pub wall_clock_label: String,
}

// ---------------------------------------------------------------------------
// RecentWindow
// ---------------------------------------------------------------------------

/// Insertion-ordered, capacity-bounded window of the latest samples.
///
/// Once the capacity is exceeded the oldest samples are evicted first.
#[derive(Debug, Clone)]
pub struct RecentWindow {
    samples: VecDeque<SamplePoint>,
    capacity: usize,
}

impl RecentWindow {
    /// Create an empty window. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    pub fn push(&mut self, sample: SamplePoint) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &SamplePoint> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&SamplePoint> {
        self.samples.back()
    }

    /// Chart points as `(simulated_minutes, value)`.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.simulated_minutes, s.value))
            .collect()
    }

    /// Chart points whose x lies in `[from_minutes, ∞)`.
    pub fn points_since(&self, from_minutes: f64) -> Vec<(f64, f64)> {
        // Samples are ordered by simulated time except across elapsed edits,
        // so filter rather than binary-search.
        self.samples
            .iter()
            .filter(|s| s.simulated_minutes >= from_minutes)
            .map(|s| (s.simulated_minutes, s.value))
            .collect()
    }

    /// X axis as a parallel array.
    pub fn xs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.simulated_minutes).collect()
    }

    /// Y axis as a parallel array.
    pub fn ys(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }
}

impl Default for RecentWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// FullHistory
// ---------------------------------------------------------------------------

/// Append-only record of every sample taken in this session.
#[derive(Debug, Clone, Default)]
pub struct FullHistory {
    samples: Vec<SamplePoint>,
}

impl FullHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: SamplePoint) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[SamplePoint] {
        &self.samples
    }

    pub fn latest(&self) -> Option<&SamplePoint> {
        self.samples.last()
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.simulated_minutes, s.value))
            .collect()
    }

    /// Largest recorded value, or `None` when empty.
    pub fn peak(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.value).reduce(f64::max)
    }
}
