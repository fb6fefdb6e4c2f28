//! Traffic-rate window
//!
//! Fixed-size series of packets/sec samples. A chart widget would redraw
//! from [`TrafficWindow::samples`] after each tick; drawing is not done here.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Samples are drawn from `0..MAX_RATE`
pub const MAX_RATE: u32 = 100;

/// Default number of samples shown
pub const DEFAULT_WINDOW: usize = 10;

/// Sliding window of traffic-rate samples, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficWindow {
    samples: VecDeque<u32>,
    capacity: usize,
}

impl TrafficWindow {
    /// Window of `capacity` random samples
    pub fn random<R: Rng>(capacity: usize, rng: &mut R) -> Self {
        let samples = (0..capacity).map(|_| rng.gen_range(0..MAX_RATE)).collect();
        Self { samples, capacity }
    }

    /// Window holding the last `capacity` of `samples`
    pub fn from_samples(capacity: usize, samples: impl IntoIterator<Item = u32>) -> Self {
        let mut window = Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        };
        for sample in samples {
            window.push(sample);
        }
        window
    }

    /// Drop the oldest sample (when full) and append `sample`
    ///
    /// Returns the sample that fell out of the window, if any.
    pub fn push(&mut self, sample: u32) -> Option<u32> {
        if self.capacity == 0 {
            return Some(sample);
        }
        let dropped = if self.samples.len() >= self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        dropped
    }

    /// Append a fresh random sample and return it
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> u32 {
        let sample = rng.gen_range(0..MAX_RATE);
        self.push(sample);
        sample
    }

    /// Samples, oldest first
    pub fn samples(&self) -> Vec<u32> {
        self.samples.iter().copied().collect()
    }

    /// Axis labels `T-n … T-1`, aligned with [`samples`](Self::samples)
    pub fn labels(&self) -> Vec<String> {
        let n = self.samples.len();
        (0..n).map(|i| format!("T-{}", n - i)).collect()
    }

    pub fn latest(&self) -> Option<u32> {
        self.samples.back().copied()
    }

    pub fn peak(&self) -> Option<u32> {
        self.samples.iter().copied().max()
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
}
