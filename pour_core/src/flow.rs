//! Bounded sample window and finite-difference flow rate.

use std::collections::VecDeque;

/// One (time, weight) sample in the flow window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSample {
    pub at_ms: u64,
    pub weight_kg: f32,
}

/// FIFO window of weight samples with a finite-difference rate over the
/// two most recent entries.
#[derive(Debug, Clone)]
pub struct FlowRateEstimator {
    window: VecDeque<WeightSample>,
    capacity: usize,
}

impl FlowRateEstimator {
    /// `capacity` below 2 is raised to 2; a single-sample window can
    /// never produce a rate.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, at_ms: u64, weight_kg: f32) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(WeightSample { at_ms, weight_kg });
    }

    /// Inflow rate (kg/s) between the two newest samples.
    ///
    /// `None` until two samples exist, when time does not advance, or
    /// when weight is flat or falling. Draining the ladle is not a pour.
    #[must_use]
    pub fn flow_kg_s(&self) -> Option<f32> {
        let n = self.window.len();
        if n < 2 {
            return None;
        }
        let newest = self.window[n - 1];
        let prev = self.window[n - 2];
        let dt_ms = newest.at_ms.saturating_sub(prev.at_ms);
        let dw = newest.weight_kg - prev.weight_kg;
        if dt_ms == 0 || dw <= 0.0 {
            return None;
        }
        Some(dw / (dt_ms as f32 / 1000.0))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Drop all samples. Called when a pour completes so the stale
    /// window cannot fabricate a rate into the next pour.
    pub fn clear(&mut self) {
        self.window.clear();
    }
}
