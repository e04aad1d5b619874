//! Empty-ladle reference latch.
//!
//! Before any height can be estimated the engine needs the distance the
//! radar reports when the ladle is empty. The tracker watches for the
//! sensor to read beyond the no-ladle threshold (it sees the full range,
//! so nothing is under it), requires that condition to hold for a
//! debounce interval, and then latches the first stable reading as the
//! empty reference for the rest of the session.

use tracing::info;

use crate::config::DetectionCfg;
use crate::util::secs_to_ms;

/// Where the tracker is in its latch cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationState {
    /// No candidate seen yet, or the candidate was interrupted.
    Waiting,
    /// Distance has been beyond the no-ladle threshold since `since_ms`.
    Stabilizing { since_ms: u64 },
    /// Empty reference latched. Terminal for the session.
    Calibrated { empty_distance_m: f32 },
}

#[derive(Debug, Clone)]
pub struct CalibrationTracker {
    no_ladle_distance_m: f32,
    stable_ms: u64,
    state: CalibrationState,
}

impl CalibrationTracker {
    #[must_use]
    pub fn new(detection: &DetectionCfg) -> Self {
        Self {
            no_ladle_distance_m: detection.no_ladle_distance_m,
            stable_ms: secs_to_ms(detection.stable_time_s),
            state: CalibrationState::Waiting,
        }
    }

    #[must_use]
    pub fn state(&self) -> CalibrationState {
        self.state
    }

    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        matches!(self.state, CalibrationState::Calibrated { .. })
    }

    /// Latched empty reference, once available.
    #[must_use]
    pub fn empty_distance_m(&self) -> Option<f32> {
        match self.state {
            CalibrationState::Calibrated { empty_distance_m } => Some(empty_distance_m),
            _ => None,
        }
    }

    /// Feed one distance sample. Absent samples (failed register read)
    /// interrupt a running debounce but never un-latch a calibrated
    /// reference.
    pub fn observe(&mut self, distance_m: Option<f32>, now_ms: u64) {
        if self.is_calibrated() {
            return;
        }
        let Some(distance) = distance_m else {
            self.state = CalibrationState::Waiting;
            return;
        };
        if distance > self.no_ladle_distance_m {
            match self.state {
                CalibrationState::Waiting => {
                    self.state = CalibrationState::Stabilizing { since_ms: now_ms };
                }
                CalibrationState::Stabilizing { since_ms }
                    if now_ms.saturating_sub(since_ms) >= self.stable_ms =>
                {
                    info!(empty_distance_m = distance, "empty ladle reference latched");
                    self.state = CalibrationState::Calibrated {
                        empty_distance_m: distance,
                    };
                }
                _ => {}
            }
        } else {
            self.state = CalibrationState::Waiting;
        }
    }
}
