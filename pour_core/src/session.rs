//! Per-session estimation pipeline.
//!
//! `EstimationSession` owns the calibration latch, the flow window, the
//! pour state machine, and the trend buffer, and turns each raw input
//! (a local register reading or a remote radar payload) into one
//! [`TickOutcome`]. It is transport-free and fully deterministic given
//! the sample timestamps; persistence is the runner's job.

use std::collections::VecDeque;

use chrono::Local;

use crate::calibration::CalibrationTracker;
use crate::config::{DetectionCfg, LadleGeometry, OperatorContext, SamplingCfg};
use crate::estimate;
use crate::eta;
use crate::flow::FlowRateEstimator;
use crate::history::PourRecord;
use crate::pour::{PourStateMachine, PourTransition};
use crate::telemetry::RadarPayload;
use crate::types::{LevelAlarm, PourAdvisory, Reading, TickOutcome, TrendPoint};

pub struct EstimationSession {
    geometry: LadleGeometry,
    detection: DetectionCfg,
    operator: OperatorContext,
    calibration: CalibrationTracker,
    flow: FlowRateEstimator,
    machine: PourStateMachine,
    trend: VecDeque<TrendPoint>,
    trend_capacity: usize,
    /// Wall-clock start of the running pour, for the persisted record.
    pour_start_wall: Option<String>,
}

impl EstimationSession {
    #[must_use]
    pub fn new(
        geometry: LadleGeometry,
        detection: DetectionCfg,
        sampling: &SamplingCfg,
        operator: OperatorContext,
    ) -> Self {
        Self {
            geometry,
            detection,
            operator,
            calibration: CalibrationTracker::new(&detection),
            flow: FlowRateEstimator::new(sampling.window_capacity),
            machine: PourStateMachine::new(&detection),
            trend: VecDeque::with_capacity(sampling.trend_capacity),
            trend_capacity: sampling.trend_capacity.max(1),
            pour_start_wall: None,
        }
    }

    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_calibrated()
    }

    #[must_use]
    pub fn is_pouring(&self) -> bool {
        self.machine.is_pouring()
    }

    /// Display trend, oldest first.
    #[must_use]
    pub fn trend(&self) -> &VecDeque<TrendPoint> {
        &self.trend
    }

    /// Process one local register reading.
    pub fn tick_reading(&mut self, reading: &Reading) -> TickOutcome {
        self.calibration.observe(reading.distance_m, reading.at_ms);
        let empty = self.calibration.empty_distance_m();
        let (height, fill) = match (empty, reading.distance_m) {
            (Some(empty_m), Some(distance)) => (
                Some(estimate::material_height_m(empty_m, distance)),
                Some(estimate::fill_pct(
                    &self.geometry,
                    empty_m,
                    self.detection.full_ladle_distance_m,
                    distance,
                )),
            ),
            _ => (None, None),
        };
        self.process(reading.at_ms, reading.distance_m, empty, height, fill)
    }

    /// Process one remote radar payload. The remote device computes the
    /// height itself, so no calibration latch applies on this path.
    pub fn tick_remote(&mut self, payload: &RadarPayload, at_ms: u64) -> TickOutcome {
        let height = payload.material_height_m;
        let fill = payload.material_pct.or_else(|| {
            height.map(|h| {
                if self.geometry.height_m > f32::EPSILON {
                    (h / self.geometry.height_m * 100.0).clamp(0.0, 100.0)
                } else {
                    0.0
                }
            })
        });
        self.process(at_ms, None, None, height, fill)
    }

    fn process(
        &mut self,
        at_ms: u64,
        distance_m: Option<f32>,
        empty_m: Option<f32>,
        height_m: Option<f32>,
        fill_pct: Option<f32>,
    ) -> TickOutcome {
        let weight_kg = height_m.map(|h| estimate::weight_kg(&self.geometry, h));
        if let Some(w) = weight_kg {
            self.flow.push(at_ms, w);
        }
        let flow = self.flow.flow_kg_s();
        let transition = self.machine.observe(flow, at_ms);

        let record = match transition {
            PourTransition::Started { .. } => {
                self.pour_start_wall = Some(wall_timestamp());
                None
            }
            PourTransition::Completed { duration_s, .. } => {
                Some(self.close_pour(duration_s, height_m, fill_pct, weight_kg, flow))
            }
            PourTransition::None => None,
        };

        let alarm = height_m.map(|h| {
            if h < self.detection.min_height_alarm_m {
                LevelAlarm::Low
            } else if h > self.detection.max_height_alarm_m {
                LevelAlarm::High
            } else {
                LevelAlarm::Normal
            }
        });
        let remaining_kg = weight_kg.map(|w| (self.geometry.target_weight_kg - w).max(0.0));
        let advisory = weight_kg.map(|w| {
            if w >= self.geometry.target_weight_kg {
                PourAdvisory::Stop
            } else if w >= self.geometry.target_weight_kg * 0.9 {
                PourAdvisory::Slow
            } else {
                PourAdvisory::Continue
            }
        });
        // A fill-time projection only means something mid-pour.
        let eta_s = if self.machine.is_pouring() {
            match (distance_m, empty_m) {
                (Some(d), Some(_)) => eta::seconds_to_full(
                    &self.geometry,
                    d,
                    self.detection.full_ladle_distance_m,
                    flow,
                ),
                // Remote path measures no distance; project on weight instead.
                _ => match (remaining_kg, flow) {
                    (Some(rem), Some(f)) if f > 0.0 && rem > 0.0 => Some(rem / f),
                    _ => None,
                },
            }
        } else {
            None
        };

        if let Some(h) = height_m {
            if self.trend.len() == self.trend_capacity {
                self.trend.pop_front();
            }
            self.trend.push_back(TrendPoint {
                at_ms,
                material_height_m: h,
                fill_pct,
                flow_kg_s: flow,
            });
        }

        TickOutcome {
            at_ms,
            distance_m,
            material_height_m: height_m,
            fill_pct,
            weight_kg,
            flow_kg_s: flow,
            eta_s,
            remaining_kg,
            pouring: self.machine.is_pouring(),
            calibrated: height_m.is_some() || self.calibration.is_calibrated(),
            alarm,
            advisory,
            record,
        }
    }

    fn close_pour(
        &mut self,
        duration_s: f32,
        height_m: Option<f32>,
        fill_pct: Option<f32>,
        weight_kg: Option<f32>,
        flow_kg_s: Option<f32>,
    ) -> PourRecord {
        let now = Local::now();
        let record = PourRecord {
            pour_id: now.format("%Y%m%d_%H%M%S").to_string(),
            operator: self.operator.name.clone(),
            employee_id: self.operator.employee_id.clone(),
            shift: self.operator.shift.clone(),
            pour_start: self.pour_start_wall.take().unwrap_or_else(wall_timestamp),
            pour_end: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            duration_s,
            material_height_m: height_m.unwrap_or(0.0),
            fill_pct: fill_pct.unwrap_or(0.0),
            total_weight_kg: weight_kg.unwrap_or(0.0),
            avg_flow_kg_s: flow_kg_s.unwrap_or(0.0),
        };
        // Stale window samples must not bleed a rate into the next pour.
        self.flow.clear();
        record
    }
}

fn wall_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
