//! Runtime configuration types for the estimation engine.
//!
//! These are the structs consumed by `EstimationSession` and the runner.
//! They are separate from the TOML-deserialized config in `pour_config`;
//! `conversions` bridges the two.

/// Ladle geometry and material properties.
#[derive(Debug, Clone, Copy)]
pub struct LadleGeometry {
    /// Inner diameter (m).
    pub diameter_m: f32,
    /// Usable height (m).
    pub height_m: f32,
    /// Material density (kg/m³).
    pub density_kg_m3: f32,
    /// Target fill weight (kg).
    pub target_weight_kg: f32,
}

impl Default for LadleGeometry {
    fn default() -> Self {
        Self {
            diameter_m: 3.0,
            height_m: 4.0,
            density_kg_m3: 7000.0,
            target_weight_kg: 150_000.0,
        }
    }
}

/// Calibration and pour-event detection thresholds.
#[derive(Debug, Clone, Copy)]
pub struct DetectionCfg {
    /// Distances above this mean the sensor sees full range (no ladle).
    pub no_ladle_distance_m: f32,
    /// Distance at which the ladle counts as full (m).
    pub full_ladle_distance_m: f32,
    /// Required no-ladle hold before the empty reference latches (s).
    pub stable_time_s: f32,
    /// Pour considered started once flow exceeds this (kg/s).
    pub flow_start_kg_s: f32,
    /// Pour considered ended once flow drops below this (kg/s).
    /// The gap up to `flow_start_kg_s` is the hysteresis dead-band.
    pub flow_stop_kg_s: f32,
    /// Low-level alarm threshold on material height (m).
    pub min_height_alarm_m: f32,
    /// High-level alarm threshold on material height (m).
    pub max_height_alarm_m: f32,
}

impl Default for DetectionCfg {
    fn default() -> Self {
        Self {
            no_ladle_distance_m: 16.5,
            full_ladle_distance_m: 13.0,
            stable_time_s: 3.0,
            flow_start_kg_s: 50.0,
            flow_stop_kg_s: 10.0,
            min_height_alarm_m: 0.5,
            max_height_alarm_m: 14.0,
        }
    }
}

/// Sample-window and trend-buffer capacities plus the tick interval.
#[derive(Debug, Clone, Copy)]
pub struct SamplingCfg {
    pub window_capacity: usize,
    pub trend_capacity: usize,
    pub poll_interval_ms: u64,
}

impl Default for SamplingCfg {
    fn default() -> Self {
        Self {
            window_capacity: 20,
            trend_capacity: 300,
            poll_interval_ms: 300,
        }
    }
}

/// Transport timeouts.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Per-register read timeout (ms).
    pub register_ms: u64,
    /// Telemetry receive timeout for the subscriber thread (ms).
    pub telemetry_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            register_ms: 1000,
            telemetry_ms: 500,
        }
    }
}

/// Operator context stamped onto completed pour records.
#[derive(Debug, Clone, Default)]
pub struct OperatorContext {
    pub name: String,
    pub employee_id: String,
    pub shift: String,
}
