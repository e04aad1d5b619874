#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas for the ladle pour monitor.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - All geometry, detection thresholds, and loop timing live here; the
//!   estimation engine receives them through `pour_core`'s runtime types.
use serde::Deserialize;

/// Ladle geometry and material properties.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Ladle {
    /// Inner diameter of the ladle (m).
    pub diameter_m: f32,
    /// Usable ladle height (m).
    pub height_m: f32,
    /// Material density (kg/m³); 7000 for typical molten steel mixes.
    pub density_kg_m3: f32,
    /// Target fill weight (kg) for the remaining/advisory display.
    pub target_weight_kg: f32,
}

impl Default for Ladle {
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
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Detection {
    /// Distances above this mean "no ladle under the sensor" (m).
    pub no_ladle_distance_m: f32,
    /// Distance corresponding to a full ladle (m).
    pub full_ladle_distance_m: f32,
    /// How long the no-ladle reading must hold before the empty-ladle
    /// reference latches (s).
    pub stable_time_s: f32,
    /// Flow rate above which a pour is considered started (kg/s).
    pub flow_start_kg_s: f32,
    /// Flow rate below which a running pour is considered ended (kg/s).
    pub flow_stop_kg_s: f32,
    /// Low-level alarm threshold on material height (m).
    pub min_height_alarm_m: f32,
    /// High-level alarm threshold on material height (m).
    pub max_height_alarm_m: f32,
}

impl Default for Detection {
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

/// Polling cadence and buffer capacities.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Sampling {
    /// Flow-rate window capacity (samples).
    pub window_capacity: usize,
    /// Trend ring-buffer capacity (points).
    pub trend_capacity: usize,
    /// Estimation tick interval (ms).
    pub poll_interval_ms: u64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            window_capacity: 20,
            trend_capacity: 300,
            poll_interval_ms: 300,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Timeouts {
    /// Per-register read timeout (ms). Also accepts alias "sensor_ms".
    #[serde(alias = "sensor_ms")]
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

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

/// Crew shift identifier carried into every pour record.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    #[default]
    A,
    B,
    C,
    Night,
}

impl core::fmt::Display for Shift {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Shift::A => f.write_str("A"),
            Shift::B => f.write_str("B"),
            Shift::C => f.write_str("C"),
            Shift::Night => f.write_str("Night"),
        }
    }
}

/// Operator context stamped onto completed pour records.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Operator {
    pub name: String,
    pub employee_id: String,
    pub shift: Shift,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ladle: Ladle,
    pub detection: Detection,
    pub sampling: Sampling,
    pub timeouts: Timeouts,
    pub logging: Logging,
    pub operator: Operator,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Ladle geometry
        if self.ladle.diameter_m <= 0.0 || !self.ladle.diameter_m.is_finite() {
            eyre::bail!("ladle.diameter_m must be > 0");
        }
        if self.ladle.height_m <= 0.0 || !self.ladle.height_m.is_finite() {
            eyre::bail!("ladle.height_m must be > 0");
        }
        if self.ladle.density_kg_m3 <= 0.0 || !self.ladle.density_kg_m3.is_finite() {
            eyre::bail!("ladle.density_kg_m3 must be > 0");
        }
        if self.ladle.target_weight_kg <= 0.0 || !self.ladle.target_weight_kg.is_finite() {
            eyre::bail!("ladle.target_weight_kg must be > 0");
        }

        // Detection
        if self.detection.no_ladle_distance_m <= 0.0 {
            eyre::bail!("detection.no_ladle_distance_m must be > 0");
        }
        if self.detection.full_ladle_distance_m < 0.0 {
            eyre::bail!("detection.full_ladle_distance_m must be >= 0");
        }
        if self.detection.full_ladle_distance_m >= self.detection.no_ladle_distance_m {
            eyre::bail!(
                "detection.full_ladle_distance_m must be below detection.no_ladle_distance_m"
            );
        }
        if self.detection.stable_time_s <= 0.0 {
            eyre::bail!("detection.stable_time_s must be > 0");
        }
        if self.detection.flow_stop_kg_s <= 0.0 {
            eyre::bail!("detection.flow_stop_kg_s must be > 0");
        }
        // The dead-band between stop and start is the hysteresis; it must
        // not be empty or inverted.
        if self.detection.flow_start_kg_s <= self.detection.flow_stop_kg_s {
            eyre::bail!("detection.flow_start_kg_s must be above detection.flow_stop_kg_s");
        }
        if self.detection.min_height_alarm_m < 0.0 {
            eyre::bail!("detection.min_height_alarm_m must be >= 0");
        }
        if self.detection.max_height_alarm_m <= self.detection.min_height_alarm_m {
            eyre::bail!(
                "detection.max_height_alarm_m must be above detection.min_height_alarm_m"
            );
        }

        // Sampling
        if self.sampling.window_capacity < 2 {
            eyre::bail!("sampling.window_capacity must be >= 2");
        }
        if self.sampling.trend_capacity == 0 {
            eyre::bail!("sampling.trend_capacity must be >= 1");
        }
        if self.sampling.poll_interval_ms == 0 {
            eyre::bail!("sampling.poll_interval_ms must be >= 1");
        }
        if self.sampling.poll_interval_ms > 60_000 {
            eyre::bail!("sampling.poll_interval_ms is unreasonably large (>60s)");
        }

        // Timeouts
        if self.timeouts.register_ms == 0 {
            eyre::bail!("timeouts.register_ms must be >= 1");
        }
        if self.timeouts.telemetry_ms == 0 {
            eyre::bail!("timeouts.telemetry_ms must be >= 1");
        }

        Ok(())
    }
}
