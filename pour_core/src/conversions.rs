//! `From` implementations bridging `pour_config` types to `pour_core` types.
//!
//! These keep the CLI free of manual field-by-field mapping.

use crate::config::{DetectionCfg, LadleGeometry, OperatorContext, SamplingCfg, Timeouts};

impl From<&pour_config::Ladle> for LadleGeometry {
    fn from(c: &pour_config::Ladle) -> Self {
        Self {
            diameter_m: c.diameter_m,
            height_m: c.height_m,
            density_kg_m3: c.density_kg_m3,
            target_weight_kg: c.target_weight_kg,
        }
    }
}

impl From<&pour_config::Detection> for DetectionCfg {
    fn from(c: &pour_config::Detection) -> Self {
        Self {
            no_ladle_distance_m: c.no_ladle_distance_m,
            full_ladle_distance_m: c.full_ladle_distance_m,
            stable_time_s: c.stable_time_s,
            flow_start_kg_s: c.flow_start_kg_s,
            flow_stop_kg_s: c.flow_stop_kg_s,
            min_height_alarm_m: c.min_height_alarm_m,
            max_height_alarm_m: c.max_height_alarm_m,
        }
    }
}

impl From<&pour_config::Sampling> for SamplingCfg {
    fn from(c: &pour_config::Sampling) -> Self {
        Self {
            window_capacity: c.window_capacity,
            trend_capacity: c.trend_capacity,
            poll_interval_ms: c.poll_interval_ms,
        }
    }
}

impl From<&pour_config::Timeouts> for Timeouts {
    fn from(c: &pour_config::Timeouts) -> Self {
        Self {
            register_ms: c.register_ms,
            telemetry_ms: c.telemetry_ms,
        }
    }
}

impl From<&pour_config::Operator> for OperatorContext {
    fn from(c: &pour_config::Operator) -> Self {
        Self {
            name: c.name.clone(),
            employee_id: c.employee_id.clone(),
            shift: c.shift.to_string(),
        }
    }
}
