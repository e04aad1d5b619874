//! Register polling with per-register degradation.
//!
//! One slow or dead register must not stall the loop or blank the whole
//! reading: each register gets its own bounded read, and a failure only
//! leaves that field absent for the tick.

use std::time::Duration;

use tracing::debug;

use pour_traits::{Register, RegisterSource};

use crate::error::{PourError, Result};
use crate::types::Reading;

fn read_one(source: &mut dyn RegisterSource, reg: Register, timeout: Duration) -> Option<f32> {
    match source.read_float(reg, timeout) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(register = %reg, error = %e, "register read failed, field absent this tick");
            None
        }
    }
}

/// Poll the measurement registers once. Never fails; failed registers
/// come back as `None`.
pub fn poll_reading(source: &mut dyn RegisterSource, timeout: Duration, at_ms: u64) -> Reading {
    Reading {
        at_ms,
        distance_m: read_one(source, Register::Distance, timeout),
        current_ma: read_one(source, Register::Current, timeout),
        temperature_c: read_one(source, Register::Temperature, timeout),
        power_db: read_one(source, Register::Power, timeout),
        snr_db: read_one(source, Register::Snr, timeout),
    }
}

/// Read a single register, surfacing the failure to the caller. Used by
/// the tuning path where a silent `None` would hide a dead bus.
pub fn read_register(
    source: &mut dyn RegisterSource,
    reg: Register,
    timeout: Duration,
) -> Result<f32> {
    source
        .read_float(reg, timeout)
        .map_err(|e| PourError::Transport(format!("read {reg}: {e}")).into())
}

/// Write an engineering register. Non-tunable registers are refused
/// locally; device refusals (write protection) surface as rejections.
pub fn write_tuning(source: &mut dyn RegisterSource, reg: Register, value: f32) -> Result<()> {
    if !reg.is_tunable() {
        return Err(PourError::WriteRejected(format!("{reg} is not a tunable register")).into());
    }
    source
        .write_float(reg, value)
        .map_err(|e| PourError::WriteRejected(format!("write {reg}: {e}")).into())
}
