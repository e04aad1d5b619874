//! Scripted simulators for the register and telemetry interfaces.

use std::collections::HashSet;
use std::time::Duration;

use pour_traits::{Register, RegisterSource, TelemetryMessage, TelemetrySource};

use crate::error::HwError;

/// Build a demo distance script: empty-ladle hold (calibration latch),
/// ladle arrival, a pour ramp down to `full_m`, then a quiet tail.
///
/// `ticks_per_phase` controls how long each phase lasts in samples.
pub fn pour_profile(empty_m: f32, full_m: f32, ticks_per_phase: usize) -> Vec<f32> {
    let mut script = Vec::new();
    // Sensor sees full range while no ladle is present.
    script.extend(std::iter::repeat_n(empty_m, ticks_per_phase.max(1)));
    // Ladle arrives empty: surface still at the reference, so the
    // arrival itself reads as zero flow.
    script.extend(std::iter::repeat_n(empty_m, ticks_per_phase.max(1)));
    // Pour: distance closes toward the full-ladle mark.
    let n = ticks_per_phase.max(2);
    let step = (empty_m - full_m) / n as f32;
    for i in 1..n {
        script.push(empty_m - step * i as f32);
    }
    // Tail: the inflow tapers geometrically as the ladle tops out, so
    // the implied flow rate falls through any stop threshold instead of
    // cutting straight to zero.
    let mut residual = step;
    for _ in 0..(2 * ticks_per_phase.max(8)) {
        residual *= 0.5;
        script.push(full_m + residual);
    }
    script
}

/// Simulated radar transmitter driven by a distance script.
///
/// Non-distance registers return fixed plausible values. Registers listed
/// as protected reject writes the way the real device does.
pub struct SimulatedRegisterSource {
    script: Vec<f32>,
    idx: usize,
    protected: HashSet<Register>,
    /// Registers that time out on read, for degraded-field testing.
    failing: HashSet<Register>,
    tunables: Vec<(Register, f32)>,
}

impl SimulatedRegisterSource {
    pub fn new(script: Vec<f32>) -> Self {
        Self {
            script,
            idx: 0,
            protected: HashSet::new(),
            failing: HashSet::new(),
            tunables: vec![
                (Register::BlindZone, 0.25),
                (Register::Range, 20.0),
                (Register::Damping, 3.0),
            ],
        }
    }

    /// Mark an engineering register as write-protected.
    pub fn with_protected(mut self, reg: Register) -> Self {
        self.protected.insert(reg);
        self
    }

    /// Make reads of `reg` time out.
    pub fn with_failing(mut self, reg: Register) -> Self {
        self.failing.insert(reg);
        self
    }

    fn next_distance(&mut self) -> f32 {
        let v = if self.idx < self.script.len() {
            self.script[self.idx]
        } else {
            self.script.last().copied().unwrap_or(0.0)
        };
        self.idx += 1;
        v
    }

    fn tunable(&self, reg: Register) -> Option<f32> {
        self.tunables.iter().find(|(r, _)| *r == reg).map(|(_, v)| *v)
    }
}

impl RegisterSource for SimulatedRegisterSource {
    fn read_float(
        &mut self,
        reg: Register,
        _timeout: Duration,
    ) -> Result<f32, Box<dyn std::error::Error + Send + Sync>> {
        if self.failing.contains(&reg) {
            return Err(Box::new(HwError::Timeout));
        }
        let v = match reg {
            Register::Distance => self.next_distance(),
            Register::Current => 12.4,
            Register::Temperature => 48.5,
            Register::Power => -61.0,
            Register::Snr => 22.0,
            Register::MaterialHeight | Register::MaterialPercent => {
                return Err(Box::new(HwError::Bus(format!(
                    "register {reg} not mapped by simulator"
                ))));
            }
            other => self
                .tunable(other)
                .ok_or_else(|| HwError::Bus(format!("register {other} not mapped")))?,
        };
        tracing::trace!(register = %reg, value = v, "simulated register read");
        Ok(v)
    }

    fn write_float(
        &mut self,
        reg: Register,
        value: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !reg.is_tunable() {
            return Err(Box::new(HwError::Bus(format!(
                "register {reg} is read-only"
            ))));
        }
        if self.protected.contains(&reg) {
            return Err(Box::new(HwError::ProtectedRegister {
                register: reg.to_string(),
                reason: "device refused write: engineering lock active".into(),
            }));
        }
        if let Some(slot) = self.tunables.iter_mut().find(|(r, _)| *r == reg) {
            slot.1 = value;
        }
        tracing::debug!(register = %reg, value, "simulated register write");
        Ok(())
    }
}

/// Simulated broker feed that replays a fixed message sequence.
pub struct SimulatedTelemetrySource {
    messages: std::collections::VecDeque<TelemetryMessage>,
}

impl SimulatedTelemetrySource {
    pub fn new(messages: Vec<TelemetryMessage>) -> Self {
        Self {
            messages: messages.into(),
        }
    }

    /// Radar payloads walking material height from 0 up to `peak_m`.
    pub fn radar_ramp(peak_m: f32, steps: usize) -> Self {
        let n = steps.max(1);
        let messages = (0..=n)
            .map(|i| {
                let h = peak_m * i as f32 / n as f32;
                let pct = 100.0 * i as f32 / n as f32;
                TelemetryMessage::Radar(format!(
                    r#"{{"Material_Height_M": {h:.3}, "MATERIAL_PCT": {pct:.1}, "current_ma": 12.4, "temp_c": 47.0}}"#
                ))
            })
            .collect();
        Self {
            messages,
        }
    }
}

impl TelemetrySource for SimulatedTelemetrySource {
    fn recv(
        &mut self,
        _timeout: Duration,
    ) -> Result<Option<TelemetryMessage>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.messages.pop_front())
    }
}
