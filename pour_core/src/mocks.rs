//! No-op transport stand-ins for wiring tests and dry runs.

use std::time::Duration;

use pour_traits::{Register, RegisterSource, TelemetryMessage, TelemetrySource};

/// Register source with no transport behind it. Every read fails, so
/// the loop exercises its degradation path end to end.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRegisterSource;

impl RegisterSource for NoopRegisterSource {
    fn read_float(
        &mut self,
        reg: Register,
        _timeout: Duration,
    ) -> Result<f32, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("no transport attached, cannot read {reg}").into())
    }

    fn write_float(
        &mut self,
        reg: Register,
        _value: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("no transport attached, cannot write {reg}").into())
    }
}

/// Telemetry feed that never produces a message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySource;

impl TelemetrySource for NoopTelemetrySource {
    fn recv(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<TelemetryMessage>, Box<dyn std::error::Error + Send + Sync>> {
        std::thread::sleep(timeout);
        Ok(None)
    }
}
