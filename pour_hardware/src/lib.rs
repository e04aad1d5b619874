//! Simulated field-bus and telemetry sources.
//!
//! The real radar transmitter speaks a serial field-bus protocol and the
//! remote feed arrives over a broker; both transports live outside this
//! workspace. These simulators implement the same traits so the monitor
//! loop, CLI, and tests run without plant hardware.

pub mod error;
pub mod sim;

pub use error::HwError;
pub use sim::{SimulatedRegisterSource, SimulatedTelemetrySource, pour_profile};
