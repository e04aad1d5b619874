pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// Logical register ids on the radar level transmitter.
///
/// Addresses follow the vendor holding-register map; each value is a
/// big-endian IEEE-754 float spanning two 16-bit registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Distance from the sensor face to the material surface (m).
    Distance,
    /// Material height above the vessel floor (m), device-computed.
    MaterialHeight,
    /// Fill level in percent, device-computed.
    MaterialPercent,
    /// Loop current (mA).
    Current,
    /// Electronics temperature (°C).
    Temperature,
    /// Echo power (dB), diagnostic.
    Power,
    /// Signal-to-noise ratio (dB), diagnostic.
    Snr,
    /// Blind zone (m), engineering-tunable; may be write-protected.
    BlindZone,
    /// Measuring range (m), engineering-tunable; may be write-protected.
    Range,
    /// Damping time constant (s), engineering-tunable; may be write-protected.
    Damping,
}

impl Register {
    /// Holding-register address of the first word.
    pub fn address(self) -> u16 {
        match self {
            Register::Distance => 4096,
            Register::MaterialHeight => 4098,
            Register::MaterialPercent => 4100,
            Register::Current => 4102,
            Register::Power => 4104,
            Register::Snr => 4106,
            Register::Temperature => 4110,
            Register::BlindZone => 5120,
            Register::Range => 5122,
            Register::Damping => 5124,
        }
    }

    /// True for the engineering registers that accept writes.
    pub fn is_tunable(self) -> bool {
        matches!(
            self,
            Register::BlindZone | Register::Range | Register::Damping
        )
    }
}

impl core::fmt::Display for Register {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Register::Distance => "distance",
            Register::MaterialHeight => "material_height",
            Register::MaterialPercent => "material_percent",
            Register::Current => "current",
            Register::Temperature => "temperature",
            Register::Power => "power",
            Register::Snr => "snr",
            Register::BlindZone => "blind_zone",
            Register::Range => "range",
            Register::Damping => "damping",
        };
        f.write_str(name)
    }
}

/// Field-bus client abstraction. Implementations own the serial transport.
pub trait RegisterSource {
    /// Read one float register, blocking at most `timeout`.
    fn read_float(
        &mut self,
        reg: Register,
        timeout: std::time::Duration,
    ) -> Result<f32, Box<dyn std::error::Error + Send + Sync>>;

    /// Write one float register. Protected registers must surface a
    /// human-readable rejection reason in the error, not panic.
    fn write_float(
        &mut self,
        reg: Register,
        value: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// One message from the remote telemetry feed, keyed by topic kind.
#[derive(Debug, Clone)]
pub enum TelemetryMessage {
    /// Encoded camera frame (opaque bytes; decoding is a display concern).
    Frame(Vec<u8>),
    /// Orientation JSON: map of axis name to value.
    Orientation(String),
    /// Remote radar JSON payload (case-insensitive field names).
    Radar(String),
}

/// Publish/subscribe telemetry feed abstraction.
///
/// `recv` blocks at most `timeout`; `Ok(None)` means no message arrived in
/// that window, which is not an error.
pub trait TelemetrySource {
    fn recv(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<Option<TelemetryMessage>, Box<dyn std::error::Error + Send + Sync>>;
}
