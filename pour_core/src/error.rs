use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum PourError {
    /// Register or telemetry transport unreachable/timed out. Callers
    /// degrade the affected field to absent and keep the loop alive.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Malformed telemetry payload. Only the affected field is dropped.
    #[error("telemetry parse failure: {0}")]
    Parse(String),
    /// Engineering register write refused by the device.
    #[error("register write rejected: {0}")]
    WriteRejected(String),
    /// Pour history I/O. The one hard error class in this crate: a lost
    /// pour record is a silent data-integrity failure.
    #[error("pour history error: {0}")]
    History(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
