use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("register read timeout")]
    Timeout,
    #[error("field-bus error: {0}")]
    Bus(String),
    #[error("protected register {register}: {reason}")]
    ProtectedRegister { register: String, reason: String },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
