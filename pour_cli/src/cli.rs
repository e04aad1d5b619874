//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;

use pour_traits::Register;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "pour_monitor", version, about = "Ladle pour monitor CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/pour_config.toml")]
    pub config: PathBuf,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the estimation loop against the simulated transmitter
    Monitor {
        /// Stop after this many ticks (default: run until Ctrl-C)
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,

        /// Pour history CSV path
        #[arg(long, value_name = "FILE", default_value = "pour_history.csv")]
        history: PathBuf,

        /// Emit every tick outcome as a JSON line on stdout
        #[arg(long, action = ArgAction::SetTrue)]
        stream: bool,
    },
    /// Print the recorded pours
    History {
        /// Pour history CSV path
        #[arg(long, value_name = "FILE", default_value = "pour_history.csv")]
        history: PathBuf,
    },
    /// Read or write an engineering register on the transmitter
    Tune {
        /// Register to touch
        #[arg(long, value_enum)]
        register: TunableRegister,

        /// New value; omit to read the current one
        #[arg(long)]
        value: Option<f32>,

        /// Simulate a device with the engineering lock engaged
        #[arg(long, action = ArgAction::SetTrue)]
        locked: bool,
    },
    /// Quick health check (config + simulated transport)
    SelfCheck,
}

/// The writable subset of the register map, as CLI values.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum TunableRegister {
    BlindZone,
    Range,
    Damping,
}

impl From<TunableRegister> for Register {
    fn from(r: TunableRegister) -> Self {
        match r {
            TunableRegister::BlindZone => Register::BlindZone,
            TunableRegister::Range => Register::Range,
            TunableRegister::Damping => Register::Damping,
        }
    }
}
