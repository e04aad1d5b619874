#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Sensor fusion and pour-event state estimation (transport-agnostic).
//!
//! This crate turns raw radar distance readings (or remote telemetry
//! payloads) into material height, weight, flow rate, and durable pour
//! records. All transport interactions go through the
//! `pour_traits::RegisterSource` and `pour_traits::TelemetrySource` traits.
//!
//! ## Architecture
//!
//! - **Calibration**: empty-ladle reference latch (`calibration` module)
//! - **Estimation**: distance → height/weight conversion (`estimate` module)
//! - **Flow**: bounded sample window, finite-difference rate (`flow` module)
//! - **Pour detection**: hysteresis state machine (`pour` module)
//! - **Projection**: time-to-full estimate (`eta` module)
//! - **Persistence**: append-only CSV pour log (`history` module)
//! - **Acquisition**: register poller and telemetry snapshot
//!   (`registers`, `telemetry` modules)
//! - **Orchestration**: per-session pipeline and the timed loop
//!   (`session`, `runner` modules)

pub mod calibration;
pub mod config;
pub mod conversions;
pub mod error;
pub mod estimate;
pub mod eta;
pub mod flow;
pub mod history;
pub mod mocks;
pub mod pour;
pub mod registers;
pub mod runner;
pub mod session;
pub mod telemetry;
pub mod types;
pub mod util;

pub use calibration::{CalibrationState, CalibrationTracker};
pub use config::{DetectionCfg, LadleGeometry, OperatorContext, SamplingCfg, Timeouts};
pub use error::{PourError, Result};
pub use flow::FlowRateEstimator;
pub use history::{PourHistory, PourRecord};
pub use pour::{PourStateMachine, PourTransition};
pub use session::EstimationSession;
pub use telemetry::{RadarPayload, TelemetrySnapshot, TelemetrySubscriber};
pub use types::{LevelAlarm, PourAdvisory, Reading, TickOutcome, TrendPoint};
