//! Timed acquisition loop.
//!
//! Polls the register source at a fixed interval, feeds the session,
//! and persists completed pours. Transport failures degrade inside the
//! tick; only history I/O aborts the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam_channel::tick;
use tracing::debug;

use pour_traits::{Clock, RegisterSource};

use crate::error::Result;
use crate::history::PourHistory;
use crate::registers;
use crate::session::EstimationSession;
use crate::types::TickOutcome;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub poll_interval: Duration,
    pub register_timeout: Duration,
    /// Stop after this many ticks. `None` runs until shutdown.
    pub max_ticks: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(300),
            register_timeout: Duration::from_millis(1000),
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub ticks: u64,
    pub pours_recorded: u64,
}

/// Drive the estimation loop until shutdown, tick exhaustion, or a
/// history write failure.
///
/// `on_tick` runs after each tick with the full outcome; display and
/// logging hang off it.
pub fn run_poll_loop(
    source: &mut dyn RegisterSource,
    session: &mut EstimationSession,
    history: &mut PourHistory,
    clock: &dyn Clock,
    shutdown: &AtomicBool,
    opts: &RunOptions,
    mut on_tick: impl FnMut(&TickOutcome),
) -> Result<RunSummary> {
    let epoch = clock.now();
    let ticker = tick(opts.poll_interval);
    let mut summary = RunSummary::default();
    loop {
        if shutdown.load(Ordering::Relaxed) {
            debug!(ticks = summary.ticks, "shutdown requested, stopping loop");
            break;
        }
        let at_ms = clock.ms_since(epoch);
        let reading = registers::poll_reading(source, opts.register_timeout, at_ms);
        let outcome = session.tick_reading(&reading);
        if let Some(record) = &outcome.record {
            // A pour that cannot be persisted is a hard failure.
            history.append(record.clone())?;
            summary.pours_recorded += 1;
        }
        on_tick(&outcome);
        summary.ticks += 1;
        if let Some(max) = opts.max_ticks
            && summary.ticks >= max
        {
            break;
        }
        if ticker.recv().is_err() {
            break;
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DetectionCfg, LadleGeometry, OperatorContext, SamplingCfg};
    use pour_traits::{ManualClock, Register};
    use std::sync::atomic::AtomicBool;

    struct ScriptedBus {
        distances: Vec<f32>,
        idx: usize,
    }

    impl RegisterSource for ScriptedBus {
        fn read_float(
            &mut self,
            reg: Register,
            _timeout: Duration,
        ) -> std::result::Result<f32, Box<dyn std::error::Error + Send + Sync>> {
            match reg {
                Register::Distance => {
                    let i = self.idx.min(self.distances.len() - 1);
                    let v = self.distances[i];
                    self.idx += 1;
                    Ok(v)
                }
                Register::Current => Ok(12.0),
                Register::Temperature => Ok(45.0),
                Register::Power => Ok(-60.0),
                Register::Snr => Ok(20.0),
                _ => Err("unsupported".into()),
            }
        }

        fn write_float(
            &mut self,
            _reg: Register,
            _value: f32,
        ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err("read-only".into())
        }
    }

    fn session() -> EstimationSession {
        EstimationSession::new(
            LadleGeometry::default(),
            DetectionCfg::default(),
            &SamplingCfg::default(),
            OperatorContext::default(),
        )
    }

    #[test]
    fn loop_records_a_full_pour_cycle() {
        let mut bus =
            pour_hardware::sim::SimulatedRegisterSource::new(pour_hardware::sim::pour_profile(
                16.8, 13.0, 12,
            ));
        let mut session = session();
        let dir = tempfile::tempdir().unwrap();
        let mut history = PourHistory::open(dir.path().join("pours.csv")).unwrap();
        let clock = ManualClock::new();
        let stepper = clock.clone();
        let shutdown = AtomicBool::new(false);
        let opts = RunOptions {
            poll_interval: Duration::from_millis(1),
            register_timeout: Duration::from_millis(10),
            max_ticks: Some(70),
        };
        let summary = run_poll_loop(
            &mut bus,
            &mut session,
            &mut history,
            &clock,
            &shutdown,
            &opts,
            |_| stepper.advance(Duration::from_millis(300)),
        )
        .unwrap();
        assert_eq!(summary.ticks, 70);
        assert_eq!(summary.pours_recorded, 1);
        assert_eq!(history.load().unwrap().len(), 1);
    }

    #[test]
    fn shutdown_flag_stops_the_loop() {
        let mut bus = ScriptedBus {
            distances: vec![16.8],
            idx: 0,
        };
        let mut session = session();
        let dir = tempfile::tempdir().unwrap();
        let mut history = PourHistory::open(dir.path().join("pours.csv")).unwrap();
        let clock = ManualClock::new();
        let shutdown = AtomicBool::new(true);
        let summary = run_poll_loop(
            &mut bus,
            &mut session,
            &mut history,
            &clock,
            &shutdown,
            &RunOptions::default(),
            |_| {},
        )
        .unwrap();
        assert_eq!(summary.ticks, 0);
    }
}
