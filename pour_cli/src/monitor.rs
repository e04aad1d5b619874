//! Subcommand bodies: config mapping, transport assembly, and execution.

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use eyre::{Result, ensure};
use tracing::info;

use pour_core::registers::{poll_reading, read_register, write_tuning};
use pour_core::runner::{RunOptions, RunSummary, run_poll_loop};
use pour_core::{EstimationSession, PourHistory, SamplingCfg, TickOutcome};
use pour_hardware::sim::{SimulatedRegisterSource, pour_profile};
use pour_traits::{MonotonicClock, Register};

use crate::cli::TunableRegister;

fn register_timeout(cfg: &pour_config::Config) -> Duration {
    Duration::from_millis(cfg.timeouts.register_ms)
}

/// Scripted transmitter for the demo loop: one full pour cycle sized to
/// the configured thresholds.
fn demo_source(cfg: &pour_config::Config) -> SimulatedRegisterSource {
    SimulatedRegisterSource::new(pour_profile(
        cfg.detection.no_ladle_distance_m + 0.3,
        cfg.detection.full_ladle_distance_m,
        12,
    ))
}

pub fn run_monitor(
    cfg: &pour_config::Config,
    ticks: Option<u64>,
    history_path: &Path,
    stream: bool,
    shutdown: &AtomicBool,
) -> Result<RunSummary> {
    let sampling: SamplingCfg = (&cfg.sampling).into();
    let mut session = EstimationSession::new(
        (&cfg.ladle).into(),
        (&cfg.detection).into(),
        &sampling,
        (&cfg.operator).into(),
    );
    let mut history = PourHistory::open(history_path)?;
    let mut source = demo_source(cfg);
    let clock = MonotonicClock::new();
    let opts = RunOptions {
        poll_interval: Duration::from_millis(cfg.sampling.poll_interval_ms),
        register_timeout: register_timeout(cfg),
        max_ticks: ticks,
    };
    let summary = run_poll_loop(
        &mut source,
        &mut session,
        &mut history,
        &clock,
        shutdown,
        &opts,
        |out| {
            if stream {
                println!("{}", tick_json(out));
            } else if let Some(r) = &out.record {
                println!(
                    "pour {} recorded: {:.0} kg in {:.1} s",
                    r.pour_id, r.total_weight_kg, r.duration_s
                );
            }
        },
    )?;
    info!(
        ticks = summary.ticks,
        pours = summary.pours_recorded,
        "monitor loop finished"
    );
    println!(
        "monitor complete: {} ticks, {} pour(s) recorded",
        summary.ticks, summary.pours_recorded
    );
    Ok(summary)
}

fn tick_json(out: &TickOutcome) -> String {
    serde_json::json!({
        "at_ms": out.at_ms,
        "distance_m": out.distance_m,
        "material_height_m": out.material_height_m,
        "fill_pct": out.fill_pct,
        "weight_kg": out.weight_kg,
        "flow_kg_s": out.flow_kg_s,
        "eta_s": out.eta_s,
        "remaining_kg": out.remaining_kg,
        "pouring": out.pouring,
        "calibrated": out.calibrated,
        "pour_id": out.record.as_ref().map(|r| r.pour_id.clone()),
    })
    .to_string()
}

pub fn run_history(history_path: &Path) -> Result<()> {
    let history = PourHistory::open(history_path)?;
    let records = history.load()?;
    if records.is_empty() {
        println!("no pours recorded yet");
        return Ok(());
    }
    for r in &records {
        println!(
            "{}  shift {}  {} ({})  {:>9.0} kg  {:>6.1} s  {:>5.1} %",
            r.pour_id, r.shift, r.operator, r.employee_id, r.total_weight_kg, r.duration_s,
            r.fill_pct
        );
    }
    println!("{} pour(s) total", records.len());
    Ok(())
}

pub fn run_tune(
    cfg: &pour_config::Config,
    register: TunableRegister,
    value: Option<f32>,
    locked: bool,
) -> Result<()> {
    let reg: Register = register.into();
    let mut source = SimulatedRegisterSource::new(vec![cfg.detection.no_ladle_distance_m + 0.3]);
    if locked {
        source = source.with_protected(reg);
    }
    let timeout = register_timeout(cfg);
    let current = read_register(&mut source, reg, timeout)?;
    match value {
        None => println!("{reg} = {current}"),
        Some(v) => {
            write_tuning(&mut source, reg, v)?;
            let after = read_register(&mut source, reg, timeout)?;
            println!("{reg}: {current} -> {after}");
        }
    }
    Ok(())
}

pub fn run_self_check(cfg: &pour_config::Config) -> Result<()> {
    let mut source = demo_source(cfg);
    let reading = poll_reading(&mut source, register_timeout(cfg), 0);
    ensure!(
        reading.distance_m.is_some(),
        "simulated distance register did not answer"
    );
    ensure!(
        reading.current_ma.is_some(),
        "simulated loop-current register did not answer"
    );
    println!("self-check: ok");
    Ok(())
}
