//! Hysteresis pour-event state machine.
//!
//! A pour starts when flow exceeds the start threshold and ends when
//! flow drops below the (lower) stop threshold. The dead-band between
//! the two keeps stream turbulence from chopping one physical pour into
//! many logged events.

use tracing::info;

use crate::config::DetectionCfg;
use crate::util::ms_to_secs;

/// What `observe` decided this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PourTransition {
    None,
    Started { at_ms: u64 },
    Completed { start_ms: u64, duration_s: f32 },
}

#[derive(Debug, Clone)]
pub struct PourStateMachine {
    flow_start_kg_s: f32,
    flow_stop_kg_s: f32,
    pour_start_ms: Option<u64>,
}

impl PourStateMachine {
    #[must_use]
    pub fn new(detection: &DetectionCfg) -> Self {
        Self {
            flow_start_kg_s: detection.flow_start_kg_s,
            flow_stop_kg_s: detection.flow_stop_kg_s,
            pour_start_ms: None,
        }
    }

    #[must_use]
    pub fn is_pouring(&self) -> bool {
        self.pour_start_ms.is_some()
    }

    /// Feed one flow observation. An absent flow (too few samples, or
    /// weight not rising) never transitions in either direction; only a
    /// measured inflow rate can cross the hysteresis band.
    pub fn observe(&mut self, flow_kg_s: Option<f32>, now_ms: u64) -> PourTransition {
        let Some(flow) = flow_kg_s else {
            return PourTransition::None;
        };
        match self.pour_start_ms {
            None if flow > self.flow_start_kg_s => {
                self.pour_start_ms = Some(now_ms);
                info!(flow_kg_s = flow, "pour started");
                PourTransition::Started { at_ms: now_ms }
            }
            Some(start_ms) if flow < self.flow_stop_kg_s => {
                self.pour_start_ms = None;
                let duration_s = ms_to_secs(now_ms.saturating_sub(start_ms));
                info!(flow_kg_s = flow, duration_s, "pour completed");
                PourTransition::Completed {
                    start_ms,
                    duration_s,
                }
            }
            _ => PourTransition::None,
        }
    }
}
