//! Plain data carried between acquisition, estimation, and display.

/// One poll of the radar transmitter. Any field may be absent when the
/// corresponding register read failed or timed out this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reading {
    /// Milliseconds since the session epoch at acquisition time.
    pub at_ms: u64,
    pub distance_m: Option<f32>,
    pub current_ma: Option<f32>,
    pub temperature_c: Option<f32>,
    pub power_db: Option<f32>,
    pub snr_db: Option<f32>,
}

/// Level alarm band derived from material height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelAlarm {
    Low,
    Normal,
    High,
}

/// Coarse operator advisory against the target fill weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PourAdvisory {
    Continue,
    /// Within 10% of target.
    Slow,
    /// Target reached or exceeded.
    Stop,
}

/// One display point in the bounded trend buffer. Not persisted.
#[derive(Debug, Clone, Copy)]
pub struct TrendPoint {
    pub at_ms: u64,
    pub material_height_m: f32,
    pub fill_pct: Option<f32>,
    pub flow_kg_s: Option<f32>,
}

/// Everything one estimation tick derived, for logging and display.
///
/// `record` is set exactly on the tick that completed a pour.
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub at_ms: u64,
    pub distance_m: Option<f32>,
    pub material_height_m: Option<f32>,
    pub fill_pct: Option<f32>,
    pub weight_kg: Option<f32>,
    pub flow_kg_s: Option<f32>,
    pub eta_s: Option<f32>,
    pub remaining_kg: Option<f32>,
    pub pouring: bool,
    pub calibrated: bool,
    pub alarm: Option<LevelAlarm>,
    pub advisory: Option<PourAdvisory>,
    pub record: Option<crate::history::PourRecord>,
}
