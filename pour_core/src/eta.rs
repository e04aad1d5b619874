//! Time-to-full projection.
//!
//! Linear extrapolation of the current inflow rate: the rate in kg/s
//! divided by density and cross-section gives the level rise in m/s,
//! and the gap between the current distance and the full-ladle distance
//! gives the remaining column.

use crate::config::LadleGeometry;
use crate::estimate::cross_section_m2;

/// Seconds until the surface reaches the full-ladle distance at the
/// current rate. `None` when there is no positive flow, when the ladle
/// is already at or above full, or when geometry degenerates.
#[must_use]
pub fn seconds_to_full(
    geometry: &LadleGeometry,
    distance_m: f32,
    full_distance_m: f32,
    flow_kg_s: Option<f32>,
) -> Option<f32> {
    let flow = flow_kg_s.filter(|f| *f > 0.0)?;
    let remaining_m = distance_m - full_distance_m;
    if remaining_m <= 0.0 {
        return None;
    }
    let denom = geometry.density_kg_m3 * cross_section_m2(geometry);
    if denom <= f32::EPSILON {
        return None;
    }
    let rise_m_s = flow / denom;
    Some(remaining_m / rise_m_s)
}
