//! Distance to height/weight conversion for a cylindrical ladle.

use crate::config::LadleGeometry;

/// Cross-sectional area of the ladle (m²).
#[must_use]
pub fn cross_section_m2(geometry: &LadleGeometry) -> f32 {
    let radius = geometry.diameter_m / 2.0;
    std::f32::consts::PI * radius * radius
}

/// Material height above the empty reference, clamped at zero.
///
/// A reading farther than the empty reference (sensor noise, slag crust
/// settling) must never produce a negative column.
#[must_use]
pub fn material_height_m(empty_distance_m: f32, distance_m: f32) -> f32 {
    (empty_distance_m - distance_m).max(0.0)
}

/// Material weight from column height, cylinder model.
#[must_use]
pub fn weight_kg(geometry: &LadleGeometry, height_m: f32) -> f32 {
    height_m * cross_section_m2(geometry) * geometry.density_kg_m3
}

/// Fill percentage against the distance span between the empty reference
/// and the configured full-ladle distance. Falls back to the geometric
/// height ratio when the span is degenerate.
#[must_use]
pub fn fill_pct(
    geometry: &LadleGeometry,
    empty_distance_m: f32,
    full_distance_m: f32,
    distance_m: f32,
) -> f32 {
    let span = empty_distance_m - full_distance_m;
    let pct = if span > f32::EPSILON {
        (empty_distance_m - distance_m) / span * 100.0
    } else if geometry.height_m > f32::EPSILON {
        material_height_m(empty_distance_m, distance_m) / geometry.height_m * 100.0
    } else {
        0.0
    };
    pct.clamp(0.0, 100.0)
}
