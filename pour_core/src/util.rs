//! Small shared helpers.

pub const MILLIS_PER_SEC: u64 = 1000;

/// Millisecond span as fractional seconds.
#[must_use]
pub fn ms_to_secs(ms: u64) -> f32 {
    ms as f32 / MILLIS_PER_SEC as f32
}

/// Fractional seconds as whole milliseconds, saturating at zero.
#[must_use]
pub fn secs_to_ms(secs: f32) -> u64 {
    if secs <= 0.0 || !secs.is_finite() {
        return 0;
    }
    (secs * MILLIS_PER_SEC as f32).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_whole_seconds() {
        assert_eq!(secs_to_ms(3.0), 3000);
        assert!((ms_to_secs(3000) - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn negative_and_nan_clamp_to_zero() {
        assert_eq!(secs_to_ms(-1.0), 0);
        assert_eq!(secs_to_ms(f32::NAN), 0);
    }
}
