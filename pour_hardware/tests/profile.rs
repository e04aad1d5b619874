use std::time::Duration;

use pour_hardware::sim::{SimulatedRegisterSource, pour_profile};
use pour_traits::{Register, RegisterSource};
use rstest::rstest;

#[rstest]
#[case(16.8, 13.0, 12)]
#[case(16.5, 12.0, 3)]
#[case(20.0, 15.0, 1)]
fn profile_phases_cover_the_full_cycle(
    #[case] empty: f32,
    #[case] full: f32,
    #[case] ticks: usize,
) {
    let script = pour_profile(empty, full, ticks);
    // Opens at the no-ladle distance and settles onto the full mark
    assert_eq!(script[0], empty);
    let last = *script.last().unwrap();
    assert!((last - full).abs() < 1e-3, "tail ended at {last}");
    assert!(last >= full);
    // Monotonic non-increasing after the ladle arrives
    let arrival = ticks.max(1);
    for w in script[arrival..].windows(2) {
        assert!(w[1] <= w[0] + 1e-6, "distance rose mid-pour: {w:?}");
    }
}

#[test]
fn tail_flow_decays_instead_of_cutting_out() {
    let script = pour_profile(16.8, 13.0, 12);
    // Per-tick steps in the tail keep shrinking, so the implied flow
    // rate walks down through a stop threshold
    let tail = &script[script.len() - 8..];
    for w in tail.windows(3) {
        let d0 = w[0] - w[1];
        let d1 = w[1] - w[2];
        assert!(d1 <= d0, "tail step grew: {w:?}");
    }
}

#[test]
fn simulator_replays_profile_through_the_bus_trait() {
    let script = pour_profile(16.8, 13.0, 4);
    let last = *script.last().unwrap();
    let mut src = SimulatedRegisterSource::new(script.clone());
    let t = Duration::from_millis(10);
    for expected in script {
        let got = src.read_float(Register::Distance, t).unwrap();
        assert_eq!(got, expected);
    }
    // Past the script end the last value repeats
    for _ in 0..3 {
        assert_eq!(src.read_float(Register::Distance, t).unwrap(), last);
    }
}
