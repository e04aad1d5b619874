use pour_core::{
    DetectionCfg, EstimationSession, LadleGeometry, OperatorContext, Reading, SamplingCfg,
};
use proptest::prelude::*;

fn session() -> EstimationSession {
    EstimationSession::new(
        LadleGeometry::default(),
        DetectionCfg::default(),
        &SamplingCfg::default(),
        OperatorContext::default(),
    )
}

prop_compose! {
    fn distance_trace()(
        len in 20usize..150,
        values in prop::collection::vec(10.0f32..18.0, 150),
    ) -> Vec<f32> {
        values.into_iter().take(len).collect()
    }
}

proptest! {
    // Whatever the sensor reports, derived quantities stay physical.
    #[test]
    fn estimates_stay_in_physical_bounds(trace in distance_trace()) {
        let mut s = session();
        // Latch a known empty reference first
        for i in 0..12u64 {
            s.tick_reading(&Reading {
                at_ms: i * 300,
                distance_m: Some(16.8),
                ..Reading::default()
            });
        }
        for (i, d) in trace.iter().enumerate() {
            let out = s.tick_reading(&Reading {
                at_ms: 3600 + i as u64 * 300,
                distance_m: Some(*d),
                ..Reading::default()
            });
            if let Some(h) = out.material_height_m {
                prop_assert!(h >= 0.0);
            }
            if let Some(w) = out.weight_kg {
                prop_assert!(w >= 0.0);
            }
            if let Some(p) = out.fill_pct {
                prop_assert!((0.0..=100.0).contains(&p));
            }
            if let Some(r) = out.remaining_kg {
                prop_assert!(r >= 0.0);
            }
            if let Some(eta) = out.eta_s {
                prop_assert!(eta > 0.0);
            }
        }
    }

    // Pour events always close: starts and completions alternate, so the
    // completion count never trails the start count by more than one.
    #[test]
    fn starts_and_completions_alternate(flows in prop::collection::vec(
        prop::option::of(0.0f32..200.0), 10..200,
    )) {
        use pour_core::{PourStateMachine, PourTransition};
        let mut m = PourStateMachine::new(&DetectionCfg::default());
        let mut starts = 0u32;
        let mut completions = 0u32;
        for (i, f) in flows.iter().enumerate() {
            match m.observe(*f, i as u64 * 300) {
                PourTransition::Started { .. } => starts += 1,
                PourTransition::Completed { duration_s, .. } => {
                    completions += 1;
                    prop_assert!(duration_s >= 0.0);
                }
                PourTransition::None => {}
            }
            prop_assert!(starts == completions || starts == completions + 1);
        }
        if m.is_pouring() {
            prop_assert_eq!(starts, completions + 1);
        } else {
            prop_assert_eq!(starts, completions);
        }
    }

    // Absent samples can delay but never corrupt the calibration latch.
    #[test]
    fn calibration_never_latches_below_threshold(
        samples in prop::collection::vec(prop::option::of(5.0f32..18.0), 10..200),
    ) {
        use pour_core::CalibrationTracker;
        let mut t = CalibrationTracker::new(&DetectionCfg::default());
        for (i, d) in samples.iter().enumerate() {
            t.observe(*d, i as u64 * 300);
        }
        if let Some(empty) = t.empty_distance_m() {
            prop_assert!(empty > 16.5);
        }
    }
}
