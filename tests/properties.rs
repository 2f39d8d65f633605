//! Property-based tests over the public API, covering invariants that hold
//! for entire families of inputs rather than single worked examples.

use focus_trigger::{change2changepoint, Bft, Focus, PfChange, PfChangepoint};
use proptest::prelude::*;

proptest! {
    // changepoint = t - offset + 1, triggertime = t, for any reported change.
    #[test]
    fn changepoint_conversion_matches_its_formula(
        significance_std in 0.0f64..100.0,
        offset in 0i64..1000,
        t in 0i64..10_000,
    ) {
        let c = PfChange { significance_std, offset };
        let cp = change2changepoint(c, t);
        prop_assert_eq!(cp.significance_std, significance_std);
        prop_assert_eq!(cp.triggertime, t);
        prop_assert_eq!(cp.changepoint, t - offset + 1);
    }

    // Calling change2changepoint twice with the same inputs always agrees.
    #[test]
    fn changepoint_conversion_is_a_pure_function(
        significance_std in 0.0f64..100.0,
        offset in 0i64..1000,
        t in 0i64..10_000,
    ) {
        let c = PfChange { significance_std, offset };
        prop_assert_eq!(change2changepoint(c, t), change2changepoint(c, t));
    }

    // A background at least twice any count it is paired with is never
    // anomalous for mu_min >= 1.1 (mu_crit < 1.1), so a constant stream at
    // that ratio never trips the detector, however long it runs.
    #[test]
    fn comfortably_sub_critical_constant_streams_never_trigger(
        x in 0i64..50,
        extra_b in 0.0f64..20.0,
        steps in 1usize..80,
    ) {
        let b = 2.0 * x as f64 + 1.0 + extra_b;
        let mut f = Focus::new(5.0, 1.1).unwrap();
        for _ in 0..steps {
            let triggered = f.step(x, b).unwrap();
            prop_assert!(!triggered);
        }
        prop_assert_eq!(f.change(), PfChange::NONE);
    }

    // A rate far above critical triggers immediately, and always reports a
    // positive offset: a trigger can never be attributed to "zero steps
    // ago", since it takes at least one step's worth of accumulation to
    // exceed the threshold.
    #[test]
    fn strongly_super_critical_constant_streams_trigger_with_positive_offset(
        b in 1.0f64..5.0,
    ) {
        let x = (20.0 * b) as i64 + 10;
        let mut f = Focus::new(5.0, 1.1).unwrap();
        let triggered = f.step(x, b).unwrap();
        prop_assert!(triggered);
        let c = f.change();
        prop_assert!(c.offset >= 1);
        prop_assert!(c.significance_std > 0.0);
    }

    // A BFT's dead-detector count never exceeds its detector count, and any
    // step that returns Ok leaves at least `majority` detectors alive.
    #[test]
    fn bft_never_returns_ok_below_quorum(
        majority in 1u32..=4,
        spikes in prop::collection::vec(any::<bool>(), 4),
        rounds in 1usize..6,
    ) {
        let mut bft = Bft::new(5.0, 1.1, 0.1, 5, 0, majority).unwrap();
        for _ in 0..5 {
            bft.step(&[2, 2, 2, 2]).unwrap();
        }
        for _ in 0..rounds {
            let xs: [i64; 4] = core::array::from_fn(|i| if spikes[i] { -1 } else { 2 });
            if bft.step(&xs).is_ok() {
                prop_assert!(4 - bft.dead_count() >= majority);
            }
            prop_assert!(bft.dead_count() <= 4);
        }
    }
}
