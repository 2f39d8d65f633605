use super::*;

const THRESHOLD_STD: f64 = 5.0;
const MU_MIN: f64 = 1.1;
const ALPHA: f64 = 0.1;
const M: u32 = 5;
const MAJORITY: u32 = 3;

#[test]
fn rejects_majority_outside_valid_range() {
    assert!(Bft::new(THRESHOLD_STD, MU_MIN, ALPHA, M, 0, 0).is_err());
    assert!(Bft::new(THRESHOLD_STD, MU_MIN, ALPHA, M, 0, DETECTORS_NUMBER as u32 + 1).is_err());
}

#[test]
fn steady_background_across_all_detectors_never_triggers() {
    let mut bft = Bft::new(THRESHOLD_STD, MU_MIN, ALPHA, M, 0, MAJORITY).unwrap();
    for _ in 0..100 {
        let triggered = bft.step(&[2, 2, 2, 2]).unwrap();
        assert!(!triggered);
    }
    assert_eq!(bft.dead_count(), 0);
}

#[test]
fn simultaneous_spike_across_all_detectors_reaches_majority() {
    let mut bft = Bft::new(THRESHOLD_STD, MU_MIN, ALPHA, M, 0, MAJORITY).unwrap();
    for _ in 0..5 {
        assert!(!bft.step(&[2, 2, 2, 2]).unwrap());
    }
    let triggered = bft.step(&[50, 50, 50, 50]).unwrap();
    assert!(triggered);
    for c in bft.changes() {
        assert!(c.significance_std > 5.0);
    }
}

#[test]
fn one_dead_detector_does_not_block_the_remaining_majority() {
    let mut bft = Bft::new(THRESHOLD_STD, MU_MIN, ALPHA, M, 0, MAJORITY).unwrap();
    for _ in 0..5 {
        assert!(!bft.step(&[2, 2, 2, 2]).unwrap());
    }
    // Detector 2 sees a negative count during its first test step and dies;
    // the other three stay on a steady background.
    let result = bft.step(&[2, 2, -1, 2]);
    assert!(result.is_ok());
    assert!(!result.unwrap());
    assert_eq!(bft.dead_count(), 1);
    assert!(bft.is_dead(2));
    assert!(!bft.is_dead(0));

    // Detector 2 stays dead, but the quorum among the other three holds.
    for _ in 0..10 {
        assert!(bft.step(&[2, 2, 2, 2]).is_ok());
    }
    assert_eq!(bft.dead_count(), 1);
}

#[test]
fn losing_quorum_below_majority_is_an_error() {
    let mut bft = Bft::new(THRESHOLD_STD, MU_MIN, ALPHA, M, 0, MAJORITY).unwrap();
    for _ in 0..5 {
        assert!(!bft.step(&[2, 2, 2, 2]).unwrap());
    }
    // Detectors 1 and 2 both die on this step: only 2 of 4 remain alive,
    // below the majority of 3.
    let result = bft.step(&[2, -1, -1, 2]);
    assert!(result.is_err());
    assert_eq!(bft.dead_count(), 2);
}

#[test]
fn changes_reports_none_for_detectors_that_never_triggered() {
    let mut bft = Bft::new(THRESHOLD_STD, MU_MIN, ALPHA, M, 0, MAJORITY).unwrap();
    for _ in 0..20 {
        bft.step(&[2, 2, 2, 2]).unwrap();
    }
    for c in bft.changes() {
        assert_eq!(c, PfChange::NONE);
    }
}
