//! Batch driver over per-detector count series, for offline analysis or as
//! a worked example of how to drive [`Bft`] online.

use super::Bft;
use crate::change::change2changepoint;
use crate::error::Error;
use crate::{PfChangepoint, DETECTORS_NUMBER};

/// Result of an offline run: one changepoint per detector (all
/// [`PfChangepoint::ZERO`] if construction failed), plus the error, if any,
/// that ended the run early.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub changepoints: [PfChangepoint; DETECTORS_NUMBER],
    pub error: Option<Error>,
}

/// Runs `DETECTORS_NUMBER` count series, one per detector and all of equal
/// length, through a freshly constructed [`Bft`], stopping at the first
/// majority trigger or error, or after the last element.
///
/// `xss[i]` is detector `i`'s series; all `DETECTORS_NUMBER` series must
/// have equal length, a programmer-error precondition.
pub fn run(
    xss: &[&[i64]; DETECTORS_NUMBER],
    threshold_std: f64,
    mu_min: f64,
    alpha: f64,
    m: u32,
    sleep: u32,
    majority: u32,
) -> Outcome {
    let len = xss[0].len();
    debug_assert!(
        xss.iter().all(|xs| xs.len() == len),
        "all detector series must have equal length"
    );

    let mut bft = match Bft::new(threshold_std, mu_min, alpha, m, sleep, majority) {
        Ok(b) => b,
        Err(e) => {
            return Outcome {
                changepoints: [PfChangepoint::ZERO; DETECTORS_NUMBER],
                error: Some(e),
            }
        }
    };

    let mut t = len;
    let mut error = None;

    for i in 0..len {
        let mut xs = [0i64; DETECTORS_NUMBER];
        for (d, series) in xss.iter().enumerate() {
            xs[d] = series[i];
        }

        match bft.step(&xs) {
            Ok(true) => {
                t = i;
                break;
            }
            Ok(false) => {}
            Err(e) => {
                t = i;
                error = Some(e);
                break;
            }
        }
    }

    let mut changepoints = [PfChangepoint::ZERO; DETECTORS_NUMBER];
    for (d, c) in bft.changes().into_iter().enumerate() {
        changepoints[d] = change2changepoint(c, t as i64);
    }

    Outcome { changepoints, error }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameters_report_zero_changepoints_and_error() {
        let xs = [0i64; 10];
        let series = [&xs[..], &xs[..], &xs[..], &xs[..]];
        let outcome = run(&series, THRESHOLD_STD, MU_MIN, 0.1, 5, 0, 0);
        assert_eq!(outcome.changepoints, [PfChangepoint::ZERO; DETECTORS_NUMBER]);
        assert!(outcome.error.is_some());
    }

    #[test]
    fn steady_background_never_triggers() {
        let xs = [2i64; 50];
        let series = [&xs[..], &xs[..], &xs[..], &xs[..]];
        let outcome = run(&series, THRESHOLD_STD, MU_MIN, 0.1, 5, 0, 3);
        assert!(outcome.error.is_none());
        for cp in outcome.changepoints {
            assert_eq!(cp.triggertime, 50);
            assert_eq!(cp.changepoint, 51);
        }
    }

    #[test]
    fn simultaneous_spike_triggers_at_the_same_step_for_every_detector() {
        let mut xs = vec![2i64; 5];
        xs.extend(std::iter::repeat(50).take(10));
        let series = [&xs[..], &xs[..], &xs[..], &xs[..]];
        let outcome = run(&series, THRESHOLD_STD, MU_MIN, 0.1, 5, 0, 3);
        assert!(outcome.error.is_none());
        for cp in outcome.changepoints {
            assert_eq!(cp.triggertime, 5);
            assert!(cp.significance_std > 5.0);
        }
    }

    const THRESHOLD_STD: f64 = 5.0;
    const MU_MIN: f64 = 1.1;
}
