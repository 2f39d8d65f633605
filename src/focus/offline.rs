//! Batch driver over a full count/background series, for offline analysis
//! or as a worked example of how to drive [`Focus`] online.

use super::Focus;
use crate::change::{change2changepoint, PfChangepoint};
use crate::error::Error;

/// Result of an offline run: the best changepoint found (or
/// [`PfChangepoint::ZERO`] if construction failed), plus the error, if any,
/// that ended the run early.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub changepoint: PfChangepoint,
    pub error: Option<Error>,
}

/// Runs a full series through a freshly constructed [`Focus`], stopping at
/// the first trigger or error, or after the last element.
///
/// `xs` and `bs` must have equal length; this is a programmer-error
/// precondition; on the last step completing with no trigger, the
/// changepoint time convention is `triggertime = xs.len()`, i.e.
/// `changepoint = xs.len() + 1` (also the result when `xs` is empty).
pub fn run(xs: &[i64], bs: &[f64], threshold_std: f64, mu_min: f64) -> Outcome {
    debug_assert_eq!(xs.len(), bs.len(), "xs and bs must have equal length");

    let mut focus = match Focus::new(threshold_std, mu_min) {
        Ok(f) => f,
        Err(e) => {
            return Outcome {
                changepoint: PfChangepoint::ZERO,
                error: Some(e),
            }
        }
    };

    let len = xs.len();
    let mut t = len;
    let mut error = None;

    for (i, (&x, &b)) in xs.iter().zip(bs.iter()).enumerate() {
        match focus.step(x, b) {
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

    Outcome {
        changepoint: change2changepoint(focus.change(), t as i64),
        error,
    }
}
