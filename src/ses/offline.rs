//! Batch driver over a full count series, for offline analysis or as a
//! worked example of how to drive [`FocusSes`] online.

use super::FocusSes;
use crate::change::{change2changepoint, PfChangepoint};
use crate::error::Error;

/// Result of an offline run, see [`crate::focus::offline::Outcome`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub changepoint: PfChangepoint,
    pub error: Option<Error>,
}

/// Runs a full count series through a freshly constructed [`FocusSes`],
/// stopping at the first trigger or error, or after the last element.
pub fn run(
    xs: &[i64],
    threshold_std: f64,
    mu_min: f64,
    alpha: f64,
    m: u32,
    sleep: u32,
) -> Outcome {
    let mut ses = match FocusSes::new(threshold_std, mu_min, alpha, m, sleep) {
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

    for (i, &x) in xs.iter().enumerate() {
        match ses.step(x) {
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
        changepoint: change2changepoint(ses.change(), t as i64),
        error,
    }
}
