//! Public value types for reporting changes, and the online/offline time
//! conversion between them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A detected change, as reported in online (streaming) mode.
///
/// `offset` is how many steps back the most significant change started (`0`
/// if there is none). Significance is expressed in standard deviations:
/// `significance_std = sqrt(2 * llr)`, where `llr` is the maximized
/// log-likelihood ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PfChange {
    pub significance_std: f64,
    pub offset: i64,
}

impl PfChange {
    /// No change: what every layer reports before the first trigger, and
    /// while stopped.
    pub const NONE: PfChange = PfChange {
        significance_std: 0.0,
        offset: 0,
    };
}

/// A detected change, as reported in offline (batch) mode.
///
/// Unlike [`PfChange`], time here is absolute: `changepoint` is the step
/// index at which the anomaly is deemed to have begun, and `triggertime` is
/// the step index at which it was detected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PfChangepoint {
    pub significance_std: f64,
    pub changepoint: i64,
    pub triggertime: i64,
}

impl PfChangepoint {
    /// `(0, 0, 0)`, reported by offline drivers on immediate construction
    /// failure.
    pub const ZERO: PfChangepoint = PfChangepoint {
        significance_std: 0.0,
        changepoint: 0,
        triggertime: 0,
    };
}

/// Converts an online `change`, reported at step `t`, into an offline
/// `changepoint`.
///
/// `changepoint = t - offset + 1`, `triggertime = t`. Calling this with the
/// same `change` and `t` is idempotent and always gives the same result,
/// since it is a pure function of its inputs.
pub fn change2changepoint(c: PfChange, t: i64) -> PfChangepoint {
    PfChangepoint {
        significance_std: c.significance_std,
        changepoint: t - c.offset + 1,
        triggertime: t,
    }
}
