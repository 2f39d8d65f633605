//! FOCuS: a page-Hinkley-style online Poisson change-point detector.
//!
//! Maintains a bounded, pruned stack of candidate change-point curves and,
//! on every step, maximizes the log-likelihood-ratio of an elevated-rate
//! alternative against a constant-rate null over that stack. After Ward
//! 2023 and Dilillo 2024.
//!
//! # Thread safety
//!
//! A [`Focus`] is a strictly sequential state machine: [`step`][Focus::step]
//! is not reentrant and must be externally serialized if a single instance
//! is ever reachable from more than one thread. Independent instances may
//! run concurrently on separate threads without any synchronization,
//! since each owns its curve stack exclusively.

pub mod offline;

use crate::curve::{Curve, CurveStack};
use crate::error::Error;
use crate::change::PfChange;

/// Private change representation: significance in log-likelihood-ratio
/// units, used internally. The public equivalent is [`PfChange`], which
/// expresses significance in standard deviations.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Change {
    significance_llr: f64,
    offset: i64,
}

impl Change {
    const NONE: Change = Change {
        significance_llr: 0.0,
        offset: 0,
    };

    fn to_pf(self) -> PfChange {
        PfChange {
            significance_std: (2.0 * self.significance_llr).sqrt(),
            offset: self.offset,
        }
    }
}

#[derive(Clone, Copy)]
enum State {
    Running { change: Change },
    Stopped(Error),
}

/// An online Poisson change-point detector over a single count stream.
pub struct Focus {
    state: State,
    curves: CurveStack,
    mu_crit: f64,
    threshold_llr: f64,
}

impl Focus {
    /// Validates `(threshold_std, mu_min)` against their domains without
    /// constructing an instance. Exposed so [`crate::ses::FocusSes`] and
    /// [`crate::bft::Bft`] can validate the shared parameters up front,
    /// before allocating anything downstream.
    pub(crate) fn check_init_parameters(threshold_std: f64, mu_min: f64) -> Result<(), Error> {
        if threshold_std <= 0.0 {
            return Err(Error::InvalidInput("threshold_std must be > 0"));
        }
        if mu_min < 1.0 {
            return Err(Error::InvalidInput("mu_min must be >= 1"));
        }
        Ok(())
    }

    /// Constructs a new detector.
    ///
    /// `threshold_std` (must be `> 0`) is the trigger threshold in standard
    /// deviations. `mu_min` (must be `>= 1`) bounds memory usage at the cost
    /// of losing changes older than what `mu_min` can represent; see Ward
    /// 2023 / Dilillo 2024 for the role of `mu_crit`.
    pub fn new(threshold_std: f64, mu_min: f64) -> Result<Self, Error> {
        Self::check_init_parameters(threshold_std, mu_min)?;

        let mu_crit = if mu_min == 1.0 {
            1.0
        } else {
            (mu_min - 1.0) / mu_min.ln()
        };

        Ok(Focus {
            state: State::Running {
                change: Change::NONE,
            },
            curves: CurveStack::new(),
            mu_crit,
            threshold_llr: threshold_std * threshold_std / 2.0,
        })
    }

    /// Advances the detector by one step with count `x` and background rate
    /// `b`. Returns whether this step triggered.
    ///
    /// `x` must be `>= 0` and `b` must be `> 0`; violating this is an
    /// observation-domain error, not a programmer error, so it is reported
    /// through `Err` rather than a panic, and latches the instance into a
    /// stopped state: every subsequent call to `step` returns the same
    /// latched error and performs no further work.
    pub fn step(&mut self, x: i64, b: f64) -> Result<bool, Error> {
        if let State::Stopped(e) = self.state {
            return Err(e);
        }

        if x < 0 || b <= 0.0 {
            let e = Error::InvalidInput("focus step requires x >= 0 and b > 0");
            self.state = State::Stopped(e);
            return Err(e);
        }

        let change = self.step_helper(x, b);
        let triggered = change.significance_llr > 0.0;
        self.state = State::Running { change };
        Ok(triggered)
    }

    /// The most recent change, or [`PfChange::NONE`] if the detector never
    /// triggered (or is stopped). Calling this repeatedly without an
    /// intervening `step` always returns the same value.
    pub fn change(&self) -> PfChange {
        match self.state {
            State::Running { change } => change.to_pf(),
            State::Stopped(_) => PfChange::NONE,
        }
    }

    /// Number of times the curve stack has dropped its oldest curve to stay
    /// within [`crate::PF_MAXCURVES`]. Pure observability.
    pub fn overflow_count(&self) -> u64 {
        self.curves.overflow_count()
    }

    /// Fast FOCuS updater, see Dilillo 2024.
    fn step_helper(&mut self, x: i64, b: f64) -> Change {
        let mut p = self.curves.pop();
        let mut acc = Curve {
            x: p.x + x,
            b: p.b + b,
            t: p.t + 1,
            m: p.m,
        };

        while !dominates(&p, &self.curves.peek(), &acc) {
            p = self.curves.pop();
        }

        if (acc.x - p.x) as f64 > self.mu_crit * (acc.b - p.b) {
            let m = curve_max(&p, &acc);
            acc.m = p.m + m;
            let change = self.maximize(&p, &acc);
            self.curves.push(p);
            self.curves.push(acc);
            change
        } else {
            self.curves.reset();
            Change::NONE
        }
    }

    /// Fast FOCuS maximizer (Ward 2023): walks down from the curve that just
    /// survived pruning, looking for the first (hence newest, hence
    /// smallest-offset) curve whose LLR against `acc` exceeds the trigger
    /// threshold.
    fn maximize(&self, discarded_top: &Curve, acc: &Curve) -> Change {
        let mut p = *discarded_top;
        let mut m = acc.m - p.m;
        let mut idx = self.curves.head_index();

        while m + p.m >= self.threshold_llr {
            if m >= self.threshold_llr {
                return Change {
                    significance_llr: m,
                    offset: acc.t - p.t,
                };
            }
            idx = self.curves.dec_index(idx);
            p = self.curves.at(idx);
            m = curve_max(&p, acc);
        }
        Change::NONE
    }
}

/// `x * ln(x / b) - (x - b)`, the LLR contribution of the interval between
/// `c` and `acc`.
fn curve_max(c: &Curve, acc: &Curve) -> f64 {
    let x = (acc.x - c.x) as f64;
    let b = acc.b - c.b;
    debug_assert!(x > b, "curve_max requires accumulated counts to exceed background");
    x * (x / b).ln() - (x - b)
}

/// Cross-product domination test: does `p`'s rate line dominate `q`'s,
/// relative to `acc`?
fn dominates(p: &Curve, q: &Curve, acc: &Curve) -> bool {
    let p_x = (acc.x - p.x) as f64;
    let p_b = acc.b - p.b;
    let q_x = (acc.x - q.x) as f64;
    let q_b = acc.b - q.b;
    p_x * q_b - q_x * p_b > 0.0
}
