//! BFT (Big Focus Trigger): fans a count stream out across
//! [`crate::DETECTORS_NUMBER`] independent [`FocusSes`] instances and
//! triggers on majority vote.
//!
//! Detectors degrade independently: one going into its `STOP` state (an
//! invalid background or count reaching it) marks it dead in a sticky
//! bitmap and excludes it from the vote from then on, rather than
//! poisoning the whole instance. Only running out of enough live detectors
//! to reach `majority` is itself an error.
//!
//! # Thread safety
//!
//! Same contract as [`FocusSes`]: sequential, not reentrant.

pub mod offline;

use crate::change::PfChange;
use crate::error::Error;
use crate::ses::{self, FocusSes};
use crate::DETECTORS_NUMBER;

/// Manages [`DETECTORS_NUMBER`] independent [`FocusSes`] instances sharing
/// the same parameters, triggering when at least `majority` of them agree.
pub struct Bft {
    detectors: [FocusSes; DETECTORS_NUMBER],
    majority: u32,
    /// Sticky bitmap of dead (stopped) detectors, one bit per index.
    dead: u8,
}

impl Bft {
    /// Constructs a new manager. `majority` must be in `1..=DETECTORS_NUMBER`;
    /// the remaining parameters are forwarded to each of the
    /// [`DETECTORS_NUMBER`] underlying [`FocusSes`] instances unchanged.
    pub fn new(
        threshold_std: f64,
        mu_min: f64,
        alpha: f64,
        m: u32,
        sleep: u32,
        majority: u32,
    ) -> Result<Self, Error> {
        ses::check_init_parameters(threshold_std, mu_min, alpha, m, sleep)?;
        if majority < 1 || majority > DETECTORS_NUMBER as u32 {
            return Err(Error::InvalidInput("majority must be in 1..=DETECTORS_NUMBER"));
        }

        // All DETECTORS_NUMBER instances share identical parameters, so
        // they either all construct successfully or none do.
        let mut detectors = Vec::with_capacity(DETECTORS_NUMBER);
        for _ in 0..DETECTORS_NUMBER {
            detectors.push(FocusSes::new(threshold_std, mu_min, alpha, m, sleep)?);
        }
        let detectors: [FocusSes; DETECTORS_NUMBER] = detectors
            .try_into()
            .unwrap_or_else(|_| panic!("exactly DETECTORS_NUMBER instances constructed above"));

        Ok(Bft {
            detectors,
            majority,
            dead: 0,
        })
    }

    /// Advances every detector by one step with its corresponding count in
    /// `xs` and returns whether the vote reached majority.
    ///
    /// Every detector is stepped unconditionally, even ones already dead
    /// (their `step` simply re-reports the same latched error and marks
    /// the bit again, a no-op). Returns `Err` only once the count of live
    /// detectors drops below `majority`.
    pub fn step(&mut self, xs: &[i64; DETECTORS_NUMBER]) -> Result<bool, Error> {
        let mut triggered_detectors = 0u32;

        for i in 0..DETECTORS_NUMBER {
            match self.detectors[i].step(xs[i]) {
                Ok(true) => triggered_detectors += 1,
                Ok(false) => {}
                Err(_) => self.dead |= 1 << i,
            }
        }

        let got_trigger = triggered_detectors >= self.majority;

        if (DETECTORS_NUMBER as u32 - self.dead_count()) < self.majority {
            Err(Error::InvalidInput("fewer live detectors than majority"))
        } else {
            Ok(got_trigger)
        }
    }

    /// The most recent change reported by each detector, in input order.
    pub fn changes(&self) -> [PfChange; DETECTORS_NUMBER] {
        let mut out = [PfChange::NONE; DETECTORS_NUMBER];
        for i in 0..DETECTORS_NUMBER {
            out[i] = self.detectors[i].change();
        }
        out
    }

    /// Number of detectors that have latched into a stopped state.
    pub fn dead_count(&self) -> u32 {
        self.dead.count_ones()
    }

    /// Whether detector `i` has latched into a stopped state.
    pub fn is_dead(&self, i: usize) -> bool {
        self.dead & (1 << i) != 0
    }
}

#[cfg(test)]
mod tests;
