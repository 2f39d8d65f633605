//! FOCuS-SES: [`crate::focus::Focus`] wrapped with an autonomous background
//! estimator driven by queued single-exponential smoothing.
//!
//! The count queue delays each observation by exactly `m` steps before it
//! can influence the smoothed background, so the rate fed to FOCuS at step
//! `t` depends only on counts from `t - m` and earlier, so source photons
//! FOCuS is currently testing cannot pollute their own background estimate.
//!
//! # Thread safety
//!
//! Same contract as [`crate::focus::Focus`]: sequential, not reentrant,
//! safe to run independent instances concurrently on separate threads.

pub mod offline;

use crate::change::PfChange;
use crate::error::Error;
use crate::focus::Focus;
use crate::queue::CountQueue;

#[derive(Clone, Copy)]
enum Phase {
    Collect,
    Update,
    Test,
}

#[derive(Clone, Copy)]
enum State {
    Running(Phase),
    Stopped(Error),
}

/// Validates the parameters shared by `FocusSes` and [`crate::bft::Bft`].
pub(crate) fn check_init_parameters(
    threshold_std: f64,
    mu_min: f64,
    alpha: f64,
    m: u32,
    sleep: u32,
) -> Result<(), Error> {
    Focus::check_init_parameters(threshold_std, mu_min)?;
    let _ = sleep; // sleep: u32 is always >= 0, domain check is a no-op kept for documentation.
    if !(0.0..=1.0).contains(&alpha) {
        return Err(Error::InvalidInput("alpha must be in [0, 1]"));
    }
    if m < 1 {
        return Err(Error::InvalidInput("m must be >= 1"));
    }
    Ok(())
}

/// FOCuS with an autonomous background estimate via single exponential
/// smoothing.
pub struct FocusSes {
    focus: Focus,
    queue: CountQueue,
    alpha: f64,
    m: u32,
    sleep: u32,
    t: i64,
    lambda: f64,
    state: State,
}

impl FocusSes {
    /// Constructs a new instance.
    ///
    /// `alpha` (`0..=1`) is the exponential smoothing factor. `m` (`>= 1`)
    /// is how many of the most recent counts are held back from the
    /// background estimate. `sleep` additionally delays testing by that
    /// many steps after the queue first fills, during which the background
    /// estimate is updated but FOCuS is not yet run.
    pub fn new(
        threshold_std: f64,
        mu_min: f64,
        alpha: f64,
        m: u32,
        sleep: u32,
    ) -> Result<Self, Error> {
        check_init_parameters(threshold_std, mu_min, alpha, m, sleep)?;
        let focus = Focus::new(threshold_std, mu_min)?;

        Ok(FocusSes {
            focus,
            queue: CountQueue::new(m as usize),
            alpha,
            m,
            sleep,
            t: sleep as i64 + m as i64,
            lambda: 0.0,
            state: State::Running(Phase::Collect),
        })
    }

    /// Advances the lifecycle by one step with the latest count `x_t`.
    /// Returns whether this step triggered.
    ///
    /// A trigger requires both that the inner FOCuS detector triggered and
    /// that its reported offset is `< m`: changes claimed to originate
    /// older than the smoothing window are rejected as spurious, since the
    /// background estimate at that point may already have been influenced
    /// by the anomaly itself.
    pub fn step(&mut self, x_t: i64) -> Result<bool, Error> {
        let phase = match self.state {
            State::Stopped(e) => return Err(e),
            State::Running(phase) => phase,
        };

        match phase {
            Phase::Collect => {
                self.queue.enqueue(x_t);
                self.t -= 1;
                if self.t == self.sleep as i64 {
                    self.lambda = self.queue.mean();
                    self.state = State::Running(if self.sleep > 0 {
                        Phase::Update
                    } else {
                        Phase::Test
                    });
                }
                Ok(false)
            }
            Phase::Update => {
                self.update_background(x_t);
                self.t -= 1;
                if self.t == 0 {
                    self.state = State::Running(Phase::Test);
                }
                Ok(false)
            }
            Phase::Test => {
                self.update_background(x_t);
                match self.focus.step(x_t, self.lambda) {
                    Ok(focus_triggered) => {
                        Ok(focus_triggered && self.focus.change().offset < self.m as i64)
                    }
                    Err(e) => {
                        self.state = State::Stopped(e);
                        Err(e)
                    }
                }
            }
        }
    }

    /// Dequeues the oldest count and folds it into the smoothed background,
    /// then enqueues the newest count in its place.
    fn update_background(&mut self, x_t: i64) {
        let x_t_m = self.queue.dequeue();
        self.lambda = self.alpha * x_t_m as f64 + (1.0 - self.alpha) * self.lambda;
        self.queue.enqueue(x_t);
    }

    /// The most recent change, with the inner FOCuS offset filtered to
    /// `< m` (see [`step`][Self::step]); [`PfChange::NONE`] otherwise.
    pub fn change(&self) -> PfChange {
        let c = self.focus.change();
        if c.offset < self.m as i64 {
            c
        } else {
            PfChange::NONE
        }
    }
}
