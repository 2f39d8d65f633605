//! Online Poisson change-point detection (FOCuS), wrapped with an
//! autonomous background estimator (FOCuS-SES), and fanned out across
//! several independent detectors with majority voting (BFT).
//!
//! Three layers, each usable on its own:
//!
//! - [`focus::Focus`] is the bare change-point detector: feed it a count
//!   and a background rate at each step, it tells you when the rate has
//!   gone up.
//! - [`ses::FocusSes`] wraps a `Focus` with its own background estimate,
//!   maintained by single exponential smoothing over a delayed window of
//!   past counts, so you only ever have to feed it a count.
//! - [`bft::Bft`] runs [`DETECTORS_NUMBER`] independent `FocusSes`
//!   instances over parallel count streams and triggers once enough of
//!   them agree, degrading gracefully as individual detectors fail.
//!
//! Every layer can also be run offline, over a complete series, through
//! [`focus::offline::run`], [`ses::offline::run`] and [`bft::offline::run`].
//!
//! ## Example
//!
//! ```rust
//! use focus_trigger::Bft;
//!
//! let mut bft = Bft::new(5.0, 1.1, 0.1, 5, 0, 3).unwrap();
//!
//! // Feed a steady background to seed each detector's estimate.
//! for _ in 0..5 {
//!     bft.step(&[2, 2, 2, 2]).unwrap();
//! }
//!
//! // A simultaneous rate jump across (at least) the majority triggers.
//! let triggered = bft.step(&[50, 50, 50, 50]).unwrap();
//! assert!(triggered);
//! ```

pub mod bft;
mod change;
mod curve;
pub mod error;
pub mod focus;
mod queue;
pub mod ses;

pub use bft::Bft;
pub use change::{change2changepoint, PfChange, PfChangepoint};
pub use error::Error;
pub use focus::Focus;
pub use ses::FocusSes;

/// Number of detectors a [`Bft`] fans out across.
pub const DETECTORS_NUMBER: usize = 4;

/// Maximum number of candidate curves a [`Focus`]'s internal stack holds
/// before it starts dropping the oldest to stay bounded.
pub const PF_MAXCURVES: usize = 64;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;
