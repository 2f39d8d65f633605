use thiserror::Error;

/// Error taxonomy shared by [`Focus`][crate::focus::Focus],
/// [`FocusSes`][crate::ses::FocusSes] and [`Bft`][crate::bft::Bft].
///
/// The original C implementation this crate is modeled on kept three
/// structurally identical enums (`pf_errors`, `pfs_errors`, `bft_errors`),
/// one per layer, because C has no module system to separate the
/// namespaces. Once the legacy `INVALID_BACKGROUND` variant is folded into
/// `InvalidInput`, all three are the same two variants, so a single type is
/// used here instead.
///
/// There is no `NoErrors` variant: success is `Ok(())` / `Ok(T)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Memory acquisition failed during construction.
    ///
    /// Safe Rust allocation failures abort the process rather than
    /// returning a value, so no code path in this crate actually produces
    /// this variant today; it is kept for taxonomy parity with the
    /// original three-way split and for any future fallible-allocation
    /// entry point.
    #[error("allocation failed")]
    InvalidAllocation,

    /// A parameter (at construction) or an observation (at `step` time) was
    /// outside its domain.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;
