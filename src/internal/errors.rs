use thiserror::Error;

// ---------------------------
// ERRORS
// ---------------------------

/// Failures that stop construction cold, or denote a broken internal invariant.
///
/// Per-formula lexical/syntax/expression failures are *not* represented here — those are
/// recoverable and surfaced as [`crate::internal::compiler::Diagnostic`]s instead, never as
/// an `Err`.
#[derive(Error, Debug)]
pub enum SatError {
    #[error("problem has no usable formulas or variables")]
    Domain,

    #[error("{var_count} variables do not fit the exhaustive solver's {word_bits}-bit word")]
    Capacity { var_count: usize, word_bits: u32 },

    #[error("internal invariant violation: {0}")]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
