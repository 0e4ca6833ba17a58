//! Explicit, non-global configuration for solver construction.
//!
//! Neither solver reads from a crate-level mutable static or a `lazy_static`/`OnceLock`
//! singleton; every tunable (RNG seed, GA parameters, step width, convergence policy) is
//! threaded through a [`SolverConfig`] passed into the constructor.

use crate::internal::ga::GaParams;

#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Bits of the exhaustive assignment space explored per `do_step` call.
    pub step_width: u32,
    pub ga_params: GaParams,
    /// `None` seeds the evolutionary solver's RNG from system entropy.
    pub rng_seed: Option<u64>,
    pub term_upon_convergence: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            step_width: 16,
            ga_params: GaParams::default(),
            rng_seed: None,
            term_upon_convergence: false,
        }
    }
}
