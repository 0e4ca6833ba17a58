//! # satisfy: a propositional SAT formula solver
//!
//! `satisfy` parses one or more propositional-logic formulas over named Boolean variables and
//! searches for assignments that satisfy every formula simultaneously. Two interchangeable
//! search back ends are provided: an [`ExhaustiveSolver`] that enumerates the full `2^n`
//! assignment space, and an [`EvolutionarySolver`] driven by a small binary-genome genetic
//! algorithm.
//!
//! ## Quick start
//!
//! ```rust
//! use satisfy::{ExhaustiveSolver, SatProblem, Solver, SolverConfig};
//!
//! let problem = SatProblem::parse("a & b; a | b;").unwrap();
//! let mut solver = ExhaustiveSolver::new(problem, &SolverConfig::default()).unwrap();
//! solver.start();
//! for assignment in solver.solutions_snapshot() {
//!     println!("a={} b={}", assignment.bit(0), assignment.bit(1));
//! }
//! ```
//!
//! ## Input language
//!
//! Formulas are built from variables, the constants `0`/`1` (or `FALSE`/`TRUE`), the unary
//! operator `~`/`NOT`, and the binary operators `&`/`AND`, `|`/`OR`, `^`/`XOR`, grouped with
//! parentheses, and terminated by `;` (the last formula's terminator is optional). All three
//! binary operators share one precedence, parsed left to right; `~` binds tighter than any of
//! them.
//!
//! ## Scope
//!
//! This crate has no CLI, no CNF/DIMACS compatibility, no conflict-driven learning, and no
//! multi-threaded search — it is a single-threaded, cooperative search library. A malformed
//! formula does not abort the whole input: it is recorded as a [`Diagnostic`] and parsing
//! resumes at the next formula.

pub mod internal {
    pub mod assignment;
    pub mod command;
    pub mod compiler;
    pub mod config;
    pub mod errors;
    pub mod evaluator;
    pub mod ga;
    pub mod observers;
    pub mod problem;
    pub mod process;
    pub mod resolver;
    pub mod scanner;
    pub mod solver;
    pub mod token;
}

pub use internal::assignment::{Assignment, LongAssignment};
pub use internal::command::{BinOp, Command, CommandList};
pub use internal::compiler::{Diagnostic, DiagnosticKind};
pub use internal::config::SolverConfig;
pub use internal::errors::SatError;
pub use internal::ga::{BinaryGenome, GaParams, GaStatistics, GeneticAlgorithm};
pub use internal::observers::{FitnessWatch, ProgressWatch, ResultsWatch, SolutionsCountStop, TimedStop};
pub use internal::problem::SatProblem;
pub use internal::process::{Observer, SolverHandle, Stopwatch};
pub use internal::resolver::VariableTable;
pub use internal::solver::evolutionary::EvolutionarySolver;
pub use internal::solver::exhaustive::ExhaustiveSolver;
pub use internal::solver::{SolutionSet, Solver, SolverStats};
