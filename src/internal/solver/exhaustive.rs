//! Exhaustive search: enumerates the full `2^n` assignment space in fixed-width batches.

use crate::internal::assignment::{Assignment, LongAssignment};
use crate::internal::config::SolverConfig;
use crate::internal::errors::SatError;
use crate::internal::problem::SatProblem;
use crate::internal::process::{Observer, ProcessCore, SolverHandle};
use crate::internal::solver::{Solver, SolutionSet, SolverStats};

/// Iterates integer-encoded assignments `0..2^var_count` in batches of `2^step_width` per step.
pub struct ExhaustiveSolver {
    problem: SatProblem,
    current: u64,
    end: u64,
    step_width: u32,
    process: ProcessCore,
    solutions: SolutionSet,
    sum_fitness: f64,
    min_fitness: f32,
    max_fitness: f32,
}

impl ExhaustiveSolver {
    /// Fails with [`SatError::Capacity`] if `var_count + 2 >= 64` — the exhaustive space has to
    /// fit comfortably inside one machine word.
    pub fn new(problem: SatProblem, config: &SolverConfig) -> Result<Self, SatError> {
        let var_count = problem.var_count();
        if var_count as u32 + 2 >= 64 {
            return Err(SatError::Capacity { var_count, word_bits: 64 });
        }
        log::debug!("constructing exhaustive solver for {var_count} variables");
        Ok(ExhaustiveSolver {
            problem,
            current: 0,
            end: 1u64 << var_count,
            step_width: config.step_width,
            process: ProcessCore::new(),
            solutions: SolutionSet::new(),
            sum_fitness: 0.0,
            min_fitness: 1.0,
            max_fitness: 0.0,
        })
    }

    /// Evaluates up to `2^step_width` more assignments. Returns `false` once the space is
    /// exhausted, requesting the outer loop stop.
    fn do_step(&mut self) -> bool {
        let batch = 1u64 << self.step_width;
        for _ in 0..batch {
            if self.current == self.end {
                return false;
            }
            let assignment = Assignment::Exhaustive(LongAssignment::new(self.current, self.problem.var_count()));
            let sats = self.problem.satisfied_count(&assignment);
            let total = self.problem.formula_count().max(1);
            let fitness = sats as f32 / total as f32;
            self.current += 1;

            self.sum_fitness += fitness as f64;
            if fitness < self.min_fitness {
                self.min_fitness = fitness;
            }
            if fitness > self.max_fitness {
                self.max_fitness = fitness;
            }
            if sats == self.problem.formula_count() {
                self.solutions.insert(&assignment);
            }
        }
        self.current < self.end
    }

    fn avg_fitness_now(&self) -> f32 {
        if self.current == 0 {
            0.0
        } else {
            (self.sum_fitness / self.current as f64) as f32
        }
    }

    /// Notifies every registered observer once, handing each a view of `self`. See
    /// [`ProcessCore::take_observers`] for why the observer list is temporarily taken out.
    fn notify_observers(&mut self) {
        let mut observers = self.process.take_observers();
        for observer in &mut observers {
            observer.notify(self);
        }
        self.process.restore_observers(observers);
    }
}

impl SolverHandle for ExhaustiveSolver {
    fn steps_count(&self) -> u64 {
        self.process.steps_count()
    }
    fn time_elapsed_ms(&self) -> u64 {
        self.process.time_elapsed_ms()
    }
    fn solutions_count(&self) -> usize {
        self.solutions.len()
    }
    fn max_fitness(&self) -> f32 {
        self.max_fitness
    }
    fn min_fitness(&self) -> f32 {
        self.min_fitness
    }
    fn avg_fitness(&self) -> f32 {
        self.avg_fitness_now()
    }
    fn generation(&self) -> u32 {
        0
    }
    fn stop(&mut self) {
        self.process.stop();
    }
}

impl Solver for ExhaustiveSolver {
    fn problem(&self) -> &SatProblem {
        &self.problem
    }

    fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.process.add_observer(observer);
    }

    fn start(&mut self) {
        self.process.begin();
        while self.process.is_running() {
            let keep_going = self.do_step();
            self.process.record_step();
            if !keep_going {
                self.process.stop();
            }
            self.notify_observers();
        }
        self.process.end();
    }

    fn reset(&mut self) {
        self.process.reset();
        self.current = 0;
        self.sum_fitness = 0.0;
        self.min_fitness = 1.0;
        self.max_fitness = 0.0;
        self.solutions = SolutionSet::new();
    }

    fn stats(&self) -> SolverStats {
        SolverStats {
            solutions_count: self.solutions.len(),
            steps_count: self.process.steps_count(),
            min_fitness: self.min_fitness,
            avg_fitness: self.avg_fitness_now(),
            max_fitness: self.max_fitness,
            time_elapsed_ms: self.process.time_elapsed_ms(),
            generation: 0,
        }
    }

    fn solutions_snapshot(&self) -> Vec<Assignment<'static>> {
        self.solutions.snapshot()
    }
}
