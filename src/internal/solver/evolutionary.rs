//! Evolutionary search: adapts the binary-genome GA engine ([`crate::internal::ga`]) to the
//! solver contract.

use std::rc::Rc;

use crate::internal::assignment::Assignment;
use crate::internal::config::SolverConfig;
use crate::internal::ga::{BinaryGenome, GeneticAlgorithm};
use crate::internal::problem::SatProblem;
use crate::internal::process::{Observer, ProcessCore, SolverHandle};
use crate::internal::solver::{Solver, SolutionSet, SolverStats};

/// Wraps [`GeneticAlgorithm`] behind the solver contract.
///
/// The fitness closure handed to the GA engine is kept deliberately pure — it only ever reads
/// the (shared, immutable-after-parse) problem and the genome it's given, and returns a fitness
/// value. It never touches this solver's own `max_fitness`/solution-set state directly, since
/// the GA engine owns the closure for the engine's whole lifetime while this solver also needs
/// to own the GA engine: a closure capturing `&mut self` would be self-referential. Instead,
/// after every [`GeneticAlgorithm::step`] call, [`EvolutionarySolver::scan_for_new_solutions`]
/// drains the new generation's fitnesses into this solver's own high-water marks and solution
/// set — the "side effects" are computed after the fact by inspecting `ga.population()` /
/// `ga.fitnesses()`, rather than threaded back out through shared mutable state.
pub struct EvolutionarySolver {
    problem: Rc<SatProblem>,
    ga: GeneticAlgorithm<Box<dyn Fn(&BinaryGenome) -> f32>>,
    process: ProcessCore,
    solutions: SolutionSet,
    max_fitness: f32,
    config: SolverConfig,
}

impl EvolutionarySolver {
    pub fn new(problem: SatProblem, config: SolverConfig) -> Self {
        let problem = Rc::new(problem);
        let var_count = problem.var_count();
        let fitness_problem = Rc::clone(&problem);
        let fitness_fn: Box<dyn Fn(&BinaryGenome) -> f32> = Box::new(move |genome: &BinaryGenome| {
            let assignment = Assignment::GenomeView(genome);
            let sats = fitness_problem.satisfied_count(&assignment);
            sats as f32 / fitness_problem.formula_count().max(1) as f32
        });
        let ga = GeneticAlgorithm::new(var_count, config.ga_params.clone(), fitness_fn);
        log::debug!("constructing evolutionary solver for {var_count} variables");
        let mut solver = EvolutionarySolver {
            problem,
            ga,
            process: ProcessCore::new(),
            solutions: SolutionSet::new(),
            max_fitness: 0.0,
            config,
        };
        solver.initialize();
        solver
    }

    fn initialize(&mut self) {
        if let Some(seed) = self.config.rng_seed {
            self.ga.seed(seed);
        }
        self.ga.initialize();
        self.max_fitness = 0.0;
        self.scan_for_new_solutions();
    }

    /// Inspects the GA engine's current population for a new best-ever fitness or any fully
    /// satisfying genome, folding both into this solver's own state.
    fn scan_for_new_solutions(&mut self) {
        let fitnesses = self.ga.fitnesses().to_vec();
        for (genome, fitness) in self.ga.population().iter().zip(fitnesses) {
            if fitness > self.max_fitness {
                self.max_fitness = fitness;
            }
            if fitness >= 1.0 {
                let assignment = Assignment::GenomeView(genome);
                self.solutions.insert(&assignment);
            }
        }
    }

    fn do_step(&mut self) -> bool {
        self.ga.step();
        self.scan_for_new_solutions();
        !(self.config.term_upon_convergence && self.ga.done())
    }

    fn notify_observers(&mut self) {
        let mut observers = self.process.take_observers();
        for observer in &mut observers {
            observer.notify(self);
        }
        self.process.restore_observers(observers);
    }
}

impl SolverHandle for EvolutionarySolver {
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
        self.ga.statistics().offline_min
    }
    fn avg_fitness(&self) -> f32 {
        self.ga.statistics().offline_max
    }
    fn generation(&self) -> u32 {
        self.ga.statistics().generation
    }
    fn stop(&mut self) {
        self.process.stop();
    }
}

impl Solver for EvolutionarySolver {
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

    /// The solution set persists across `reset()`: multiple independent runs accumulate
    /// solutions, they are not cleared out from under a caller re-running the search.
    fn reset(&mut self) {
        self.process.reset();
        self.initialize();
    }

    fn stats(&self) -> SolverStats {
        let ga_stats = self.ga.statistics();
        SolverStats {
            solutions_count: self.solutions.len(),
            steps_count: self.process.steps_count(),
            min_fitness: ga_stats.offline_min,
            avg_fitness: ga_stats.offline_max,
            max_fitness: self.max_fitness,
            time_elapsed_ms: self.process.time_elapsed_ms(),
            generation: ga_stats.generation,
        }
    }

    fn solutions_snapshot(&self) -> Vec<Assignment<'static>> {
        self.solutions.snapshot()
    }
}
