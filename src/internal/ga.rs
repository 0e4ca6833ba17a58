//! A small, self-contained binary-genome genetic algorithm.
//!
//! This plays the role of the generic GA collaborator the evolutionary solver
//! (`internal::solver::evolutionary`) is built against: a fixed-length bitstring population,
//! one selection strategy (tournament), one crossover (single-point), one mutation operator
//! (independent bit flip), and elitist replacement. It knows nothing about SAT formulas — it's
//! generic over any `Fn(&BinaryGenome) -> f32` fitness function.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A fixed-length bitstring individual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryGenome {
    bits: Vec<bool>,
}

impl BinaryGenome {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        BinaryGenome { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bit(&self, index: usize) -> bool {
        self.bits[index]
    }

    fn random(len: usize, rng: &mut StdRng) -> Self {
        BinaryGenome { bits: (0..len).map(|_| rng.gen_bool(0.5)).collect() }
    }
}

/// Tunable parameters for a [`GeneticAlgorithm`] run.
#[derive(Debug, Clone)]
pub struct GaParams {
    pub population_size: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub elite_count: usize,
    pub terminate_upon_convergence: bool,
    /// Generations without improvement in the best-ever fitness before `done()` reports true,
    /// when `terminate_upon_convergence` is set.
    pub convergence_window: u32,
}

impl Default for GaParams {
    fn default() -> Self {
        GaParams {
            population_size: 64,
            crossover_rate: 0.8,
            mutation_rate: 0.02,
            elite_count: 2,
            terminate_upon_convergence: false,
            convergence_window: 50,
        }
    }
}

/// Population-wide statistics, mirroring the running averages a conforming GA library is
/// expected to expose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaStatistics {
    pub generation: u32,
    /// Running average, across all generations so far, of each generation's worst fitness.
    pub offline_min: f32,
    /// Running average, across all generations so far, of each generation's best fitness.
    pub offline_max: f32,
    pub best_ever: f32,
}

pub struct GeneticAlgorithm<F: Fn(&BinaryGenome) -> f32> {
    genome_length: usize,
    params: GaParams,
    rng: StdRng,
    population: Vec<BinaryGenome>,
    fitnesses: Vec<f32>,
    fitness_fn: F,
    generation: u32,
    best_ever: f32,
    offline_min_sum: f64,
    offline_max_sum: f64,
    stagnant_generations: u32,
}

impl<F: Fn(&BinaryGenome) -> f32> GeneticAlgorithm<F> {
    pub fn new(genome_length: usize, params: GaParams, fitness_fn: F) -> Self {
        GeneticAlgorithm {
            genome_length,
            params,
            rng: StdRng::from_entropy(),
            population: Vec::new(),
            fitnesses: Vec::new(),
            fitness_fn,
            generation: 0,
            best_ever: 0.0,
            offline_min_sum: 0.0,
            offline_max_sum: 0.0,
            stagnant_generations: 0,
        }
    }

    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Builds a fresh random population and evaluates it. Resets all run statistics.
    pub fn initialize(&mut self) {
        self.population = (0..self.params.population_size)
            .map(|_| BinaryGenome::random(self.genome_length, &mut self.rng))
            .collect();
        self.fitnesses = self.population.iter().map(|g| (self.fitness_fn)(g)).collect();
        self.generation = 0;
        self.best_ever = self.fitnesses.iter().copied().fold(0.0f32, f32::max);
        self.offline_min_sum = 0.0;
        self.offline_max_sum = 0.0;
        self.stagnant_generations = 0;
        self.record_generation_stats();
    }

    fn record_generation_stats(&mut self) {
        let min = self.fitnesses.iter().copied().fold(f32::INFINITY, f32::min);
        let max = self.fitnesses.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        self.offline_min_sum += min as f64;
        self.offline_max_sum += max as f64;
        if max > self.best_ever {
            self.best_ever = max;
            self.stagnant_generations = 0;
        } else {
            self.stagnant_generations += 1;
        }
    }

    fn tournament_select(&mut self) -> usize {
        let a = self.rng.gen_range(0..self.population.len());
        let b = self.rng.gen_range(0..self.population.len());
        if self.fitnesses[a] >= self.fitnesses[b] { a } else { b }
    }

    fn crossover(&mut self, left: &BinaryGenome, right: &BinaryGenome) -> (BinaryGenome, BinaryGenome) {
        if self.genome_length < 2 || !self.rng.gen_bool(self.params.crossover_rate) {
            return (left.clone(), right.clone());
        }
        let point = self.rng.gen_range(1..self.genome_length);
        let mut child_a = left.bits[..point].to_vec();
        child_a.extend_from_slice(&right.bits[point..]);
        let mut child_b = right.bits[..point].to_vec();
        child_b.extend_from_slice(&left.bits[point..]);
        (BinaryGenome::from_bits(child_a), BinaryGenome::from_bits(child_b))
    }

    fn mutate(&mut self, genome: &mut BinaryGenome) {
        for bit in genome.bits.iter_mut() {
            if self.rng.gen_bool(self.params.mutation_rate) {
                *bit = !*bit;
            }
        }
    }

    /// Advances the population by one generation: tournament selection, single-point
    /// crossover, bit-flip mutation, elitist replacement, then re-evaluation.
    pub fn step(&mut self) {
        let mut ranked: Vec<usize> = (0..self.population.len()).collect();
        ranked.sort_by(|&a, &b| self.fitnesses[b].partial_cmp(&self.fitnesses[a]).unwrap());
        let elite_count = self.params.elite_count.min(self.population.len());
        let mut next_gen: Vec<BinaryGenome> =
            ranked[..elite_count].iter().map(|&i| self.population[i].clone()).collect();

        while next_gen.len() < self.population.len() {
            let a = self.tournament_select();
            let b = self.tournament_select();
            let (mut child_a, mut child_b) = self.crossover(&self.population[a].clone(), &self.population[b].clone());
            self.mutate(&mut child_a);
            next_gen.push(child_a);
            if next_gen.len() < self.population.len() {
                self.mutate(&mut child_b);
                next_gen.push(child_b);
            }
        }

        self.population = next_gen;
        self.fitnesses = self.population.iter().map(|g| (self.fitness_fn)(g)).collect();
        self.generation += 1;
        self.record_generation_stats();
    }

    pub fn done(&self) -> bool {
        self.params.terminate_upon_convergence && self.stagnant_generations >= self.params.convergence_window
    }

    pub fn statistics(&self) -> GaStatistics {
        let generations = (self.generation + 1) as f64;
        GaStatistics {
            generation: self.generation,
            offline_min: (self.offline_min_sum / generations) as f32,
            offline_max: (self.offline_max_sum / generations) as f32,
            best_ever: self.best_ever,
        }
    }

    pub fn population(&self) -> &[BinaryGenome] {
        &self.population
    }

    pub fn fitnesses(&self) -> &[f32] {
        &self.fitnesses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_ones(g: &BinaryGenome) -> f32 {
        g.len() as f32 - (0..g.len()).filter(|&i| !g.bit(i)).count() as f32
    }

    #[test]
    fn initialize_populates_and_evaluates() {
        let params = GaParams { population_size: 20, ..GaParams::default() };
        let mut ga = GeneticAlgorithm::new(8, params, |g: &BinaryGenome| count_ones(g));
        ga.seed(42);
        ga.initialize();
        assert_eq!(ga.population().len(), 20);
        assert_eq!(ga.fitnesses().len(), 20);
        assert_eq!(ga.statistics().generation, 0);
    }

    #[test]
    fn best_ever_is_monotonically_non_decreasing() {
        let params = GaParams { population_size: 30, ..GaParams::default() };
        let mut ga = GeneticAlgorithm::new(10, params, |g: &BinaryGenome| count_ones(g));
        ga.seed(7);
        ga.initialize();
        let mut last_best = ga.statistics().best_ever;
        for _ in 0..25 {
            ga.step();
            let best = ga.statistics().best_ever;
            assert!(best >= last_best);
            last_best = best;
        }
    }

    #[test]
    fn convergence_is_detected_when_enabled() {
        let params = GaParams {
            population_size: 10,
            terminate_upon_convergence: true,
            convergence_window: 3,
            mutation_rate: 0.0,
            crossover_rate: 0.0,
            elite_count: 10,
            ..GaParams::default()
        };
        let mut ga = GeneticAlgorithm::new(4, params, |g: &BinaryGenome| count_ones(g));
        ga.seed(1);
        ga.initialize();
        // with full elitism and no variation the population is static: should converge quickly.
        for _ in 0..10 {
            if ga.done() {
                break;
            }
            ga.step();
        }
        assert!(ga.done());
    }

    #[test]
    fn never_converges_when_disabled() {
        let params = GaParams { terminate_upon_convergence: false, ..GaParams::default() };
        let mut ga = GeneticAlgorithm::new(6, params, |g: &BinaryGenome| count_ones(g));
        ga.seed(3);
        ga.initialize();
        for _ in 0..100 {
            ga.step();
        }
        assert!(!ga.done());
    }
}
