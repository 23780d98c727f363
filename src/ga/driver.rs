//! The generation loop: crossover phase, mutation phase, selection phase,
//! repeated until `stagnation_count` reaches the configured threshold.
//!
//! Crossover and mutation tasks are fanned into the [`Pool`]; selection runs
//! serially on the driver thread between phases, relying on `Pool::join` as
//! the happens-before barrier.

use std::mem;
use std::sync::Arc;
use std::time::Instant;

use crate::ga::path::Path;
use crate::ga::stats::SolverResult;
use crate::graph::Graph;
use crate::pool::task::{CrossoverJob, MutationJob};
use crate::pool::{Pool, Task};
use crate::random::RandomProvider;

const REPRODUCTION_FACTOR: usize = 4;
const PATHS_PER_CROSSOVER_TASK: usize = 64;
const PATHS_PER_MUTATION_TASK: usize = 16;

/// Best/worst/average fitness of the children pool produced by one
/// generation, used for the per-generation telemetry line.
struct GenerationStats {
    best: i32,
    worst: i32,
    average: f64,
}

/// Orchestrates the parallel evolutionary search over Hamiltonian paths of
/// `graph`. Owns the population/children buffers, the thread pool, and the
/// random provider for the lifetime of one run.
pub struct Driver {
    graph: Arc<dyn Graph + Send + Sync>,
    pool: Pool,
    provider: Arc<RandomProvider>,
    population: Vec<Path>,
    children: Vec<Path>,
    population_size: usize,
    stagnation_threshold: usize,
}

impl Driver {
    /// Allocate `population_size` parents (identity permutation) and
    /// `4 * population_size` children, and spin up the pool and provider.
    pub fn new(
        graph: Arc<dyn Graph + Send + Sync>,
        worker_count: usize,
        population_size: usize,
        stagnation_threshold: usize,
    ) -> Self {
        assert!(population_size > 0, "population size must be positive");
        let n = graph.n() as usize;
        let children_size = REPRODUCTION_FACTOR * population_size;
        let population = (0..population_size).map(|_| Path::identity(n)).collect();
        let children = (0..children_size).map(|_| Path::identity(n)).collect();
        log::info!(
            "driver initialized: n={n} population={population_size} children={children_size} workers={worker_count}"
        );
        Self {
            graph,
            pool: Pool::new(worker_count),
            provider: Arc::new(RandomProvider::new()),
            population,
            children,
            population_size,
            stagnation_threshold,
        }
    }

    /// Run generations until `stagnation_count >= stagnation_threshold`,
    /// then return the best path found, its fitness, the generation count,
    /// and elapsed wall-clock time.
    pub fn run(&mut self) -> SolverResult {
        let start = Instant::now();
        let n = self.graph.n() as usize;
        let mut best_path = (0..n as u32).collect::<Vec<u32>>();
        let mut best_fitness = i32::MAX;
        let mut stagnation_count = 0usize;
        let mut generations = 0u64;

        let progress = crate::progress();
        loop {
            let stats = self.step();

            if stats.best < best_fitness {
                best_path.copy_from_slice(&self.population[0].permutation);
                best_fitness = stats.best;
                stagnation_count = 0;
            } else {
                stagnation_count += 1;
            }

            generations += 1;
            log::info!(
                "generation {generations:<5} best={:<8} worst={:<8} average={:.2}",
                stats.best,
                stats.worst,
                stats.average
            );
            progress.set_message(format!("gen {generations}, best {best_fitness}"));
            progress.tick();

            if stagnation_count >= self.stagnation_threshold {
                break;
            }
        }
        progress.finish_with_message(format!(
            "converged after {generations} generations, best {best_fitness}"
        ));

        SolverResult {
            generations,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            best_fitness,
            best_path,
        }
    }

    /// Run one full generation -- crossover, mutation, sort, and the swap of
    /// the best `population_size` children into `population` -- and report
    /// fitness stats over the children pool. Exposed at crate visibility so
    /// the benchmark suite can time a single generation in isolation.
    pub(crate) fn step(&mut self) -> GenerationStats {
        self.crossover_phase();
        self.mutation_phase();
        self.children.sort_by_key(|path| path.fitness);

        let best = self.children[0].fitness;
        let worst = self.children.last().map(|p| p.fitness).unwrap_or(0);
        let average = self.children.iter().map(|p| p.fitness as f64).sum::<f64>()
            / self.children.len() as f64;

        for k in 0..self.population_size {
            mem::swap(&mut self.population[k], &mut self.children[k]);
        }

        GenerationStats {
            best,
            worst,
            average,
        }
    }

    /// Partition `children` into chunks of `PATHS_PER_CROSSOVER_TASK`,
    /// submitting one task per chunk that reads `population` and writes the
    /// child sub-range, then drain the pool.
    fn crossover_phase(&mut self) {
        for chunk in self.children.chunks_mut(PATHS_PER_CROSSOVER_TASK) {
            self.pool.add_task(Task::Crossover(CrossoverJob::new(
                Arc::clone(&self.provider),
                &self.population,
                chunk,
            )));
        }
        self.drain_pool();
    }

    /// Partition `children` into chunks of `PATHS_PER_MUTATION_TASK`,
    /// submitting one task per chunk that mutates and recomputes fitness in
    /// place, then drain the pool.
    fn mutation_phase(&mut self) {
        for chunk in self.children.chunks_mut(PATHS_PER_MUTATION_TASK) {
            self.pool.add_task(Task::Mutation(MutationJob::new(
                Arc::clone(&self.provider),
                Arc::clone(&self.graph),
                chunk,
            )));
        }
        self.drain_pool();
    }

    fn drain_pool(&self) {
        self.pool.shutdown();
        self.pool.start();
        self.pool.join();
        self.pool.reset();
    }
}
