//! The result record the driver hands back to its caller, and the
//! `stats.txt` sidecar format the CLI writes from it.

use std::io::Write as _;
use std::path::Path as FsPath;

use anyhow::{Context, Result};

/// Generation count, elapsed wall-clock time, best fitness found, and the
/// best path discovered. Owned by the caller.
pub struct SolverResult {
    pub generations: u64,
    pub elapsed_seconds: f64,
    pub best_fitness: i32,
    pub best_path: Vec<u32>,
}

/// Write the `stats.txt` sidecar:
/// ```text
/// <t> <N> <S> <n> <iterations> <time_seconds> <best_fitness>
/// <v0> <v1> ... <v_{n-1}>
/// ```
pub fn write_stats(
    path: &FsPath,
    t: usize,
    population_size: usize,
    stagnation_threshold: usize,
    n: usize,
    result: &SolverResult,
) -> Result<()> {
    let mut file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(
        file,
        "{t} {population_size} {stagnation_threshold} {n} {} {:.6} {}",
        result.generations, result.elapsed_seconds, result.best_fitness
    )
    .context("writing stats header")?;
    let line = result
        .best_path
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(file, "{line}").context("writing best path")?;
    Ok(())
}
