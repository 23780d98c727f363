use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use genetic_salesman::cli::{Args, Source};
use genetic_salesman::ga::stats::write_stats;
use genetic_salesman::ga::Driver;
use genetic_salesman::graph::{Graph, Matrix};
use genetic_salesman::logging;

fn main() {
    if let Err(error) = run() {
        eprintln!("{:#}", error);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let args = Args::parse(&argv)?;
    logging::init().context("initializing logger")?;

    let graph = match &args.source {
        Source::File(path) => Matrix::from_file(path)?,
        Source::Generate(n) => Matrix::generate(*n, &mut rand::rng())?,
    };
    let n = graph.n() as usize;
    let graph: Arc<dyn Graph + Send + Sync> = Arc::new(graph);

    log::info!(
        "starting run: workers={} population={} stagnation={} n={}",
        args.workers,
        args.population,
        args.stagnation,
        n
    );

    let mut driver = Driver::new(graph, args.workers, args.population, args.stagnation);
    let result = driver.run();

    println!(
        "{} generations={} time={:.2}s best_fitness={}",
        "done".bold().green(),
        result.generations,
        result.elapsed_seconds,
        result.best_fitness
    );

    write_stats(
        std::path::Path::new("stats.txt"),
        args.workers,
        args.population,
        args.stagnation,
        n,
        &result,
    )
    .context("writing stats.txt")?;

    Ok(())
}
