//! Manual parsing of the six-token positional command line. A declarative
//! flag parser doesn't fit here: `--file`/`--generate` are literal
//! positional tokens under an exact argument count, not flags with their
//! own grammar, so this reads directly off the collected `Vec<String>` --
//! the same manual `match args.get(n)` idiom the teacher crate uses for its
//! own argument handling.

use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};

/// Where to obtain the graph from: a file path, or a vertex count to sample
/// a random graph for.
#[derive(Debug, Clone)]
pub enum Source {
    File(PathBuf),
    Generate(usize),
}

/// The five positional arguments, validated and parsed.
#[derive(Debug, Clone)]
pub struct Args {
    pub workers: usize,
    pub population: usize,
    pub stagnation: usize,
    pub source: Source,
}

impl Args {
    /// Parse `std::env::args().collect::<Vec<_>>()`: program name plus
    /// exactly five positional tokens.
    pub fn parse(args: &[String]) -> Result<Self> {
        ensure!(
            args.len() == 6,
            "expected 5 arguments: <threads> <population> <stagnation> --file|--generate <source>, got {}",
            args.len().saturating_sub(1)
        );

        let workers: usize = args[1]
            .parse()
            .with_context(|| format!("thread count {:?} is not a non-negative integer", args[1]))?;
        let population: usize = args[2]
            .parse()
            .with_context(|| format!("population size {:?} is not a non-negative integer", args[2]))?;
        let stagnation: usize = args[3]
            .parse()
            .with_context(|| format!("stagnation threshold {:?} is not a non-negative integer", args[3]))?;

        ensure!(workers > 0, "thread count must be at least 1");
        ensure!(population > 0, "population size must be at least 1");

        let source = match args[4].as_str() {
            "--file" => Source::File(PathBuf::from(&args[5])),
            "--generate" => {
                let n: usize = args[5]
                    .parse()
                    .with_context(|| format!("vertex count {:?} is not an integer", args[5]))?;
                ensure!(n >= 2, "generated graph needs at least 2 vertices, got {n}");
                Source::Generate(n)
            }
            other => bail!("unknown source selector {other:?}, expected --file or --generate"),
        };

        Ok(Self {
            workers,
            population,
            stagnation,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_a_well_formed_generate_invocation() {
        let args = Args::parse(&argv(&["prog", "4", "32", "20", "--generate", "10"])).unwrap();
        assert_eq!(args.workers, 4);
        assert_eq!(args.population, 32);
        assert_eq!(args.stagnation, 20);
        assert!(matches!(args.source, Source::Generate(10)));
    }

    #[test]
    fn parses_a_well_formed_file_invocation() {
        let args = Args::parse(&argv(&["prog", "1", "4", "1", "--file", "graph.txt"])).unwrap();
        match args.source {
            Source::File(path) => assert_eq!(path, PathBuf::from("graph.txt")),
            _ => panic!("expected Source::File"),
        }
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(Args::parse(&argv(&["prog", "1", "2"])).is_err());
    }

    #[test]
    fn rejects_unknown_source_selector() {
        assert!(Args::parse(&argv(&["prog", "1", "2", "3", "--random", "10"])).is_err());
    }

    #[test]
    fn rejects_unparsable_integers() {
        assert!(Args::parse(&argv(&["prog", "x", "2", "3", "--generate", "10"])).is_err());
    }

    #[test]
    fn rejects_zero_population() {
        assert!(Args::parse(&argv(&["prog", "1", "0", "3", "--generate", "10"])).is_err());
    }
}
