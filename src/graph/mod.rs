//! The weighted undirected graph the GA searches over.
//!
//! Concretely a flattened adjacency matrix: immutable once built, either
//! loaded from a whitespace-delimited text file or sampled uniformly.

use std::fs;
use std::path::Path as FsPath;

use anyhow::{bail, ensure, Context, Result};
use rand::Rng;

/// Read-only weight lookup consumed by the GA core.
///
/// `n` is fixed for the lifetime of the value; `weight` is symmetric with a
/// zero diagonal. Implementations must be `Sync` since worker threads read
/// through a shared reference concurrently.
pub trait Graph: Sync {
    fn n(&self) -> u32;
    fn weight(&self, i: u32, j: u32) -> i32;
}

/// A dense `n x n` adjacency matrix, stored flattened and row-major.
pub struct Matrix {
    n: usize,
    weights: Vec<i32>,
}

impl Matrix {
    fn index(&self, i: usize, j: usize) -> usize {
        i * self.n + j
    }

    /// Parse `n` followed by `n*n` row-major integers from whitespace-
    /// separated tokens, validating shape, symmetry, and a zero diagonal.
    pub fn from_file(path: &FsPath) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading graph file {}", path.display()))?;
        Self::parse(&text)
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_ascii_whitespace();
        let n: usize = tokens
            .next()
            .context("graph file is empty, expected vertex count")?
            .parse()
            .context("vertex count is not an integer")?;
        ensure!(n >= 2, "graph must have at least 2 vertices, got {n}");

        let mut weights = Vec::with_capacity(n * n);
        for _ in 0..(n * n) {
            let value: i32 = tokens
                .next()
                .context("graph file truncated: expected n*n weights")?
                .parse()
                .context("weight is not an integer")?;
            weights.push(value);
        }
        ensure!(
            tokens.next().is_none(),
            "graph file has trailing tokens beyond n*n weights"
        );

        let matrix = Self { n, weights };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Sample each off-diagonal edge uniformly from `[0, 16)` and mirror it.
    pub fn generate(n: usize, rng: &mut impl Rng) -> Result<Self> {
        ensure!(n >= 2, "graph must have at least 2 vertices, got {n}");
        let mut weights = vec![0i32; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let w = rng.random_range(0..16);
                weights[i * n + j] = w;
                weights[j * n + i] = w;
            }
        }
        Ok(Self { n, weights })
    }

    fn validate(&self) -> Result<()> {
        for i in 0..self.n {
            if self.weights[self.index(i, i)] != 0 {
                bail!("graph has a nonzero diagonal entry at vertex {i}");
            }
            for j in (i + 1)..self.n {
                let a = self.weights[self.index(i, j)];
                let b = self.weights[self.index(j, i)];
                if a != b {
                    bail!("graph is not symmetric: weight({i},{j})={a} but weight({j},{i})={b}");
                }
            }
        }
        Ok(())
    }
}

impl Graph for Matrix {
    fn n(&self) -> u32 {
        self.n as u32
    }

    fn weight(&self, i: u32, j: u32) -> i32 {
        self.weights[self.index(i as usize, j as usize)]
    }
}
