//! A `Path` is a permutation of `{0, ..., n-1}` plus a cached fitness: the
//! total weight of the Hamiltonian cycle it induces. Crossover and mutation
//! operate on paths; both must return a permutation on exit.

use crate::graph::Graph;
use crate::random::RandomChunk;

#[derive(Clone, Debug)]
pub struct Path {
    pub permutation: Vec<u32>,
    pub fitness: i32,
}

impl Path {
    /// The identity permutation `[0, 1, ..., n-1]`, fitness uncomputed.
    pub fn identity(n: usize) -> Self {
        Self {
            permutation: (0..n as u32).collect(),
            fitness: 0,
        }
    }

    /// Total edge weight of the cycle induced by this path: the sum of
    /// consecutive edges plus the closing edge back from the last vertex to
    /// the first. Indexes by vertex, not by position in the array -- see
    /// the crate-level note on the source's ambiguous `Fitness` definition.
    pub fn fitness(&self, graph: &dyn Graph) -> i32 {
        let n = self.permutation.len();
        assert!(n >= 2, "path must have at least 2 vertices to have a fitness");
        let mut total = 0;
        for k in 0..(n - 1) {
            total += graph.weight(self.permutation[k], self.permutation[k + 1]);
        }
        total += graph.weight(self.permutation[0], self.permutation[n - 1]);
        total
    }

    /// Recompute and cache fitness against `graph`. Called once per child,
    /// after mutation and before selection.
    pub fn recompute_fitness(&mut self, graph: &dyn Graph) {
        self.fitness = self.fitness(graph);
    }

    /// Swap `path[i]` and `path[j]` for `swaps_per_mutation` iterations,
    /// drawing indices as machine-word uniforms reduced modulo `n`. `i == j`
    /// is permitted and is a no-op.
    pub fn mutate(&mut self, draws: &mut RandomChunk) {
        const SWAPS_PER_MUTATION: usize = 1;
        let n = self.permutation.len();
        for _ in 0..SWAPS_PER_MUTATION {
            let i = draws.pop_random_long() % n;
            let j = draws.pop_random_long() % n;
            self.permutation.swap(i, j);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_permutation(&self) -> bool {
        let n = self.permutation.len();
        let mut seen = vec![false; n];
        for &v in &self.permutation {
            let v = v as usize;
            if v >= n || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }
}

/// Order-preserving recombination: copy the left half of `left` verbatim,
/// then fill the remaining slots with whichever vertices `right` visits, in
/// the order it visits them, skipping vertices already placed.
///
/// Postcondition: the result is a permutation of `{0, ..., n-1}`, given that
/// `left` and `right` both are.
pub fn crossover(left: &Path, right: &Path) -> Path {
    let n = left.permutation.len();
    assert_eq!(n, right.permutation.len(), "crossover parents must be the same length");

    let half = n / 2;
    let mut used = vec![false; n];
    let mut result = Vec::with_capacity(n);

    for &vertex in &left.permutation[..half] {
        used[vertex as usize] = true;
        result.push(vertex);
    }
    for &vertex in &right.permutation {
        if !used[vertex as usize] {
            used[vertex as usize] = true;
            result.push(vertex);
        }
    }

    assert_eq!(result.len(), n, "crossover produced a non-permutation result");
    Path {
        permutation: result,
        fitness: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Matrix;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn shuffle(v: &mut [u32], rng: &mut SmallRng) {
        v.shuffle(rng);
    }

    fn permutation_of(vs: &[u32]) -> Path {
        Path {
            permutation: vs.to_vec(),
            fitness: 0,
        }
    }

    #[test]
    fn crossover_preserves_permutation_over_many_random_pairs() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..500 {
            let n = rng.random_range(2..12usize);
            let mut left: Vec<u32> = (0..n as u32).collect();
            let mut right = left.clone();
            shuffle(&mut left, &mut rng);
            shuffle(&mut right, &mut rng);
            let child = crossover(&permutation_of(&left), &permutation_of(&right));
            assert!(child.is_permutation(), "n={n} left={left:?} right={right:?}");
        }
    }

    #[test]
    fn crossover_with_self_yields_self() {
        let path = permutation_of(&[2, 0, 3, 1]);
        let child = crossover(&path, &path);
        assert_eq!(child.permutation, path.permutation);
    }

    #[test]
    fn crossover_n2_takes_left_head_then_fills_from_right() {
        let left = permutation_of(&[0, 1]);
        let right = permutation_of(&[1, 0]);
        let child = crossover(&left, &right);
        assert_eq!(child.permutation, vec![0, 1]);
    }

    #[test]
    fn mutation_closure_over_many_random_swap_sequences() {
        let mut rng = SmallRng::seed_from_u64(7);
        let provider = crate::random::RandomProvider::new();
        let mut draws = RandomChunk::new(&provider);
        for _ in 0..500 {
            let n = rng.random_range(2..12usize);
            let mut path = Path::identity(n);
            for _ in 0..10 {
                path.mutate(&mut draws);
            }
            assert!(path.is_permutation(), "n={n} permutation={:?}", path.permutation);
        }
    }

    #[test]
    fn double_swap_with_same_indices_is_idempotent() {
        let mut path = permutation_of(&[0, 1, 2, 3, 4]);
        let original = path.permutation.clone();
        path.permutation.swap(1, 3);
        path.permutation.swap(1, 3);
        assert_eq!(path.permutation, original);
    }

    #[test]
    fn fitness_matches_recomputation_including_closing_edge() {
        let graph = Matrix::parse("4\n0 1 2 3\n1 0 4 5\n2 4 0 6\n3 5 6 0").unwrap();
        let path = permutation_of(&[0, 1, 2, 3]);
        // 0-1 + 1-2 + 2-3 + closing(0,3) = 1 + 4 + 6 + 3
        assert_eq!(path.fitness(&graph), 1 + 4 + 6 + 3);
    }
}
