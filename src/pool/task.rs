//! The two concrete job kinds the driver submits, tagged into one [`Task`]
//! enum in place of the source's function-pointer + void-pointer pair.

use std::sync::Arc;

use crate::ga::path::{self, Path};
use crate::graph::Graph;
use crate::random::{RandomChunk, RandomProvider};

/// A non-owning view of a shared, read-only slice, valid for the run.
///
/// Safety: constructed only from the population buffer, which is allocated
/// once per run and never resized (only its elements are swapped in place
/// between generations, strictly after every crossover task has been
/// joined). No worker ever observes a population write concurrently with
/// a read through this view.
struct ReadSlice {
    ptr: *const Path,
    len: usize,
}

unsafe impl Send for ReadSlice {}

impl ReadSlice {
    fn new(slice: &[Path]) -> Self {
        Self {
            ptr: slice.as_ptr(),
            len: slice.len(),
        }
    }

    /// Safety: valid as long as the originating buffer is not resized and
    /// no other thread mutates the viewed range concurrently.
    unsafe fn as_slice(&self) -> &[Path] {
        unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
    }
}

/// A non-owning view of a disjoint, writable sub-range of the children
/// buffer, valid for the run.
///
/// Safety: the driver partitions `children` into non-overlapping ranges
/// before constructing tasks, so two `WriteSlice`s handed to two workers in
/// the same phase never alias. The children buffer, like the population
/// buffer, is never resized during a run.
struct WriteSlice {
    ptr: *mut Path,
    len: usize,
}

unsafe impl Send for WriteSlice {}

impl WriteSlice {
    fn new(slice: &mut [Path]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
        }
    }

    /// Safety: valid as long as the range this view was constructed from
    /// is not concurrently aliased by another live reference.
    unsafe fn as_mut_slice(&mut self) -> &mut [Path] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

pub struct CrossoverJob {
    provider: Arc<RandomProvider>,
    parents: ReadSlice,
    output: WriteSlice,
}

impl CrossoverJob {
    pub fn new(provider: Arc<RandomProvider>, parents: &[Path], output: &mut [Path]) -> Self {
        Self {
            provider,
            parents: ReadSlice::new(parents),
            output: WriteSlice::new(output),
        }
    }

    fn run(mut self) {
        let parents = unsafe { self.parents.as_slice() };
        let output = unsafe { self.output.as_mut_slice() };
        let mut draws = RandomChunk::new(&self.provider);
        for slot in output.iter_mut() {
            let l = draws.pop_random_long() % parents.len();
            let r = draws.pop_random_long() % parents.len();
            *slot = path::crossover(&parents[l], &parents[r]);
        }
    }
}

pub struct MutationJob {
    provider: Arc<RandomProvider>,
    graph: Arc<dyn Graph + Send + Sync>,
    children: WriteSlice,
}

impl MutationJob {
    pub fn new(
        provider: Arc<RandomProvider>,
        graph: Arc<dyn Graph + Send + Sync>,
        children: &mut [Path],
    ) -> Self {
        Self {
            provider,
            graph,
            children: WriteSlice::new(children),
        }
    }

    fn run(mut self) {
        let children = unsafe { self.children.as_mut_slice() };
        let mut draws = RandomChunk::new(&self.provider);
        for child in children.iter_mut() {
            child.mutate(&mut draws);
            child.recompute_fitness(self.graph.as_ref());
        }
    }
}

/// A tagged variant over the job kinds the driver submits. Owned by the
/// pool from [`super::Pool::add_task`] until its function body returns.
pub enum Task {
    Crossover(CrossoverJob),
    Mutation(MutationJob),
}

impl Task {
    pub(crate) fn run(self) {
        match self {
            Task::Crossover(job) => job.run(),
            Task::Mutation(job) => job.run(),
        }
    }
}
