//! A fixed-size worker pool with an explicit phased lifecycle
//! (`Init -> AddTask* -> Start -> Shutdown -> Join -> Reset -> ... -> Destroy`),
//! the Rust-side "drain-and-exit worker" option from the source's thread
//! pool contract. The idiom for translating a C-style explicit-lifecycle
//! pool onto `std::thread` + `Mutex` + `Condvar` follows the same shape
//! used by hand-rolled pools elsewhere in the ecosystem.

pub mod task;

pub use task::Task;

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

struct State {
    queue: VecDeque<Task>,
    started: bool,
    shutdown: bool,
    destroyed: bool,
    parked: usize,
}

/// Fixed-size worker pool consuming a submission queue of [`Task`]s.
pub struct Pool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

struct PoolShared {
    state: Mutex<State>,
    cond_task: Condvar,
    cond_join: Condvar,
    worker_count: usize,
}

impl Pool {
    /// Init(W): spin up `worker_count` workers parked until the first
    /// `Start`. State: READY.
    pub fn new(worker_count: usize) -> Self {
        assert!(worker_count > 0, "thread pool needs at least one worker");
        let shared = Arc::new(PoolShared {
            state: Mutex::new(State {
                queue: VecDeque::new(),
                started: false,
                shutdown: false,
                destroyed: false,
                parked: 0,
            }),
            cond_task: Condvar::new(),
            cond_join: Condvar::new(),
            worker_count,
        });
        let workers = (0..worker_count)
            .map(|id| {
                let shared = Arc::clone(&shared);
                thread::Builder::new()
                    .name(format!("ga-worker-{id}"))
                    .spawn(move || pool_worker_loop(shared))
                    .expect("spawn pool worker thread")
            })
            .collect();
        log::debug!("thread pool initialized with {worker_count} workers");
        Self { shared, workers }
    }

    /// AddTask(t): append to the queue. Allowed in READY and RUNNING.
    pub fn add_task(&self, task: Task) {
        let mut guard = self.shared.state.lock().unwrap();
        guard.queue.push_back(task);
        drop(guard);
        self.shared.cond_task.notify_one();
    }

    /// Start: release workers to consume the queue. State: RUNNING.
    pub fn start(&self) {
        let mut guard = self.shared.state.lock().unwrap();
        guard.started = true;
        drop(guard);
        self.shared.cond_task.notify_all();
    }

    /// Shutdown: mark that workers should exit their consumption loop once
    /// the queue drains. No new tasks are consumed beyond those queued.
    pub fn shutdown(&self) {
        let mut guard = self.shared.state.lock().unwrap();
        guard.shutdown = true;
        drop(guard);
        self.shared.cond_task.notify_all();
    }

    /// Join: block until every worker has observed an empty, shut-down
    /// queue and parked. State: JOINED.
    pub fn join(&self) {
        let guard = self.shared.state.lock().unwrap();
        let _guard = self
            .shared
            .cond_join
            .wait_while(guard, |s| s.parked < self.shared.worker_count)
            .unwrap();
    }

    /// Reset: re-arm for a new phase with the same worker count. State:
    /// READY.
    pub fn reset(&self) {
        let mut guard = self.shared.state.lock().unwrap();
        debug_assert!(guard.queue.is_empty(), "reset with undrained queue");
        guard.started = false;
        guard.shutdown = false;
        guard.parked = 0;
        drop(guard);
        self.shared.cond_task.notify_all();
    }
}

fn pool_worker_loop(shared: Arc<PoolShared>) {
    loop {
        let mut guard = shared.state.lock().unwrap();
        guard = shared
            .cond_task
            .wait_while(guard, |s| !s.started && !s.destroyed)
            .unwrap();
        if guard.destroyed {
            return;
        }

        loop {
            if let Some(task) = guard.queue.pop_front() {
                drop(guard);
                task.run();
                guard = shared.state.lock().unwrap();
                continue;
            }
            if guard.shutdown {
                break;
            }
            guard = shared.cond_task.wait(guard).unwrap();
        }

        guard.parked += 1;
        if guard.parked == shared.worker_count {
            shared.cond_join.notify_all();
        }
        guard = shared
            .cond_task
            .wait_while(guard, |s| s.started && !s.destroyed)
            .unwrap();
        if guard.destroyed {
            return;
        }
    }
}

impl Drop for Pool {
    /// Destroy: release all resources; permanently terminal.
    fn drop(&mut self) {
        let mut guard = self.shared.state.lock().unwrap();
        guard.destroyed = true;
        drop(guard);
        self.shared.cond_task.notify_all();
        for worker in self.workers.drain(..) {
            worker.join().expect("join pool worker thread");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::path::Path;
    use crate::graph::Matrix;
    use crate::random::RandomProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn runs_every_task_exactly_once() {
        let pool = Pool::new(4);
        let provider = Arc::new(RandomProvider::new());
        let population: Vec<Path> = (0..4).map(|_| Path::identity(4)).collect();
        let mut children: Vec<Path> = (0..16).map(|_| Path::identity(4)).collect();

        for chunk in children.chunks_mut(4) {
            pool.add_task(Task::Crossover(task::CrossoverJob::new(
                Arc::clone(&provider),
                &population,
                chunk,
            )));
        }
        pool.shutdown();
        pool.start();
        pool.join();
        pool.reset();

        for path in &children {
            assert_eq!(path.permutation.len(), 4);
        }
    }

    #[test]
    fn reset_allows_reuse_across_many_phases() {
        let pool = Pool::new(2);
        let executed = Arc::new(AtomicUsize::new(0));
        let graph = Arc::new(Matrix::generate(4, &mut rand::rng()).unwrap())
            as Arc<dyn crate::graph::Graph + Send + Sync>;
        let provider = Arc::new(RandomProvider::new());

        for _phase in 0..5 {
            let mut children: Vec<Path> = (0..8).map(|_| Path::identity(4)).collect();
            for chunk in children.chunks_mut(2) {
                pool.add_task(Task::Mutation(task::MutationJob::new(
                    Arc::clone(&provider),
                    Arc::clone(&graph),
                    chunk,
                )));
            }
            pool.shutdown();
            pool.start();
            pool.join();
            pool.reset();
            executed.fetch_add(children.len(), Ordering::SeqCst);
        }

        assert_eq!(executed.load(Ordering::SeqCst), 40);
    }
}
