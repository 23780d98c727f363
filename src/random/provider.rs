//! Background producer of uniform `u32` chunks, ported from
//! `random_provider.c`'s pthread producer/consumer queue onto
//! `std::thread` + `Mutex` + `Condvar`.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

const CHUNK_SIZE: usize = 1024;
const QUEUE_TARGET: usize = 64;

/// A fixed-size block of uniform `u32` draws, owned by exactly one consumer.
pub type Chunk = Vec<u32>;

struct State {
    queue: VecDeque<Chunk>,
    shutdown: bool,
}

struct Shared {
    state: Mutex<State>,
    cond_consumer: Condvar,
    cond_producer: Condvar,
}

/// Feeds consumers with [`Chunk`]s of uniform `u32`s via a single background
/// producer thread and a depth-bounded queue.
///
/// `shutdown` lives inside the same mutex that guards the queue so the
/// producer's wait predicate is checked atomically with the sleep (the
/// original C used a separate atomic flag, which is racy against a
/// `cond_signal` that arrives between the flag check and the `cond_wait`).
pub struct RandomProvider {
    shared: Arc<Shared>,
    producer: Option<JoinHandle<()>>,
}

impl RandomProvider {
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                queue: VecDeque::with_capacity(QUEUE_TARGET),
                shutdown: false,
            }),
            cond_consumer: Condvar::new(),
            cond_producer: Condvar::new(),
        });
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let producer = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("random-provider".into())
                .spawn(move || Self::produce(shared, seed))
                .expect("spawn random provider thread")
        };
        log::debug!("random provider started, target queue depth {QUEUE_TARGET}");
        Self {
            shared,
            producer: Some(producer),
        }
    }

    fn produce(shared: Arc<Shared>, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut guard = shared.state.lock().unwrap();
        loop {
            if guard.shutdown {
                break;
            }
            while guard.queue.len() < QUEUE_TARGET {
                if guard.shutdown {
                    break;
                }
                let chunk = Self::synthesize(&mut rng);
                guard.queue.push_back(chunk);
                shared.cond_consumer.notify_one();
                drop(guard);
                guard = shared.state.lock().unwrap();
            }
            if guard.shutdown {
                break;
            }
            guard = shared.cond_producer.wait(guard).unwrap();
        }
        log::debug!("random provider thread exiting");
    }

    fn synthesize(rng: &mut SmallRng) -> Chunk {
        (0..CHUNK_SIZE).map(|_| rng.next_u32()).collect()
    }

    /// Block until the queue is non-empty, then hand the caller the front
    /// chunk, waking another consumer or the producer as appropriate.
    pub fn pop_random(&self) -> Chunk {
        let mut guard = self.shared.state.lock().unwrap();
        guard = self
            .shared
            .cond_consumer
            .wait_while(guard, |s| s.queue.is_empty())
            .unwrap();
        let chunk = guard.queue.pop_front().expect("queue non-empty after wait");
        let depth = guard.queue.len();
        drop(guard);
        if depth > 0 {
            self.shared.cond_consumer.notify_one();
        }
        if depth < QUEUE_TARGET / 2 {
            self.shared.cond_producer.notify_one();
        }
        chunk
    }

    /// Mark the provider for shutdown and wake the producer. Idempotent.
    pub fn shutdown(&self) {
        let mut guard = self.shared.state.lock().unwrap();
        guard.shutdown = true;
        drop(guard);
        self.shared.cond_producer.notify_one();
    }
}

impl Default for RandomProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RandomProvider {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(producer) = self.producer.take() {
            producer.join().expect("join random provider thread");
        }
        // remaining queued chunks are freed here, with the `VecDeque`
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pops_full_chunks() {
        let provider = RandomProvider::new();
        let chunk = provider.pop_random();
        assert_eq!(chunk.len(), CHUNK_SIZE);
    }

    #[test]
    fn queue_depth_never_exceeds_target() {
        let provider = RandomProvider::new();
        std::thread::sleep(std::time::Duration::from_millis(50));
        let guard = provider.shared.state.lock().unwrap();
        assert!(guard.queue.len() <= QUEUE_TARGET);
    }

    #[test]
    fn shutdown_is_clean_and_idempotent() {
        let provider = RandomProvider::new();
        for _ in 0..3 {
            let _ = provider.pop_random();
        }
        provider.shutdown();
        provider.shutdown();
        drop(provider);
    }

    #[test]
    fn consecutive_chunks_are_not_trivially_identical() {
        let provider = RandomProvider::new();
        let a = provider.pop_random();
        let b = provider.pop_random();
        let distinct: HashSet<u32> = a.iter().chain(b.iter()).copied().collect();
        assert!(distinct.len() > 1);
    }
}
