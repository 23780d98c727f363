//! Single-consumer cursor over one [`Chunk`], auto-refilling from a
//! [`RandomProvider`]. Ported from `random_chunk.c`.

use std::mem::size_of;

use super::provider::{Chunk, RandomProvider};

/// Amortizes provider synchronization across `CHUNK_SIZE` draws by holding
/// one chunk at a time and refilling on exhaustion.
///
/// Holds a non-owning reference to the provider for refills; the borrow is
/// bounded by the chunk's lifetime and, transitively, by the run.
pub struct RandomChunk<'p> {
    chunk: Chunk,
    cursor: usize,
    provider: &'p RandomProvider,
}

impl<'p> RandomChunk<'p> {
    pub fn new(provider: &'p RandomProvider) -> Self {
        let chunk = provider.pop_random();
        Self {
            chunk,
            cursor: 0,
            provider,
        }
    }

    /// Return the next uniform `u32`, refilling from the provider when the
    /// current chunk is exhausted.
    pub fn pop_random(&mut self) -> u32 {
        if self.cursor == self.chunk.len() {
            self.chunk = self.provider.pop_random();
            self.cursor = 0;
        }
        let value = self.chunk[self.cursor];
        self.cursor += 1;
        value
    }

    /// Assemble a machine-word uniform by concatenating successive `u32`
    /// draws (2 draws on a 64-bit target), mirroring the source's overlay
    /// of raw `unsigned` reads onto a `size_t`.
    pub fn pop_random_long(&mut self) -> usize {
        let mut bytes = [0u8; size_of::<usize>()];
        for word in bytes.chunks_mut(size_of::<u32>()) {
            word.copy_from_slice(&self.pop_random().to_ne_bytes());
        }
        usize::from_ne_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refills_past_chunk_boundary() {
        let provider = RandomProvider::new();
        let mut chunk = RandomChunk::new(&provider);
        // default CHUNK_SIZE is 1024; cross it several times over.
        for _ in 0..(1024 * 3 + 7) {
            let _ = chunk.pop_random();
        }
    }

    #[test]
    fn pop_random_long_consumes_two_words_on_64_bit() {
        let provider = RandomProvider::new();
        let mut chunk = RandomChunk::new(&provider);
        let before = chunk.cursor;
        let _ = chunk.pop_random_long();
        let consumed = chunk.cursor - before;
        assert_eq!(consumed, size_of::<usize>() / size_of::<u32>());
    }
}
