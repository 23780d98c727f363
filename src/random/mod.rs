//! The random-number pipeline: a background [`provider::RandomProvider`]
//! filling a bounded queue of chunks, and a per-consumer
//! [`chunk::RandomChunk`] cursor that draws from them.

pub mod chunk;
pub mod provider;

pub use chunk::RandomChunk;
pub use provider::RandomProvider;
