// src/shufflers/mod.rs - Seeded, reversible permutations of serial characters
mod fisher_yates;
mod mersenne;

pub use fisher_yates::FisherYatesShuffler;
pub use mersenne::Mt19937;

/// A seed-selected bijection over character positions.
///
/// Implementations hold no generator state between calls so a single instance can be
/// shared across threads and seeds. Not a cipher: anyone holding the seed, or enough
/// serials, can undo it.
#[cfg_attr(test, mockall::automock)]
pub trait Shuffler: Send + Sync {
    /// Permutes `chars` in place according to `seed`
    fn shuffle(&self, chars: &mut [char], seed: u32);

    /// Exact inverse of [`Shuffler::shuffle`] for the same `seed` and length
    fn unshuffle(&self, chars: &mut [char], seed: u32);
}
