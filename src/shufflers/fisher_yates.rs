use log::trace;

use super::{Mt19937, Shuffler};

/// Fisher-Yates over positions, driven by a freshly seeded [`Mt19937`] on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct FisherYatesShuffler;

impl FisherYatesShuffler {
    pub fn new() -> Self {
        Self
    }

    /// The `(i, j)` swaps of a forward shuffle over `len` positions, in draw order.
    fn swaps(len: usize, seed: u32) -> Vec<(usize, usize)> {
        let mut rng = Mt19937::new(seed);
        (1..len).rev().map(|i| (i, rng.next_in(i))).collect()
    }
}

impl Shuffler for FisherYatesShuffler {
    fn shuffle(&self, chars: &mut [char], seed: u32) {
        let mut rng = Mt19937::new(seed);
        for i in (1..chars.len()).rev() {
            let j = rng.next_in(i);
            chars.swap(i, j);
        }
        trace!("Shuffled {} positions with seed {}", chars.len(), seed);
    }

    fn unshuffle(&self, chars: &mut [char], seed: u32) {
        // Swaps do not commute: replay the draws, then undo them last to first
        for (i, j) in Self::swaps(chars.len(), seed).into_iter().rev() {
            chars.swap(i, j);
        }
        trace!("Unshuffled {} positions with seed {}", chars.len(), seed);
    }
}
