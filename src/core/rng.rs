//! Seedable random source for deck shuffles and AI choices.
//!
//! A duel is fully re-playable: the same seed and the same sequence of
//! player inputs always produce the same match. The deck and the AI draw
//! from separate ChaCha streams of one seed, so changing the difficulty
//! never changes the deal.
//!
//! ```
//! use ladder_duel::core::{GameRng, RngStream};
//!
//! let mut a: Vec<u8> = (0..40).collect();
//! let mut b = a.clone();
//! GameRng::for_stream(7, RngStream::Deck).shuffle(&mut a);
//! GameRng::for_stream(7, RngStream::Deck).shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Independent random streams of one match seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RngStream {
    /// Shuffles and reshuffles.
    Deck,
    /// Planner tie-breaks and random plays.
    Ai,
}

impl RngStream {
    fn id(self) -> u64 {
        match self {
            RngStream::Deck => 1,
            RngStream::Ai => 2,
        }
    }
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Default stream of `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Named stream of `seed`. Streams of the same seed never overlap.
    #[must_use]
    pub fn for_stream(seed: u64, stream: RngStream) -> Self {
        let mut rng = Self::new(seed);
        rng.inner.set_stream(stream.id());
        rng
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform-random permutation of a slice.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Uniformly choose one element, `None` when empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
