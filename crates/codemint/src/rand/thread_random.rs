use rand::Rng;

use crate::rand::RandSource;

/// A [`RandSource`] backed by the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads
/// are contention-free. This type does **not** store the RNG itself; it
/// looks up the thread-local generator on each call, which keeps the
/// wrapper zero-sized, `Send`, and `Sync`.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn next_u64(&self) -> u64 {
        rand::rng().random()
    }

    fn below(&self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be non-zero");
        rand::rng().random_range(0..bound)
    }
}
