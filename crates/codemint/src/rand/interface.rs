/// A source of random integers.
///
/// This abstraction lets callers plug in a real random source or a mocked
/// one in tests.
///
/// # Example
///
/// ```
/// use codemint::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn next_u64(&self) -> u64 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.next_u64(), 1234);
/// assert_eq!(rng.below(1000), 234);
/// ```
pub trait RandSource {
    /// Returns a uniformly random integer over the full `u64` range.
    fn next_u64(&self) -> u64;

    /// Returns a random integer in `[0, bound)`.
    ///
    /// The default implementation reduces [`RandSource::next_u64`] by
    /// modulus, which is fine for mocks; production sources should
    /// override it with an unbiased draw.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    fn below(&self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be non-zero");
        self.next_u64() % bound
    }
}
