/// The outcome of one non-blocking id generation step.
///
/// - [`IdGenStatus::Ready`]: a new id was issued.
/// - [`IdGenStatus::Pending`]: the sequence space for the current
///   millisecond is exhausted; retry once the clock has advanced by
///   `yield_for` milliseconds.
///
/// This shape keeps the generator itself free of waiting policy: blocking
/// helpers spin on it, async callers could sleep on it, and tests drive it
/// step by step.
///
/// # Example
///
/// ```
/// use codemint::{IdGenStatus, SnowflakeGenerator, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         42
///     }
/// }
///
/// let generator = SnowflakeGenerator::with_layout(1, 4, 1, 4, FixedTime).unwrap();
/// match generator.poll_id().unwrap() {
///     IdGenStatus::Ready { id } => println!("id: {id}"),
///     IdGenStatus::Pending { yield_for } => println!("retry in {yield_for} ms"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique id was generated and is ready to use.
    Ready {
        /// The packed 63-bit identifier.
        id: u64,
    },
    /// No id could be issued because the sequence is exhausted for the
    /// current tick.
    Pending {
        /// Milliseconds the clock must advance before retrying.
        yield_for: u64,
    },
}
