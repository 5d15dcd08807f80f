use core::time::Duration;

/// Default epoch: Monday, April 13, 2020 08:12:35.888 UTC.
///
/// Anchoring timestamps to a recent origin instead of the Unix epoch keeps
/// the 41-bit time field usable for roughly 69 years of ids.
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_586_765_555_888);

/// Unix epoch: Thursday, January 1, 1970 00:00:00 UTC.
pub const UNIX_EPOCH_ORIGIN: Duration = Duration::from_millis(0);

/// A source of millisecond timestamps relative to a configured epoch.
///
/// This abstraction lets callers plug in the real wall clock or a mocked
/// time source in tests.
///
/// # Example
///
/// ```
/// use codemint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the source's epoch.
    fn current_millis(&self) -> u64;
}
