use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::time::{DEFAULT_EPOCH, TimeSource};

/// A wall-clock time source that reports milliseconds elapsed since a
/// configurable epoch.
///
/// The epoch defines the zero point of every timestamp this clock returns,
/// which in turn anchors the time field of generated ids. Two generators
/// only produce globally unique ids if their clocks share an epoch, so the
/// epoch should be treated as part of the deployment configuration.
///
/// Unlike a monotonic source, this clock follows the system time: if the
/// operating system steps the clock backwards, `current_millis` regresses
/// with it. Generators detect that regression and surface it as a fatal
/// error rather than masking it here.
#[derive(Clone, Debug)]
pub struct WallClock {
    epoch_ms: u64,
}

impl Default for WallClock {
    /// Constructs a wall clock anchored to [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(DEFAULT_EPOCH)
    }
}

impl WallClock {
    /// Constructs a wall clock using `epoch` (a duration since the Unix
    /// epoch) as its origin.
    ///
    /// System times earlier than the epoch clamp to zero rather than
    /// panicking; a sane deployment picks an epoch in the past.
    pub fn with_epoch(epoch: Duration) -> Self {
        Self {
            epoch_ms: epoch.as_millis() as u64,
        }
    }
}

impl TimeSource for WallClock {
    fn current_millis(&self) -> u64 {
        let unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        unix_ms.saturating_sub(self.epoch_ms)
    }
}
