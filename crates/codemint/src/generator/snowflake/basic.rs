use core::{cell::Cell, cmp::Ordering};
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::{Error, Result},
    generator::{IdGenStatus, IdParts, SnowflakeLayout},
    time::{TimeSource, WallClock},
};

/// Default budget for the bounded wait in [`SnowflakeGenerator::next_id`].
///
/// The wait only triggers when a full sequence space is issued inside one
/// millisecond, and it normally resolves on the next tick; a stalled or
/// frozen clock is the only way to consume the whole budget.
pub const DEFAULT_WAIT: Duration = Duration::from_millis(100);

/// A non-concurrent Snowflake id generator.
///
/// Produces strictly increasing 63-bit identifiers packing a time delta,
/// a partition id, a machine id and a per-millisecond sequence, laid out
/// by a runtime-configured [`SnowflakeLayout`].
///
/// This generator is lightweight and fast, but **not thread-safe**: its
/// state is a single [`Cell`] holding the last issued id, with no internal
/// mutual exclusion. Correctness holds under a single-writer precondition.
/// Callers that must share a generator wrap it in their own lock or give
/// each worker its own instance under a distinct `(partition, machine)`
/// pair; both keep the serialization decision at the caller's boundary.
///
/// Uniqueness across processes holds for generators with distinct id
/// pairs whose clocks share an epoch.
///
/// # Example
///
/// ```
/// use codemint::SnowflakeGenerator;
///
/// let generator = SnowflakeGenerator::new(1, 1).unwrap();
/// let a = generator.next_id().unwrap();
/// let b = generator.next_id().unwrap();
/// assert!(b > a);
/// assert_eq!(generator.decompose(a).machine, 1);
/// ```
#[derive(Debug)]
pub struct SnowflakeGenerator<T = WallClock>
where
    T: TimeSource,
{
    layout: SnowflakeLayout,
    state: Cell<u64>,
    time: T,
}

impl SnowflakeGenerator<WallClock> {
    /// Creates a generator with the default 4 + 4 layout and the default
    /// wall clock.
    ///
    /// # Errors
    ///
    /// Fails if either id exceeds its four-bit field.
    pub fn new(partition_id: u64, machine_id: u64) -> Result<Self> {
        Self::with_layout(
            partition_id,
            SnowflakeLayout::DEFAULT_PARTITION_BITS,
            machine_id,
            SnowflakeLayout::DEFAULT_MACHINE_BITS,
            WallClock::default(),
        )
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator with explicit field widths and an injected
    /// time source.
    ///
    /// # Errors
    ///
    /// Fails if the widths leave the sequence under its floor, or if an
    /// id does not fit its field (a zero-width field admits only id 0).
    pub fn with_layout(
        partition_id: u64,
        partition_bits: u8,
        machine_id: u64,
        machine_bits: u8,
        time: T,
    ) -> Result<Self> {
        let layout = SnowflakeLayout::new(partition_bits, machine_bits)?;
        Self::with_parts(layout, partition_id, machine_id, time)
    }

    /// Creates a generator from an already-validated layout.
    pub fn with_parts(
        layout: SnowflakeLayout,
        partition_id: u64,
        machine_id: u64,
        time: T,
    ) -> Result<Self> {
        if partition_id > layout.max_partition() {
            return Err(Error::PartitionOutOfRange {
                id: partition_id,
                bits: layout.partition_bits(),
                max: layout.max_partition(),
            });
        }
        if machine_id > layout.max_machine() {
            return Err(Error::MachineOutOfRange {
                id: machine_id,
                bits: layout.machine_bits(),
                max: layout.max_machine(),
            });
        }
        Ok(Self {
            layout,
            state: Cell::new(layout.pack(0, partition_id, machine_id, 0)),
            time,
        })
    }

    /// The layout ids are packed with.
    pub fn layout(&self) -> SnowflakeLayout {
        self.layout
    }

    /// The configured partition id.
    pub fn partition_id(&self) -> u64 {
        self.layout.unpack(self.state.get()).partition
    }

    /// The configured machine id.
    pub fn machine_id(&self) -> u64 {
        self.layout.unpack(self.state.get()).machine
    }

    /// Attempts one id generation step without blocking.
    ///
    /// - Clock equal to the last issued timestamp: the sequence
    ///   increments, so consecutive ids within one millisecond differ by
    ///   exactly one. A full sequence yields
    ///   [`IdGenStatus::Pending`].
    /// - Clock ahead: the timestamp rolls forward and the sequence resets
    ///   to zero.
    /// - Clock behind: fatal [`Error::ClockRegression`]; the generator
    ///   never retries internally.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> Result<IdGenStatus> {
        let now = self.time.current_millis();
        let state = self.state.get();
        let last = state >> self.layout.timestamp_shift();

        match now.cmp(&last) {
            Ordering::Equal => {
                if state & self.layout.max_sequence() < self.layout.max_sequence() {
                    let id = state + 1;
                    self.state.set(id);
                    Ok(IdGenStatus::Ready { id })
                } else {
                    Ok(IdGenStatus::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => {
                let parts = self.layout.unpack(state);
                let id = self.layout.pack(now, parts.partition, parts.machine, 0);
                self.state.set(id);
                Ok(IdGenStatus::Ready { id })
            }
            Ordering::Less => Err(Self::cold_clock_behind(last, now)),
        }
    }

    /// Generates the next id, spinning through sequence exhaustion with
    /// the [`DEFAULT_WAIT`] budget.
    ///
    /// # Errors
    ///
    /// [`Error::ClockRegression`] if the clock moved backwards,
    /// [`Error::ClockStalled`] if it failed to advance within the budget.
    pub fn next_id(&self) -> Result<u64> {
        self.next_id_timeout(DEFAULT_WAIT)
    }

    /// Generates the next id, bounding the exhaustion wait by `wait`.
    ///
    /// The wait preserves the strictly-greater-timestamp contract: the
    /// returned id's timestamp is never behind the last issued one. A
    /// zero `wait` degenerates to a single poll.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id_timeout(&self, wait: Duration) -> Result<u64> {
        let mut waiting_since: Option<Instant> = None;
        loop {
            match self.poll_id()? {
                IdGenStatus::Ready { id } => return Ok(id),
                IdGenStatus::Pending { .. } => {
                    let since = *waiting_since.get_or_insert_with(Instant::now);
                    if since.elapsed() > wait {
                        return Err(Self::cold_clock_stalled(wait));
                    }
                    core::hint::spin_loop();
                }
            }
        }
    }

    /// Recovers `{timestamp, partition, machine, sequence}` exactly as
    /// packed. The timestamp is milliseconds since the clock's epoch.
    pub fn decompose(&self, id: u64) -> IdParts {
        self.layout.unpack(id)
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last: u64, now: u64) -> Error {
        Error::ClockRegression {
            last_ms: last,
            now_ms: now,
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_stalled(wait: Duration) -> Error {
        Error::ClockStalled {
            waited_ms: wait.as_millis() as u64,
        }
    }
}
