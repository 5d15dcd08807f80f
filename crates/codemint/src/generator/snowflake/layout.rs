use crate::error::{Error, Result};

/// Width of the time-delta field, in bits.
///
/// 41 bits of milliseconds cover roughly 69 years past the configured
/// epoch before the value spills into the sign bit.
pub const TIMESTAMP_BITS: u8 = 41;

/// Bits below the timestamp shared by partition, machine and sequence.
pub const LOW_BITS_BUDGET: u8 = 22;

/// Widest sequence field a layout will take, even when more low bits are
/// free. Ten bits per millisecond is a million ids per second, which is
/// plenty for one instance; spare bits are better left to the time field's
/// shift than to an unusable sequence ceiling.
pub const SEQUENCE_CEILING: u8 = 10;

/// Narrowest sequence field a layout may derive. Below seven bits a
/// single instance stalls too often within one millisecond, so such
/// layouts are rejected at construction.
pub const SEQUENCE_FLOOR: u8 = 7;

const fn low_mask(bits: u8) -> u64 {
    (1u64 << bits) - 1
}

/// The decomposed fields of a packed identifier.
///
/// `timestamp` is milliseconds since the generating clock's epoch, exactly
/// as packed; the remaining fields are the raw partition, machine and
/// sequence values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdParts {
    pub timestamp: u64,
    pub partition: u64,
    pub machine: u64,
    pub sequence: u64,
}

/// A runtime-configured Snowflake bit layout.
///
/// Ids pack most-significant-first as
/// `[timestamp][partition][machine][sequence]` into the low 63 bits of a
/// `u64`, leaving the sign bit of the equivalent `i64` untouched.
///
/// The timestamp always spans [`TIMESTAMP_BITS`]; partition and machine
/// widths are chosen by the caller, and the sequence receives whatever
/// remains of the [`LOW_BITS_BUDGET`], capped at [`SEQUENCE_CEILING`].
/// Layouts that would leave the sequence under [`SEQUENCE_FLOOR`] bits
/// fail construction: that is a throughput guarantee, not a runtime
/// concern.
///
/// # Example
///
/// ```
/// use codemint::SnowflakeLayout;
///
/// let layout = SnowflakeLayout::new(5, 5).unwrap();
/// assert_eq!(layout.sequence_bits(), 10);
///
/// let id = layout.pack(1_000, 3, 7, 42);
/// let parts = layout.unpack(id);
/// assert_eq!(parts.timestamp, 1_000);
/// assert_eq!(parts.partition, 3);
/// assert_eq!(parts.machine, 7);
/// assert_eq!(parts.sequence, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnowflakeLayout {
    partition_bits: u8,
    machine_bits: u8,
    sequence_bits: u8,
}

impl Default for SnowflakeLayout {
    /// The 4 + 4 layout: 16 partitions, 16 machines, 10 sequence bits.
    fn default() -> Self {
        Self {
            partition_bits: Self::DEFAULT_PARTITION_BITS,
            machine_bits: Self::DEFAULT_MACHINE_BITS,
            sequence_bits: SEQUENCE_CEILING,
        }
    }
}

impl SnowflakeLayout {
    pub const DEFAULT_PARTITION_BITS: u8 = 4;
    pub const DEFAULT_MACHINE_BITS: u8 = 4;

    /// Derives a layout from the partition and machine widths.
    ///
    /// Either width may be zero, collapsing that field entirely; the
    /// corresponding id must then be zero.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::SequenceTooNarrow`] when the widths leave
    /// fewer than [`SEQUENCE_FLOOR`] sequence bits.
    pub fn new(partition_bits: u8, machine_bits: u8) -> Result<Self> {
        let spent = i32::from(partition_bits) + i32::from(machine_bits);
        let sequence_bits = (i32::from(LOW_BITS_BUDGET) - spent).min(i32::from(SEQUENCE_CEILING));
        if sequence_bits < i32::from(SEQUENCE_FLOOR) {
            return Err(Error::SequenceTooNarrow {
                bits: sequence_bits.max(0) as u8,
                floor: SEQUENCE_FLOOR,
            });
        }
        Ok(Self {
            partition_bits,
            machine_bits,
            sequence_bits: sequence_bits as u8,
        })
    }

    pub fn partition_bits(&self) -> u8 {
        self.partition_bits
    }

    pub fn machine_bits(&self) -> u8 {
        self.machine_bits
    }

    pub fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// Largest partition id this layout can hold.
    pub fn max_partition(&self) -> u64 {
        low_mask(self.partition_bits)
    }

    /// Largest machine id this layout can hold.
    pub fn max_machine(&self) -> u64 {
        low_mask(self.machine_bits)
    }

    /// Largest per-millisecond sequence value.
    pub fn max_sequence(&self) -> u64 {
        low_mask(self.sequence_bits)
    }

    pub(crate) fn machine_shift(&self) -> u8 {
        self.sequence_bits
    }

    pub(crate) fn partition_shift(&self) -> u8 {
        self.sequence_bits + self.machine_bits
    }

    pub(crate) fn timestamp_shift(&self) -> u8 {
        self.sequence_bits + self.machine_bits + self.partition_bits
    }

    /// Packs the four fields into one identifier.
    ///
    /// Fields are assumed in range; generators validate ids at
    /// construction and the sequence by masking.
    pub fn pack(&self, timestamp: u64, partition: u64, machine: u64, sequence: u64) -> u64 {
        timestamp << self.timestamp_shift()
            | partition << self.partition_shift()
            | machine << self.machine_shift()
            | sequence
    }

    /// Recovers the fields of `id` exactly as packed.
    pub fn unpack(&self, id: u64) -> IdParts {
        IdParts {
            timestamp: id >> self.timestamp_shift(),
            partition: (id >> self.partition_shift()) & self.max_partition(),
            machine: (id >> self.machine_shift()) & self.max_machine(),
            sequence: id & self.max_sequence(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_four_four_ten() {
        let layout = SnowflakeLayout::default();
        assert_eq!(layout.partition_bits(), 4);
        assert_eq!(layout.machine_bits(), 4);
        assert_eq!(layout.sequence_bits(), 10);
        assert_eq!(SnowflakeLayout::new(4, 4).unwrap(), layout);
    }

    #[test]
    fn sequence_takes_the_leftover_low_bits() {
        // 22 - 5 - 9 = 8, under the ceiling.
        let layout = SnowflakeLayout::new(5, 9).unwrap();
        assert_eq!(layout.sequence_bits(), 8);
        // 22 - 0 - 11 = 11, capped at 10.
        let layout = SnowflakeLayout::new(0, 11).unwrap();
        assert_eq!(layout.sequence_bits(), 10);
    }

    #[test]
    fn floor_violation_fails_construction() {
        // 22 - 8 - 8 = 6 < 7.
        assert_eq!(
            SnowflakeLayout::new(8, 8).unwrap_err(),
            Error::SequenceTooNarrow { bits: 6, floor: 7 }
        );
        // Degenerate widths saturate to a zero-bit sequence.
        assert_eq!(
            SnowflakeLayout::new(200, 200).unwrap_err(),
            Error::SequenceTooNarrow { bits: 0, floor: 7 }
        );
    }

    #[test]
    fn pack_unpack_round_trip_at_extremes() {
        let layout = SnowflakeLayout::new(5, 5).unwrap();
        let id = layout.pack(
            (1 << 41) - 1,
            layout.max_partition(),
            layout.max_machine(),
            layout.max_sequence(),
        );
        let parts = layout.unpack(id);
        assert_eq!(parts.timestamp, (1 << 41) - 1);
        assert_eq!(parts.partition, layout.max_partition());
        assert_eq!(parts.machine, layout.max_machine());
        assert_eq!(parts.sequence, layout.max_sequence());

        assert_eq!(
            layout.unpack(layout.pack(0, 0, 0, 0)),
            IdParts {
                timestamp: 0,
                partition: 0,
                machine: 0,
                sequence: 0
            }
        );
    }

    #[test]
    fn zero_width_fields_collapse() {
        let layout = SnowflakeLayout::new(0, 11).unwrap();
        assert_eq!(layout.max_partition(), 0);
        let id = layout.pack(7, 0, 2047, 1);
        let parts = layout.unpack(id);
        assert_eq!(parts.partition, 0);
        assert_eq!(parts.machine, 2047);
        assert_eq!(parts.sequence, 1);
    }

    #[test]
    fn max_id_stays_below_the_sign_bit() {
        let layout = SnowflakeLayout::default();
        let id = layout.pack(
            (1 << 41) - 1,
            layout.max_partition(),
            layout.max_machine(),
            layout.max_sequence(),
        );
        assert!(id < 1 << 63);
    }
}
