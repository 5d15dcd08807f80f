//! Crate-wide error types.
//!
//! Every fallible constructor and generator call returns [`Error`] through
//! the [`Result`] alias. Decode failures on the hot path are deliberately
//! *not* represented here: codecs signal an unrecognized or overlong input
//! with `Option::None` so that callers check explicitly instead of relying
//! on unwinding.

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for generator and codec configuration plus the two
/// fatal clock conditions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A partition id does not fit the configured partition width.
    #[error("partition id {id} exceeds max {max} for {bits} partition bits")]
    PartitionOutOfRange { id: u64, bits: u8, max: u64 },

    /// A machine id does not fit the configured machine width.
    #[error("machine id {id} exceeds max {max} for {bits} machine bits")]
    MachineOutOfRange { id: u64, bits: u8, max: u64 },

    /// The derived sequence width fell below the throughput floor.
    ///
    /// The sequence field is whatever remains of the 22 low bits after the
    /// partition and machine fields are carved out, capped at 10 bits. Any
    /// layout that leaves fewer than 7 bits cannot sustain acceptable
    /// single-instance throughput and is rejected at construction.
    #[error("sequence width {bits} is below the floor of {floor} bits")]
    SequenceTooNarrow { bits: u8, floor: u8 },

    /// A packed value layout does not fit the available bit budget.
    #[error("layout spans {bits} bits, exceeding the {budget}-bit budget")]
    LayoutOverflow { bits: u32, budget: u32 },

    /// An alphabet was constructed with no symbols.
    #[error("alphabet must not be empty")]
    EmptyAlphabet,

    /// An alphabet symbol is outside the ASCII range.
    #[error("alphabet symbol {symbol:?} is not ASCII")]
    NonAsciiSymbol { symbol: char },

    /// The same symbol appears twice in an alphabet.
    #[error("alphabet contains duplicate symbol {symbol:?}")]
    DuplicateSymbol { symbol: char },

    /// A fixed-width codec requires a power-of-two radix.
    #[error("radix {radix} is not a power of two")]
    RadixNotPowerOfTwo { radix: usize },

    /// A codec was configured with a zero output width.
    #[error("code length must be at least one symbol")]
    ZeroCodeLength,

    /// A prefix symbol collides with a decodable alphabet symbol.
    #[error("prefix {prefix:?} collides with an alphabet symbol")]
    PrefixInAlphabet { prefix: char },

    /// A checksum field width outside the supported range.
    #[error("check width {bits} bits is outside 1..={max}")]
    CheckBitsOutOfRange { bits: u8, max: u8 },

    /// An activity id is too wide for the configured alphabet to describe
    /// its bit length in a single flag symbol.
    #[error("activity id {id} needs {bits} bits, beyond radix {radix}")]
    ActivityIdTooWide { id: u32, bits: u32, radix: usize },

    /// A symbol landed in the wrong table for its character class.
    #[error("symbol {symbol:?} is not valid for the {expected} table")]
    SymbolClassMismatch {
        symbol: char,
        expected: &'static str,
    },

    /// A steerable layout leaves no randomness after the mask fold.
    #[error("{letters} letter slots cannot carry a {code_length}-bit mask")]
    DegeneratePattern { letters: usize, code_length: usize },

    /// The wall clock moved backwards relative to the last issued id.
    ///
    /// Fatal by contract: there is no internal retry. The caller decides
    /// whether to pause, alert, or abort.
    #[error("clock moved backwards: last seen {last_ms} ms, now {now_ms} ms")]
    ClockRegression { last_ms: u64, now_ms: u64 },

    /// The sequence space was exhausted and the clock failed to advance
    /// within the wait budget.
    #[error("sequence exhausted and clock stalled for {waited_ms} ms")]
    ClockStalled { waited_ms: u64 },
}
