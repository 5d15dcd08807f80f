use crate::{
    alphabet::{Alphabet, CODE32, FixedWidthCodec},
    error::Result,
    generator::{IdGenerator, SnowflakeGenerator},
    time::{TimeSource, WallClock},
};

/// A serial generator minting codes branded with a fixed prefix symbol.
///
/// Several id families can then share one code namespace — order ids
/// under `O`, invoice ids under `V` — while remaining mutually
/// undecodable: the prefix is outside the alphabet, each generator's
/// codec requires its own prefix, and a code handed to the wrong family
/// maps to `None` instead of a bogus serial.
///
/// Layout matches [`FixedLengthGenerator`]: no partition field, 11
/// instance bits, 12 value symbols. The prefix rides in front, so minted
/// codes are 13 characters.
///
/// # Example
///
/// ```
/// use codemint::{IdGenerator, PrefixedGenerator};
///
/// let orders = PrefixedGenerator::new(0, 'O').unwrap();
/// let invoices = PrefixedGenerator::new(0, 'V').unwrap();
///
/// let code = orders.next_code().unwrap();
/// assert!(code.starts_with('O'));
/// assert!(orders.get_serial(&code).is_some());
/// assert_eq!(invoices.get_serial(&code), None);
/// ```
#[derive(Debug)]
pub struct PrefixedGenerator<T = WallClock>
where
    T: TimeSource,
{
    snowflake: SnowflakeGenerator<T>,
    codec: FixedWidthCodec,
    prefix: char,
}

impl PrefixedGenerator<WallClock> {
    /// Creates a generator for `instance_id` branding codes with
    /// `prefix`, on the default wall clock.
    ///
    /// # Errors
    ///
    /// Fails if `instance_id` exceeds the 11-bit instance space, or if
    /// `prefix` is not ASCII or collides with a [`CODE32`] symbol.
    pub fn new(instance_id: u64, prefix: char) -> Result<Self> {
        Self::with_time(instance_id, prefix, WallClock::default())
    }
}

impl<T> PrefixedGenerator<T>
where
    T: TimeSource,
{
    /// Instance id width: up to 2048 concurrent instances.
    pub const INSTANCE_BITS: u8 = 11;

    /// Value symbols per minted code, excluding the prefix.
    pub const CODE_LENGTH: usize = 12;

    /// Creates a generator with an injected time source.
    pub fn with_time(instance_id: u64, prefix: char, time: T) -> Result<Self> {
        let snowflake =
            SnowflakeGenerator::with_layout(0, 0, instance_id, Self::INSTANCE_BITS, time)?;
        let codec =
            FixedWidthCodec::new(Alphabet::new(CODE32)?, Self::CODE_LENGTH)?.with_prefix(prefix)?;
        Ok(Self {
            snowflake,
            codec,
            prefix,
        })
    }

    /// The branding symbol in front of every code.
    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// The wrapped snowflake generator, for decomposition.
    pub fn generator(&self) -> &SnowflakeGenerator<T> {
        &self.snowflake
    }
}

impl<T> IdGenerator for PrefixedGenerator<T>
where
    T: TimeSource,
{
    fn next_serial(&self) -> Result<u64> {
        self.snowflake.next_id()
    }

    fn serial_to_code(&self, serial: u64) -> String {
        self.codec.encode(serial)
    }

    fn get_serial(&self, code: &str) -> Option<u64> {
        self.codec.decode(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[derive(Debug)]
    struct FixedTime(u64);
    impl TimeSource for FixedTime {
        fn current_millis(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn codes_carry_the_prefix() {
        let generator = PrefixedGenerator::with_time(5, 'Z', FixedTime(777)).unwrap();
        let code = generator.next_code().unwrap();
        assert_eq!(code.len(), 13);
        assert!(code.starts_with('Z'));
        let serial = generator.get_serial(&code).unwrap();
        assert_eq!(generator.serial_to_code(serial), code);
    }

    #[test]
    fn families_do_not_cross_decode() {
        let trades = PrefixedGenerator::with_time(0, 'Z', FixedTime(1)).unwrap();
        let orders = PrefixedGenerator::with_time(0, 'O', FixedTime(1)).unwrap();
        let code = trades.next_code().unwrap();
        assert_eq!(orders.get_serial(&code), None);
        // The bare body without its prefix is not a code either.
        assert_eq!(trades.get_serial(&code[1..]), None);
    }

    #[test]
    fn colliding_prefix_fails_construction() {
        // 'T' is a CODE32 symbol.
        let err = PrefixedGenerator::with_time(0, 'T', FixedTime(0)).unwrap_err();
        assert_eq!(err, Error::PrefixInAlphabet { prefix: 'T' });
    }
}
