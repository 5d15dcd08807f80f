use crate::{
    alphabet::Alphabet,
    error::{Error, Result},
};

/// Constant-width positional codec over a power-of-two alphabet.
///
/// Each symbol covers exactly `log2(radix)` bits, so encoding is a
/// mask-and-shift loop that runs a fixed number of iterations instead of
/// stopping at zero. Output width never varies: `encode` always returns
/// [`FixedWidthCodec::encoded_len`] characters, for zero and for the
/// maximum representable value alike.
///
/// Values wider than [`FixedWidthCodec::width_bits`] are truncated to the
/// low bits. That is an intentional property of the fixed width: a
/// 12-symbol base-32 code carries exactly 60 bits, and callers feeding
/// 62-bit serials into it are trading the top of the time field for a
/// constant code length. Round-trips are exact for every value below
/// `2^width_bits`.
///
/// An optional prefix symbol brands every code with an instance marker.
/// The prefix is outside the decodable symbol set: `decode` requires and
/// skips it, and constructing a codec whose prefix collides with an
/// alphabet symbol fails.
///
/// # Example
///
/// ```
/// use codemint::{Alphabet, CODE32, FixedWidthCodec};
///
/// let codec = FixedWidthCodec::new(Alphabet::new(CODE32).unwrap(), 12).unwrap();
/// let code = codec.encode(812_482_749_283_748);
/// assert_eq!(code.len(), 12);
/// assert_eq!(codec.decode(&code), Some(812_482_749_283_748));
/// ```
#[derive(Clone, Debug)]
pub struct FixedWidthCodec {
    alphabet: Alphabet,
    code_length: usize,
    bits_per_symbol: u8,
    prefix: Option<u8>,
}

impl FixedWidthCodec {
    /// Creates a codec emitting exactly `code_length` symbols.
    ///
    /// # Errors
    ///
    /// Fails if the alphabet's radix is not a power of two (the constant
    /// width guarantee depends on exact bit alignment), if `code_length`
    /// is zero, or if the total width exceeds 64 bits.
    pub fn new(alphabet: Alphabet, code_length: usize) -> Result<Self> {
        let bits_per_symbol = alphabet.bits_per_symbol().ok_or(Error::RadixNotPowerOfTwo {
            radix: alphabet.len(),
        })?;
        if code_length == 0 {
            return Err(Error::ZeroCodeLength);
        }
        let width = u32::from(bits_per_symbol) * code_length as u32;
        if width > u64::BITS {
            return Err(Error::LayoutOverflow {
                bits: width,
                budget: u64::BITS,
            });
        }
        Ok(Self {
            alphabet,
            code_length,
            bits_per_symbol,
            prefix: None,
        })
    }

    /// Brands the codec with a prefix symbol.
    ///
    /// # Errors
    ///
    /// Fails if the prefix is not ASCII or collides with a decodable
    /// symbol.
    pub fn with_prefix(mut self, prefix: char) -> Result<Self> {
        if !prefix.is_ascii() {
            return Err(Error::NonAsciiSymbol { symbol: prefix });
        }
        if self.alphabet.contains(prefix as u8) {
            return Err(Error::PrefixInAlphabet { prefix });
        }
        self.prefix = Some(prefix as u8);
        Ok(self)
    }

    /// The alphabet this codec spells values with.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of value symbols per code, excluding any prefix.
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Total characters per encoded code, including any prefix.
    pub fn encoded_len(&self) -> usize {
        self.code_length + usize::from(self.prefix.is_some())
    }

    /// Bits representable by one code.
    pub fn width_bits(&self) -> u32 {
        u32::from(self.bits_per_symbol) * self.code_length as u32
    }

    /// Encodes the low [`FixedWidthCodec::width_bits`] bits of `value`.
    pub fn encode(&self, value: u64) -> String {
        let mask = self.alphabet.len() as u64 - 1;
        let mut buf = Vec::with_capacity(self.encoded_len());
        let mut rest = value;
        for _ in 0..self.code_length {
            buf.push(self.alphabet.symbol((rest & mask) as usize));
            rest >>= self.bits_per_symbol;
        }
        if let Some(prefix) = self.prefix {
            buf.push(prefix);
        }
        // Symbols were emitted least-significant first.
        buf.reverse();
        // SAFETY: alphabet symbols and the prefix are ASCII.
        unsafe { String::from_utf8_unchecked(buf) }
    }

    /// Decodes a string produced by [`FixedWidthCodec::encode`].
    ///
    /// Returns `None` if the input is not exactly
    /// [`FixedWidthCodec::encoded_len`] characters, is missing the
    /// configured prefix, or contains a symbol outside the alphabet.
    pub fn decode(&self, code: &str) -> Option<u64> {
        let bytes = code.as_bytes();
        let digits = match self.prefix {
            Some(prefix) => {
                let (first, rest) = bytes.split_first()?;
                (*first == prefix).then_some(rest)?
            }
            None => bytes,
        };
        if digits.len() != self.code_length {
            return None;
        }
        let mut acc: u64 = 0;
        for &byte in digits {
            acc = acc << self.bits_per_symbol | u64::from(self.alphabet.index_of(byte)?);
        }
        Some(acc)
    }
}
