use crate::alphabet::Alphabet;

/// Variable-length positional codec over an arbitrary alphabet.
///
/// Encoding repeatedly takes the value modulo the radix, emitting the
/// least-significant symbol first, then reverses the result. Negative
/// values carry a leading `-`. Output length tracks the magnitude of the
/// input, so this codec suits serials whose width may grow over time.
///
/// Decoding is the sentinel-style inverse: any symbol outside the
/// alphabet, an empty input, or a value overflowing `i64` yields `None`
/// rather than an error, keeping the hot path free of unwinding.
///
/// # Example
///
/// ```
/// use codemint::{Alphabet, BASE62, RadixCodec};
///
/// let codec = RadixCodec::new(Alphabet::new(BASE62).unwrap());
/// let code = codec.encode(62);
/// assert_eq!(code, "BA");
/// assert_eq!(codec.decode(&code), Some(62));
/// assert_eq!(codec.decode("B!"), None);
/// ```
#[derive(Clone, Debug)]
pub struct RadixCodec {
    alphabet: Alphabet,
}

impl RadixCodec {
    /// Creates a codec over `alphabet`. Any radix of at least two works;
    /// a one-symbol alphabet could only ever spell zero.
    pub fn new(alphabet: Alphabet) -> Self {
        debug_assert!(alphabet.len() >= 2);
        Self { alphabet }
    }

    /// The alphabet this codec spells values with.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encodes `value` into its shortest positional representation.
    ///
    /// Zero encodes as the single zero symbol.
    pub fn encode(&self, value: i64) -> String {
        let radix = self.alphabet.len() as u64;
        let mut buf = Vec::new();
        let mut magnitude = value.unsigned_abs();
        if magnitude == 0 {
            buf.push(self.alphabet.symbol(0));
        }
        while magnitude > 0 {
            buf.push(self.alphabet.symbol((magnitude % radix) as usize));
            magnitude /= radix;
        }
        if value < 0 {
            buf.push(b'-');
        }
        buf.reverse();
        // SAFETY: alphabet symbols and '-' are ASCII.
        unsafe { String::from_utf8_unchecked(buf) }
    }

    /// Decodes a string produced by [`RadixCodec::encode`].
    ///
    /// Returns `None` for an empty input, a bare `-`, a symbol outside
    /// the alphabet, or a magnitude that does not fit `i64`.
    pub fn decode(&self, code: &str) -> Option<i64> {
        let radix = self.alphabet.len() as u64;
        let bytes = code.as_bytes();
        let (negative, digits) = match bytes.split_first()? {
            (&b'-', rest) => (true, rest),
            _ => (false, bytes),
        };
        if digits.is_empty() {
            return None;
        }
        let mut magnitude: u64 = 0;
        for &byte in digits {
            let val = u64::from(self.alphabet.index_of(byte)?);
            magnitude = magnitude.checked_mul(radix)?.checked_add(val)?;
        }
        if negative {
            // i64::MIN's magnitude is one past i64::MAX.
            if magnitude > i64::MAX as u64 + 1 {
                return None;
            }
            Some((magnitude as i64).wrapping_neg())
        } else {
            i64::try_from(magnitude).ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::BASE62;
    use proptest::prelude::*;

    fn base62() -> RadixCodec {
        RadixCodec::new(Alphabet::new(BASE62).unwrap())
    }

    #[test]
    fn zero_is_single_symbol() {
        let codec = base62();
        assert_eq!(codec.encode(0), "A");
        assert_eq!(codec.decode("A"), Some(0));
    }

    #[test]
    fn negative_round_trip() {
        let codec = base62();
        let code = codec.encode(-1234567);
        assert!(code.starts_with('-'));
        assert_eq!(codec.decode(&code), Some(-1234567));
    }

    #[test]
    fn known_values() {
        let codec = base62();
        // 61 -> last symbol, 62 -> "BA" (1, 0)
        assert_eq!(codec.encode(61), "9");
        assert_eq!(codec.encode(62), "BA");
        assert_eq!(codec.decode("BA"), Some(62));
    }

    #[test]
    fn foreign_symbols_are_sentinels() {
        let codec = base62();
        assert_eq!(codec.decode(""), None);
        assert_eq!(codec.decode("-"), None);
        assert_eq!(codec.decode("abc!"), None);
        assert_eq!(codec.decode("a b"), None);
    }

    #[test]
    fn overflow_is_a_sentinel() {
        let codec = base62();
        // One symbol above i64::MAX's encoding must not wrap.
        let max = codec.encode(i64::MAX);
        assert_eq!(codec.decode(&max), Some(i64::MAX));
        let over = format!("9{max}");
        assert_eq!(codec.decode(&over), None);
    }

    proptest! {
        #[test]
        fn round_trip_all_i64(value in any::<i64>()) {
            let codec = base62();
            prop_assert_eq!(codec.decode(&codec.encode(value)), Some(value));
        }
    }
}
