#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    alphabet::{Alphabet, DIGITS8, LETTERS48},
    error::{Error, Result},
    rand::{RandSource, ThreadRandom},
};

/// A self-verifying pattern code minter.
///
/// Every code is exactly `code_length` characters with exactly
/// `digit_count` digits, scattered over positions chosen at random. The
/// trick is that the digit-position bitmask is not stored anywhere:
/// it is folded into the low `code_length` bits of the random value that
/// the letter positions spell out. [`SteerableCodec::verify`] rebuilds
/// both views — the mask observed by scanning for digits, and the mask
/// decoded from the letters — and accepts the code iff they agree.
///
/// Like the checksum codec, this is structural self-verification: it
/// proves a code is internally consistent, not where it came from.
///
/// # Example
///
/// ```
/// use codemint::SteerableCodec;
///
/// let codec = SteerableCodec::new(4, 10).unwrap();
/// let code = codec.get_code();
/// assert_eq!(code.len(), 10);
/// assert_eq!(code.bytes().filter(u8::is_ascii_digit).count(), 4);
/// assert!(codec.verify(&code));
/// ```
#[derive(Clone, Debug)]
pub struct SteerableCodec<R = ThreadRandom>
where
    R: RandSource,
{
    digits: Alphabet,
    letters: Alphabet,
    digit_count: usize,
    code_length: usize,
    /// Upper bound for the random draw: the letter space shifted down by
    /// `code_length` to leave room for the mask, with one headroom bit
    /// cleared so the fold can never collide with the mask region.
    letter_bound: u64,
    rand: R,
}

impl SteerableCodec<ThreadRandom> {
    /// Creates a codec over the default [`DIGITS8`]/[`LETTERS48`] tables
    /// and the thread-local RNG.
    pub fn new(digit_count: usize, code_length: usize) -> Result<Self> {
        Self::with_rand(digit_count, code_length, ThreadRandom)
    }
}

impl<R> SteerableCodec<R>
where
    R: RandSource,
{
    /// Creates a codec with an injected random source.
    pub fn with_rand(digit_count: usize, code_length: usize, rand: R) -> Result<Self> {
        Self::with_alphabets(
            Alphabet::new(DIGITS8)?,
            Alphabet::new(LETTERS48)?,
            digit_count,
            code_length,
            rand,
        )
    }

    /// Creates a fully parameterized codec.
    ///
    /// # Errors
    ///
    /// Fails if the digit table contains a non-digit or the letter table
    /// contains an ASCII digit (verification classifies characters by
    /// digit-ness), or if the geometry is degenerate: no letter slot at
    /// all, a mask that cannot fit the letter space, or no randomness
    /// left once the mask is folded in.
    pub fn with_alphabets(
        digits: Alphabet,
        letters: Alphabet,
        digit_count: usize,
        code_length: usize,
        rand: R,
    ) -> Result<Self> {
        for i in 0..digits.len() {
            let symbol = digits.symbol(i);
            if !symbol.is_ascii_digit() {
                return Err(Error::SymbolClassMismatch {
                    symbol: symbol as char,
                    expected: "digit",
                });
            }
        }
        for i in 0..letters.len() {
            let symbol = letters.symbol(i);
            if symbol.is_ascii_digit() {
                return Err(Error::SymbolClassMismatch {
                    symbol: symbol as char,
                    expected: "letter",
                });
            }
        }
        if code_length as u32 >= u64::BITS {
            return Err(Error::DegeneratePattern {
                letters: code_length.saturating_sub(digit_count),
                code_length,
            });
        }
        let letter_count = code_length
            .checked_sub(digit_count)
            .filter(|&count| count > 0)
            .ok_or(Error::DegeneratePattern {
                letters: 0,
                code_length,
            })?;
        let bound = (letters.len() as u64)
            .checked_pow(letter_count as u32)
            .map(|space| (space >> code_length) & !1)
            .filter(|&bound| bound >= 2)
            .ok_or(Error::DegeneratePattern {
                letters: letter_count,
                code_length,
            })?;
        Ok(Self {
            digits,
            letters,
            digit_count,
            code_length,
            letter_bound: bound,
            rand,
        })
    }

    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Mints one pattern code.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn get_code(&self) -> String {
        let mut buf = vec![0u8; self.code_length];
        let mut mask: u64 = 0;

        for _ in 0..self.digit_count {
            // Rejection sampling: redraw occupied positions.
            let mut position = self.rand.below(self.code_length as u64) as usize;
            while buf[position] != 0 {
                position = self.rand.below(self.code_length as u64) as usize;
            }
            buf[position] = self.digits.symbol(position % self.digits.len());
            mask |= 1 << position;
        }

        let mut value = self.rand.below(self.letter_bound) << self.code_length | mask;
        let radix = self.letters.len() as u64;
        for slot in &mut buf {
            if *slot == 0 {
                *slot = self.letters.symbol((value % radix) as usize);
                value /= radix;
            }
        }
        // SAFETY: every slot holds an ASCII digit or letter symbol.
        unsafe { String::from_utf8_unchecked(buf) }
    }

    /// Checks a code's structural consistency.
    ///
    /// Scans the code once: digit characters contribute their position
    /// to the observed mask, letters accumulate back into the packed
    /// value. Wrong length, a character belonging to neither table, or
    /// disagreeing masks all yield `false`.
    pub fn verify(&self, code: &str) -> bool {
        if code.len() != self.code_length {
            return false;
        }
        let mut observed: u64 = 0;
        let mut decoded: u64 = 0;
        let mut place: u64 = 1;
        let radix = self.letters.len() as u64;
        for (position, byte) in code.bytes().enumerate() {
            if byte.is_ascii_digit() {
                observed |= 1 << position;
            } else {
                let Some(index) = self.letters.index_of(byte) else {
                    return false;
                };
                // Values beyond 64 bits wrap; only the low bits matter.
                decoded = decoded.wrapping_add(u64::from(index).wrapping_mul(place));
                place = place.wrapping_mul(radix);
            }
        }
        decoded & ((1 << self.code_length) - 1) == observed
    }
}
