use std::collections::HashSet;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    alphabet::{Alphabet, CHECK32},
    error::{Error, Result},
    rand::{RandSource, ThreadRandom},
};

/// Default checksum field width.
pub const DEFAULT_CHECK_BITS: u8 = 3;

/// Default floor on the random space: roughly 33 million values.
///
/// Growing codes rather than shrinking randomness keeps the collision
/// rate of batch generation in the tens-of-millions regime even when a
/// wide activity id eats into the bit budget.
pub const DEFAULT_MIN_RANDOM_SPACE: u64 = 0x1FF_FFFF;

/// Hard ceiling on the packed value width. The sign bit of the
/// equivalent `i64` stays untouched, matching the id generators.
const TOTAL_BITS_BUDGET: u32 = 63;

/// A checksum-verified segmented code minter.
///
/// Every code packs three fields into one integer before base-N
/// encoding, most-significant-first:
///
/// ```text
/// [activity id][random payload][checksum]
/// ```
///
/// where `checksum = (value >> checkBits) mod (2^checkBits - 1)`. When an
/// activity id is present, one extra flag symbol describing the id's bit
/// length is prepended, letting [`VerifiableCodec::activity_id`] recover
/// the id without any stored state.
///
/// Validity is recomputable from the code alone. That is a structural
/// self-check — it filters typos and blind guesses, but it is not a MAC
/// and proves nothing about provenance.
///
/// # Length growth
///
/// A wide activity id squeezes the random payload. Rather than silently
/// degrading uniqueness, `create` grows the code by one symbol at a time
/// until the random space clears [`DEFAULT_MIN_RANDOM_SPACE`] (or the
/// configured floor). **The returned code can therefore be longer than
/// requested.** Growth is bounded: a length that would push the packed
/// value past 63 bits fails with [`Error::LayoutOverflow`] instead of
/// growing forever.
///
/// # Example
///
/// ```
/// use codemint::VerifiableCodec;
///
/// let codec = VerifiableCodec::new().unwrap();
/// let code = codec.create(37, 9).unwrap();
/// assert!(codec.verify(&code, true));
/// assert_eq!(codec.activity_id(&code), Some(37));
/// ```
#[derive(Clone, Debug)]
pub struct VerifiableCodec<R = ThreadRandom>
where
    R: RandSource,
{
    alphabet: Alphabet,
    bits_per_symbol: u8,
    check_bits: u8,
    min_random_space: u64,
    rand: R,
}

impl VerifiableCodec<ThreadRandom> {
    /// Creates a codec with the [`CHECK32`] alphabet, the default
    /// checksum width and random-space floor, and the thread-local RNG.
    pub fn new() -> Result<Self> {
        Self::with_rand(ThreadRandom)
    }
}

impl<R> VerifiableCodec<R>
where
    R: RandSource,
{
    /// Creates a codec with default parameters over an injected random
    /// source.
    pub fn with_rand(rand: R) -> Result<Self> {
        Self::with_parts(
            Alphabet::new(CHECK32)?,
            DEFAULT_CHECK_BITS,
            DEFAULT_MIN_RANDOM_SPACE,
            rand,
        )
    }

    /// Creates a fully parameterized codec.
    ///
    /// # Errors
    ///
    /// Fails if the alphabet's radix is not a power of two or the
    /// checksum width is outside `1..=16`.
    pub fn with_parts(
        alphabet: Alphabet,
        check_bits: u8,
        min_random_space: u64,
        rand: R,
    ) -> Result<Self> {
        let bits_per_symbol = alphabet.bits_per_symbol().ok_or(Error::RadixNotPowerOfTwo {
            radix: alphabet.len(),
        })?;
        if check_bits == 0 || check_bits > 16 {
            return Err(Error::CheckBitsOutOfRange {
                bits: check_bits,
                max: 16,
            });
        }
        Ok(Self {
            alphabet,
            bits_per_symbol,
            check_bits,
            min_random_space,
            rand,
        })
    }

    /// Mints a code for `activity_id` (zero meaning "no id") aiming at
    /// `code_length` symbols.
    ///
    /// With an id present the result carries one extra flag symbol, and
    /// the length-growth rule above may add more. Callers needing an
    /// exact output width should measure a sample code.
    ///
    /// # Errors
    ///
    /// [`Error::ActivityIdTooWide`] if the id's bit length cannot be
    /// described by one alphabet symbol, [`Error::LayoutOverflow`] if
    /// honoring the random-space floor would exceed the 63-bit budget.
    pub fn create(&self, activity_id: u32, code_length: usize) -> Result<String> {
        let id_bits = if activity_id > 0 {
            u32::BITS - activity_id.leading_zeros()
        } else {
            0
        };
        if id_bits as usize >= self.alphabet.len() {
            return Err(Error::ActivityIdTooWide {
                id: activity_id,
                bits: id_bits,
                radix: self.alphabet.len(),
            });
        }

        let mut len = code_length;
        loop {
            let total_bits = u32::from(self.bits_per_symbol) * len as u32;
            if total_bits > TOTAL_BITS_BUDGET {
                return Err(Error::LayoutOverflow {
                    bits: total_bits,
                    budget: TOTAL_BITS_BUDGET,
                });
            }
            // Grow until the random field clears the floor.
            let rand_bits = match total_bits.checked_sub(id_bits + u32::from(self.check_bits)) {
                Some(bits) if 1u64 << bits >= self.min_random_space => bits,
                _ => {
                    len += 1;
                    continue;
                }
            };

            let mut value = u64::from(activity_id) << (total_bits - id_bits);
            value |= self.rand.below(1u64 << rand_bits) << self.check_bits;
            value |= (value >> self.check_bits) % self.check_modulus();

            let mut code = String::with_capacity(len + 1);
            if activity_id > 0 {
                code.push(self.alphabet.symbol(id_bits as usize) as char);
            }
            self.encode_packed(&mut code, value, len);
            return Ok(code);
        }
    }

    /// Recomputes the checksum of `code`.
    ///
    /// `has_id_prefix` states whether the first symbol is an id-length
    /// flag (i.e. the code was created with a non-zero activity id).
    /// Malformed input — foreign symbols, empty body, a body too wide
    /// for the bit budget — is simply invalid, never an error.
    pub fn verify(&self, code: &str, has_id_prefix: bool) -> bool {
        self.packed_value(code, has_id_prefix)
            .is_some_and(|value| self.checksum_ok(value))
    }

    /// Recovers the embedded activity id, or `None` if the checksum does
    /// not hold. A code minted without an id yields `Some(0)`.
    pub fn activity_id(&self, code: &str) -> Option<u32> {
        let value = self.packed_value(code, true)?;
        if !self.checksum_ok(value) {
            return None;
        }
        let flag = *code.as_bytes().first()?;
        let id_bits = u32::from(self.alphabet.index_of(flag)?);
        let total_bits = u32::from(self.bits_per_symbol) * (code.len() as u32 - 1);
        let shift = total_bits.checked_sub(id_bits)?;
        u32::try_from(value >> shift).ok()
    }

    /// Mints `count` distinct codes, skipping anything already present
    /// in `existing`.
    ///
    /// The loop is probabilistically bounded, not deterministically:
    /// keep `count` (plus the relevant history) well below the
    /// `2^randBits` random space, or the rejection rate climbs without
    /// limit. The codec does not enforce that margin.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, existing), fields(history = existing.len()))
    )]
    pub fn generate_batch(
        &self,
        existing: &HashSet<String>,
        count: usize,
        code_length: usize,
        activity_id: u32,
    ) -> Result<HashSet<String>> {
        let mut batch = HashSet::with_capacity(count);
        while batch.len() < count {
            let code = self.create(activity_id, code_length)?;
            if !existing.contains(&code) {
                batch.insert(code);
            }
        }
        Ok(batch)
    }

    fn check_modulus(&self) -> u64 {
        (1u64 << self.check_bits) - 1
    }

    fn checksum_ok(&self, value: u64) -> bool {
        (value >> self.check_bits) % self.check_modulus() == value & self.check_modulus()
    }

    /// Decodes the packed integer behind `code`, skipping the flag
    /// symbol when present.
    fn packed_value(&self, code: &str, has_id_prefix: bool) -> Option<u64> {
        let bytes = code.as_bytes();
        let body = if has_id_prefix {
            bytes.get(1..)?
        } else {
            bytes
        };
        if body.is_empty()
            || u32::from(self.bits_per_symbol) * body.len() as u32 > TOTAL_BITS_BUDGET
        {
            return None;
        }
        let mut acc: u64 = 0;
        for &byte in body {
            acc = acc << self.bits_per_symbol | u64::from(self.alphabet.index_of(byte)?);
        }
        Some(acc)
    }

    fn encode_packed(&self, out: &mut String, value: u64, len: usize) {
        let mask = self.alphabet.len() as u64 - 1;
        let mut buf = Vec::with_capacity(len);
        let mut rest = value;
        for _ in 0..len {
            buf.push(self.alphabet.symbol((rest & mask) as usize));
            rest >>= self.bits_per_symbol;
        }
        buf.reverse();
        // SAFETY: alphabet symbols are ASCII.
        out.push_str(unsafe { core::str::from_utf8_unchecked(&buf) });
    }
}
