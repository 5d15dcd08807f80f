//! Snowflake-style serial generation and reversible base-N code minting.
//!
//! Everything here shares one problem shape: pack semantically distinct
//! integer fields into a single 63-bit word, then map that word
//! losslessly to and from a compact string.
//!
//! - [`SnowflakeGenerator`]: monotonic ids packing a time delta, a
//!   partition id, a machine id and a per-millisecond sequence, over a
//!   runtime-configured [`SnowflakeLayout`].
//! - [`RadixCodec`] / [`FixedWidthCodec`]: reversible positional codecs
//!   over caller-supplied [`Alphabet`]s, variable-width and
//!   constant-width respectively.
//! - [`FixedLengthGenerator`] / [`PrefixedGenerator`]: snowflake ids
//!   rendered as constant-width codes, behind the [`IdGenerator`] trait.
//! - [`VerifiableCodec`]: redeem codes embedding an activity id, a
//!   random payload and a recomputable checksum.
//! - [`SteerableCodec`]: fixed-length codes with a chosen number of
//!   digits at random positions, self-verifiable without stored state.
//!
//! Generators are single-writer by design: state carries no internal
//! locking, and callers that share an instance serialize access at their
//! own boundary. Codecs are pure and freely shareable.
//!
//! The wall clock and the RNG are injected through [`TimeSource`] and
//! [`RandSource`], so every component is deterministic under test.
//!
//! # Quick start
//!
//! ```
//! use codemint::{IdGenerator, FixedLengthGenerator, VerifiableCodec};
//!
//! // Constant-width serial codes.
//! let serials = FixedLengthGenerator::new(0).unwrap();
//! let code = serials.next_code().unwrap();
//! let serial = serials.get_serial(&code).unwrap();
//! assert_eq!(serials.serial_to_code(serial), code);
//!
//! // Checksum-verified redeem codes.
//! let vouchers = VerifiableCodec::new().unwrap();
//! let voucher = vouchers.create(42, 9).unwrap();
//! assert!(vouchers.verify(&voucher, true));
//! assert_eq!(vouchers.activity_id(&voucher), Some(42));
//! ```

mod alphabet;
mod error;
mod generator;
mod rand;
mod steerable;
mod time;
mod verifiable;

pub use crate::alphabet::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::rand::*;
pub use crate::steerable::*;
pub use crate::time::*;
pub use crate::verifiable::*;
