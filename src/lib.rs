//! Fixed-capacity unsigned big integers and exact, correctly rounded fixed-precision
//! decimal formatting of `f64` values.
//!
//! A finite double is converted to the exact ratio of two big integers, and its
//! decimal digits are produced by long division, so the output for any precision
//! matches the infinitely precise value rounded half to even. The same digits back the
//! `%f` conversion of a small printf-style formatter.
//!
//! ## Examples
//!
//! ```
//! use bigdtoa::{to_decimal_digits, format_to_slice, Arg};
//!
//! let d = to_decimal_digits(0.1, 20).unwrap();
//! assert_eq!(d.to_string(), "0.10000000000000000555");
//!
//! let mut buf = [0u8; 32];
//! let n = format_to_slice(&mut buf, "%s=%08.3f", &[Arg::Str("x"), Arg::Float(-2.0625)]).unwrap();
//! assert_eq!(&buf[..n], b"x=-002.062");
//! ```
//!
//! The big integer engine works on a fixed inline array of 32-bit limbs and never
//! allocates. Without the `std` feature the crate is `no_std` and needs only `alloc`
//! for the digit buffers of a conversion result.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(clippy::suspicious)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::module_inception)]
#![allow(clippy::len_without_is_empty)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod bigint;
mod common;
mod defs;
mod dtoa;
mod for_3rd;
mod format;
mod ieee754;
mod platform;
mod sink;

pub use crate::bigint::BigUnsigned;
pub use crate::defs::DoubleWord;
pub use crate::defs::Error;
pub use crate::defs::Sign;
pub use crate::defs::Word;
pub use crate::dtoa::to_decimal_digits;
pub use crate::dtoa::DecimalDigits;
pub use crate::dtoa::ExactRatio;
pub use crate::format::format_to_slice;
pub use crate::format::write_formatted;
pub use crate::format::Arg;
pub use crate::ieee754::decompose;
pub use crate::ieee754::Class;
pub use crate::ieee754::DecomposedDouble;
pub use crate::platform::check_byte_order;
pub use crate::platform::is_little_endian;
pub use crate::sink::Sink;
pub use crate::sink::SliceSink;

#[cfg(feature = "std")]
pub use crate::format::print;
#[cfg(feature = "std")]
pub use crate::sink::Console;
#[cfg(feature = "std")]
pub use crate::sink::ConsoleHandle;

pub use crate::defs::DEFAULT_PRECISION;
pub use crate::defs::MAX_LIMBS;
pub use crate::defs::WORD_BASE;
pub use crate::defs::WORD_BIT_SIZE;
pub use crate::defs::WORD_MAX;
pub use crate::defs::WORD_SIGNIFICANT_BIT;
