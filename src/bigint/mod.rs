//! Fixed-capacity unsigned big integer.

mod arith;
mod bigint;
mod conv;
mod div;

pub use bigint::BigUnsigned;
