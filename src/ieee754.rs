//! Decomposition of IEEE-754 binary64 values.

use crate::defs::Error;
use crate::defs::Sign;
use crate::platform::check_byte_order;

/// Exponent bias of a double.
pub const EXPONENT_BIAS: i32 = 1023;

/// Number of explicitly stored fraction bits.
pub const FRACTION_BIT_SIZE: u32 = 52;

/// Biased exponent of infinities and NaNs.
pub const EXPONENT_SPECIAL: u16 = 0x7FF;

// Most significant fraction bit, set for quiet NaNs.
const QUIET_BIT: u64 = 1 << (FRACTION_BIT_SIZE - 1);

const IMPLICIT_BIT: u64 = 1 << FRACTION_BIT_SIZE;

/// Classification of a double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// Positive or negative zero.
    Zero,

    /// Biased exponent 0 with a non-zero fraction.
    Subnormal,

    /// Biased exponent in 1..=2046.
    Normal,

    /// Positive or negative infinity.
    Infinity,

    /// NaN with the most significant fraction bit set.
    QuietNan,

    /// NaN with the most significant fraction bit clear.
    SignalingNan,
}

/// Sign, exponent, and fraction fields of a double, with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecomposedDouble {
    sign: Sign,
    biased_exponent: u16,
    fraction: u64,
    class: Class,
}

impl DecomposedDouble {
    /// Splits `value` into its fields.
    ///
    /// ## Errors
    ///
    ///  - EndiannessUnsupported: the host is not little-endian.
    pub fn new(value: f64) -> Result<Self, Error> {
        check_byte_order()?;

        // low word first on a little-endian host
        let b = value.to_ne_bytes();
        let low = u32::from_ne_bytes([b[0], b[1], b[2], b[3]]);
        let high = u32::from_ne_bytes([b[4], b[5], b[6], b[7]]);

        let sign = if (high >> 31) & 1 != 0 { Sign::Neg } else { Sign::Pos };
        let biased_exponent = ((high >> 20) & 0x7FF) as u16;
        let fraction = (((high & 0xF_FFFF) as u64) << 32) | low as u64;

        let class = if biased_exponent == 0 {
            if fraction == 0 {
                Class::Zero
            } else {
                Class::Subnormal
            }
        } else if biased_exponent == EXPONENT_SPECIAL {
            if fraction == 0 {
                Class::Infinity
            } else if fraction & QUIET_BIT != 0 {
                Class::QuietNan
            } else {
                Class::SignalingNan
            }
        } else {
            Class::Normal
        };

        Ok(DecomposedDouble {
            sign,
            biased_exponent,
            fraction,
            class,
        })
    }

    /// Sign of the value; NaNs and zeroes carry one too.
    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns true if the sign bit is set.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    /// Stored 11-bit exponent.
    #[inline]
    pub fn biased_exponent(&self) -> u16 {
        self.biased_exponent
    }

    /// Stored 52-bit fraction.
    #[inline]
    pub fn fraction(&self) -> u64 {
        self.fraction
    }

    /// Classification of the value.
    #[inline]
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns true for positive or negative zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.class == Class::Zero
    }

    /// Returns true if the value is subnormal.
    #[inline]
    pub fn is_subnormal(&self) -> bool {
        self.class == Class::Subnormal
    }

    /// Returns true if the value is normal.
    #[inline]
    pub fn is_normal(&self) -> bool {
        self.class == Class::Normal
    }

    /// Returns true for positive or negative infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.class == Class::Infinity
    }

    /// Returns true for a quiet NaN.
    #[inline]
    pub fn is_quiet_nan(&self) -> bool {
        self.class == Class::QuietNan
    }

    /// Returns true for a signaling NaN.
    #[inline]
    pub fn is_signaling_nan(&self) -> bool {
        self.class == Class::SignalingNan
    }

    /// Returns true for any NaN.
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.is_quiet_nan() || self.is_signaling_nan()
    }

    /// Returns true for zeroes, subnormal and normal numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        matches!(self.class, Class::Zero | Class::Subnormal | Class::Normal)
    }

    /// Integer significand: the fraction with the implicit leading one restored for normal numbers.
    pub fn significand(&self) -> u64 {
        if self.is_normal() {
            self.fraction | IMPLICIT_BIT
        } else {
            self.fraction
        }
    }

    /// Binary exponent `e` of a finite value, such that `|value| = significand * 2^e`.
    pub fn exponent(&self) -> i32 {
        if self.biased_exponent == 0 {
            1 - EXPONENT_BIAS - FRACTION_BIT_SIZE as i32
        } else {
            self.biased_exponent as i32 - EXPONENT_BIAS - FRACTION_BIT_SIZE as i32
        }
    }
}

/// Splits `value` into its fields. See [`DecomposedDouble::new`].
pub fn decompose(value: f64) -> Result<DecomposedDouble, Error> {
    DecomposedDouble::new(value)
}
