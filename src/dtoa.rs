//! Correctly rounded fixed-precision conversion of doubles to decimal.
//!
//! A finite double is turned into an exact ratio `numerator / denominator` of big
//! integers, with the denominator a power of two. The integer part is the quotient of
//! that ratio, and fractional digits are pulled from the remainder one at a time by
//! multiplying it by ten and dividing again. One digit beyond the requested precision,
//! together with whether anything non-zero remains after it, decides the rounding,
//! which is half to even.

use crate::bigint::BigUnsigned;
use crate::defs::Error;
use crate::defs::Sign;
use crate::ieee754::decompose;
use crate::ieee754::Class;
use crate::ieee754::DecomposedDouble;
use crate::sink::Sink;
use core::cmp::Ordering;
use core::fmt::{Display, Formatter};
use smallvec::SmallVec;

type DigitBuf = SmallVec<[u8; 32]>;

/// Exact value of a finite double as `numerator / denominator`.
/// The denominator is always a power of two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactRatio {
    numerator: BigUnsigned,
    denominator: BigUnsigned,
}

impl ExactRatio {
    /// Builds the ratio for the magnitude of `d`.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: `d` is an infinity or a NaN.
    ///  - CapacityExceeded: never for doubles with the default limb capacity.
    pub fn new(d: &DecomposedDouble) -> Result<Self, Error> {
        if !d.is_finite() {
            return Err(Error::InvalidArgument);
        }

        let significand = BigUnsigned::from_u64(d.significand());
        let e = d.exponent();

        if e >= 0 {
            Ok(ExactRatio {
                numerator: significand.shift_left(e as usize)?,
                denominator: BigUnsigned::from_u32(1),
            })
        } else {
            Ok(ExactRatio {
                numerator: significand,
                denominator: BigUnsigned::from_u32(1).shift_left(e.unsigned_abs() as usize)?,
            })
        }
    }

    /// Numerator of the ratio.
    #[inline]
    pub fn numerator(&self) -> &BigUnsigned {
        &self.numerator
    }

    /// Denominator of the ratio, a power of two.
    #[inline]
    pub fn denominator(&self) -> &BigUnsigned {
        &self.denominator
    }

    /// Returns numerator and denominator.
    pub fn into_parts(self) -> (BigUnsigned, BigUnsigned) {
        (self.numerator, self.denominator)
    }
}

/// Result of converting a double: sign, classification, and ASCII digits.
///
/// Finite values render as an optional `-`, at least one integer digit, a `.`, and
/// exactly `precision` fractional digits. Infinities and NaNs render as `inf`, `qNaN`,
/// or `sNaN` with an optional `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalDigits {
    sign: Sign,
    class: Class,
    integer: DigitBuf,
    fraction: DigitBuf,
}

impl DecimalDigits {
    /// Sign of the converted value.
    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns true if the sign is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    /// Classification of the converted double.
    #[inline]
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns true if the value has digits, i.e. it is not an infinity or a NaN.
    pub fn is_finite(&self) -> bool {
        self.token().is_none()
    }

    /// Integer part digits, most significant first. Empty for infinities and NaNs.
    #[inline]
    pub fn integer(&self) -> &[u8] {
        &self.integer
    }

    /// Fractional digits. Empty for infinities and NaNs.
    #[inline]
    pub fn fraction(&self) -> &[u8] {
        &self.fraction
    }

    /// Literal token for infinities and NaNs, without the sign.
    pub fn token(&self) -> Option<&'static str> {
        match self.class {
            Class::Infinity => Some("inf"),
            Class::QuietNan => Some("qNaN"),
            Class::SignalingNan => Some("sNaN"),
            Class::Zero | Class::Subnormal | Class::Normal => None,
        }
    }

    /// Number of bytes of the rendered value.
    pub fn rendered_len(&self) -> usize {
        let sign = if self.is_negative() { 1 } else { 0 };
        match self.token() {
            Some(t) => sign + t.len(),
            None => sign + self.integer.len() + 1 + self.fraction.len(),
        }
    }

    /// Writes the rendered value to `sink`, returns the number of bytes written.
    ///
    /// The sign, digits, and point are written separately, so on error `sink` may
    /// already hold the leading part of the value.
    pub fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<usize, Error> {
        if self.is_negative() {
            sink.write(b"-")?;
        }

        match self.token() {
            Some(t) => sink.write(t.as_bytes())?,
            None => {
                sink.write(&self.integer)?;
                sink.write(b".")?;
                sink.write(&self.fraction)?;
            }
        }

        Ok(self.rendered_len())
    }
}

impl Display for DecimalDigits {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }

        match self.token() {
            Some(t) => f.write_str(t),
            None => {
                // digits are ASCII
                let i = core::str::from_utf8(&self.integer).map_err(|_| core::fmt::Error)?;
                let d = core::str::from_utf8(&self.fraction).map_err(|_| core::fmt::Error)?;
                f.write_str(i)?;
                f.write_str(".")?;
                f.write_str(d)
            }
        }
    }
}

/// Converts `value` to decimal with `precision` fractional digits, rounding half to even.
/// This is the digit stream `printf("%.*f", precision, value)` prints.
///
/// ## Errors
///
///  - EndiannessUnsupported: the host is not little-endian.
///  - MemoryAllocation: failed to allocate memory for the digits.
///  - InvalidArgument: `precision` is `usize::MAX`.
pub fn to_decimal_digits(value: f64, precision: usize) -> Result<DecimalDigits, Error> {
    let d = decompose(value)?;
    precision.checked_add(1).ok_or(Error::InvalidArgument)?;

    tracing::trace!(class = ?d.class(), precision, "converting double");

    let mut ret = DecimalDigits {
        sign: d.sign(),
        class: d.class(),
        integer: DigitBuf::new(),
        fraction: DigitBuf::new(),
    };

    match d.class() {
        Class::Infinity | Class::QuietNan | Class::SignalingNan => Ok(ret),
        Class::Zero => {
            push_digit(&mut ret.integer, b'0')?;
            reserve(&mut ret.fraction, precision)?;
            ret.fraction.resize(precision, b'0');
            Ok(ret)
        }
        Class::Subnormal | Class::Normal => {
            let ratio = ExactRatio::new(&d)?;
            let (q, rem) = ratio.numerator().div_rem(ratio.denominator())?;

            push_integer_digits(q, &mut ret.integer)?;
            let (extra, sticky) =
                push_fraction_digits(rem, ratio.denominator(), precision, &mut ret.fraction)?;

            if round_up(&ret.integer, &ret.fraction, extra, sticky) {
                increment(&mut ret.integer, &mut ret.fraction)?;
            }

            Ok(ret)
        }
    }
}

fn reserve(buf: &mut DigitBuf, n: usize) -> Result<(), Error> {
    buf.try_reserve(n).map_err(|_| Error::MemoryAllocation)
}

fn push_digit(buf: &mut DigitBuf, d: u8) -> Result<(), Error> {
    reserve(buf, 1)?;
    buf.push(d);
    Ok(())
}

// Decimal digits of q, most significant first.
fn push_integer_digits(mut q: BigUnsigned, buf: &mut DigitBuf) -> Result<(), Error> {
    // log10(2) < 0.30103
    reserve(buf, q.bit_len() * 30103 / 100000 + 1)?;

    loop {
        let (q1, r) = q.div_rem_by_word(10)?;
        push_digit(buf, b'0' + r as u8)?;
        q = q1;
        if q.is_zero() {
            break;
        }
    }

    buf.reverse();

    Ok(())
}

// Pushes `precision` fractional digits of rem / den, returns the digit after them
// and whether anything non-zero follows that digit.
fn push_fraction_digits(
    mut rem: BigUnsigned,
    den: &BigUnsigned,
    precision: usize,
    buf: &mut DigitBuf,
) -> Result<(u8, bool), Error> {
    let n = precision + 1;
    reserve(buf, n)?;

    while buf.len() < n && !rem.is_zero() {
        let (digit, r) = rem.mul_by_word(10)?.div_rem(den)?;
        debug_assert!(digit.len() == 1 && digit.limbs()[0] < 10);
        buf.push(b'0' + digit.limbs()[0] as u8);
        rem = r;
    }

    // once the remainder is zero every further digit is zero
    buf.resize(n, b'0');
    let extra = buf.pop().unwrap_or(b'0');

    Ok((extra, !rem.is_zero()))
}

fn round_up(integer: &[u8], fraction: &[u8], extra: u8, sticky: bool) -> bool {
    match extra.cmp(&b'5') {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            if sticky {
                true
            } else {
                // a tie: round to the even neighbour
                let last = fraction.last().or_else(|| integer.last()).copied().unwrap_or(b'0');
                (last - b'0') & 1 != 0
            }
        }
    }
}

// Adds one unit in the last place, carrying through nines into the integer part.
fn increment(integer: &mut DigitBuf, fraction: &mut DigitBuf) -> Result<(), Error> {
    for d in fraction.iter_mut().rev().chain(integer.iter_mut().rev()) {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return Ok(());
        }
    }

    reserve(integer, 1)?;
    integer.insert(0, b'1');

    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::{
        string::{String, ToString},
        vec::Vec,
    };

    fn conv(value: f64, precision: usize) -> String {
        to_decimal_digits(value, precision).unwrap().to_string()
    }

    #[test]
    fn test_special_values() {
        assert_eq!(conv(0.0, 3), "0.000");
        assert_eq!(conv(0.0, 0), "0.");
        assert_eq!(conv(-0.0, 2), "-0.00");
        assert_eq!(conv(f64::INFINITY, 2), "inf");
        assert_eq!(conv(f64::NEG_INFINITY, 2), "-inf");
        assert_eq!(conv(f64::NAN, 0), "qNaN");
        assert_eq!(conv(-f64::NAN, 5), "-qNaN");
        assert_eq!(conv(f64::from_bits(0x7FF0_0000_0000_0001), 1), "sNaN");
        assert_eq!(conv(f64::from_bits(0xFFF4_0000_0000_0000), 1), "-sNaN");

        let d = to_decimal_digits(f64::INFINITY, 4).unwrap();
        assert!(!d.is_finite());
        assert_eq!(d.class(), Class::Infinity);
        assert!(d.integer().is_empty() && d.fraction().is_empty());
        assert_eq!(d.rendered_len(), 3);
    }

    #[test]
    fn test_conversion() {
        assert_eq!(conv(1.0, 2), "1.00");
        assert_eq!(conv(-0.5, 1), "-0.5");
        assert_eq!(conv(1.0, 0), "1.");
        assert_eq!(conv(123.456, 3), "123.456");
        assert_eq!(conv(0.1, 20), "0.10000000000000000555");
        assert_eq!(conv(1e22, 0), "10000000000000000000000.");
        assert_eq!(conv(2f64.powi(64), 1), "18446744073709551616.0");
        assert_eq!(conv(-1234.5678, 2), "-1234.57");
        assert_eq!(conv(-0.001, 2), "-0.00");

        let d = to_decimal_digits(-42.25, 3).unwrap();
        assert_eq!(d.sign(), Sign::Neg);
        assert_eq!(d.class(), Class::Normal);
        assert_eq!(d.integer(), b"42");
        assert_eq!(d.fraction(), b"250");
        assert_eq!(d.rendered_len(), 7);
    }

    #[test]
    fn test_extremes() {
        // 2^-1074 = 4.9406564584124654e-324
        let tiny = f64::from_bits(1);
        let s = conv(tiny, 340);
        let mut expected = String::from("0.");
        for _ in 0..323 {
            expected.push('0');
        }
        expected.push_str("4940656458412465441765687928682213723650598");
        assert!(s.starts_with(&expected));
        assert_eq!(s.len(), 342);

        assert_eq!(conv(tiny, 40), "0.0000000000000000000000000000000000000000");
        assert_eq!(conv(-tiny, 2), "-0.00");

        let d = to_decimal_digits(tiny, 1100).unwrap();
        assert_eq!(d.class(), Class::Subnormal);
        // the expansion of 2^-1074 has exactly 1074 fractional digits
        assert_eq!(d.fraction()[1073], b'5');
        assert!(d.fraction()[1074..].iter().all(|&c| c == b'0'));

        let d = to_decimal_digits(f64::MAX, 0).unwrap();
        assert_eq!(d.integer().len(), 309);
        assert!(d.integer().starts_with(b"17976931348623157"));

        let d = to_decimal_digits(f64::MIN_POSITIVE, 1100).unwrap();
        assert!(d.fraction()[..307].iter().all(|&c| c == b'0'));
        assert!(d.fraction()[307..].starts_with(b"22250738585072014"));
    }

    #[test]
    fn test_rounding() {
        // exact ties round to even
        assert_eq!(conv(0.125, 2), "0.12");
        assert_eq!(conv(0.375, 2), "0.38");
        assert_eq!(conv(0.25, 1), "0.2");
        assert_eq!(conv(0.75, 1), "0.8");
        assert_eq!(conv(0.5, 0), "0.");
        assert_eq!(conv(1.5, 0), "2.");
        assert_eq!(conv(2.5, 0), "2.");
        assert_eq!(conv(3.5, 0), "4.");
        assert_eq!(conv(-2.5, 0), "-2.");

        // anything beyond the tie digit rounds up
        assert_eq!(conv(0.135, 2), "0.14");

        // below the tie
        assert_eq!(conv(1.005, 2), "1.00");
        assert_eq!(conv(9.995, 2), "9.99");
        assert_eq!(conv(0.95, 1), "0.9");

        // carry into the integer part
        assert_eq!(conv(99.5, 0), "100.");
        assert_eq!(conv(9.96, 1), "10.0");
        assert_eq!(conv(999.9996, 3), "1000.000");
        assert_eq!(conv(0.96, 1), "1.0");
    }

    #[test]
    fn test_exact_ratio() {
        let r = ExactRatio::new(&decompose(1.0).unwrap()).unwrap();
        assert_eq!(r.numerator(), &BigUnsigned::from_u64(1 << 52));
        assert_eq!(r.denominator(), &BigUnsigned::from_u32(1).shift_left(52).unwrap());

        let r = ExactRatio::new(&decompose(2f64.powi(60)).unwrap()).unwrap();
        assert_eq!(r.numerator(), &BigUnsigned::from_u32(1).shift_left(60).unwrap());
        assert_eq!(r.denominator(), &BigUnsigned::from_u32(1));

        let (n, d) = ExactRatio::new(&decompose(f64::from_bits(3)).unwrap()).unwrap().into_parts();
        assert_eq!(n, BigUnsigned::from_u32(3));
        assert_eq!(d.bit_len(), 1075);

        let r = ExactRatio::new(&decompose(0.0).unwrap()).unwrap();
        assert!(r.numerator().is_zero());

        assert_eq!(
            ExactRatio::new(&decompose(f64::INFINITY).unwrap()),
            Err(Error::InvalidArgument)
        );
        assert_eq!(ExactRatio::new(&decompose(f64::NAN).unwrap()), Err(Error::InvalidArgument));
    }

    #[test]
    fn test_write_to() {
        let mut v = Vec::new();
        let d = to_decimal_digits(-3.75, 1).unwrap();
        assert_eq!(d.write_to(&mut v).unwrap(), 4);
        assert_eq!(v, b"-3.8");

        let mut buf = [0u8; 3];
        let mut s = crate::sink::SliceSink::new(&mut buf);
        assert_eq!(d.write_to(&mut s), Err(Error::BufferInsufficient));
        assert_eq!(s.as_bytes(), b"-3.");

        assert_eq!(to_decimal_digits(1.0, usize::MAX), Err(Error::InvalidArgument));
        assert_eq!(to_decimal_digits(0.0, usize::MAX), Err(Error::InvalidArgument));
    }
}
