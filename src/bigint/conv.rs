//! Conversion to and from text.

use super::BigUnsigned;
use crate::defs::Error;
use crate::defs::Word;
use crate::defs::MAX_LIMBS;
use core::fmt::{Debug, Display, Formatter};
use core::str::FromStr;

// Largest power of ten in a limb, and its number of digits.
const CHUNK_BASE: Word = 1_000_000_000;
const CHUNK_DIGITS: usize = 9;

impl Display for BigUnsigned {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        // each limb holds less than two 9-digit chunks
        let mut chunks = [0 as Word; 2 * MAX_LIMBS];
        let mut n = 0;
        let mut x = self.clone();

        loop {
            let (q, r) = x.div_rem_by_word(CHUNK_BASE).map_err(|_| core::fmt::Error)?;
            chunks[n] = r;
            n += 1;
            x = q;
            if x.is_zero() {
                break;
            }
        }

        write!(f, "{}", chunks[n - 1])?;
        for c in chunks[..n - 1].iter().rev() {
            write!(f, "{:0width$}", c, width = CHUNK_DIGITS)?;
        }

        Ok(())
    }
}

impl Debug for BigUnsigned {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let digitlen = core::mem::size_of::<Word>() * 2;
        let top = self.len - 1;

        write!(f, "{:#x}", self.limbs[top])?;
        for v in self.limbs[..top].iter().rev() {
            write!(f, "_{:01$x}", v, digitlen)?;
        }

        Ok(())
    }
}

impl FromStr for BigUnsigned {
    type Err = Error;

    /// Parses a string of decimal digits.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: the string is empty or contains a non-digit character.
    ///  - CapacityExceeded: the value needs more than `MAX_LIMBS` limbs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::InvalidArgument);
        }

        let mut ret = Self::zero();

        for c in s.as_bytes().chunks(CHUNK_DIGITS) {
            let mut v: Word = 0;
            let mut scale: Word = 1;
            for &b in c {
                if !b.is_ascii_digit() {
                    return Err(Error::InvalidArgument);
                }
                v = v * 10 + (b - b'0') as Word;
                scale *= 10;
            }
            ret = ret.mul_by_word(scale)?.add(&Self::from_u32(v))?;
        }

        Ok(ret)
    }
}

#[cfg(feature = "random")]
impl BigUnsigned {
    /// Returns a random number of at most `len` limbs.
    ///
    /// ## Errors
    ///
    ///  - CapacityExceeded: `len` is greater than `MAX_LIMBS`.
    pub fn random(len: usize) -> Result<Self, Error> {
        if len > MAX_LIMBS {
            return Err(Error::CapacityExceeded);
        }

        let mut ret = Self::zero();
        for v in ret.limbs[..len].iter_mut() {
            *v = rand::random::<Word>();
        }

        ret.len = len.max(1);
        ret.normalize();

        Ok(ret)
    }
}
