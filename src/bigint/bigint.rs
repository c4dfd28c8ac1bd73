//! Big integer representation and primitive operations.

use crate::common::util::significant_len;
use crate::defs::Error;
use crate::defs::Word;
use crate::defs::MAX_LIMBS;
use crate::defs::WORD_BIT_SIZE;
use core::cmp::Ordering;

/// Non-negative integer of at most `MAX_LIMBS` 32-bit limbs.
///
/// Limbs are stored least significant first in an inline array. The value is kept
/// normalized: `len` is at least 1, the limb at `len - 1` is non-zero unless the value
/// is zero, and limbs from `len` upward are zero.
///
/// The type has no sign. Callers that need one carry a separate [`Sign`](crate::Sign).
/// It is not `Copy`: use `clone` or `copy_from`.
#[derive(Clone, Hash)]
pub struct BigUnsigned {
    pub(super) limbs: [Word; MAX_LIMBS],
    pub(super) len: usize,
}

impl BigUnsigned {
    /// Returns zero.
    pub const fn zero() -> Self {
        BigUnsigned {
            limbs: [0; MAX_LIMBS],
            len: 1,
        }
    }

    /// Returns `v` as a big integer.
    pub const fn from_u32(v: u32) -> Self {
        let mut limbs = [0; MAX_LIMBS];
        limbs[0] = v;
        BigUnsigned { limbs, len: 1 }
    }

    /// Returns `v` as a big integer.
    pub const fn from_u64(v: u64) -> Self {
        let mut limbs = [0; MAX_LIMBS];
        limbs[0] = v as Word;
        limbs[1] = (v >> WORD_BIT_SIZE) as Word;
        let len = if limbs[1] != 0 { 2 } else { 1 };
        BigUnsigned { limbs, len }
    }

    /// Builds a number from limbs given least significant first. Leading zero limbs are dropped.
    ///
    /// ## Errors
    ///
    ///  - CapacityExceeded: more than `MAX_LIMBS` significant limbs.
    pub fn from_limbs(w: &[Word]) -> Result<Self, Error> {
        let n = significant_len(w);
        if n > MAX_LIMBS {
            return Err(Error::CapacityExceeded);
        }

        let mut ret = Self::zero();
        ret.limbs[..n].copy_from_slice(&w[..n]);
        ret.len = n.max(1);

        Ok(ret)
    }

    /// Overwrites `self` with the value of `src`.
    pub fn copy_from(&mut self, src: &Self) {
        self.limbs[..src.len].copy_from_slice(src.limbs());
        self.limbs[src.len..].fill(0);
        self.len = src.len;
    }

    /// Drops zero limbs above the most significant non-zero limb.
    #[inline]
    pub(crate) fn normalize(&mut self) {
        while self.len > 1 && self.limbs[self.len - 1] == 0 {
            self.len -= 1;
        }
    }

    /// Compares `self` with `other`.
    pub fn compare(&self, other: &Self) -> Ordering {
        // both sides are normalized, so fewer limbs means smaller
        self.len
            .cmp(&other.len)
            .then_with(|| self.limbs().iter().rev().cmp(other.limbs().iter().rev()))
    }

    /// Returns true if the number is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.len == 1 && self.limbs[0] == 0
    }

    /// Number of limbs in use. Zero occupies one limb.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Limbs in use, least significant first.
    #[inline]
    pub fn limbs(&self) -> &[Word] {
        &self.limbs[..self.len]
    }

    /// Number of significant bits; 0 for zero.
    pub fn bit_len(&self) -> usize {
        let top = self.limbs[self.len - 1];
        (self.len - 1) * WORD_BIT_SIZE + (WORD_BIT_SIZE - top.leading_zeros() as usize)
    }

    /// Returns the value as `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        match self.len {
            1 => Some(self.limbs[0] as u64),
            2 => Some(((self.limbs[1] as u64) << WORD_BIT_SIZE) | self.limbs[0] as u64),
            _ => None,
        }
    }
}

impl Default for BigUnsigned {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for BigUnsigned {
    fn eq(&self, other: &Self) -> bool {
        self.limbs() == other.limbs()
    }
}

impl Eq for BigUnsigned {}

impl PartialOrd for BigUnsigned {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigUnsigned {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl From<u32> for BigUnsigned {
    fn from(v: u32) -> Self {
        Self::from_u32(v)
    }
}

impl From<u64> for BigUnsigned {
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}
