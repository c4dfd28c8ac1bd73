//! Addition, subtraction, multiplication, and shifts.

use super::BigUnsigned;
use crate::common::util::add_carry;
use crate::common::util::shift_slice_left_copy;
use crate::common::util::shift_slice_right_copy;
use crate::common::util::sub_borrow;
use crate::defs::DoubleWord;
use crate::defs::Error;
use crate::defs::Word;
use crate::defs::MAX_LIMBS;
use crate::defs::WORD_BIT_SIZE;
use core::cmp::Ordering;
use core::iter::repeat;
use itertools::izip;

impl BigUnsigned {
    /// Returns `self + other`.
    ///
    /// ## Errors
    ///
    ///  - CapacityExceeded: the sum needs more than `MAX_LIMBS` limbs.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        let (long, short) = if self.len >= other.len { (self, other) } else { (other, self) };

        let mut ret = Self::zero();
        let mut c = 0;

        for (d, a, b) in izip!(
            ret.limbs.iter_mut(),
            long.limbs(),
            short.limbs().iter().chain(repeat(&0))
        ) {
            c = add_carry(*a, *b, c, d);
        }

        ret.len = long.len;

        if c > 0 {
            if ret.len == MAX_LIMBS {
                return Err(Error::CapacityExceeded);
            }
            ret.limbs[ret.len] = c;
            ret.len += 1;
        }

        Ok(ret)
    }

    /// Returns `self - other`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecondition: `self` is less than `other`.
    pub fn sub(&self, other: &Self) -> Result<Self, Error> {
        if self.compare(other) == Ordering::Less {
            return Err(Error::InvalidPrecondition);
        }

        let mut ret = Self::zero();
        let mut c = 0;

        for (d, a, b) in izip!(
            ret.limbs.iter_mut(),
            self.limbs(),
            other.limbs().iter().chain(repeat(&0))
        ) {
            c = sub_borrow(*a, *b, c, d);
        }

        debug_assert!(c == 0);

        ret.len = self.len;
        ret.normalize();

        Ok(ret)
    }

    /// Returns `self * k` for a single limb `k`.
    ///
    /// ## Errors
    ///
    ///  - CapacityExceeded: the product needs more than `MAX_LIMBS` limbs.
    pub fn mul_by_word(&self, k: Word) -> Result<Self, Error> {
        let k = k as DoubleWord;
        let mut ret = Self::zero();
        let mut carry: DoubleWord = 0;

        for (d, a) in ret.limbs.iter_mut().zip(self.limbs()) {
            let m = *a as DoubleWord * k + carry;
            *d = m as Word;
            carry = m >> WORD_BIT_SIZE;
        }

        ret.len = self.len;

        if carry > 0 {
            if ret.len == MAX_LIMBS {
                return Err(Error::CapacityExceeded);
            }
            ret.limbs[ret.len] = carry as Word;
            ret.len += 1;
        }

        ret.normalize();

        Ok(ret)
    }

    /// Returns `self * other` (schoolbook multiplication).
    ///
    /// ## Errors
    ///
    ///  - CapacityExceeded: the product needs more than `MAX_LIMBS` limbs.
    pub fn mul(&self, other: &Self) -> Result<Self, Error> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero());
        }

        let mut buf = [0 as Word; 2 * MAX_LIMBS];

        for (i, &d1) in self.limbs().iter().enumerate() {
            if d1 == 0 {
                continue;
            }

            let d1 = d1 as DoubleWord;
            let mut k: DoubleWord = 0;
            for (d2, d3) in other.limbs().iter().zip(buf[i..].iter_mut()) {
                let m = d1 * (*d2 as DoubleWord) + *d3 as DoubleWord + k;
                *d3 = m as Word;
                k = m >> WORD_BIT_SIZE;
            }
            buf[i + other.len] = k as Word;
        }

        Self::from_limbs(&buf[..self.len + other.len])
    }

    /// Returns `self * 2^n`.
    ///
    /// ## Errors
    ///
    ///  - CapacityExceeded: the result needs more than `MAX_LIMBS` limbs.
    pub fn shift_left(&self, n: usize) -> Result<Self, Error> {
        if self.is_zero() {
            return Ok(Self::zero());
        }

        match self.bit_len().checked_add(n) {
            Some(l) if l <= MAX_LIMBS * WORD_BIT_SIZE => {}
            _ => return Err(Error::CapacityExceeded),
        }

        let mut ret = Self::zero();
        shift_slice_left_copy(self.limbs(), &mut ret.limbs, n);

        ret.len = (self.len + n / WORD_BIT_SIZE + 1).min(MAX_LIMBS);
        ret.normalize();

        Ok(ret)
    }

    /// Returns `self / 2^n`, discarding the bits shifted out.
    pub fn shift_right(&self, n: usize) -> Self {
        let mut ret = Self::zero();
        shift_slice_right_copy(self.limbs(), &mut ret.limbs, n);

        ret.len = self.len;
        ret.normalize();

        ret
    }
}
