//! Long division.

use super::BigUnsigned;
use crate::common::util::add_carry;
use crate::common::util::shift_slice_left_copy;
use crate::common::util::shift_slice_right_copy;
use crate::common::util::sub_borrow;
use crate::defs::DoubleWord;
use crate::defs::Error;
use crate::defs::Word;
use crate::defs::MAX_LIMBS;
use crate::defs::WORD_BASE;
use crate::defs::WORD_BIT_SIZE;
use crate::defs::WORD_MAX;
use crate::defs::WORD_SIGNIFICANT_BIT;

impl BigUnsigned {
    /// Divides `self` by a single limb `d`, returns quotient and remainder.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `d` is zero.
    pub fn div_rem_by_word(&self, d: Word) -> Result<(Self, Word), Error> {
        if d == 0 {
            return Err(Error::DivisionByZero);
        }

        let d = d as DoubleWord;
        let mut q = Self::zero();
        let mut rh: DoubleWord = 0;

        for (a, b) in self.limbs().iter().zip(q.limbs[..self.len].iter_mut()).rev() {
            let qh = (rh << WORD_BIT_SIZE) | *a as DoubleWord;
            *b = (qh / d) as Word;
            rh = qh % d;
        }

        q.len = self.len;
        q.normalize();

        Ok((q, rh as Word))
    }

    /// Divides `self` by `d`, returns quotient and remainder.
    ///
    /// Multi-limb divisors use Knuth's algorithm D: both operands are shifted so that the
    /// most significant bit of the divisor is set, each quotient limb is estimated from the
    /// top two limbs of the running remainder, and the estimate is corrected downward.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `d` is zero.
    pub fn div_rem(&self, d: &Self) -> Result<(Self, Self), Error> {
        if d.is_zero() {
            return Err(Error::DivisionByZero);
        }

        if self < d {
            return Ok((Self::zero(), self.clone()));
        }

        if d.len == 1 {
            let (q, r) = self.div_rem_by_word(d.limbs[0])?;
            return Ok((q, Self::from_u32(r)));
        }

        let n = d.len;
        let m = self.len - n;
        let shift = d.limbs[n - 1].leading_zeros() as usize;

        // normalize: v = d * 2^shift, u = self * 2^shift with one extra limb
        let mut v = [0 as Word; MAX_LIMBS];
        let mut u = [0 as Word; MAX_LIMBS + 1];
        shift_slice_left_copy(d.limbs(), &mut v[..n], shift);
        shift_slice_left_copy(self.limbs(), &mut u[..self.len + 1], shift);

        debug_assert!(v[n - 1] & WORD_SIGNIFICANT_BIT != 0);

        let v1 = v[n - 1] as DoubleWord;
        let v2 = v[n - 2] as DoubleWord;
        let mut q = Self::zero();

        for j in (0..=m).rev() {
            let num = ((u[j + n] as DoubleWord) << WORD_BIT_SIZE) | u[j + n - 1] as DoubleWord;
            let mut qh = num / v1;
            let mut rh = num % v1;

            if qh > WORD_MAX as DoubleWord {
                qh = WORD_MAX as DoubleWord;
                rh = num - qh * v1;
            }

            while rh < WORD_BASE
                && qh * v2 > ((rh << WORD_BIT_SIZE) | u[j + n - 2] as DoubleWord)
            {
                qh -= 1;
                rh += v1;
            }

            // u[j..=j+n] -= qh * v
            let mut k: DoubleWord = 0;
            let mut c: Word = 0;
            for (a, b) in v[..n].iter().zip(u[j..j + n].iter_mut()) {
                let p = *a as DoubleWord * qh + k;
                k = p >> WORD_BIT_SIZE;
                c = sub_borrow(*b, p as Word, c, b);
            }
            let top = u[j + n];
            c = sub_borrow(top, k as Word, c, &mut u[j + n]);

            if c > 0 {
                // the estimate was one too large: add the divisor back
                qh -= 1;
                c = 0;
                for (a, b) in v[..n].iter().zip(u[j..j + n].iter_mut()) {
                    c = add_carry(*b, *a, c, b);
                }
                u[j + n] = u[j + n].wrapping_add(c);
            }

            q.limbs[j] = qh as Word;
        }

        q.len = m + 1;
        q.normalize();

        // the remainder is in the low n limbs of u, still scaled by 2^shift
        let mut r = Self::zero();
        shift_slice_right_copy(&u[..n], &mut r.limbs[..n], shift);
        r.len = n;
        r.normalize();

        Ok((q, r))
    }
}
