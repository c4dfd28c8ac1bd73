//! Auxiliary functions.

use crate::defs::{Word, WORD_BIT_SIZE};

#[inline(always)]
#[allow(unused_unsafe)]
pub fn add_carry(a: Word, b: Word, c: Word, r: &mut Word) -> Word {
    #[cfg(target_arch = "x86_64")]
    {
        // platform-specific operation
        unsafe { core::arch::x86_64::_addcarry_u32(c as u8, a, b, r) as Word }
    }

    #[cfg(target_arch = "x86")]
    {
        // platform-specific operation
        unsafe { core::arch::x86::_addcarry_u32(c as u8, a, b, r) as Word }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
    {
        use crate::defs::DoubleWord;
        use crate::defs::WORD_BASE;

        let mut s = c as DoubleWord + a as DoubleWord + b as DoubleWord;
        if s >= WORD_BASE {
            s -= WORD_BASE;
            *r = s as Word;
            1
        } else {
            *r = s as Word;
            0
        }
    }
}

#[inline(always)]
#[allow(unused_unsafe)]
pub fn sub_borrow(a: Word, b: Word, c: Word, r: &mut Word) -> Word {
    #[cfg(target_arch = "x86_64")]
    {
        // platform-specific operation
        unsafe { core::arch::x86_64::_subborrow_u32(c as u8, a, b, r) as Word }
    }

    #[cfg(target_arch = "x86")]
    {
        // platform-specific operation
        unsafe { core::arch::x86::_subborrow_u32(c as u8, a, b, r) as Word }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
    {
        use crate::defs::DoubleWord;
        use crate::defs::WORD_BASE;

        let v1 = a as DoubleWord;
        let v2 = b as DoubleWord + c as DoubleWord;

        if v1 < v2 {
            *r = (v1 + WORD_BASE - v2) as Word;
            1
        } else {
            *r = (v1 - v2) as Word;
            0
        }
    }
}

/// Shift `m` left by `n` bits and put the result in `m2`.
/// Words of `m2` above the shifted value are zeroed; bits that do not fit in `m2` are lost.
pub fn shift_slice_left_copy(m: &[Word], m2: &mut [Word], n: usize) {
    let idx = n / WORD_BIT_SIZE;
    let shift = n % WORD_BIT_SIZE;
    if idx >= m2.len() {
        m2.fill(0);
    } else if shift > 0 {
        m2[..idx].fill(0);
        let mut dst = m2[idx..].iter_mut();
        let mut prev = 0;
        for (a, b) in m.iter().zip(dst.by_ref()) {
            *b = (prev >> (WORD_BIT_SIZE - shift)) | (*a << shift);
            prev = *a;
        }
        if let Some(b) = dst.next() {
            *b = prev >> (WORD_BIT_SIZE - shift);
        }
        for b in dst {
            *b = 0;
        }
    } else {
        m2[..idx].fill(0);
        let mut dst = m2[idx..].iter_mut();
        for (a, b) in m.iter().zip(dst.by_ref()) {
            *b = *a;
        }
        for b in dst {
            *b = 0;
        }
    }
}

/// Shift `m` right by `n` bits and put the result in `m2`.
/// Bits shifted out below the lowest word are discarded; the rest of `m2` is zeroed.
pub fn shift_slice_right_copy(m: &[Word], m2: &mut [Word], n: usize) {
    let idx = n / WORD_BIT_SIZE;
    let shift = n % WORD_BIT_SIZE;
    let src = if idx < m.len() { &m[idx..] } else { &[] };
    let mut dst = m2.iter_mut();

    if shift > 0 {
        let mut iter = src.iter().peekable();
        while let Some(&a) = iter.next() {
            let high = iter.peek().map_or(0, |&&b| b << (WORD_BIT_SIZE - shift));
            match dst.next() {
                Some(b) => *b = (a >> shift) | high,
                None => return,
            }
        }
    } else {
        for (a, b) in src.iter().zip(dst.by_ref()) {
            *b = *a;
        }
    }

    for b in dst {
        *b = 0;
    }
}

/// Number of words in `m` without the leading zero words.
pub fn significant_len(m: &[Word]) -> usize {
    m.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::defs::WORD_MAX;

    #[test]
    fn test_carry_borrow() {
        let mut r = 0;
        assert_eq!(add_carry(WORD_MAX, 1, 0, &mut r), 1);
        assert_eq!(r, 0);
        assert_eq!(add_carry(WORD_MAX, WORD_MAX, 1, &mut r), 1);
        assert_eq!(r, WORD_MAX);
        assert_eq!(add_carry(2, 3, 1, &mut r), 0);
        assert_eq!(r, 6);

        assert_eq!(sub_borrow(0, 1, 0, &mut r), 1);
        assert_eq!(r, WORD_MAX);
        assert_eq!(sub_borrow(5, 5, 1, &mut r), 1);
        assert_eq!(r, WORD_MAX);
        assert_eq!(sub_borrow(7, 3, 1, &mut r), 0);
        assert_eq!(r, 3);
    }

    #[test]
    fn test_shift_copy() {
        let m = [0x8000_0001, 0x1234_5678];
        let mut m2 = [WORD_MAX; 4];

        shift_slice_left_copy(&m, &mut m2, 36);
        assert_eq!(m2, [0, 0x0000_0010, 0x2345_6788, 0x1]);

        let mut m3 = [WORD_MAX; 3];
        shift_slice_right_copy(&m2, &mut m3, 36);
        assert_eq!(m3, [0x8000_0001, 0x1234_5678, 0]);

        shift_slice_left_copy(&m, &mut m2, 64);
        assert_eq!(m2, [0, 0, 0x8000_0001, 0x1234_5678]);

        shift_slice_right_copy(&m, &mut m3, 64);
        assert_eq!(m3, [0, 0, 0]);

        shift_slice_right_copy(&m, &mut m3, 1);
        assert_eq!(m3, [0x4000_0000, 0x091A_2B3C, 0]);
    }

    #[test]
    fn test_significant_len() {
        assert_eq!(significant_len(&[]), 0);
        assert_eq!(significant_len(&[0, 0]), 0);
        assert_eq!(significant_len(&[1, 0, 0]), 1);
        assert_eq!(significant_len(&[0, 0, 5]), 3);
    }
}
