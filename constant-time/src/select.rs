//! Conditional copy and conditional zeroing

use core::hint::black_box;
use subtle::{Choice, ConditionallySelectable};

/// Copies `src` into `dst` if `choice` is set, leaves `dst` unchanged otherwise
///
/// The copy is a bitwise blend of both slices under a mask derived from `choice`; there is no
/// branch on `choice` and every byte of both slices is read and every byte of `dst` is
/// written regardless of its value.
///
/// # Panics
/// If source and destination are of different sizes.
///
/// # Leaks
/// - The function execution time is linearly proportional to the input length
/// - Length mismatches between source and destination are immediately detectable via panic
///
/// # Examples
///
/// ```
/// use ctmap_constant_time::conditional_copy;
/// use subtle::Choice;
///
/// let mut dst = *b"hello";
/// conditional_copy(&mut dst, b"world", Choice::from(0));
/// assert_eq!(&dst, b"hello");
/// conditional_copy(&mut dst, b"world", Choice::from(1));
/// assert_eq!(&dst, b"world");
/// ```
#[inline]
pub fn conditional_copy(dst: &mut [u8], src: &[u8], choice: Choice) {
    assert!(black_box(src.len()) == black_box(dst.len()));
    for (dv, sv) in dst.iter_mut().zip(src.iter()) {
        black_box(dv).conditional_assign(black_box(sv), choice);
    }
}

/// Overwrites `dst` with zeros if `choice` is set, leaves it unchanged otherwise
///
/// Each byte is ANDed with the complement of a mask that is `0xff` for a set `choice` and
/// `0x00` otherwise, so the same stores happen in both cases.
///
/// # Leaks
/// The function execution time is linearly proportional to the input length.
///
/// # Examples
///
/// ```
/// use ctmap_constant_time::conditional_zero;
/// use subtle::Choice;
///
/// let mut buf = [0xa5u8; 4];
/// conditional_zero(&mut buf, Choice::from(0));
/// assert_eq!(buf, [0xa5; 4]);
/// conditional_zero(&mut buf, Choice::from(1));
/// assert_eq!(buf, [0; 4]);
/// ```
#[inline]
pub fn conditional_zero(dst: &mut [u8], choice: Choice) {
    let mask = black_box(choice.unwrap_u8()).wrapping_neg();
    for dv in dst.iter_mut() {
        *black_box(dv) &= !mask;
    }
}

/// Functional checks; timing is covered by the statistical test in [crate::memcmp]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_touches_nothing_when_unset() {
        let mut dst = [0x11u8; 32];
        conditional_copy(&mut dst, &[0xeeu8; 32], Choice::from(0));
        assert_eq!(dst, [0x11; 32]);
    }

    #[test]
    fn copy_overwrites_every_byte_when_set() {
        let src: Vec<u8> = (0..=255).collect();
        let mut dst = vec![0xffu8; 256];
        conditional_copy(&mut dst, &src, Choice::from(1));
        assert_eq!(dst, src);
    }

    #[test]
    #[should_panic]
    fn copy_rejects_mismatched_lengths() {
        let mut dst = [0u8; 3];
        conditional_copy(&mut dst, &[0u8; 4], Choice::from(1));
    }

    #[test]
    fn zero_on_empty_slice() {
        let mut dst: [u8; 0] = [];
        conditional_zero(&mut dst, Choice::from(1));
    }

    #[test]
    fn zero_clears_all_bits() {
        let mut dst = [0xffu8, 0x80, 0x01, 0x5a];
        conditional_zero(&mut dst, Choice::from(1));
        assert_eq!(dst, [0; 4]);
    }
}
