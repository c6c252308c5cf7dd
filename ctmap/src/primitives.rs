//! The only path by which the map reads or writes key and value bytes
//!
//! Routing every comparison and copy through these three functions keeps the scans in
//! [crate::map] free of ad-hoc byte handling. In test builds each call is also counted, which
//! lets the tests check that an operation's work depends on nothing but the entry count.

use subtle::Choice;

#[inline]
pub(crate) fn memeq(a: &[u8], b: &[u8]) -> Choice {
    #[cfg(test)]
    counter::record(|c| c.compares += 1);
    ctmap_constant_time::memeq(a, b)
}

#[inline]
pub(crate) fn conditional_copy(dst: &mut [u8], src: &[u8], choice: Choice) {
    #[cfg(test)]
    counter::record(|c| c.copies += 1);
    ctmap_constant_time::conditional_copy(dst, src, choice)
}

#[inline]
pub(crate) fn conditional_zero(dst: &mut [u8], choice: Choice) {
    #[cfg(test)]
    counter::record(|c| c.zeroings += 1);
    ctmap_constant_time::conditional_zero(dst, choice)
}
