//! The fixed sizes shared by every entry of a map

use crate::error::{Argument, Error, Result};

/// Key and value sizes of a [crate::CtMap]
///
/// An entry is `key_size + val_size` bytes: the key occupies `[0, key_size)`, the value
/// `[key_size, key_size + val_size)`. A `val_size` of zero turns the map into a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Size of every key in bytes
    pub key_size: usize,
    /// Size of every value in bytes
    pub val_size: usize,
}

impl Layout {
    /// Create a layout from the two sizes
    pub const fn new(key_size: usize, val_size: usize) -> Self {
        Self { key_size, val_size }
    }

    /// Size of one stored entry
    ///
    /// # Panics
    ///
    /// If the sum overflows `usize`.
    pub const fn entry_size(&self) -> usize {
        match self.key_size.checked_add(self.val_size) {
            Some(size) => size,
            None => panic!("entry size overflow"),
        }
    }

    pub(crate) fn check_key(&self, arg: Argument, key: &[u8]) -> Result<()> {
        Error::check_size(arg, self.key_size, key.len())
    }

    pub(crate) fn check_val(&self, val: &[u8]) -> Result<()> {
        Error::check_size(Argument::Val, self.val_size, val.len())
    }
}
