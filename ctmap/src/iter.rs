//! Iteration over the entries of a [crate::CtMap]

use std::iter::FusedIterator;

use crate::arena::EntryArena;

/// Iterator over `(key, value)` pairs of a [crate::CtMap], in storage order
///
/// Created by [crate::CtMap::iter]. **Not constant-time**: it exists for bulk export, and the
/// caller is responsible for whatever it does with the bytes it gets.
pub struct Iter<'a> {
    entries: &'a EntryArena,
    key_size: usize,
    front: usize,
    back: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(entries: &'a EntryArena, key_size: usize) -> Self {
        Self {
            entries,
            key_size,
            front: 0,
            back: entries.len(),
        }
    }

    fn split(&self, idx: usize) -> (&'a [u8], &'a [u8]) {
        self.entries.entry(idx).split_at(self.key_size)
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.front += 1;
        Some(self.split(self.front - 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.split(self.back))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}
