//! Back-to-back storage for fixed-size entries
//!
//! The arena keeps three numbers apart that a `Vec` would merge: the live entry count, the
//! logical capacity, and the size of the physical buffer. Deleting from the map lowers the
//! first two together (see [EntryArena::shrink_by]) so that whether the next insertion has to
//! reallocate is the same as if the deleted entry had never been added.

use zeroize::Zeroize;

/// Minimum logical capacity after the first reallocation
const MIN_GROWTH: usize = 4;

/// Byte length of `entries` entries of `entry_size` bytes each
///
/// # Panics
///
/// If the product does not fit into `usize`, like [Vec::with_capacity] does.
fn storage_len(entry_size: usize, entries: usize) -> usize {
    match entry_size.checked_mul(entries) {
        Some(len) => len,
        None => panic!("capacity overflow"),
    }
}

/// Contiguous, zero-initialised storage of equally sized byte entries
pub(crate) struct EntryArena {
    /// Physical buffer; always fully initialised, never resized in place
    storage: Vec<u8>,
    /// Size of every entry in bytes
    entry_size: usize,
    /// Number of live entries
    len: usize,
    /// Number of entries that fit before the next reallocation
    cap: usize,
}

impl EntryArena {
    /// An arena without any storage
    pub fn new(entry_size: usize) -> Self {
        Self {
            storage: Vec::new(),
            entry_size,
            len: 0,
            cap: 0,
        }
    }

    /// An arena that fits `capacity` entries without reallocating
    pub fn with_capacity(entry_size: usize, capacity: usize) -> Self {
        Self {
            storage: vec![0u8; storage_len(entry_size, capacity)],
            entry_size,
            len: 0,
            cap: capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Borrow live entry `idx`
    ///
    /// # Panics
    ///
    /// If `idx` is not a live entry.
    pub fn entry(&self, idx: usize) -> &[u8] {
        assert!(idx < self.len, "entry index out of bounds");
        let off = idx * self.entry_size;
        &self.storage[off..off + self.entry_size]
    }

    /// Mutably borrow live entry `idx`
    ///
    /// # Panics
    ///
    /// If `idx` is not a live entry.
    pub fn entry_mut(&mut self, idx: usize) -> &mut [u8] {
        assert!(idx < self.len, "entry index out of bounds");
        let off = idx * self.entry_size;
        &mut self.storage[off..off + self.entry_size]
    }

    /// Borrow entry `idx` mutably together with its successor
    ///
    /// # Panics
    ///
    /// If `idx + 1` is not a live entry.
    pub fn entry_and_next_mut(&mut self, idx: usize) -> (&mut [u8], &[u8]) {
        assert!(idx + 1 < self.len, "entry index out of bounds");
        let off = idx * self.entry_size;
        let (cur, next) =
            self.storage[off..off + 2 * self.entry_size].split_at_mut(self.entry_size);
        (cur, next)
    }

    /// Append an entry made of `key` followed by `val`
    ///
    /// Reallocates when the logical capacity is exhausted; that is the only case in which
    /// this takes longer.
    pub fn push(&mut self, key: &[u8], val: &[u8]) {
        debug_assert_eq!(key.len() + val.len(), self.entry_size);
        if self.len == self.cap {
            self.grow();
        }
        self.len += 1;
        let entry = self.entry_mut(self.len - 1);
        let (k, v) = entry.split_at_mut(key.len());
        k.copy_from_slice(key);
        v.copy_from_slice(val);
    }

    /// Remove `by` (0 or 1) entries from the tail, lowering the logical capacity alike
    ///
    /// Plain arithmetic on the flag, so the cost does not depend on its value. The bytes of
    /// the released slot stay in the physical buffer; callers zero them beforehand.
    pub fn shrink_by(&mut self, by: usize) {
        debug_assert!(by <= 1 && by <= self.len);
        self.len -= by;
        self.cap -= by;
    }

    /// Iterate over all live entries in storage order
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &[u8]> + ExactSizeIterator + '_ {
        (0..self.len).map(move |idx| self.entry(idx))
    }

    /// Double the logical capacity, moving live entries into a fresh buffer
    fn grow(&mut self) {
        let new_cap = match self.cap.checked_mul(2) {
            Some(cap) => cap.max(MIN_GROWTH),
            None => panic!("capacity overflow"),
        };
        log::trace!(
            "growing entry storage from {} to {} entries ({} live)",
            self.cap,
            new_cap,
            self.len
        );

        let mut storage = vec![0u8; storage_len(self.entry_size, new_cap)];
        let live = self.len * self.entry_size;
        storage[..live].copy_from_slice(&self.storage[..live]);

        std::mem::swap(&mut self.storage, &mut storage);
        storage.zeroize();
        self.cap = new_cap;
    }

    /// Read slot `idx` of the physical buffer, live or not
    #[cfg(test)]
    pub fn raw_slot(&self, idx: usize) -> &[u8] {
        let off = idx * self.entry_size;
        &self.storage[off..off + self.entry_size]
    }
}

impl Drop for EntryArena {
    fn drop(&mut self) {
        self.storage.zeroize();
    }
}
