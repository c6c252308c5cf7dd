//! The constant-time map itself

use std::fmt;

use subtle::Choice;

use crate::arena::EntryArena;
use crate::config::MapConfig;
use crate::error::{Argument, Result};
use crate::iter::Iter;
use crate::layout::Layout;
use crate::primitives::{conditional_copy, conditional_zero, memeq};

/// A key/value map whose lookups and updates take time independent of key and value contents
///
/// Entries are stored back to back in insertion order. Every constant-time operation visits
/// every entry and performs the same comparisons and conditional copies no matter which entry
/// (if any) matches, so its cost is a function of [CtMap::len] alone. Operations that report
/// whether a key was present return a [Choice] rather than a `bool`; convert it only where
/// branching on the answer is acceptable.
///
/// Duplicate keys are allowed and never merged. Operations that act on a single entry always
/// pick the first match in storage order.
///
/// # Leaks
///
/// - The number of entries is public. So is the fact that [CtMap::delete] removed something,
///   because every later scan gets cheaper by one entry.
/// - [CtMap::add] takes longer when it has to reallocate.
/// - [CtMap::range] and [CtMap::iter] hand out the raw bytes and are not constant-time.
///
/// # Examples
///
/// ```
/// use ctmap::CtMap;
///
/// let mut map = CtMap::new(4, 2);
/// map.add(b"tok1", b"v1").unwrap();
/// map.add(b"tok2", b"v2").unwrap();
///
/// let mut val = [0u8; 2];
/// let found = map.lookup(b"tok2", &mut val).unwrap();
/// assert!(bool::from(found));
/// assert_eq!(&val, b"v2");
///
/// assert!(bool::from(map.delete(b"tok1").unwrap()));
/// assert_eq!(map.len(), 1);
/// ```
pub struct CtMap {
    layout: Layout,
    entries: EntryArena,
}

impl CtMap {
    /// Create an empty map for keys of `key_size` and values of `val_size` bytes
    ///
    /// Use a `val_size` of zero for a constant-time set.
    ///
    /// # Panics
    ///
    /// If `key_size + val_size` overflows `usize`.
    pub fn new(key_size: usize, val_size: usize) -> Self {
        let layout = Layout::new(key_size, val_size);
        Self {
            entries: EntryArena::new(layout.entry_size()),
            layout,
        }
    }

    /// Create an empty map that holds `capacity` entries before it has to reallocate
    ///
    /// When the maximum number of entries is known up front this removes the reallocation
    /// from [CtMap::add]'s timing altogether.
    ///
    /// # Panics
    ///
    /// If `key_size + val_size` overflows `usize`, or if `capacity` entries do not fit into
    /// the address space.
    pub fn with_capacity(key_size: usize, val_size: usize, capacity: usize) -> Self {
        let layout = Layout::new(key_size, val_size);
        log::debug!(
            "preallocating constant-time map for {} entries of {}+{} bytes",
            capacity,
            key_size,
            val_size
        );
        Self {
            entries: EntryArena::with_capacity(layout.entry_size(), capacity),
            layout,
        }
    }

    /// Create an empty map as described by `config`
    ///
    /// ```
    /// use ctmap::{CtMap, MapConfig};
    ///
    /// let map = CtMap::from_config(&MapConfig::new(32, 16).with_capacity(64));
    /// assert_eq!(map.capacity(), 64);
    /// ```
    ///
    /// # Panics
    ///
    /// Under the same conditions as [CtMap::new] and [CtMap::with_capacity]. Configurations
    /// read through [MapConfig::from_toml_str] or [MapConfig::load] have already passed
    /// [MapConfig::validate] and never panic here.
    pub fn from_config(config: &MapConfig) -> Self {
        match config.capacity {
            Some(capacity) => Self::with_capacity(config.key_size, config.val_size, capacity),
            None => Self::new(config.key_size, config.val_size),
        }
    }

    /// Number of entries, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries the map holds before [CtMap::add] reallocates
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// The key and value sizes of this map
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Size of every key in bytes
    pub fn key_size(&self) -> usize {
        self.layout.key_size
    }

    /// Size of every value in bytes
    pub fn val_size(&self) -> usize {
        self.layout.val_size
    }

    /// Append a new entry
    ///
    /// Does not look for an existing entry with the same key; duplicates accumulate.
    pub fn add(&mut self, key: &[u8], val: &[u8]) -> Result<()> {
        self.layout.check_key(Argument::Key, key)?;
        self.layout.check_val(val)?;

        self.entries.push(key, val);
        Ok(())
    }

    /// Overwrite the value of the first entry matching `key`
    ///
    /// Returns a set [Choice] if such an entry exists. Later entries with the same key keep
    /// their values.
    ///
    /// ```
    /// use ctmap::CtMap;
    ///
    /// let mut map = CtMap::new(1, 1);
    /// map.add(&[0xa5], &[0x5a]).unwrap();
    /// map.add(&[0xa5], &[0x5a]).unwrap();
    ///
    /// assert!(bool::from(map.set(&[0xa5], &[0xff]).unwrap()));
    /// assert_eq!(map.iter().map(|(_, v)| v[0]).collect::<Vec<_>>(), [0xff, 0x5a]);
    /// ```
    pub fn set(&mut self, key: &[u8], val: &[u8]) -> Result<Choice> {
        self.layout.check_key(Argument::Key, key)?;
        self.layout.check_val(val)?;

        let key_size = self.layout.key_size;
        let mut found = Choice::from(0);
        for idx in 0..self.entries.len() {
            let (k, v) = self.entries.entry_mut(idx).split_at_mut(key_size);
            let hit = memeq(k, key) & !found;
            conditional_copy(v, val, hit);
            found |= hit;
        }
        Ok(found)
    }

    /// Rewrite key and value of the first entry matching `old_key`
    ///
    /// Returns a set [Choice] if such an entry exists.
    pub fn replace(&mut self, old_key: &[u8], new_key: &[u8], val: &[u8]) -> Result<Choice> {
        self.layout.check_key(Argument::OldKey, old_key)?;
        self.layout.check_key(Argument::NewKey, new_key)?;
        self.layout.check_val(val)?;

        let key_size = self.layout.key_size;
        let mut found = Choice::from(0);
        for idx in 0..self.entries.len() {
            let (k, v) = self.entries.entry_mut(idx).split_at_mut(key_size);
            let hit = memeq(k, old_key) & !found;
            conditional_copy(k, new_key, hit);
            conditional_copy(v, val, hit);
            found |= hit;
        }
        Ok(found)
    }

    /// Rewrite the key of the first entry matching `old_key`, keeping its value
    ///
    /// Returns a set [Choice] if such an entry exists.
    pub fn rename(&mut self, old_key: &[u8], new_key: &[u8]) -> Result<Choice> {
        self.layout.check_key(Argument::OldKey, old_key)?;
        self.layout.check_key(Argument::NewKey, new_key)?;

        let key_size = self.layout.key_size;
        let mut found = Choice::from(0);
        for idx in 0..self.entries.len() {
            let k = &mut self.entries.entry_mut(idx)[..key_size];
            let hit = memeq(k, old_key) & !found;
            conditional_copy(k, new_key, hit);
            found |= hit;
        }
        Ok(found)
    }

    /// Whether any entry's key equals `key`
    pub fn contains(&self, key: &[u8]) -> Result<Choice> {
        self.layout.check_key(Argument::Key, key)?;

        let key_size = self.layout.key_size;
        let mut found = Choice::from(0);
        for entry in self.entries.entries() {
            found |= memeq(&entry[..key_size], key);
        }
        Ok(found)
    }

    /// Copy the value of the first entry matching `key` into `val`
    ///
    /// `val` must be exactly [CtMap::val_size] bytes. Returns a set [Choice] if such an entry
    /// exists; otherwise `val` is left as it was.
    pub fn lookup(&self, key: &[u8], val: &mut [u8]) -> Result<Choice> {
        self.layout.check_key(Argument::Key, key)?;
        self.layout.check_val(val)?;

        let key_size = self.layout.key_size;
        let mut found = Choice::from(0);
        for entry in self.entries.entries() {
            let (k, v) = entry.split_at(key_size);
            let hit = memeq(k, key) & !found;
            conditional_copy(val, v, hit);
            found |= hit;
        }
        Ok(found)
    }

    /// Remove the first entry matching `key`
    ///
    /// Every slot is conditionally overwritten with its successor once the match has been
    /// seen, which closes the gap and moves the tail down by one without a data dependent
    /// write pattern. The last slot, now a duplicate, is zeroed under the same flag before
    /// length and capacity are reduced by it.
    ///
    /// Returns a set [Choice] if an entry was removed. Otherwise no entry changes.
    ///
    /// # Leaks
    ///
    /// The length drop is visible to anyone timing later operations. Which entry was removed
    /// is not.
    ///
    /// ```
    /// use ctmap::CtMap;
    ///
    /// let mut map = CtMap::new(1, 1);
    /// for e in [[0x5a, 0x5a], [0xa5, 0x5a], [0x5a, 0x5a]] {
    ///     map.add(&e[..1], &e[1..]).unwrap();
    /// }
    /// assert!(bool::from(map.delete(&[0xa5]).unwrap()));
    /// assert_eq!(map.len(), 2);
    /// assert!(!bool::from(map.contains(&[0xa5]).unwrap()));
    /// ```
    pub fn delete(&mut self, key: &[u8]) -> Result<Choice> {
        self.layout.check_key(Argument::Key, key)?;

        let len = self.entries.len();
        if len == 0 {
            return Ok(Choice::from(0));
        }

        let key_size = self.layout.key_size;
        let mut found = Choice::from(0);
        for idx in 0..len - 1 {
            let (cur, next) = self.entries.entry_and_next_mut(idx);
            found |= memeq(&cur[..key_size], key);
            conditional_copy(cur, next, found);
        }

        let last = self.entries.entry_mut(len - 1);
        found |= memeq(&last[..key_size], key);
        conditional_zero(last, found);

        self.entries.shrink_by(found.unwrap_u8() as usize);
        Ok(found)
    }

    /// Call `visit` with key and value of every entry, in storage order
    ///
    /// **Not constant-time.** `visit` sees the raw bytes and anything it does with them is
    /// the caller's responsibility. The views cannot outlive the call.
    pub fn range<F: FnMut(&[u8], &[u8])>(&self, mut visit: F) {
        for (key, val) in self.iter() {
            visit(key, val)
        }
    }

    /// Iterate over `(key, value)` pairs in storage order
    ///
    /// **Not constant-time**, see [CtMap::range].
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.entries, self.layout.key_size)
    }
}

impl fmt::Debug for CtMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtMap")
            .field("key_size", &self.layout.key_size)
            .field("val_size", &self.layout.val_size)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a CtMap {
    type Item = (&'a [u8], &'a [u8]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
