//! In-memory memoization for derived analysis data.
//!
//! Scanning tens of thousands of module records is cheap once and wasteful
//! twice. A [`Memo`] maps a cheap discriminator key (typically a chunk
//! filter) to a shared result, so repeated queries against the same
//! document hand back the same allocation instead of recomputing.
//!
//! The table is owned by whatever owns the document (see
//! [`crate::analysis::Analysis`]) and dies with it; eviction within the
//! table is least-recently-used with a fixed capacity. Single-threaded by
//! design: `Rc` values are not `Send`, and the analysis pipeline never
//! computes concurrently.

use std::rc::Rc;

const DEFAULT_CAPACITY: usize = 8;

/// A small most-recently-used-first memo table.
///
/// Entries are kept in recency order; lookups are linear, which beats
/// hashing for the handful of discriminator values seen in practice.
#[derive(Debug)]
pub struct Memo<K, V> {
    entries: Vec<(K, Rc<V>)>,
    capacity: usize,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// The cached value for `key`, computing and storing it on first use.
    /// `compute` runs at most once per key while the entry stays resident;
    /// hits return a clone of the stored `Rc` (pointer-identical result).
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> Rc<V> {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            let entry = self.entries.remove(pos);
            let value = Rc::clone(&entry.1);
            self.entries.insert(0, entry);
            return value;
        }

        let value = Rc::new(compute());
        self.entries.insert(0, (key, Rc::clone(&value)));
        self.entries.truncate(self.capacity);
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
