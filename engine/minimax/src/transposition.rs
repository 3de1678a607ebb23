//! Generic transposition table.
//!
//! Keys are located by a caller-supplied 64-bit fingerprint and confirmed by
//! an equality check, so fingerprint collisions never produce false hits.
//! Entries live in chained buckets. When the load factor passes the
//! configured maximum the table allocates a bucket array of twice the size
//! and migrates the old buckets a few at a time on every mutating call,
//! so no single store pays for a full rehash.

use std::cell::Cell;
use std::mem;

use engine_core::Fingerprint;
use tracing::debug;

/// Bucket count used by [`TranspositionTable::new`].
pub const DEFAULT_CAPACITY: usize = 1024;

/// Load factor (entries per bucket) that triggers growth.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Old buckets migrated per store or remove while a resize is in progress.
const REHASH_STEP: usize = 4;

const MIN_BUCKETS: usize = 8;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    fingerprint: u64,
    key: K,
    value: V,
}

type Bucket<K, V> = Vec<Entry<K, V>>;

/// Old bucket array still being drained into the current one.
#[derive(Debug, Clone)]
struct Migration<K, V> {
    buckets: Vec<Bucket<K, V>>,
    cursor: usize,
}

/// Counters of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Lookups performed
    pub lookups: u64,
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries inserted under a new key
    pub inserts: u64,
    /// Stores that replaced the value of an existing key
    pub overwrites: u64,
    /// Entries removed
    pub removals: u64,
    /// Completed bucket-array doublings
    pub resizes: u64,
}

/// Hash table from states (or any key) to cached values.
///
/// Every key is stored in exactly one bucket of exactly one array. During a
/// resize, lookups consult both the new array and the array being drained.
/// Lookups bump interior counters, so a table is `Send` but not `Sync`.
#[derive(Debug, Clone)]
pub struct TranspositionTable<K, V> {
    buckets: Vec<Bucket<K, V>>,
    migration: Option<Migration<K, V>>,
    len: usize,
    max_load_factor: f64,
    stats: TableStats,
    lookups: Cell<u64>,
    hits: Cell<u64>,
}

#[inline]
fn bucket_index(fingerprint: u64, bucket_count: usize) -> usize {
    // bucket_count is always a power of two
    (fingerprint as usize) & (bucket_count - 1)
}

fn empty_buckets<K, V>(count: usize) -> Vec<Bucket<K, V>> {
    (0..count).map(|_| Vec::new()).collect()
}

impl<K, V> TranspositionTable<K, V> {
    /// Create a table with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table with at least `buckets` buckets (rounded up to a power
    /// of two).
    pub fn with_capacity(buckets: usize) -> Self {
        Self::with_config(buckets, DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Create a table with an explicit growth threshold.
    ///
    /// Non-positive or non-finite load factors fall back to
    /// [`DEFAULT_MAX_LOAD_FACTOR`].
    pub fn with_config(buckets: usize, max_load_factor: f64) -> Self {
        let count = buckets.max(MIN_BUCKETS).next_power_of_two();
        let max_load_factor = if max_load_factor.is_finite() && max_load_factor > 0.0 {
            max_load_factor
        } else {
            DEFAULT_MAX_LOAD_FACTOR
        };
        Self {
            buckets: empty_buckets(count),
            migration: None,
            len: 0,
            max_load_factor,
            stats: TableStats::default(),
            lookups: Cell::new(0),
            hits: Cell::new(0),
        }
    }

    /// Number of stored entries
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets in the current array
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket of the current array
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Configured growth threshold
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// True while old buckets are still being migrated
    pub fn is_rehashing(&self) -> bool {
        self.migration.is_some()
    }

    pub fn stats(&self) -> TableStats {
        let lookups = self.lookups.get();
        let hits = self.hits.get();
        TableStats {
            lookups,
            hits,
            misses: lookups - hits,
            ..self.stats
        }
    }

    /// Drop every entry, keeping the current bucket array size.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.migration = None;
        self.len = 0;
    }

    /// Find the value stored under the key matching `fingerprint` and `eq`.
    pub fn lookup_hashed<F>(&self, fingerprint: u64, eq: F) -> Option<&V>
    where
        F: FnMut(&K) -> bool,
    {
        self.lookups.set(self.lookups.get() + 1);
        let found = self.find(fingerprint, eq);
        if found.is_some() {
            self.hits.set(self.hits.get() + 1);
        }
        found
    }

    fn find<F>(&self, fingerprint: u64, mut eq: F) -> Option<&V>
    where
        F: FnMut(&K) -> bool,
    {
        let current = &self.buckets[bucket_index(fingerprint, self.buckets.len())];
        if let Some(entry) = current
            .iter()
            .find(|e| e.fingerprint == fingerprint && eq(&e.key))
        {
            return Some(&entry.value);
        }

        let migration = self.migration.as_ref()?;
        migration.buckets[bucket_index(fingerprint, migration.buckets.len())]
            .iter()
            .find(|e| e.fingerprint == fingerprint && eq(&e.key))
            .map(|e| &e.value)
    }

    /// Insert `value` under `key`, or overwrite the value of an existing key
    /// matching `fingerprint` and `eq`. Returns the replaced value, if any.
    ///
    /// On overwrite the stored key is kept and `key` is dropped.
    pub fn store_hashed<F>(&mut self, fingerprint: u64, key: K, value: V, eq: F) -> Option<V>
    where
        F: FnMut(&K) -> bool,
    {
        self.rehash_step();
        if let Some(slot) = self.find_mut(fingerprint, eq) {
            let previous = mem::replace(slot, value);
            self.stats.overwrites += 1;
            return Some(previous);
        }
        self.insert_entry(fingerprint, key, value);
        None
    }

    fn find_mut<F>(&mut self, fingerprint: u64, mut eq: F) -> Option<&mut V>
    where
        F: FnMut(&K) -> bool,
    {
        let index = bucket_index(fingerprint, self.buckets.len());
        if let Some(position) = self.buckets[index]
            .iter()
            .position(|e| e.fingerprint == fingerprint && eq(&e.key))
        {
            return Some(&mut self.buckets[index][position].value);
        }

        let migration = self.migration.as_mut()?;
        let old_index = bucket_index(fingerprint, migration.buckets.len());
        migration.buckets[old_index]
            .iter_mut()
            .find(|e| e.fingerprint == fingerprint && eq(&e.key))
            .map(|e| &mut e.value)
    }

    fn insert_entry(&mut self, fingerprint: u64, key: K, value: V) {
        let index = bucket_index(fingerprint, self.buckets.len());
        self.buckets[index].push(Entry {
            fingerprint,
            key,
            value,
        });
        self.len += 1;
        self.stats.inserts += 1;

        if self.load_factor() > self.max_load_factor {
            self.start_resize();
        }
    }

    /// Remove the entry matching `fingerprint` and `eq`, returning its value.
    pub fn remove_hashed<F>(&mut self, fingerprint: u64, mut eq: F) -> Option<V>
    where
        F: FnMut(&K) -> bool,
    {
        self.rehash_step();

        let index = bucket_index(fingerprint, self.buckets.len());
        let mut removed = take_matching(&mut self.buckets[index], fingerprint, &mut eq);

        if removed.is_none() {
            if let Some(migration) = self.migration.as_mut() {
                let old_index = bucket_index(fingerprint, migration.buckets.len());
                removed = take_matching(&mut migration.buckets[old_index], fingerprint, &mut eq);
            }
        }

        if removed.is_some() {
            self.len -= 1;
            self.stats.removals += 1;
        }
        removed
    }

    /// Visit every entry once, in unspecified order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Iterate over `(key, value)` pairs in unspecified order.
    ///
    /// The borrow prevents mutation for the iterator's lifetime.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let old: &[Bucket<K, V>] = match &self.migration {
            Some(migration) => &migration.buckets,
            None => &[],
        };
        Iter {
            arrays: [self.buckets.as_slice(), old],
            array: 0,
            bucket: 0,
            entry: 0,
            remaining: self.len,
        }
    }

    /// Finish any in-progress migration immediately.
    pub fn finish_rehash(&mut self) {
        while self.migration.is_some() {
            self.rehash_step();
        }
    }

    fn start_resize(&mut self) {
        // A resize triggered during migration completes the previous one first
        self.finish_rehash();

        let new_count = self.buckets.len() * 2;
        let old = mem::replace(&mut self.buckets, empty_buckets(new_count));
        debug!(
            from = old.len(),
            to = new_count,
            entries = self.len,
            "Transposition table resize started"
        );
        self.migration = Some(Migration {
            buckets: old,
            cursor: 0,
        });
    }

    fn rehash_step(&mut self) {
        let Some(migration) = self.migration.as_mut() else {
            return;
        };

        let end = (migration.cursor + REHASH_STEP).min(migration.buckets.len());
        let count = self.buckets.len();
        for old_index in migration.cursor..end {
            for entry in mem::take(&mut migration.buckets[old_index]) {
                self.buckets[bucket_index(entry.fingerprint, count)].push(entry);
            }
        }
        migration.cursor = end;

        if migration.cursor == migration.buckets.len() {
            self.migration = None;
            self.stats.resizes += 1;
            debug!(
                buckets = count,
                entries = self.len,
                "Transposition table resize finished"
            );
        }
    }
}

fn take_matching<K, V, F>(bucket: &mut Bucket<K, V>, fingerprint: u64, eq: &mut F) -> Option<V>
where
    F: FnMut(&K) -> bool,
{
    let position = bucket
        .iter()
        .position(|e| e.fingerprint == fingerprint && eq(&e.key))?;
    Some(bucket.swap_remove(position).value)
}

impl<K: Fingerprint + Eq, V> TranspositionTable<K, V> {
    /// Look up `key` using its own fingerprint and equality.
    pub fn lookup(&self, key: &K) -> Option<&V> {
        self.lookup_hashed(key.fingerprint(), |k| k == key)
    }

    /// Store `value` under `key`, returning the replaced value if any.
    pub fn store(&mut self, key: K, value: V) -> Option<V> {
        let fingerprint = key.fingerprint();
        self.rehash_step();
        if let Some(slot) = self.find_mut(fingerprint, |k| *k == key) {
            let previous = mem::replace(slot, value);
            self.stats.overwrites += 1;
            return Some(previous);
        }
        self.insert_entry(fingerprint, key, value);
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_hashed(key.fingerprint(), |k| k == key)
    }
}

impl<K, V> Default for TranspositionTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowing iterator over a [`TranspositionTable`].
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    arrays: [&'a [Bucket<K, V>]; 2],
    array: usize,
    bucket: usize,
    entry: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let buckets = *self.arrays.get(self.array)?;
            let Some(bucket) = buckets.get(self.bucket) else {
                self.array += 1;
                self.bucket = 0;
                self.entry = 0;
                continue;
            };
            match bucket.get(self.entry) {
                Some(entry) => {
                    self.entry += 1;
                    self.remaining -= 1;
                    return Some((&entry.key, &entry.value));
                }
                None => {
                    self.bucket += 1;
                    self.entry = 0;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a TranspositionTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
