use std::fmt;
use std::hash::Hash;
use std::mem;

use crate::cfg::trace;
use crate::cursor::Cursor;
use crate::entry::Entry;
use crate::error::{self, MapError, check_capacity};
use crate::hash::{EqFn, HashFn, fx_hash, key_eq};
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values};
use crate::probe::Probe;
use crate::slot::Slot;

/// Slot count used by `Default` and `FromIterator`.
pub const DEFAULT_CAPACITY: usize = 16;

/// The table grows before an insertion once `used / capacity` reaches this ratio.
pub const MAX_LOAD_NUMERATOR: usize = 1;
pub const MAX_LOAD_DENOMINATOR: usize = 2;

/// A map using the default Fx hash and `Eq` comparison.
pub type FxProbingMap<K, V> = ProbingMap<K, V, HashFn<K>, EqFn<K>>;

/// This is an open address hash map with quadratic probing.
///
/// All entries live in a single power-of-two slot array. Deleted entries
/// leave tombstones behind so that probe chains running through them stay
/// intact; tombstones are only reclaimed by `clear` or by the rehash that
/// happens when the table grows.
///
/// The hash function and equality function are provided as closures and
/// stay fixed for the lifetime of the map. They must agree: keys that
/// compare equal must hash equal.
///
/// Keys and values are stored as opaque payloads. The map never clones or
/// inspects them beyond calling the two collaborators, so borrowed keys such
/// as `&'a str` or plain integer handles work as well as owned ones.
#[derive(Clone)]
pub struct ProbingMap<K, V, H = HashFn<K>, E = EqFn<K>> {
    slots: Vec<Slot<K, V>>,
    // occupied + tombstoned slots
    used: usize,
    // occupied slots
    count: usize,
    hash_fn: H,
    eq_fn: E,
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

impl<K: Hash + Eq, V> ProbingMap<K, V> {
    /// Creates a map hashed with Fx and compared with `Eq`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or not a power of two.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(fx_hash::<K>, key_eq::<K>, capacity)
    }
}

impl<K: Hash + Eq, V> Default for ProbingMap<K, V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<K, V, H, E> ProbingMap<K, V, H, E> {
    /// Returns the number of slots in the table.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Same as [`size`](Self::size).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of live entries.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Same as [`count`](Self::count).
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots that are occupied or tombstoned.
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn tombstones(&self) -> usize {
        self.used - self.count
    }

    /// Returns the load factor of the map (used / capacity), tombstones included.
    pub fn load_factor(&self) -> f64 {
        self.used as f64 / self.capacity() as f64
    }

    /// Read-only view of the slot array, in probe index order.
    pub fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    /// Empties the map, resetting tombstones as well as live entries.
    /// The table keeps its current size.
    pub fn clear(&mut self) {
        trace!(
            "clearing {} entries and {} tombstones",
            self.count,
            self.tombstones()
        );
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.used = 0;
        self.count = 0;
    }

    /// Keeps only the entries for which `f` returns `true`.
    ///
    /// Rejected entries are turned into tombstones, exactly as `remove` does.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        for slot in self.slots.iter_mut() {
            let keep = match slot.pair_mut() {
                Some((k, v)) => f(k, v),
                None => continue,
            };
            if !keep {
                slot.bury();
                debug_assert!(self.count > 0);
                self.count -= 1;
            }
        }
    }

    /// Returns a detached cursor positioned at the first slot.
    ///
    /// The cursor holds no borrow of the map, so entries can be removed
    /// between steps. Inserting while a cursor is in use may grow the table
    /// and relocate every entry, after which the cursor's position is
    /// meaningless.
    pub fn cursor(&self) -> Cursor {
        Cursor::new()
    }

    /// An iterator over all entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.count)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.slots, self.count)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    fn check_invariants(&self) {
        debug_assert!(self.count <= self.used, "{} live > {} used", self.count, self.used);
        debug_assert!(
            self.used <= self.slots.len(),
            "{} used > {} slots",
            self.used,
            self.slots.len()
        );
    }
}

impl<K, V, H, E> ProbingMap<K, V, H, E>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    /// Creates a new map with `capacity` empty slots and the given hash and equality functions.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or not a power of two.
    pub fn new(hash_fn: H, eq_fn: E, capacity: usize) -> Self {
        match Self::try_new(hash_fn, eq_fn, capacity) {
            Ok(map) => map,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`new`](Self::new), but reports an invalid capacity instead of panicking.
    pub fn try_new(hash_fn: H, eq_fn: E, capacity: usize) -> error::Result<Self> {
        let capacity = check_capacity(capacity)?;
        trace!("creating probing map with {} slots", capacity);

        Ok(Self {
            slots: empty_slots(capacity),
            used: 0,
            count: 0,
            hash_fn,
            eq_fn,
        })
    }

    /// Walks the probe chain for `key`, returning the index of its live slot.
    fn find(&self, key: &K) -> Option<usize> {
        if self.count == 0 {
            return None;
        }

        let (mut probe, limit) = Probe::start((self.hash_fn)(key), self.capacity());
        while probe.len < limit {
            match &self.slots[probe.i] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(k, _) => {
                    if (self.eq_fn)(key, k) {
                        return Some(probe.i);
                    }
                }
            }
            probe.next();
        }

        None
    }

    /// Find the slot index for a key.
    /// If the key is found, returns Ok(index);
    /// otherwise returns the slot the key should go into: the first tombstone
    /// on its chain, or else the empty slot that ends the chain.
    fn find_slot(&self, key: &K) -> Result<usize, usize> {
        let (mut probe, limit) = Probe::start((self.hash_fn)(key), self.capacity());
        let mut vacant = None;

        while probe.len < limit {
            match &self.slots[probe.i] {
                Slot::Empty => return Err(vacant.unwrap_or(probe.i)),
                Slot::Tombstone => {
                    vacant.get_or_insert(probe.i);
                }
                Slot::Occupied(k, _) => {
                    if (self.eq_fn)(key, k) {
                        return Ok(probe.i);
                    }
                }
            }
            probe.next();
        }

        match vacant {
            Some(index) => Err(index),
            None => unreachable!(
                "probe chain exhausted {} slots at {} used",
                self.capacity(),
                self.used
            ),
        }
    }

    /// Get a value by key.
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.find(key)?;
        self.slots[index].pair().map(|(_, v)| v)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let index = self.find(key)?;
        self.slots[index].pair()
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find(key)?;
        self.slots[index].pair_mut().map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Associates `value` with `key`, returning the previous value if the key was present.
    ///
    /// An existing key keeps its slot and only has its value replaced.
    /// The table may grow before the insertion.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.ensure_capacity();
        self.place(key, value)
    }

    /// Inserts a key/value record, see [`put`](Self::put).
    pub fn put_entry(&mut self, entry: Entry<K, V>) -> Option<V> {
        let (key, value) = entry.into_pair();
        self.put(key, value)
    }

    /// Inserts without checking the load factor.
    fn place(&mut self, key: K, value: V) -> Option<V> {
        let previous = match self.find_slot(&key) {
            Ok(index) => match &mut self.slots[index] {
                Slot::Occupied(_, v) => Some(mem::replace(v, value)),
                _ => unreachable!("slot {index} was found but is not occupied"),
            },
            Err(index) => {
                // a reused tombstone is already counted in `used`
                if self.slots[index].is_empty() {
                    self.used += 1;
                }
                self.count += 1;
                self.slots[index] = Slot::Occupied(key, value);
                None
            }
        };

        self.check_invariants();
        previous
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|entry| entry.value)
    }

    /// Removes a key, returning the stored key and value if it was present.
    ///
    /// The slot becomes a tombstone and stays counted in `used`.
    pub fn remove_entry(&mut self, key: &K) -> Option<Entry<K, V>> {
        let index = self.find(key)?;
        let (key, value) = self.slots[index].bury()?;

        debug_assert!(self.count > 0);
        self.count -= 1;
        self.check_invariants();

        Some(Entry::new(key, value))
    }

    fn ensure_capacity(&mut self) {
        let used = self.used.saturating_mul(MAX_LOAD_DENOMINATOR);
        let limit = self.capacity().saturating_mul(MAX_LOAD_NUMERATOR);
        if used >= limit {
            self.grow_capacity();
        }
    }

    /// Doubles the table and rehashes every live entry, dropping all tombstones.
    ///
    /// # Panics
    ///
    /// Panics if the doubled size overflows `usize`.
    pub fn grow_capacity(&mut self) {
        if let Err(err) = self.try_grow_capacity() {
            panic!("{err}");
        }
    }

    /// Like [`grow_capacity`](Self::grow_capacity), but reports overflow instead of panicking.
    pub fn try_grow_capacity(&mut self) -> error::Result<()> {
        let capacity = self.capacity();
        let new_capacity = capacity
            .checked_mul(2)
            .ok_or(MapError::CapacityOverflow { capacity })?;

        trace!(
            "growing table from {} to {} slots ({} entries, {} tombstones reclaimed)",
            capacity,
            new_capacity,
            self.count,
            self.tombstones()
        );

        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.used = 0;
        self.count = 0;

        // Re-hash all existing entries into the new larger array
        for slot in old_slots {
            if let Slot::Occupied(k, v) = slot {
                self.place(k, v);
            }
        }

        Ok(())
    }
}

impl<K, V, H, E> fmt::Debug for ProbingMap<K, V, H, E>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, H, E> Extend<(K, V)> for ProbingMap<K, V, H, E>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, H, E> Extend<Entry<K, V>> for ProbingMap<K, V, H, E>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    fn extend<I: IntoIterator<Item = Entry<K, V>>>(&mut self, iter: I) {
        for entry in iter {
            self.put_entry(entry);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ProbingMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, H, E> IntoIterator for &'a ProbingMap<K, V, H, E> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, H, E> IntoIterator for &'a mut ProbingMap<K, V, H, E> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, H, E> IntoIterator for ProbingMap<K, V, H, E> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.slots, self.count)
    }
}
