use crate::map::ProbingMap;

/// A position in a map's slot array that survives removals.
///
/// A cursor is only an index: it does not borrow the map, so every method
/// takes the map as an argument. Because removal only ever turns an
/// occupied slot into a tombstone, removing any key (the one just yielded
/// included) never moves entries at or beyond the cursor.
///
/// ```
/// use quadmap::FxProbingMap;
///
/// let mut map: FxProbingMap<u32, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
/// let mut cursor = map.cursor();
/// while let Some(&key) = cursor.next(&map) {
///     map.remove(&key);
/// }
/// assert!(map.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    cur: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self { cur: 0 }
    }

    /// Index of the next slot the cursor will examine.
    pub fn position(&self) -> usize {
        self.cur
    }

    /// Finds the first live slot at or after the cursor.
    fn seek<'m, K, V, H, E>(
        &self,
        map: &'m ProbingMap<K, V, H, E>,
    ) -> Option<(usize, &'m K, &'m V)> {
        map.slots()
            .get(self.cur..)?
            .iter()
            .enumerate()
            .find_map(|(offset, slot)| {
                slot.pair().map(|(k, v)| (self.cur + offset, k, v))
            })
    }

    pub fn has_next<K, V, H, E>(&self, map: &ProbingMap<K, V, H, E>) -> bool {
        self.seek(map).is_some()
    }

    /// Returns the next key without moving the cursor.
    pub fn peek<'m, K, V, H, E>(&self, map: &'m ProbingMap<K, V, H, E>) -> Option<&'m K> {
        self.seek(map).map(|(_, k, _)| k)
    }

    /// Returns the next value without moving the cursor.
    pub fn peek_value<'m, K, V, H, E>(&self, map: &'m ProbingMap<K, V, H, E>) -> Option<&'m V> {
        self.seek(map).map(|(_, _, v)| v)
    }

    /// Returns the next key and value, moving the cursor past their slot.
    pub fn next_entry<'m, K, V, H, E>(
        &mut self,
        map: &'m ProbingMap<K, V, H, E>,
    ) -> Option<(&'m K, &'m V)> {
        match self.seek(map) {
            Some((index, k, v)) => {
                self.cur = index + 1;
                Some((k, v))
            }
            None => {
                self.cur = self.cur.max(map.size());
                None
            }
        }
    }

    /// Returns the next key, moving the cursor past its slot.
    pub fn next<'m, K, V, H, E>(&mut self, map: &'m ProbingMap<K, V, H, E>) -> Option<&'m K> {
        self.next_entry(map).map(|(k, _)| k)
    }

    /// Returns the next value, moving the cursor past its slot.
    pub fn next_value<'m, K, V, H, E>(
        &mut self,
        map: &'m ProbingMap<K, V, H, E>,
    ) -> Option<&'m V> {
        self.next_entry(map).map(|(_, v)| v)
    }

    /// Moves the cursor back to the first slot.
    pub fn reset(&mut self) {
        self.cur = 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::hash::key_eq;
    use crate::map::ProbingMap;

    type IdentityMap = ProbingMap<u64, u64>;

    fn identity(key: &u64) -> u64 {
        *key
    }

    fn filled(capacity: usize, pairs: &[(u64, u64)]) -> IdentityMap {
        let mut map = IdentityMap::new(identity, key_eq, capacity);
        for &(k, v) in pairs {
            map.put(k, v);
        }
        map
    }

    const SPREAD: [(u64, u64); 6] = [
        (50, 92),
        (49, 91),
        (48, 90),
        (47, 89),
        (46, 88),
        (45, 87),
    ];
    const COLLIDING: [(u64, u64); 3] = [(1, 92), (5, 91), (9, 90)];

    #[test]
    fn test_does_not_have_next_for_empty_map() {
        let map = filled(8, &[]);
        let cursor = map.cursor();
        assert!(!cursor.has_next(&map));
        assert_eq!(cursor.peek(&map), None);
    }

    #[test]
    fn test_removed_item_is_not_visited() {
        let mut map = filled(8, &[(9, 52)]);
        map.remove(&9);
        let cursor = map.cursor();
        assert!(!cursor.has_next(&map));
    }

    #[test]
    fn test_peek_does_not_advance() {
        let map = filled(8, &[(3, 30)]);
        let mut cursor = map.cursor();

        assert_eq!(cursor.peek(&map), Some(&3));
        assert_eq!(cursor.peek_value(&map), Some(&30));
        assert_eq!(cursor.position(), 0);

        assert_eq!(cursor.next(&map), Some(&3));
        assert_eq!(cursor.position(), 4);
        assert!(!cursor.has_next(&map));
        assert_eq!(cursor.next(&map), None);
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_next_value_matches_lookup() {
        let map = filled(8, &SPREAD);
        let mut cursor = map.cursor();
        let mut keys = map.cursor();

        while let Some(value) = cursor.next_value(&map) {
            let key = keys.next(&map).unwrap();
            assert_eq!(map.get(key), Some(value));
        }
        assert!(!keys.has_next(&map));
    }

    fn iterate_and_drain(capacity: usize, pairs: &[(u64, u64)]) {
        let map = filled(capacity, pairs);
        let mut other = filled(capacity, pairs);

        // remove every key we iterate on
        let mut cursor = map.cursor();
        let mut visited = 0;
        while let Some(key) = cursor.next(&map) {
            assert!(other.remove(key).is_some(), "key {key} visited twice");
            visited += 1;
        }

        assert_eq!(visited, pairs.len());
        assert_eq!(other.count(), 0);
    }

    #[test]
    fn test_iterate() {
        iterate_and_drain(8, &SPREAD);
    }

    #[test]
    fn test_iterate_handles_collisions() {
        iterate_and_drain(4, &COLLIDING);
    }

    #[test]
    fn test_iterate_and_remove_does_not_break_iteration() {
        let pairs: Vec<(u64, u64)> = SPREAD.iter().chain(COLLIDING.iter()).copied().collect();
        let mut map = filled(8, &pairs);
        let mut other = filled(8, &pairs);

        let mut cursor = map.cursor();
        while let Some(&key) = cursor.next(&map) {
            assert!(other.remove(&key).is_some());
            map.remove(&key);
        }

        assert_eq!(other.count(), 0);
        assert_eq!(map.count(), 0);
    }

    #[test]
    fn test_removing_ahead_of_cursor_skips_removed_key() {
        let mut map = filled(16, &[(1, 10), (2, 20), (3, 30)]);
        let mut cursor = map.cursor();

        assert_eq!(cursor.next(&map), Some(&1));
        map.remove(&2);
        assert_eq!(cursor.next(&map), Some(&3));
        assert_eq!(cursor.next(&map), None);
    }

    #[test]
    fn test_reset_restarts_scan() {
        let map = filled(8, &[(1, 1)]);
        let mut cursor = map.cursor();
        assert!(cursor.next(&map).is_some());
        cursor.reset();
        assert_eq!(cursor.next_entry(&map), Some((&1, &1)));
    }
}
