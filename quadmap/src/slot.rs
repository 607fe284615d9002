use std::mem;

/// One cell of the slot array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    /// Never held an entry since the last clear or rehash.
    Empty,
    /// Held an entry that has since been removed; probe chains run through it.
    Tombstone,
    Occupied(K, V),
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<K, V> Slot<K, V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(..))
    }

    pub fn key(&self) -> Option<&K> {
        match self {
            Slot::Occupied(k, _) => Some(k),
            _ => None,
        }
    }

    pub fn pair(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }

    pub fn pair_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }

    /// Turns an occupied slot into a tombstone, handing back its pair.
    /// Empty slots and tombstones are left untouched.
    pub fn bury(&mut self) -> Option<(K, V)> {
        if !self.is_occupied() {
            return None;
        }
        match mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }

    /// Takes the pair out of an occupied slot, leaving it empty.
    pub fn take(&mut self) -> Option<(K, V)> {
        match mem::take(self) {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slot_is_empty() {
        let slot: Slot<u32, u32> = Slot::default();
        assert!(slot.is_empty());
        assert!(!slot.is_tombstone());
        assert!(!slot.is_occupied());
        assert_eq!(slot.key(), None);
    }

    #[test]
    fn bury_leaves_a_tombstone() {
        let mut slot = Slot::Occupied(1u32, 92u32);
        assert_eq!(slot.pair(), Some((&1, &92)));
        assert_eq!(slot.bury(), Some((1, 92)));
        assert!(slot.is_tombstone());
        assert_eq!(slot.bury(), None);
        assert!(slot.is_tombstone());
    }

    #[test]
    fn bury_does_not_touch_empty_slots() {
        let mut slot: Slot<u32, u32> = Slot::Empty;
        assert_eq!(slot.bury(), None);
        assert!(slot.is_empty());
    }

    #[test]
    fn take_resets_to_empty() {
        let mut slot = Slot::Occupied("k", 3);
        assert_eq!(slot.take(), Some(("k", 3)));
        assert!(slot.is_empty());

        let mut tomb: Slot<&str, i32> = Slot::Tombstone;
        assert_eq!(tomb.take(), None);
        assert!(tomb.is_empty());
    }

    #[test]
    fn pair_mut_updates_value_in_place() {
        let mut slot = Slot::Occupied(5u32, 10u32);
        if let Some((_, v)) = slot.pair_mut() {
            *v = 11;
        }
        assert_eq!(slot, Slot::Occupied(5, 11));
    }
}
