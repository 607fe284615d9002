use std::iter::FusedIterator;
use std::{slice, vec};

use crate::slot::Slot;

/// Iterator over key-value pairs in a ProbingMap, in slot order
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(slots: &'a [Slot<K, V>], remaining: usize) -> Self {
        Self {
            slots: slots.iter(),
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Find next occupied slot
        let pair = self.slots.find_map(Slot::pair)?;
        self.remaining -= 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over key-value pairs with mutable values
pub struct IterMut<'a, K, V> {
    slots: slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(slots: &'a mut [Slot<K, V>], remaining: usize) -> Self {
        Self {
            slots: slots.iter_mut(),
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let pair = self.slots.find_map(Slot::pair_mut)?;
        self.remaining -= 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over the pairs of a consumed ProbingMap
pub struct IntoIter<K, V> {
    slots: vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(slots: Vec<Slot<K, V>>, remaining: usize) -> Self {
        Self {
            slots: slots.into_iter(),
            remaining,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let pair = self.slots.find_map(|mut slot| slot.take())?;
        self.remaining -= 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator over keys in a ProbingMap
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over values in a ProbingMap
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

#[cfg(test)]
mod tests {
    use crate::FxProbingMap;

    fn sample() -> FxProbingMap<u32, u32> {
        let mut map = FxProbingMap::with_capacity(16);
        for k in 0..6 {
            map.put(k, k * 100);
        }
        map.remove(&2);
        map
    }

    #[test]
    fn iter_skips_tombstones() {
        let map = sample();
        let mut keys: Vec<u32> = map.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn iter_reports_exact_len() {
        let map = sample();
        let mut iter = map.iter();
        assert_eq!(iter.len(), 5);
        iter.next();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.by_ref().count(), 4);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn values_follow_keys() {
        let map = sample();
        let keys: Vec<u32> = map.keys().copied().collect();
        let values: Vec<u32> = map.values().copied().collect();
        let expected: Vec<u32> = keys.iter().map(|k| k * 100).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn iter_mut_updates_values() {
        let mut map = sample();
        for (_, v) in map.iter_mut() {
            *v += 1;
        }
        for (k, v) in &map {
            assert_eq!(*v, k * 100 + 1);
        }
    }

    #[test]
    fn into_iter_consumes_live_entries() {
        let map = sample();
        let mut pairs: Vec<(u32, u32)> = map.into_iter().collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(0, 0), (1, 100), (3, 300), (4, 400), (5, 500)]);
    }

    #[test]
    fn empty_map_iterates_nothing() {
        let map: FxProbingMap<u32, u32> = FxProbingMap::with_capacity(4);
        assert_eq!(map.iter().next(), None);
        assert_eq!(map.keys().len(), 0);
    }
}
