use crate::ring::{Element, Ring};
use std::hash::{Hash, Hasher};

pub(crate) mod drain;
pub(crate) mod split;

/// Compare rings element-wise, in forward order from their heads.
impl<K: PartialEq, I: PartialEq> PartialEq for Ring<K, I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<K: Eq, I: Eq> Eq for Ring<K, I> {}

impl<K: PartialEq, I: PartialEq> PartialEq<[(K, I)]> for Ring<K, I> {
    fn eq(&self, other: &[(K, I)]) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(element, (key, info))| element.key == *key && element.info == *info)
    }
}

/// Deep copy: the copy owns new nodes holding the same sequence, starting at
/// the head.
impl<K: Clone, I: Clone> Clone for Ring<K, I> {
    fn clone(&self) -> Self {
        let mut ring = Ring::with_capacity(self.len());
        ring.extend(self);
        ring
    }

    /// Release every node owned by `self`, then deep copy `source`.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source);
    }
}

impl<K: Hash, I: Hash> Hash for Ring<K, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.iter().for_each(|element: &Element<K, I>| element.hash(state));
    }
}

#[cfg(test)]
mod tests {
    use crate::ring::tests::ring_eq;
    use crate::ring::Ring;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::iter::FromIterator;

    fn squares() -> Ring<i32, i32> {
        Ring::from_iter([(1, 1), (2, 4), (3, 9)])
    }

    #[test]
    fn ring_clone_is_deep() {
        let ring = squares();
        let mut cloned = ring.clone();
        assert_eq!(cloned, ring);

        cloned.front_mut().unwrap().info = 0;
        cloned.push_back(4, 16);
        ring_eq(&ring, vec![(1, 1), (2, 4), (3, 9)]);
        ring_eq(&cloned, vec![(1, 0), (2, 4), (3, 9), (4, 16)]);
        assert_ne!(cloned, ring);
    }

    #[test]
    fn ring_clone_from() {
        let ring = squares();
        let mut assigned = Ring::from_iter([(7, 7), (8, 8), (9, 9), (10, 10)]);
        assigned.clone_from(&ring);
        assert_eq!(assigned, ring);
        assert_eq!(assigned.len(), 3);

        assigned.erase(assigned.begin());
        ring_eq(&ring, vec![(1, 1), (2, 4), (3, 9)]);

        let mut empty = Ring::new();
        empty.clone_from(&ring);
        assert_eq!(empty, ring);
        empty.clone_from(&Ring::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn ring_eq_pairs() {
        let ring = squares();
        assert!(ring == [(1, 1), (2, 4), (3, 9)][..]);
        assert!(ring != [(1, 1), (2, 4)][..]);
        assert!(ring != [(1, 1), (2, 4), (3, 8)][..]);
    }

    #[test]
    fn ring_eq_ignores_storage() {
        // same sequence, different slot layout
        let mut ring = Ring::new();
        ring.push_back(3, 9);
        ring.push_front(2, 4);
        ring.push_front(1, 1);
        assert_eq!(ring, squares());

        fn hash_of(ring: &Ring<i32, i32>) -> u64 {
            let mut hasher = DefaultHasher::new();
            ring.hash(&mut hasher);
            hasher.finish()
        }
        assert_eq!(hash_of(&ring), hash_of(&squares()));
    }
}
