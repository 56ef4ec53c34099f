use crate::ring::{Element, Ring};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An iterator over the elements of a `Ring`.
///
/// Unlike cursors, it is fused and non-cyclic: it yields one lap of the ring,
/// from the head to the last element, and then `None` forever.
///
/// # Examples
///
/// ```compile_fail
/// use bi_ring::Ring;
/// use std::iter::FromIterator;
///
/// let mut ring = Ring::from_iter([(1, 1), (2, 2), (3, 3)]);
/// let mut iter = ring.iter();
///
/// // Won't compile, because ring is already borrowed immutably.
/// ring.push_back(4, 4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, K: 'a, I: 'a> {
    ring: &'a Ring<K, I>,
    front: usize,
    back: usize,
    len: usize,
}

impl<'a, K: 'a, I: 'a> Iter<'a, K, I> {
    pub(crate) fn new(ring: &'a Ring<K, I>) -> Self {
        // `front` and `back` are never read while `len` is zero
        let front = ring.head.unwrap_or_default();
        let back = ring.head.map_or(0, |head| ring.prev_slot(head));
        Self {
            ring,
            front,
            back,
            len: ring.len(),
        }
    }
}

impl<'a, K: 'a, I: 'a> Clone for Iter<'a, K, I> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K: fmt::Debug + 'a, I: fmt::Debug + 'a> fmt::Debug for Iter<'a, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        self.clone().for_each(|element| {
            f.field(element);
        });
        f.finish()
    }
}

impl<'a, K: 'a, I: 'a> Iterator for Iter<'a, K, I> {
    type Item = &'a Element<K, I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let current = self.front;
        self.front = self.ring.next_slot(current);
        self.len -= 1;
        Some(self.ring.element(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, K: 'a, I: 'a> DoubleEndedIterator for Iter<'a, K, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let current = self.back;
        self.back = self.ring.prev_slot(current);
        self.len -= 1;
        Some(self.ring.element(current))
    }
}

impl<'a, K: 'a, I: 'a> ExactSizeIterator for Iter<'a, K, I> {}

impl<'a, K: 'a, I: 'a> FusedIterator for Iter<'a, K, I> {}

/// A mutable iterator over the elements of a `Ring`.
///
/// It mutates the elements, but not the linked structure of the ring.
pub struct IterMut<'a, K: 'a, I: 'a> {
    /// The nodes of the ring indexed by slot, each taken out once yielded.
    nodes: Vec<Option<LinkedMut<'a, K, I>>>,
    front: usize,
    back: usize,
    len: usize,
}

/// The links of a node, split from a mutable borrow of its element.
struct LinkedMut<'a, K, I> {
    prev: usize,
    next: usize,
    element: &'a mut Element<K, I>,
}

impl<'a, K: 'a, I: 'a> IterMut<'a, K, I> {
    pub(crate) fn new(ring: &'a mut Ring<K, I>) -> Self {
        // `front` and `back` are never read while `len` is zero
        let front = ring.head.unwrap_or_default();
        let back = ring.head.map_or(0, |head| ring.prev_slot(head));
        let len = ring.len();
        let mut nodes = Vec::new();
        nodes.resize_with(ring.nodes.capacity(), || None);
        for (slot, node) in ring.nodes.iter_mut() {
            nodes[slot] = Some(LinkedMut {
                prev: node.prev,
                next: node.next,
                element: &mut node.element,
            });
        }
        Self {
            nodes,
            front,
            back,
            len,
        }
    }
}

impl<'a, K: fmt::Debug + 'a, I: fmt::Debug + 'a> fmt::Debug for IterMut<'a, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

impl<'a, K: 'a, I: 'a> Iterator for IterMut<'a, K, I> {
    type Item = &'a mut Element<K, I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let LinkedMut { next, element, .. } = self.nodes[self.front].take()?;
        self.front = next;
        self.len -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K: 'a, I: 'a> DoubleEndedIterator for IterMut<'a, K, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let LinkedMut { prev, element, .. } = self.nodes[self.back].take()?;
        self.back = prev;
        self.len -= 1;
        Some(element)
    }
}

impl<'a, K: 'a, I: 'a> ExactSizeIterator for IterMut<'a, K, I> {}

impl<'a, K: 'a, I: 'a> FusedIterator for IterMut<'a, K, I> {}

/// An owning iterator over the elements of a `Ring`, popping them from the
/// head.
pub struct IntoIter<K, I> {
    ring: Ring<K, I>,
}

impl<K, I> IntoIter<K, I> {
    pub(crate) fn new(ring: Ring<K, I>) -> Self {
        Self { ring }
    }
}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for IntoIter<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.ring).finish()
    }
}

impl<K, I> Iterator for IntoIter<K, I> {
    type Item = Element<K, I>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ring.remove(self.ring.begin())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len(), Some(self.ring.len()))
    }
}

impl<K, I> DoubleEndedIterator for IntoIter<K, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ring.remove(self.ring.end())
    }
}

impl<K, I> ExactSizeIterator for IntoIter<K, I> {}

impl<K, I> FusedIterator for IntoIter<K, I> {}

impl<K, I> IntoIterator for Ring<K, I> {
    type Item = Element<K, I>;
    type IntoIter = IntoIter<K, I>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, K: 'a, I: 'a> IntoIterator for &'a Ring<K, I> {
    type Item = &'a Element<K, I>;
    type IntoIter = Iter<'a, K, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: 'a, I: 'a> IntoIterator for &'a mut Ring<K, I> {
    type Item = &'a mut Element<K, I>;
    type IntoIter = IterMut<'a, K, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, I> FromIterator<(K, I)> for Ring<K, I> {
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut ring = Ring::new();
        ring.extend(iter);
        ring
    }
}

impl<K, I> FromIterator<Element<K, I>> for Ring<K, I> {
    fn from_iter<T: IntoIterator<Item = Element<K, I>>>(iter: T) -> Self {
        let mut ring = Ring::new();
        ring.extend(iter);
        ring
    }
}

impl<K, I> Extend<(K, I)> for Ring<K, I> {
    fn extend<T: IntoIterator<Item = (K, I)>>(&mut self, iter: T) {
        iter.into_iter().for_each(|(key, info)| {
            self.push_back(key, info);
        });
    }
}

impl<K, I> Extend<Element<K, I>> for Ring<K, I> {
    fn extend<T: IntoIterator<Item = Element<K, I>>>(&mut self, iter: T) {
        iter.into_iter().for_each(|Element { key, info }| {
            self.push_back(key, info);
        });
    }
}

impl<'a, K: Clone + 'a, I: Clone + 'a> Extend<&'a Element<K, I>> for Ring<K, I> {
    fn extend<T: IntoIterator<Item = &'a Element<K, I>>>(&mut self, iter: T) {
        self.extend(iter.into_iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use crate::ring::tests::ring_eq;
    use crate::ring::{Element, Ring};
    use std::iter::FromIterator;

    #[test]
    fn iter_one_lap() {
        let ring = Ring::from_iter((1..=4).map(|key| (key, key)));
        let mut iter = ring.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&Element::new(1, 1)));
        assert_eq!(iter.next_back(), Some(&Element::new(4, 4)));
        assert_eq!(iter.next(), Some(&Element::new(2, 2)));
        assert_eq!(iter.next_back(), Some(&Element::new(3, 3)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);

        assert_eq!(ring.iter().last(), Some(&Element::new(4, 4)));
        assert_eq!(Ring::<i32, i32>::new().iter().next(), None);
    }

    #[test]
    fn iter_starts_at_head() {
        let mut ring = Ring::new();
        ring.push_back(2, ());
        ring.push_back(3, ());
        ring.push_front(1, ());
        assert_eq!(ring.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(ring.keys().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn iter_mut() {
        let mut ring = Ring::new();
        // interleave pushes so the slot order differs from the ring order
        ring.push_back(2, 2);
        ring.push_front(1, 1);
        ring.push_back(4, 4);
        ring.insert(ring.end(), 3, 3);
        ring.erase(ring.begin());
        ring.push_front(0, 0);

        let mut iter = ring.iter_mut();
        assert_eq!(iter.len(), 4);
        iter.next_back().unwrap().info = 40;
        iter.for_each(|element| element.info *= 10);
        ring_eq(&ring, vec![(0, 0), (2, 20), (3, 30), (4, 40)]);

        for element in &mut ring {
            element.key += 1;
        }
        ring_eq(&ring, vec![(1, 0), (3, 20), (4, 30), (5, 40)]);
    }

    #[test]
    fn iter_mut_follows_links() {
        let mut ring = Ring::new();
        // slots 0, 1, 2 hold keys 3, 1, 2 in ring order
        ring.push_back(3, 0);
        ring.push_front(1, 0);
        ring.insert(ring.end(), 2, 0);

        let mut iter = ring.iter_mut();
        iter.next().unwrap().info = 1;
        iter.next_back().unwrap().info = 3;
        assert_eq!(iter.len(), 1);
        iter.next_back().unwrap().info = 2;
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
        ring_eq(&ring, vec![(1, 1), (2, 2), (3, 3)]);

        let keys: Vec<i32> = ring.iter_mut().rev().map(|element| element.key).collect();
        assert_eq!(keys, vec![3, 2, 1]);
        assert_eq!(Ring::<i32, i32>::new().iter_mut().next(), None);
    }

    #[test]
    fn into_iter() {
        let ring = Ring::from_iter([(1, 'a'), (2, 'b'), (3, 'c')]);
        let mut iter = ring.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(Element::new(1, 'a')));
        assert_eq!(iter.next_back(), Some(Element::new(3, 'c')));
        assert_eq!(iter.next(), Some(Element::new(2, 'b')));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn collect_and_extend() {
        let mut ring: Ring<i32, i32> = vec![Element::new(1, 1), Element::new(2, 4)]
            .into_iter()
            .collect();
        ring.extend(vec![(3, 9)]);
        let other = Ring::from_iter([(4, 16)]);
        ring.extend(&other);
        ring_eq(&ring, vec![(1, 1), (2, 4), (3, 9), (4, 16)]);

        let pairs: Vec<(i32, i32)> = ring.into_elements().map(Element::into_pair).collect();
        assert_eq!(pairs, vec![(1, 1), (2, 4), (3, 9), (4, 16)]);
    }
}
