use crate::ring::{Element, Ring};
use std::fmt;
use std::iter::FusedIterator;

/// A draining iterator over the elements of a `Ring`, created by
/// [`Ring::drain`].
///
/// Elements are removed from the head. Dropping the iterator removes the
/// remaining elements.
pub struct Drain<'a, K: 'a, I: 'a> {
    ring: &'a mut Ring<K, I>,
}

impl<'a, K: 'a, I: 'a> Drain<'a, K, I> {
    pub(crate) fn new(ring: &'a mut Ring<K, I>) -> Self {
        Self { ring }
    }
}

impl<K, I> Iterator for Drain<'_, K, I> {
    type Item = Element<K, I>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ring.remove(self.ring.begin())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len(), Some(self.ring.len()))
    }
}

impl<K, I> DoubleEndedIterator for Drain<'_, K, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ring.remove(self.ring.end())
    }
}

impl<K, I> ExactSizeIterator for Drain<'_, K, I> {}

impl<K, I> FusedIterator for Drain<'_, K, I> {}

impl<K, I> Drop for Drain<'_, K, I> {
    fn drop(&mut self) {
        self.ring.clear();
    }
}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for Drain<'_, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&*self.ring).finish()
    }
}

impl<K, I> Ring<K, I> {
    /// Removes all elements from the ring, yielding them from the head.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::{Element, Ring};
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([(1, 'a'), (2, 'b'), (3, 'c')]);
    /// let mut drain = ring.drain();
    /// assert_eq!(drain.next(), Some(Element::new(1, 'a')));
    /// drop(drain);
    /// assert!(ring.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, I> {
        Drain::new(self)
    }
}
