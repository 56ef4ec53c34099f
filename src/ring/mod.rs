use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;
use slab::Slab;

use crate::error::RingError;
use crate::ring::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;
#[cfg(feature = "serde")]
mod serialize;

pub use algorithms::drain::Drain;
pub use algorithms::split::{split, split_with, SplitPlan};

/// The `Ring` is a circular doubly-linked sequence of key/value elements.
/// It allows inserting and removing elements at any given position in constant
/// time. Locating a position takes *O*(*n*) time.
///
/// The `Ring` contains:
/// - an arena `nodes` owning every node of the ring;
/// - an optional `head`, the logical first element (absent iff the ring is empty);
/// - a length field `len`, maintained on every insertion and removal;
/// - a `stamp` counter, handing out a fresh stamp to every inserted node;
/// - an `id` unique to the ring, so positions of other rings never resolve in it.
///
/// There is no ghost node: [`Ring::end`] is the last element, and moving past it
/// arrives at [`Ring::begin`] again.
///
/// # Naming Conventions
///
/// - `slot`: the arena index of a live node, only used internally;
/// - `position`: a [`Position`] handed out to callers, which may be null or stale.
pub struct Ring<K, I> {
    nodes: Slab<Node<K, I>>,
    head: Option<usize>,
    /// the length of the ring
    len: usize,
    stamp: u64,
    id: u64,
}

/// Source of the ids of rings.
static NEXT_RING_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) struct Node<K, I> {
    pub(crate) next: usize,
    pub(crate) prev: usize,
    stamp: u64,
    pub(crate) element: Element<K, I>,
}

/// A key/value pair stored in a [`Ring`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element<K, I> {
    pub key: K,
    pub info: I,
}

impl<K, I> Element<K, I> {
    pub fn new(key: K, info: I) -> Self {
        Self { key, info }
    }

    pub fn into_pair(self) -> (K, I) {
        (self.key, self.info)
    }
}

impl<K, I> From<(K, I)> for Element<K, I> {
    fn from((key, info): (K, I)) -> Self {
        Self::new(key, info)
    }
}

/// A handle to an element of a [`Ring`], or the null position.
///
/// Positions do not borrow the ring, so they survive mutations. A position
/// whose element has been removed never refers to an element again, even when
/// the ring reuses its storage; every operation treats it like the null
/// position.
///
/// Positions compare by identity: two positions are equal iff they refer to the
/// same node of the same ring (or both are null). A position only ever resolves
/// in the ring that handed it out, so passing it to another ring, even a clone
/// of its own, is the same as passing the null position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(Option<Link>);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct Link {
    ring: u64,
    slot: usize,
    stamp: u64,
}

impl Position {
    /// The null position, bound to no element.
    pub const NULL: Position = Position(None);

    /// Returns `true` if the position is the null position.
    ///
    /// A stale position (whose element has been removed) is not null, but it
    /// does not resolve in any ring either.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::NULL
    }
}

impl Debug for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => write!(f, "Position(null)"),
            Some(Link { ring, slot, stamp }) => {
                write!(f, "Position({}:{}#{})", ring, slot, stamp)
            }
        }
    }
}

// private methods
impl<K, I> Ring<K, I> {
    /// Resolve `position` into the slot of a live node of this ring.
    pub(crate) fn resolve(&self, position: Position) -> Option<usize> {
        let link = position.0?;
        if link.ring != self.id {
            return None;
        }
        let node = self.nodes.get(link.slot)?;
        if node.stamp == link.stamp {
            Some(link.slot)
        } else {
            None
        }
    }

    pub(crate) fn position_of(&self, slot: usize) -> Position {
        Position(Some(Link {
            ring: self.id,
            slot,
            stamp: self.nodes[slot].stamp,
        }))
    }

    pub(crate) fn next_slot(&self, slot: usize) -> usize {
        self.nodes[slot].next
    }

    pub(crate) fn prev_slot(&self, slot: usize) -> usize {
        self.nodes[slot].prev
    }

    pub(crate) fn element(&self, slot: usize) -> &Element<K, I> {
        &self.nodes[slot].element
    }

    /// Slots of one lap of the ring, starting at head.
    pub(crate) fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.head, move |&slot| Some(self.next_slot(slot))).take(self.len)
    }

    fn connect(&mut self, prev: usize, next: usize) {
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Allocate a self-linked node, not yet counted in `len`.
    fn new_node(&mut self, element: Element<K, I>) -> usize {
        let stamp = self.stamp;
        self.stamp = self.stamp.wrapping_add(1);
        let slot = self.nodes.vacant_key();
        self.nodes.insert(Node {
            next: slot,
            prev: slot,
            stamp,
            element,
        })
    }

    /// Attach the detached node `node` between the adjacent nodes `prev` and `next`.
    fn attach_node(&mut self, prev: usize, next: usize, node: usize) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, node);
        self.connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, node);
            self.assert_adjacent(node, next);
        }
    }

    /// Detach the node `node` from the ring and release it.
    ///
    /// `head` is left untouched, the caller must move it if `node` is the head.
    fn detach_node(&mut self, node: usize) -> Node<K, I> {
        let (prev, next) = (self.prev_slot(node), self.next_slot(node));
        self.connect(prev, next);
        self.len -= 1;
        self.nodes.remove(node)
    }

    /// Create the first node of an empty ring.
    fn bootstrap(&mut self, element: Element<K, I>) -> Position {
        debug_assert!(self.head.is_none());
        let node = self.new_node(element);
        self.head = Some(node);
        self.len = 1;
        trace!("bootstrap ring with its first node at slot {}", node);
        self.begin()
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: usize, next: usize) {
        assert_eq!(self.next_slot(prev), next);
        assert_eq!(self.prev_slot(next), prev);
    }

    /// Check the structural invariants of the ring.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.nodes.len(), self.len);
        match self.head {
            None => assert_eq!(self.len, 0),
            Some(head) => {
                let mut slot = head;
                for _ in 0..self.len {
                    assert_eq!(self.prev_slot(self.next_slot(slot)), slot);
                    assert_eq!(self.next_slot(self.prev_slot(slot)), slot);
                    slot = self.next_slot(slot);
                }
                assert_eq!(slot, head);
            }
        }
    }
}

impl<K, I> Ring<K, I> {
    /// Create an empty `Ring`.
    ///
    /// # Examples
    /// ```
    /// use bi_ring::Ring;
    /// let ring: Ring<u32, String> = Ring::new();
    /// assert!(ring.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `Ring` with room for `capacity` elements before it
    /// reallocates.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: None,
            len: 0,
            stamp: 0,
            id: NEXT_RING_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Returns `true` if the `Ring` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of elements of the `Ring`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(2, "two");
    /// assert_eq!(ring.len(), 1);
    /// ring.push_back(3, "three");
    /// assert_eq!(ring.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `Ring`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        log::debug!("clearing a ring of {} elements", self.len);
        while !self.is_empty() {
            self.pop_front();
        }
    }

    /// Returns the position of the head, or the null position if the ring is
    /// empty.
    #[inline]
    pub fn begin(&self) -> Position {
        match self.head {
            Some(head) => self.position_of(head),
            None => Position::NULL,
        }
    }

    /// Returns the position of the last element (the one preceding the head),
    /// or the null position if the ring is empty.
    ///
    /// This is not a past-the-end position: it refers to a valid element, and
    /// moving forward from it arrives at [`Ring::begin`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_back(1, 'a');
    /// ring.push_back(2, 'b');
    /// assert_eq!(ring.get(ring.end()).unwrap().key, 2);
    /// assert_eq!(ring.next(ring.end()), ring.begin());
    /// ```
    #[inline]
    pub fn end(&self) -> Position {
        match self.head {
            Some(head) => self.position_of(self.prev_slot(head)),
            None => Position::NULL,
        }
    }

    /// Returns the position following `position`. The null position (or a
    /// stale one) is returned unchanged.
    pub fn next(&self, position: Position) -> Position {
        match self.resolve(position) {
            Some(slot) => self.position_of(self.next_slot(slot)),
            None => position,
        }
    }

    /// Returns the position preceding `position`. The null position (or a
    /// stale one) is returned unchanged.
    pub fn prev(&self, position: Position) -> Position {
        match self.resolve(position) {
            Some(slot) => self.position_of(self.prev_slot(slot)),
            None => position,
        }
    }

    /// Move `position` forward by `steps`, cyclically.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let ring = Ring::from_iter([(1, ()), (2, ()), (3, ())]);
    /// assert_eq!(ring.get(ring.advance(ring.begin(), 1)).unwrap().key, 2);
    /// assert_eq!(ring.get(ring.advance(ring.begin(), 4)).unwrap().key, 2);
    /// ```
    pub fn advance(&self, position: Position, steps: usize) -> Position {
        match self.resolve(position) {
            Some(slot) => {
                let steps = steps % self.len;
                self.position_of((0..steps).fold(slot, |slot, _| self.next_slot(slot)))
            }
            None => position,
        }
    }

    /// Move `position` backward by `steps`, cyclically.
    pub fn retreat(&self, position: Position, steps: usize) -> Position {
        match self.resolve(position) {
            Some(slot) => {
                let steps = steps % self.len;
                self.position_of((0..steps).fold(slot, |slot, _| self.prev_slot(slot)))
            }
            None => position,
        }
    }

    /// Provides a reference to the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NullDereference`] if `position` is null or its
    /// element has been removed.
    pub fn get(&self, position: Position) -> Result<&Element<K, I>, RingError> {
        let slot = self.resolve(position).ok_or(RingError::NullDereference)?;
        Ok(&self.nodes[slot].element)
    }

    /// Provides a mutable reference to the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NullDereference`] if `position` is null or its
    /// element has been removed.
    pub fn get_mut(&mut self, position: Position) -> Result<&mut Element<K, I>, RingError> {
        let slot = self.resolve(position).ok_or(RingError::NullDereference)?;
        Ok(&mut self.nodes[slot].element)
    }

    /// Provides a reference to the head element, or `None` if the ring is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&Element<K, I>> {
        self.get(self.begin()).ok()
    }

    /// Provides a mutable reference to the head element, or `None` if the ring
    /// is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut Element<K, I>> {
        self.get_mut(self.begin()).ok()
    }

    /// Provides a reference to the last element, or `None` if the ring is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&Element<K, I>> {
        self.get(self.end()).ok()
    }

    /// Provides a mutable reference to the last element, or `None` if the ring
    /// is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut Element<K, I>> {
        self.get_mut(self.end()).ok()
    }

    /// Inserts a new element before `position`, and returns its position.
    ///
    /// Inserting before the head makes the new element the head. On an empty
    /// ring, inserting at the null position (which is [`Ring::begin`]) creates
    /// the first element.
    ///
    /// If `position` does not refer to an element of the ring otherwise, the
    /// ring is left untouched and `position` is returned unchanged.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_back(1, 1);
    /// ring.push_back(2, 4);
    /// ring.push_back(4, 16);
    /// ring.insert(ring.advance(ring.begin(), 2), 3, 9);
    ///
    /// let keys: Vec<_> = ring.keys().copied().collect();
    /// assert_eq!(keys, vec![1, 2, 3, 4]);
    /// ```
    pub fn insert(&mut self, position: Position, key: K, info: I) -> Position {
        if self.is_empty() && position.is_null() {
            return self.bootstrap(Element::new(key, info));
        }
        let current = match self.resolve(position) {
            Some(current) => current,
            None => {
                trace!("insert before {:?} ignored", position);
                return position;
            }
        };
        let prev = self.prev_slot(current);
        let node = self.new_node(Element::new(key, info));
        self.attach_node(prev, current, node);
        if self.head == Some(current) {
            trace!("head moved from slot {} to slot {}", current, node);
            self.head = Some(node);
        }
        self.position_of(node)
    }

    /// Inserts a new element after `position`, and returns its position.
    ///
    /// On an empty ring, inserting at the null position creates the first
    /// element. If `position` does not refer to an element of the ring
    /// otherwise, the ring is left untouched and `position` is returned
    /// unchanged.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn insert_after(&mut self, position: Position, key: K, info: I) -> Position {
        if self.is_empty() && position.is_null() {
            return self.bootstrap(Element::new(key, info));
        }
        let current = match self.resolve(position) {
            Some(current) => current,
            None => {
                trace!("insert after {:?} ignored", position);
                return position;
            }
        };
        let next = self.next_slot(current);
        let node = self.new_node(Element::new(key, info));
        self.attach_node(current, next, node);
        self.position_of(node)
    }

    /// Removes the element at `position` and returns it, or returns `None` if
    /// `position` does not refer to an element of the ring.
    ///
    /// Removing the head makes its successor the head.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn remove(&mut self, position: Position) -> Option<Element<K, I>> {
        let current = self.resolve(position)?;
        let next = self.next_slot(current);
        let node = self.detach_node(current);
        if self.len == 0 {
            self.head = None;
        } else if self.head == Some(current) {
            trace!("head moved from slot {} to slot {}", current, next);
            self.head = Some(next);
        }
        Some(node.element)
    }

    /// Removes the element at `position`.
    ///
    /// Returns [`Ring::begin`] if the head was removed (the null position if
    /// the ring is now empty). Removing any other element returns the null
    /// position, and so does a `position` that refers to no element, in which
    /// case the ring is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::{Position, Ring};
    ///
    /// let mut ring = Ring::new();
    /// ring.push_back(1, 1);
    /// ring.push_back(2, 4);
    /// ring.push_back(4, 16);
    ///
    /// assert_eq!(ring.erase(ring.advance(ring.begin(), 1)), Position::NULL);
    /// assert_eq!(ring.len(), 2);
    ///
    /// let begin = ring.erase(ring.begin());
    /// assert_eq!(ring.get(begin).unwrap().key, 4);
    /// ```
    pub fn erase(&mut self, position: Position) -> Position {
        let at_head = !position.is_null() && position == self.begin();
        match self.remove(position) {
            Some(_) if at_head => self.begin(),
            Some(_) => Position::NULL,
            None => {
                trace!("erase at {:?} ignored", position);
                Position::NULL
            }
        }
    }

    /// Inserts a new head element, and returns its position.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn push_front(&mut self, key: K, info: I) -> Position {
        self.insert(self.begin(), key, info)
    }

    /// Inserts a new element after the last one, and returns its position.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn push_back(&mut self, key: K, info: I) -> Position {
        self.insert_after(self.end(), key, info)
    }

    /// Removes the head element, and returns the position of the new head, or
    /// the null position if the ring is now empty.
    #[inline]
    pub fn pop_front(&mut self) -> Position {
        self.erase(self.begin())
    }

    /// Removes the last element, and returns the position of the head, or the
    /// null position if the ring is now empty.
    #[inline]
    pub fn pop_back(&mut self) -> Position {
        self.erase(self.end());
        self.begin()
    }

    /// Returns the position of the first element whose key equals `key`,
    /// scanning forward from the head, or the null position if there is none.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::{Position, Ring, RingError};
    ///
    /// let mut ring = Ring::new();
    /// ring.push_back(1, 1);
    /// ring.push_back(4, 16);
    ///
    /// assert_eq!(ring.get(ring.find(&4)).unwrap().info, 16);
    /// assert_eq!(ring.find(&3), Position::NULL);
    /// assert_eq!(ring.get(ring.find(&3)), Err(RingError::NullDereference));
    /// ```
    pub fn find(&self, key: &K) -> Position
    where
        K: PartialEq,
    {
        match self.slots().find(|&slot| self.element(slot).key == *key) {
            Some(slot) => self.position_of(slot),
            None => Position::NULL,
        }
    }

    /// Returns `true` if some element's key equals `key`.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        !self.find(key).is_null()
    }

    /// Returns the info of the first element whose key equals `key`.
    pub fn find_info(&self, key: &K) -> Option<&I>
    where
        K: PartialEq,
    {
        self.get(self.find(key)).ok().map(|element| &element.info)
    }

    /// Provides a cursor at the head (a null cursor if the ring is empty).
    #[inline]
    pub fn cursor_begin(&self) -> Cursor<'_, K, I> {
        self.cursor_at(self.begin())
    }

    /// Provides a cursor at the last element (a null cursor if the ring is
    /// empty).
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, K, I> {
        self.cursor_at(self.end())
    }

    /// Provides a cursor at `position`.
    #[inline]
    pub fn cursor_at(&self, position: Position) -> Cursor<'_, K, I> {
        Cursor::new(self, position)
    }

    /// Provides a cursor with editing operations at the head.
    #[inline]
    pub fn cursor_begin_mut(&mut self) -> CursorMut<'_, K, I> {
        let position = self.begin();
        self.cursor_at_mut(position)
    }

    /// Provides a cursor with editing operations at the last element.
    #[inline]
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, K, I> {
        let position = self.end();
        self.cursor_at_mut(position)
    }

    /// Provides a cursor with editing operations at `position`.
    #[inline]
    pub fn cursor_at_mut(&mut self, position: Position) -> CursorMut<'_, K, I> {
        CursorMut::new(self, position)
    }

    /// Provides a forward iterator over one lap of the ring, starting at the
    /// head.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::{Element, Ring};
    /// use std::iter::FromIterator;
    ///
    /// let ring = Ring::from_iter([(1, 'a'), (2, 'b')]);
    /// let mut iter = ring.iter();
    /// assert_eq!(iter.next(), Some(&Element::new(1, 'a')));
    /// assert_eq!(iter.next(), Some(&Element::new(2, 'b')));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, I> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references over one lap of the
    /// ring, starting at the head.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, I> {
        IterMut::new(self)
    }

    /// Provides an iterator over the keys, in forward order from the head.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.iter().map(|element| &element.key)
    }

    /// Provides an iterator over the infos, in forward order from the head.
    pub fn infos(&self) -> impl DoubleEndedIterator<Item = &I> + '_ {
        self.iter().map(|element| &element.info)
    }

    /// Consumes the ring into an iterator yielding elements from the head.
    #[inline]
    pub fn into_elements(self) -> IntoIter<K, I> {
        IntoIter::new(self)
    }
}

impl<K: fmt::Display, I: fmt::Display> Ring<K, I> {
    /// Prints each element as `key: info` on its own line to stdout, in
    /// forward order from the head.
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl<K: Debug, I: Debug> Debug for Ring<K, I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, I: fmt::Display> fmt::Display for Ring<K, I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.iter()
            .try_for_each(|element| writeln!(f, "{}: {}", element.key, element.info))
    }
}

impl<K, I> Default for Ring<K, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, I> Drop for Ring<K, I> {
    fn drop(&mut self) {
        self.clear();
    }
}
