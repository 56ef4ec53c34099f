use crate::error::RingError;
use crate::ring::{Element, Position, Ring};
use std::fmt;
use std::fmt::Formatter;
use std::ops::{Add, Sub};

/// A cursor over a `Ring`.
///
/// A `Cursor` is a [`Position`] bound to a borrowed ring, so it can move
/// back-and-forth and be dereferenced by itself. Moving is cyclic: there is no
/// past-the-end location, and moving forward from the last element arrives at
/// the head.
///
/// A null cursor stays null whichever way it moves, and dereferencing it fails
/// with [`RingError::NullDereference`].
///
/// # Examples
///
/// ```
/// use bi_ring::Ring;
/// use std::iter::FromIterator;
///
/// let ring = Ring::from_iter([('A', 0), ('B', 1), ('C', 2)]);
///
/// // Create a cursor at the head: [|A B C]
/// let mut cursor = ring.cursor_begin();
/// assert_eq!(cursor.get().unwrap().key, 'A');
///
/// // Move the cursor backward, cyclically: [A B|C]
/// cursor.move_prev();
/// assert_eq!(cursor, ring.cursor_end());
///
/// // Postfix moves return the cursor as it was
/// let last = cursor.fetch_next();
/// assert_eq!(last.get().unwrap().key, 'C');
/// assert_eq!(cursor.get().unwrap().key, 'A');
///
/// // Offsets wrap around the ring
/// assert_eq!((cursor + 4).get().unwrap().key, 'B');
/// ```
pub struct Cursor<'a, K: 'a, I: 'a> {
    pub(crate) position: Position,
    pub(crate) ring: &'a Ring<K, I>,
}

/// A cursor over a `Ring` with editing operations.
///
/// A `CursorMut` borrows the ring mutably, so the references it yields are tied
/// to the cursor itself. [`CursorMut::view`] borrows the ring immutably for a
/// shorter while.
///
/// # Examples
///
/// ```compile_fail
/// use bi_ring::Ring;
/// use std::iter::FromIterator;
///
/// let mut ring = Ring::from_iter([(1, 1), (2, 2)]);
/// let mut cursor = ring.cursor_begin_mut();
/// println!("{:?}", ring.back());
/// println!("{:?}", cursor.get());
/// ```
pub struct CursorMut<'a, K: 'a, I: 'a> {
    pub(crate) position: Position,
    pub(crate) ring: &'a mut Ring<K, I>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        impl<'a, K: 'a, I: 'a> $CURSOR<'a, K, I> {
            /// Detach the cursor from the ring.
            #[inline]
            pub fn position(&self) -> Position {
                self.position
            }

            /// Returns `true` if the cursor is bound to no element.
            #[inline]
            pub fn is_null(&self) -> bool {
                self.ring.resolve(self.position).is_none()
            }

            /// Returns the length of the underlying ring.
            #[inline]
            pub fn len(&self) -> usize {
                self.ring.len()
            }

            /// Returns `true` if the underlying ring is empty.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.ring.is_empty()
            }

            /// Move the cursor to the next element, cyclically.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_next(&mut self) -> &mut Self {
                self.position = self.ring.next(self.position);
                self
            }

            /// Move the cursor to the previous element, cyclically.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_prev(&mut self) -> &mut Self {
                self.position = self.ring.prev(self.position);
                self
            }

            /// Move the cursor forward by `steps`, cyclically.
            pub fn seek_forward(&mut self, steps: usize) -> &mut Self {
                self.position = self.ring.advance(self.position, steps);
                self
            }

            /// Move the cursor backward by `steps`, cyclically.
            pub fn seek_backward(&mut self, steps: usize) -> &mut Self {
                self.position = self.ring.retreat(self.position, steps);
                self
            }

            /// Rebind the cursor to `position`.
            #[inline]
            pub fn move_to(&mut self, position: Position) {
                self.position = position;
            }

            /// Set the cursor to the head of the ring.
            #[inline]
            pub fn move_to_begin(&mut self) {
                self.position = self.ring.begin();
            }

            /// Set the cursor to the last element of the ring.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.position = self.ring.end();
            }
        }

        impl<'a, K: fmt::Debug + 'a, I: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, K, I> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($CURSOR))
                    .field(&self.position)
                    .field(&self.ring.get(self.position).ok())
                    .finish()
            }
        }
    };
}

impl_cursor!(Cursor);
impl_cursor!(CursorMut);

impl<'a, K: 'a, I: 'a> Cursor<'a, K, I> {
    pub(crate) fn new(ring: &'a Ring<K, I>, position: Position) -> Self {
        Self { position, ring }
    }

    /// Provides a reference to the element at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NullDereference`] if the cursor is null.
    #[inline]
    pub fn get(&self) -> Result<&'a Element<K, I>, RingError> {
        self.ring.get(self.position)
    }

    /// Move the cursor to the next element, and return the cursor as it was
    /// before moving.
    pub fn fetch_next(&mut self) -> Self {
        let current = *self;
        self.move_next();
        current
    }

    /// Move the cursor to the previous element, and return the cursor as it was
    /// before moving.
    pub fn fetch_prev(&mut self) -> Self {
        let current = *self;
        self.move_prev();
        current
    }

    /// Returns a reference to the ring the cursor borrows from.
    #[inline]
    pub fn view(&self) -> &'a Ring<K, I> {
        self.ring
    }
}

impl<'a, K: 'a, I: 'a> Clone for Cursor<'a, K, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K: 'a, I: 'a> Copy for Cursor<'a, K, I> {}

/// Compare cursors by node identity.
///
/// Only cursors over the same ring and at the same element are equal.
impl<'a, K: 'a, I: 'a> PartialEq for Cursor<'a, K, I> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ring, other.ring) && self.position == other.position
    }
}

impl<'a, K: 'a, I: 'a> Eq for Cursor<'a, K, I> {}

impl<'a, K: 'a, I: 'a> Add<usize> for Cursor<'a, K, I> {
    type Output = Self;

    fn add(mut self, steps: usize) -> Self {
        self.seek_forward(steps);
        self
    }
}

impl<'a, K: 'a, I: 'a> Sub<usize> for Cursor<'a, K, I> {
    type Output = Self;

    fn sub(mut self, steps: usize) -> Self {
        self.seek_backward(steps);
        self
    }
}

impl<'a, K: 'a, I: 'a> CursorMut<'a, K, I> {
    pub(crate) fn new(ring: &'a mut Ring<K, I>, position: Position) -> Self {
        Self { position, ring }
    }

    /// Provides a reference to the element at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NullDereference`] if the cursor is null.
    #[inline]
    pub fn get(&self) -> Result<&Element<K, I>, RingError> {
        self.ring.get(self.position)
    }

    /// Provides a mutable reference to the element at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NullDereference`] if the cursor is null.
    #[inline]
    pub fn get_mut(&mut self) -> Result<&mut Element<K, I>, RingError> {
        self.ring.get_mut(self.position)
    }

    /// Temporarily borrow the ring immutably.
    #[inline]
    pub fn view(&self) -> &Ring<K, I> {
        &*self.ring
    }

    /// Temporarily borrow the cursor as a read-only [`Cursor`].
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, K, I> {
        Cursor::new(&*self.ring, self.position)
    }

    /// Convert the cursor into a read-only [`Cursor`].
    #[inline]
    pub fn into_cursor(self) -> Cursor<'a, K, I> {
        Cursor::new(self.ring, self.position)
    }

    /// Insert a new element before the cursor, and move the cursor to it.
    /// See [`Ring::insert`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([(1, 'a'), (3, 'c')]);
    /// let mut cursor = ring.cursor_end_mut();
    /// cursor.insert(2, 'b');
    /// assert_eq!(cursor.get().unwrap().key, 2);
    /// assert_eq!(ring.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn insert(&mut self, key: K, info: I) -> Position {
        self.position = self.ring.insert(self.position, key, info);
        self.position
    }

    /// Insert a new element after the cursor, and move the cursor to it.
    /// See [`Ring::insert_after`].
    pub fn insert_after(&mut self, key: K, info: I) -> Position {
        self.position = self.ring.insert_after(self.position, key, info);
        self.position
    }

    /// Erase the element at the cursor, and rebind the cursor to the position
    /// [`Ring::erase`] returns.
    pub fn erase(&mut self) -> Position {
        self.position = self.ring.erase(self.position);
        self.position
    }

    /// Remove the element at the cursor and return it, moving the cursor to
    /// the next element (or to null if the ring is now empty).
    ///
    /// Returns `None` and leaves the cursor put if it is null.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::{Element, Ring};
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([(1, 'a'), (2, 'b'), (3, 'c')]);
    /// let mut cursor = ring.cursor_begin_mut();
    /// cursor.move_next();
    /// assert_eq!(cursor.remove(), Some(Element::new(2, 'b')));
    /// assert_eq!(cursor.get().unwrap().key, 3);
    /// ```
    pub fn remove(&mut self) -> Option<Element<K, I>> {
        let next = self.ring.next(self.position);
        let element = self.ring.remove(self.position)?;
        self.position = if self.ring.is_empty() {
            Position::NULL
        } else {
            next
        };
        Some(element)
    }
}

impl<'a, K: 'a, I: 'a> From<CursorMut<'a, K, I>> for Cursor<'a, K, I> {
    fn from(cursor: CursorMut<'a, K, I>) -> Self {
        cursor.into_cursor()
    }
}
