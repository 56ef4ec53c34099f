//! This crate provides a circular doubly-linked sequence of key/value elements,
//! called a ring.
//!
//! The [`Ring`] allows inserting, removing elements at any given position in
//! constant time. In compromise, locating a position takes *O*(*n*) time.
//!
//! Here is a quick example showing how the ring works.
//!
//! ```
//! use bi_ring::Ring;
//!
//! let mut ring = Ring::new();
//! ring.push_back(1, 1);
//! ring.push_back(2, 4);
//! ring.push_back(4, 16);
//!
//! // insert before the third element
//! ring.insert(ring.advance(ring.begin(), 2), 3, 9);
//! assert_eq!(ring.to_string(), "1: 1\n2: 4\n3: 9\n4: 16\n");
//!
//! // `end` is the last element, and the ring goes on after it
//! assert_eq!(ring.get(ring.end()).unwrap().key, 4);
//! assert_eq!(ring.next(ring.end()), ring.begin());
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the ring is like the following graph:
//! ```text
//!    ┌──────────────────────────────────────────────────────────────┐
//!    ↓                                                              │
//! ╔═══════════╗           ╔═══════════╗                        ╔═══════════╗
//! ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ ║   next    ║
//! ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ╟───────────╢
//! ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── ║   prev    ║
//! ╟───────────╢           ╟───────────╢                        ╟───────────╢
//! ║  stamp    ║           ║  stamp    ║                        ║  stamp    ║
//! ╟───────────╢           ╟───────────╢                        ╟───────────╢
//! ║ key, info ║           ║ key, info ║                        ║ key, info ║
//! ╚═══════════╝           ╚═══════════╝                        ╚═══════════╝
//!   Node 0 ↑                                                     Node n-1
//!    │     └───────────────────────────────────────────────────────── prev
//! ╔═══════════╗
//! ║   head    ║
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     Ring
//! ```
//! The `Ring` contains:
//! - an optional `head`, the first element, absent iff the ring is empty;
//! - a length field `len`.
//!
//! Unlike a conventional list, there is no ghost node. The last element is
//! `head.prev`, and its `next` is the head again.
//!
//! The nodes live in an arena owned by the ring. The links between nodes are
//! arena indices, so the ring owns all of its nodes exclusively and there is no
//! reference cycle to break on drop.
//!
//! # Positions
//!
//! A [`Position`] is a handle to an element which does not borrow the ring, so
//! it can be kept across mutations and passed back to [`Ring::insert`],
//! [`Ring::erase`], and friends. Every node carries a stamp unique within its
//! ring, and a position remembers it along with the identity of the ring: once
//! its element is removed, the position never refers to an element again, and
//! it never refers to an element of another ring. Such a position, like
//! [`Position::NULL`], leaves the ring untouched when passed to a mutation, and
//! fails with [`RingError::NullDereference`] when dereferenced.
//!
//! [`Ring::begin`] is the head and [`Ring::end`] is the *last* element, not a
//! past-the-end location. Moving forward from `end` arrives at `begin`, so any
//! traversal of a ring has to be bounded by [`Ring::len`].
//!
//! # Cursors
//!
//! The cursors [`Cursor`] and [`CursorMut`] bind a position to a borrowed ring,
//! so they can move and be dereferenced on their own. They move cyclically and
//! are never exhausted.
//!
//! ```
//! use bi_ring::Ring;
//! use std::iter::FromIterator;
//!
//! let ring = Ring::from_iter([(1, 'a'), (2, 'b'), (3, 'c')]);
//! let cursor = ring.cursor_begin();
//! assert_eq!((cursor + 1).get().unwrap().info, 'b');
//! assert_eq!((cursor - 1).get().unwrap().info, 'c');
//! assert_eq!(cursor + 3, cursor);
//! ```
//!
//! # Iteration
//!
//! Iterating over a ring is by the [`Iter`] and [`IterMut`] iterators. Unlike
//! the cursors, they are double-ended, fused and non-cyclic: they yield one lap
//! of the ring, starting at the head.
//!
//! ```
//! use bi_ring::Ring;
//! use std::iter::FromIterator;
//!
//! let mut ring = Ring::from_iter([(1, 1), (2, 2), (3, 3)]);
//! ring.iter_mut().for_each(|element| element.info *= 2);
//! assert_eq!(ring.infos().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
//! ```
//!
//! # Splitting
//!
//! [`split`] distributes copies of the elements of one ring into two others,
//! alternating chunks of given sizes and wrapping around the source as needed.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Ring`], [`Element`] and
//!   [`SplitPlan`]. A ring is serialized as the sequence of its elements from
//!   the head.
//!
//! # Thread Safety
//!
//! A ring holds no lock and is not safe for concurrent mutation. It is `Send`
//! and `Sync` whenever its keys and infos are, so it can be moved to or shared
//! with other threads, and the borrow checker allows a single writer at a
//! time. Wrap it in a `Mutex` or `RwLock` to mutate it from several threads.
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: structural
//! events at the `trace` level, `clear` and `split` at the `debug` level.
//!
//! [`Ring`]: crate::Ring
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Cursor`]: crate::ring::cursor::Cursor
//! [`CursorMut`]: crate::ring::cursor::CursorMut

#[doc(inline)]
pub use error::RingError;
#[doc(inline)]
pub use ring::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use ring::{split, split_with, Drain, Element, Position, Ring, SplitPlan};

pub mod error;
pub mod ring;
