use thiserror::Error;

/// Errors reported by checked accesses to a [`Ring`](crate::Ring).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// The position is null, or its element has already been removed.
    #[error("dereferencing a position that refers to no element")]
    NullDereference,
}
