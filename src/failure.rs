//! The Failure and Result types of this library.
//!
//! The `Vector` of this library supports faillible allocations and checked accesses. Any method which attempts to
//! allocate memory, or to access an element by index or through a cursor, may fail. The cause of the error is then
//! represented as a `Failure`.
//!
//! All faillible allocating methods come in two versions:
//!
//! -   A faillible `try_xxx` version, which returns a `Result` with `Failure` as the error type.
//! -   A convenience `xxx` version, which invokes the `try_xxx` version and panics in case of error.
//!
//! Accessors, such as `at` or the cursor methods, only come in the faillible version.

use super::root::{error, fmt, result};

/// Universal Failure type of this library.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Failure {
    /// The number of bytes to allocate cannot be calculated due to overflowing.
    BytesOverflow,
    /// The number of elements cannot be calculated due to overflowing.
    ElementsOverflow,
    /// The allocator could not allocate memory.
    OutOfMemory,
    /// The index is greater than, or equal to, the number of elements.
    IndexOutOfRange,
    /// The cursor is not associated to any `Vector`.
    UnassociatedIterator,
    /// The cursors, or the cursor and the `Vector`, do not belong together.
    UnrelatedIterators,
    /// The storage cannot change hands, as the allocators are neither equal nor propagated.
    AllocatorMismatch,
}

impl error::Error for Failure {}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Universal Result type of this library.
pub type Result<T> = result::Result<T, Failure>;
