//! growable-array: a growable, heap-backed array built from first principles
//! on top of a single-owner raw buffer.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep every unsafe detail of manual allocation in one small layer
//!   and express the vector logic above it in safe Rust.
//! - Layers:
//!   - OwningBuffer<T>: exclusive owner of `len` contiguous, initialized
//!     elements in a global-allocator region. Allocation, deallocation,
//!     positional access, release/adopt of raw parts and O(1) exchange.
//!     No notion of logical size.
//!   - GrowableArray<T>: one OwningBuffer plus a logical size. Growth,
//!     shifting insert/erase, resize/reserve, value semantics and ordering.
//!
//! Constraints
//! - Single owner: exactly one buffer owns a region at any time; growth
//!   builds the replacement first and exchanges it in afterwards.
//! - Every slot of a buffer is initialized. Slots past the logical size are
//!   dead but valid, so `clear`/`pop`/`erase` never drop anything and
//!   reallocating paths move elements by swapping them with defaults.
//! - Failure atomicity: a `try_*` call that returns `Err` leaves the array
//!   exactly as it was.
//!
//! Growth policy
//! - Push/insert on a full array: capacity becomes `max(1, 2 * capacity)`.
//! - Resize past capacity: capacity becomes `2 * new_size`.
//! - Reserve: capacity becomes exactly the request, never shrinks.
//! - Nothing ever shrinks the allocation implicitly.
//!
//! Preconditions vs errors
//! - `at`/`at_mut` return `Error::OutOfRange`; every `try_*` returns
//!   `Error::AllocationFailure`. Infallible forms escalate allocation failure
//!   the way std collections do.
//! - Indexing past the logical size, `pop` on empty and out-of-range
//!   `insert`/`erase` positions are preconditions checked with
//!   `debug_assert!`. Release builds remain memory safe (accesses are still
//!   bounded by the allocation) but the outcome is unspecified.
//!
//! Ordering
//! - Arrays compare by length first: a shorter array is always less, and
//!   only equal-length arrays compare element by element. `[9] < [1, 2]`.
//!
//! Notes and non-goals
//! - No internal synchronization; the types are `Send`/`Sync` exactly when
//!   `T` is, like `Box<[T]>`.
//! - No custom allocators and no inline (small-buffer) storage.
//! - Positions handed out by `insert`/`erase` are plain indices with no
//!   invalidation tracking.

mod error;
mod growable_array;
mod growable_array_proptest;
mod owning_buffer;

// Public surface
pub use error::{Error, Result};
pub use growable_array::{reserve, GrowableArray, ReserveRequest};
pub use owning_buffer::OwningBuffer;

/// Builds a [`GrowableArray`] from a literal list, like `vec!`.
///
/// ```
/// use growable_array::growable_array;
///
/// let a = growable_array![1, 2, 3];
/// assert_eq!(a.as_slice(), &[1, 2, 3]);
///
/// let b = growable_array!["x"; 2];
/// assert_eq!((b.len(), b.capacity()), (2, 2));
/// ```
#[macro_export]
macro_rules! growable_array {
    () => {
        $crate::GrowableArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::GrowableArray::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::GrowableArray::from([$($x),+])
    };
}
