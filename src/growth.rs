//! Growth policies.
//!
//! When appending to a full `Vector`, its `GrowthPolicy` is consulted to decide how many slots to add. The `Vector`
//! always adds at least 1 slot, so that a policy returning 0 still makes progress.
//!
//! Any `Fn(usize, usize) -> usize` is a `GrowthPolicy`, receiving the current size and capacity.
//!
//! ```
//! use elastic::allocator::DefaultAllocator;
//! use elastic::vector::Vector;
//!
//! //  Grows by 4 slots at a time.
//! let mut vec = Vector::with_capacity_allocator_and_growth(0, DefaultAllocator, |_: usize, _: usize| 4);
//!
//! vec.push(1);
//! assert_eq!(4, vec.capacity());
//!
//! vec.extend([2, 3, 4, 5]);
//! assert_eq!(8, vec.capacity());
//! ```

/// GrowthPolicy
///
/// Implementations are expected to be deterministic: the same `(size, capacity)` pair should always yield the same
/// increment, otherwise amortized complexity is out of the window.
pub trait GrowthPolicy {
    /// Returns the number of slots to add to a full container of `size` elements and `capacity` slots.
    fn grow(&self, size: usize, capacity: usize) -> usize;
}

impl<F> GrowthPolicy for F
where
    F: Fn(usize, usize) -> usize,
{
    fn grow(&self, size: usize, capacity: usize) -> usize { self(size, capacity) }
}

/// DefaultGrowthPolicy
///
/// Doubles the capacity, going 0, 1, 2, 4, 8, ...
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DefaultGrowthPolicy;

impl GrowthPolicy for DefaultGrowthPolicy {
    fn grow(&self, _size: usize, capacity: usize) -> usize { capacity }
}

/// ExactGrowth
///
/// Grows by a single slot at a time, keeping the capacity exactly equal to the number of elements pushed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExactGrowth;

impl GrowthPolicy for ExactGrowth {
    fn grow(&self, _size: usize, _capacity: usize) -> usize { 0 }
}

//  Computes the capacity after growing a full container.
//
//  Returns None on overflow.
pub(crate) fn next_capacity<G: GrowthPolicy>(policy: &G, size: usize, capacity: usize) -> Option<usize> {
    let increment = policy.grow(size, capacity);

    capacity.checked_add(if increment == 0 { 1 } else { increment })
}
