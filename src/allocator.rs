//! Allocator.
//!
//! The `Allocator` trait allows a user to customize allocation on a per instance basis, without depending on the
//! `alloc` crate.
//!
//! On top of raw allocation, an `Allocator` decides:
//!
//! -   How elements are constructed in, and destroyed from, the raw memory it handed out.
//! -   Which allocator a copy of a container uses.
//! -   Whether container assignment and swap transfer the allocator itself, through the `PROPAGATE_ON_XXX` constants.
//!
//! Two allocators compare equal, as per `PartialEq`, if and only if memory allocated by one can be deallocated by the
//! other.
use super::root::{alloc, ptr};

/// Layout, re-exported.
pub type Layout = alloc::Layout;

/// Allocator
pub trait Allocator: PartialEq {
    /// Whether copy assignment replaces the allocator of the destination by that of the source.
    const PROPAGATE_ON_COPY: bool = false;

    /// Whether move assignment replaces the allocator of the destination by that of the source.
    const PROPAGATE_ON_MOVE: bool = false;

    /// Whether swapping two containers also swaps their allocators.
    const PROPAGATE_ON_SWAP: bool = false;

    /// Allocates memory as per the size and alignment requirements.
    ///
    /// May return a null pointer if the allocation cannot be satisfied.
    ///
    /// #   Safety
    ///
    /// -   Assumes that the size of the Layout is non-zero.
    unsafe fn allocate(&self, layout: Layout) -> *mut u8;

    /// Deallocates memory.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `ptr` was allocated by `self.allocate`, or that of an equal allocator.
    /// -   Assumes that `ptr` was not already deallocated.
    /// -   Assumes that `layout` matches the layout with which `ptr` was allocated.
    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout);

    /// Constructs `value` in place, at `ptr`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `ptr` is valid for writes, and suitably aligned.
    /// -   Does not drop the former value, if any.
    unsafe fn construct<T>(&self, ptr: *mut T, value: T) {
        //  Safety:
        //  -   Forwarding.
        unsafe { ptr::write(ptr, value) }
    }

    /// Destroys the value at `ptr`, in place.
    ///
    /// #   Safety
    ///
    /// -   Assumes that the value at `ptr` is initialized, and is not used afterwards.
    unsafe fn destroy<T>(&self, ptr: *mut T) {
        //  Safety:
        //  -   Forwarding.
        unsafe { ptr::drop_in_place(ptr) }
    }

    /// Returns the allocator to use for a copy of a container using `self`.
    fn select_on_copy(&self) -> Self
    where
        Self: Clone,
    {
        self.clone()
    }
}

/// A shared reference to an `Allocator` is an `Allocator`, sharing the propagation traits of the referred type.
impl<A: Allocator> Allocator for &A {
    const PROPAGATE_ON_COPY: bool = A::PROPAGATE_ON_COPY;
    const PROPAGATE_ON_MOVE: bool = A::PROPAGATE_ON_MOVE;
    const PROPAGATE_ON_SWAP: bool = A::PROPAGATE_ON_SWAP;

    unsafe fn allocate(&self, layout: Layout) -> *mut u8 {
        //  Safety:
        //  -   Forwarding.
        unsafe { (**self).allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        //  Safety:
        //  -   Forwarding.
        unsafe { (**self).deallocate(ptr, layout) }
    }

    unsafe fn construct<T>(&self, ptr: *mut T, value: T) {
        //  Safety:
        //  -   Forwarding.
        unsafe { (**self).construct(ptr, value) }
    }

    unsafe fn destroy<T>(&self, ptr: *mut T) {
        //  Safety:
        //  -   Forwarding.
        unsafe { (**self).destroy(ptr) }
    }
}

/// DefaultAllocator
///
/// A default implementation of the `Allocator` trait, relying on the `alloc` crate global allocator.
///
/// All instances are equal, hence storage is always free to move between containers.
#[cfg(feature = "with-std")]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DefaultAllocator;

#[cfg(feature = "with-std")]
impl Allocator for DefaultAllocator {
    const PROPAGATE_ON_MOVE: bool = true;

    unsafe fn allocate(&self, layout: Layout) -> *mut u8 {
        //  Safety:
        //  -   Forwarding.
        unsafe { alloc::alloc(layout) }
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        //  Safety:
        //  -   Forwarding.
        unsafe { alloc::dealloc(ptr, layout) }
    }
}

/// PropagatingAllocator
///
/// An allocator bearing an identity tag, relying on `DefaultAllocator` for the actual allocations.
///
/// Two instances are equal if and only if their tags are equal. The allocator follows its storage on copy assignment
/// and on swap, but not on move assignment.
///
/// #   Example
///
/// ```
/// use elastic::allocator::{Allocator, PropagatingAllocator};
///
/// assert_eq!(PropagatingAllocator::new(1), PropagatingAllocator::new(1));
/// assert_ne!(PropagatingAllocator::new(1), PropagatingAllocator::new(2));
///
/// assert!(PropagatingAllocator::PROPAGATE_ON_COPY);
/// assert!(!PropagatingAllocator::PROPAGATE_ON_MOVE);
/// assert!(PropagatingAllocator::PROPAGATE_ON_SWAP);
/// ```
#[cfg(feature = "with-std")]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PropagatingAllocator {
    id: u32,
}

#[cfg(feature = "with-std")]
impl PropagatingAllocator {
    /// Creates an instance with the given identity tag.
    pub fn new(id: u32) -> Self { Self { id } }

    /// Returns the identity tag.
    pub fn id(&self) -> u32 { self.id }
}

#[cfg(feature = "with-std")]
impl Allocator for PropagatingAllocator {
    const PROPAGATE_ON_COPY: bool = true;
    const PROPAGATE_ON_SWAP: bool = true;

    unsafe fn allocate(&self, layout: Layout) -> *mut u8 {
        //  Safety:
        //  -   Forwarding.
        unsafe { DefaultAllocator.allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        //  Safety:
        //  -   Forwarding.
        unsafe { DefaultAllocator.deallocate(ptr, layout) }
    }
}

#[cfg(all(test, feature = "with-std"))]
mod tests {

    use super::*;

    #[test]
    fn default_allocator_round_trip() {
        let layout = Layout::new::<u64>();

        unsafe {
            let ptr = DefaultAllocator.allocate(layout) as *mut u64;
            assert!(!ptr.is_null());

            DefaultAllocator.construct(ptr, 42);
            assert_eq!(42, *ptr);

            DefaultAllocator.destroy(ptr);
            DefaultAllocator.deallocate(ptr as *mut u8, layout);
        }
    }

    #[test]
    fn default_allocator_always_equal() {
        assert_eq!(DefaultAllocator, DefaultAllocator::default());
    }

    #[test]
    fn reference_forwards_propagation() {
        fn propagation<A: Allocator>(_: &A) -> (bool, bool, bool) {
            (A::PROPAGATE_ON_COPY, A::PROPAGATE_ON_MOVE, A::PROPAGATE_ON_SWAP)
        }

        let allocator = PropagatingAllocator::new(3);

        assert_eq!((true, false, true), propagation(&allocator));
        assert_eq!((true, false, true), propagation(&&allocator));
        assert_eq!((false, true, false), propagation(&&DefaultAllocator));
    }

    #[test]
    fn select_on_copy_clones() {
        let allocator = PropagatingAllocator::new(7);

        assert_eq!(7, allocator.select_on_copy().id());
    }

    #[test]
    fn destroy_drops_in_place() {
        use std::rc::Rc;

        let shared = Rc::new(5);
        let layout = Layout::new::<Rc<i32>>();

        unsafe {
            let ptr = DefaultAllocator.allocate(layout) as *mut Rc<i32>;

            DefaultAllocator.construct(ptr, shared.clone());
            assert_eq!(2, Rc::strong_count(&shared));

            DefaultAllocator.destroy(ptr);
            assert_eq!(1, Rc::strong_count(&shared));

            DefaultAllocator.deallocate(ptr as *mut u8, layout);
        }
    }
}
