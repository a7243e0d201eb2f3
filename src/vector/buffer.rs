//! The storage block of the Vector.

use super::root::{hint, marker, mem, ptr, slice};

use super::allocator::{Allocator, Layout};
use super::failure::{Failure, Result};

//  A contiguous block of raw slots.
//
//  The Buffer tracks neither which slots are initialized, nor which allocator it was obtained from: both are the
//  responsibility of its owner. Notably, it does not implement Drop.
//
//  The pointer is null if and only if the capacity is 0.
pub struct Buffer<T> {
    ptr: *mut T,
    capacity: usize,
    _marker: marker::PhantomData<T>,
}

impl<T> Buffer<T> {
    //  Creates an empty instance, without allocating.
    //
    //  #   Panics
    //
    //  Panics if `T` is zero-sized.
    pub fn new() -> Self {
        if mem::size_of::<T>() == 0 {
            panic_zero_sized_element();
        }

        Self { ptr: ptr::null_mut(), capacity: 0, _marker: marker::PhantomData }
    }

    //  Allocates an instance of exactly `capacity` slots.
    //
    //  No memory is allocated if `capacity` is 0.
    //
    //  #   Errors
    //
    //  -   If the size of the block, in bytes, overflows.
    //  -   If the allocator fails to allocate.
    pub fn allocate<A: Allocator>(capacity: usize, allocator: &A) -> Result<Self> {
        let mut result = Self::new();

        if capacity == 0 {
            return Ok(result);
        }

        let layout = Self::allocation_layout(capacity)?;

        //  Safety:
        //  -   The layout has a non-zero size, as `capacity` and the size of `T` are non-zero.
        let ptr = unsafe { allocator.allocate(layout) };

        if ptr.is_null() { return Err(Failure::OutOfMemory) }

        result.ptr = ptr as *mut T;
        result.capacity = capacity;

        Ok(result)
    }

    //  Deallocates the block, if allocated, leaving the instance empty.
    //
    //  #   Safety
    //
    //  -   Assumes that `allocator` is equal to the allocator used in `allocate`.
    //  -   Assumes that no slot holds a value still in use.
    pub unsafe fn deallocate<A: Allocator>(&mut self, allocator: &A) {
        if self.ptr.is_null() {
            return;
        }

        let layout = match Self::allocation_layout(self.capacity) {
            Ok(layout) => layout,
            Err(_) => {
                //  Safety:
                //  -   Cannot error, it succeeded during the allocation.
                debug_assert!(false, "{:?} succeeded in allocation!", self.capacity);
                unsafe { hint::unreachable_unchecked() }
            },
        };

        //  Safety:
        //  -   The pointer matches the pointer of the allocation.
        //  -   The layout matches the layout of the allocation.
        unsafe { allocator.deallocate(self.ptr as *mut u8, layout) };

        self.ptr = ptr::null_mut();
        self.capacity = 0;
    }

    //  Returns the number of slots.
    pub fn capacity(&self) -> usize { self.capacity }

    //  Returns whether a block is currently allocated.
    pub fn is_allocated(&self) -> bool { !self.ptr.is_null() }

    //  Returns a pointer to the slot at `index`.
    //
    //  #   Safety
    //
    //  -   Assumes that `index` is strictly less than the capacity.
    pub unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index < self.capacity);

        //  Safety:
        //  -   `index` is within the allocated block.
        unsafe { self.ptr.add(index) }
    }

    //  Returns a slice to the first length elements.
    //
    //  #   Safety
    //
    //  -   Assumes that the first length elements are initialized.
    pub unsafe fn initialized(&self, length: usize) -> &[T] {
        if length == 0 {
            return &[];
        }

        debug_assert!(length <= self.capacity);

        //  Safety:
        //  -   The pointer is non-null, as length is non-zero.
        //  -   The first length elements are assumed to be initialized.
        unsafe { slice::from_raw_parts(self.ptr, length) }
    }

    //  Returns a slice to the first length elements.
    //
    //  #   Safety
    //
    //  -   Assumes that the first length elements are initialized.
    pub unsafe fn initialized_mut(&mut self, length: usize) -> &mut [T] {
        if length == 0 {
            return &mut [];
        }

        debug_assert!(length <= self.capacity);

        //  Safety:
        //  -   The pointer is non-null, as length is non-zero.
        //  -   The first length elements are assumed to be initialized.
        //  -   The access is exclusive, as per &mut self.
        unsafe { slice::from_raw_parts_mut(self.ptr, length) }
    }

    //  Moves the first `length` elements into the first `length` slots of `destination`, preserving order.
    //
    //  Afterwards, the first `length` slots of `self` are to be considered uninitialized.
    //
    //  #   Safety
    //
    //  -   Assumes that the first `length` elements of `self` are initialized.
    //  -   Assumes that the first `length` slots of `destination` are not.
    pub unsafe fn relocate<A: Allocator>(&mut self, destination: &mut Buffer<T>, length: usize, allocator: &A) {
        debug_assert!(length <= self.capacity);
        debug_assert!(length <= destination.capacity);

        for index in 0..length {
            //  Safety:
            //  -   `index` is within bounds of both buffers.
            //  -   The source element is initialized, and is not read again.
            unsafe {
                let value = ptr::read(self.slot(index));
                allocator.construct(destination.slot(index), value);
            }
        }
    }

    //  Computes the layout for a given capacity.
    //
    //  #   Fails
    //
    //  -   If the necessary size overflows.
    fn allocation_layout(capacity: usize) -> Result<Layout> {
        let size = mem::size_of::<T>();
        let alignment = mem::align_of::<T>();

        match capacity.checked_mul(size) {
            //  `Layout` further requires the size, rounded up to alignment, not to exceed `isize::MAX`.
            Some(result) if result <= isize::MAX as usize - (alignment - 1) => {
                //  Safety:
                //  -   Alignment is a power of 2, as it comes from `align_of`.
                //  -   Size, rounded up to alignment, does not overflow `isize`.
                Ok(unsafe { Layout::from_size_align_unchecked(result, alignment) })
            },
            _ => Err(Failure::BytesOverflow),
        }
    }
}

#[cold]
#[inline(never)]
fn panic_zero_sized_element() -> ! {
    panic!("Zero-sized elements are not supported");
}
