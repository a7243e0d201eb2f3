//! The Vector

use super::root::{fmt, iter, mem, ops, ptr, slice};

use super::allocator::Allocator;
use super::buffer::Buffer;
use super::cursor::{ConstCursor, Cursor};
use super::failure::{Failure, Result};
use super::growth::{self, ExactGrowth, GrowthPolicy};
use super::identity::Identity;

#[cfg(feature = "with-std")]
use super::allocator::DefaultAllocator;

#[cfg(feature = "with-std")]
use super::growth::DefaultGrowthPolicy;

//
//  Public Interface
//

/// `Vector`
#[cfg(not(feature = "with-std"))]
pub struct Vector<T, A: Allocator, G: GrowthPolicy> {
    allocator: A,
    growth: G,
    identity: Identity,
    length: usize,
    buffer: Buffer<T>,
}

/// `Vector`
#[cfg(feature = "with-std")]
pub struct Vector<T, A: Allocator = DefaultAllocator, G: GrowthPolicy = DefaultGrowthPolicy> {
    //  Allocator of the buffer, and of its elements.
    allocator: A,
    //  Consulted when pushing into a full buffer.
    growth: G,
    //  Identity of the instance, for cursors.
    identity: Identity,
    //  The number of elements in the vector:
    //
    //  -   The first `length` slots of the buffer are initialized.
    //  -   The remaining slots are not.
    length: usize,
    buffer: Buffer<T>,
}

impl<T, A: Allocator + Default, G: GrowthPolicy + Default> Vector<T, A, G> {
    /// Creates a new, empty, instance of the `Vector`.
    ///
    /// No memory is allocated.
    ///
    /// #   Panics
    ///
    /// Panics if `T` is zero-sized.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let vec: Vector<i32> = Vector::new();
    ///
    /// assert_eq!(0, vec.len());
    /// assert_eq!(0, vec.capacity());
    /// ```
    pub fn new() -> Self { Self::with_allocator(A::default()) }

    /// Creates a new, empty, instance of the `Vector` with exactly `capacity` slots.
    ///
    /// #   Panics
    ///
    /// Panics if `T` is zero-sized, or if the allocation fails.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let vec: Vector<i32> = Vector::with_capacity(5);
    ///
    /// assert_eq!(0, vec.len());
    /// assert_eq!(5, vec.capacity());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self { Self::with_capacity_and_allocator(capacity, A::default()) }
}

impl<T, A: Allocator, G: GrowthPolicy + Default> Vector<T, A, G> {
    /// Creates a new, empty, instance of the `Vector` using `allocator`.
    ///
    /// No memory is allocated.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::allocator::PropagatingAllocator;
    /// #   use elastic::vector::Vector;
    /// let vec: Vector<i32, _> = Vector::with_allocator(PropagatingAllocator::new(3));
    ///
    /// assert_eq!(0, vec.capacity());
    /// assert_eq!(3, vec.allocator().id());
    /// ```
    pub fn with_allocator(allocator: A) -> Self { Self::with_capacity_and_allocator(0, allocator) }

    /// Creates a new, empty, instance of the `Vector` using `allocator`, with exactly `capacity` slots.
    ///
    /// #   Panics
    ///
    /// Panics if `T` is zero-sized, or if the allocation fails.
    pub fn with_capacity_and_allocator(capacity: usize, allocator: A) -> Self {
        Self::with_capacity_allocator_and_growth(capacity, allocator, G::default())
    }
}

impl<T, A: Allocator, G: GrowthPolicy> Vector<T, A, G> {
    /// Creates a new, empty, instance of the `Vector` using `allocator` and `growth`, with exactly `capacity` slots.
    ///
    /// #   Panics
    ///
    /// Panics if `T` is zero-sized, or if the allocation fails.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::allocator::DefaultAllocator;
    /// #   use elastic::growth::ExactGrowth;
    /// #   use elastic::vector::Vector;
    /// let mut vec = Vector::with_capacity_allocator_and_growth(2, DefaultAllocator, ExactGrowth);
    ///
    /// vec.extend([1, 2, 3]);
    /// assert_eq!(3, vec.capacity());
    /// ```
    pub fn with_capacity_allocator_and_growth(capacity: usize, allocator: A, growth: G) -> Self {
        Self::try_with_capacity_allocator_and_growth(capacity, allocator, growth).unwrap_or_else(panic_from_failure)
    }

    /// Creates a new, empty, instance of the `Vector` using `allocator` and `growth`, with exactly `capacity` slots.
    ///
    /// #   Errors
    ///
    /// -   Returns `BytesOverflow` if the size of the storage, in bytes, overflows.
    /// -   Returns `OutOfMemory` if the allocator fails to allocate.
    ///
    /// #   Panics
    ///
    /// Panics if `T` is zero-sized.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::allocator::DefaultAllocator;
    /// #   use elastic::failure::Failure;
    /// #   use elastic::growth::DefaultGrowthPolicy;
    /// #   use elastic::vector::Vector;
    /// let vec = Vector::<u64, _, _>::try_with_capacity_allocator_and_growth(
    ///     usize::MAX,
    ///     DefaultAllocator,
    ///     DefaultGrowthPolicy,
    /// );
    ///
    /// assert_eq!(Some(Failure::BytesOverflow), vec.err());
    /// ```
    pub fn try_with_capacity_allocator_and_growth(capacity: usize, allocator: A, growth: G) -> Result<Self> {
        let buffer = Buffer::allocate(capacity, &allocator)?;

        Ok(Self::from_parts(allocator, growth, buffer))
    }

    /// Creates a new instance of the `Vector` using `allocator` and `growth`, holding `values`.
    ///
    /// The lower bound of the size hint of `values` is reserved upfront.
    ///
    /// #   Panics
    ///
    /// Panics if `T` is zero-sized, or if any allocation fails.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::allocator::PropagatingAllocator;
    /// #   use elastic::growth::ExactGrowth;
    /// #   use elastic::vector::Vector;
    /// let vec = Vector::from_values_in(1..4, PropagatingAllocator::new(1), ExactGrowth);
    ///
    /// assert_eq!(&[1, 2, 3], vec.as_slice());
    /// assert_eq!(3, vec.capacity());
    /// ```
    pub fn from_values_in<I>(values: I, allocator: A, growth: G) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        let (lower, _) = values.size_hint();

        let mut result = Self::with_capacity_allocator_and_growth(lower, allocator, growth);
        result.extend(values);
        result
    }

    /// Returns whether the instance contains any element, or not.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<_> = Vector::new();
    /// assert!(vec.is_empty());
    ///
    /// vec.push(1);
    /// assert!(!vec.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.length == 0 }

    /// Returns the number of elements contained in the instance.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<_> = Vector::new();
    /// assert_eq!(0, vec.len());
    ///
    /// vec.push(1);
    /// assert_eq!(1, vec.len());
    /// ```
    pub fn len(&self) -> usize { self.length }

    /// Returns the number of slots, whether holding an element or not.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<_> = Vector::new();
    /// assert_eq!(0, vec.capacity());
    ///
    /// vec.push(1);
    /// assert_eq!(1, vec.capacity());
    ///
    /// vec.push(2);
    /// vec.push(3);
    /// assert_eq!(4, vec.capacity());
    /// ```
    pub fn capacity(&self) -> usize { self.buffer.capacity() }

    /// Returns a reference to the allocator.
    pub fn allocator(&self) -> &A { &self.allocator }

    /// Returns a reference to the growth policy.
    pub fn growth_policy(&self) -> &G { &self.growth }

    /// Returns the elements, as a slice.
    pub fn as_slice(&self) -> &[T] {
        //  Safety:
        //  -   The first `self.length` slots are initialized.
        unsafe { self.buffer.initialized(self.length) }
    }

    /// Returns the elements, as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        //  Safety:
        //  -   The first `self.length` slots are initialized.
        unsafe { self.buffer.initialized_mut(self.length) }
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> { self.as_slice().iter() }

    /// Returns an iterator over the elements, allowing modification.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> { self.as_mut_slice().iter_mut() }

    /// Returns a reference to the element at index `index`, if any.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let vec: Vector<_> = Vector::from([1, 2]);
    ///
    /// assert_eq!(Some(&2), vec.get(1));
    /// assert_eq!(None, vec.get(2));
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> { self.as_slice().get(index) }

    /// Returns a mutable reference to the element at index `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> { self.as_mut_slice().get_mut(index) }

    /// Returns a reference to the element at index `index`.
    ///
    /// #   Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is greater than or equal to `self.len()`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::failure::Failure;
    /// #   use elastic::vector::Vector;
    /// let vec: Vector<_> = Vector::from([1, 2]);
    ///
    /// assert_eq!(Ok(&1), vec.at(0));
    /// assert_eq!(Err(Failure::IndexOutOfRange), vec.at(2));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> { self.get(index).ok_or(Failure::IndexOutOfRange) }

    /// Returns a mutable reference to the element at index `index`.
    ///
    /// #   Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is greater than or equal to `self.len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> { self.get_mut(index).ok_or(Failure::IndexOutOfRange) }

    /// Returns a reference to the first element.
    ///
    /// #   Errors
    ///
    /// Returns `IndexOutOfRange` if the instance is empty.
    pub fn front(&self) -> Result<&T> { self.at(0) }

    /// Returns a mutable reference to the first element.
    ///
    /// #   Errors
    ///
    /// Returns `IndexOutOfRange` if the instance is empty.
    pub fn front_mut(&mut self) -> Result<&mut T> { self.at_mut(0) }

    /// Returns a reference to the last element.
    ///
    /// #   Errors
    ///
    /// Returns `IndexOutOfRange` if the instance is empty.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::failure::Failure;
    /// #   use elastic::vector::Vector;
    /// let vec: Vector<i32> = Vector::new();
    ///
    /// assert_eq!(Err(Failure::IndexOutOfRange), vec.back());
    /// ```
    pub fn back(&self) -> Result<&T> { self.at(self.last()?) }

    /// Returns a mutable reference to the last element.
    ///
    /// #   Errors
    ///
    /// Returns `IndexOutOfRange` if the instance is empty.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        let last = self.last()?;
        self.at_mut(last)
    }

    /// Returns a `Cursor` to the first element.
    pub fn begin(&mut self) -> Cursor<T> { Cursor::new(self.identity, 0) }

    /// Returns a `Cursor` one past the last element.
    pub fn end(&mut self) -> Cursor<T> { Cursor::new(self.identity, self.length) }

    /// Returns a `ConstCursor` to the first element.
    pub fn cbegin(&self) -> ConstCursor<T> { ConstCursor::new(self.identity, 0) }

    /// Returns a `ConstCursor` one past the last element.
    pub fn cend(&self) -> ConstCursor<T> { ConstCursor::new(self.identity, self.length) }

    /// Ensures that the capacity is at least `capacity`.
    ///
    /// If `capacity` is greater than the current capacity, exactly `capacity` slots are allocated, and the elements
    /// are moved over. Otherwise, this is a no-op.
    ///
    /// In case of failure, the instance is left unmodified.
    ///
    /// #   Errors
    ///
    /// -   Returns `BytesOverflow` if the size of the storage, in bytes, overflows.
    /// -   Returns `OutOfMemory` if the allocator fails to allocate.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::failure::Failure;
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<u64> = Vector::new();
    ///
    /// assert_eq!(Ok(()), vec.try_reserve(5));
    /// assert_eq!(5, vec.capacity());
    ///
    /// assert_eq!(Ok(()), vec.try_reserve(3));
    /// assert_eq!(5, vec.capacity());
    ///
    /// assert_eq!(Err(Failure::BytesOverflow), vec.try_reserve(usize::MAX));
    /// assert_eq!(5, vec.capacity());
    /// ```
    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.buffer.capacity() {
            return Ok(());
        }

        self.try_reallocate(capacity)
    }

    /// Ensures that the capacity is at least `capacity`.
    ///
    /// #   Panics
    ///
    /// Panics if `try_reserve` fails.
    pub fn reserve(&mut self, capacity: usize) {
        self.try_reserve(capacity).unwrap_or_else(panic_from_failure);
    }

    /// Reduces the capacity to the number of elements.
    ///
    /// If the instance is empty, its storage is released altogether.
    ///
    /// In case of failure, the instance is left unmodified.
    ///
    /// #   Errors
    ///
    /// Returns `OutOfMemory` if the allocator fails to allocate the smaller block.
    pub fn try_shrink_to_fit(&mut self) -> Result<()> {
        if self.length == self.buffer.capacity() {
            return Ok(());
        }

        self.try_reallocate(self.length)
    }

    /// Reduces the capacity to the number of elements.
    ///
    /// #   Panics
    ///
    /// Panics if `try_shrink_to_fit` fails.
    pub fn shrink_to_fit(&mut self) {
        self.try_shrink_to_fit().unwrap_or_else(panic_from_failure);
    }

    /// Sets the number of elements to `length`.
    ///
    /// If `length` is less than the current number of elements, the excess elements are destroyed, and if `length` is
    /// 0, the storage is released. Otherwise, exactly `length` slots are reserved, and the new elements are created
    /// by calling `f`.
    ///
    /// If `f` panics, the elements it created so far are destroyed, whilst the capacity remains as reserved.
    ///
    /// #   Errors
    ///
    /// Fails as per `try_reserve`, in which case the instance is left unmodified.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<_> = Vector::from([1, 2]);
    ///
    /// let mut next = 2;
    /// vec.try_resize_with(4, || { next += 1; next }).unwrap();
    /// assert_eq!(&[1, 2, 3, 4], vec.as_slice());
    ///
    /// vec.try_resize_with(1, || unreachable!()).unwrap();
    /// assert_eq!(&[1], vec.as_slice());
    /// ```
    pub fn try_resize_with<F>(&mut self, length: usize, mut f: F) -> Result<()>
    where
        F: FnMut() -> T,
    {
        if length <= self.length {
            if length < self.length {
                self.truncate(length);

                if length == 0 {
                    self.release();
                }
            }

            return Ok(());
        }

        self.try_reserve(length)?;

        let mut rollback = Rollback { length: self.length, vector: self };

        while rollback.vector.length < length {
            let value = f();

            //  Safety:
            //  -   The length is strictly less than the capacity, as exactly `length` slots were reserved.
            unsafe { rollback.vector.construct_back(value) };
        }

        mem::forget(rollback);

        Ok(())
    }

    /// Sets the number of elements to `length`, creating the new elements by calling `f`.
    ///
    /// #   Panics
    ///
    /// Panics if `try_resize_with` fails.
    pub fn resize_with<F>(&mut self, length: usize, f: F)
    where
        F: FnMut() -> T,
    {
        self.try_resize_with(length, f).unwrap_or_else(panic_from_failure);
    }

    /// Sets the number of elements to `length`, default constructing the new elements.
    ///
    /// #   Errors
    ///
    /// Fails as per `try_resize_with`.
    pub fn try_resize(&mut self, length: usize) -> Result<()>
    where
        T: Default,
    {
        self.try_resize_with(length, T::default)
    }

    /// Sets the number of elements to `length`, default constructing the new elements.
    ///
    /// #   Panics
    ///
    /// Panics if `try_resize` fails.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<_> = Vector::from([1, 2, 3]);
    ///
    /// vec.resize(5);
    /// assert_eq!(&[1, 2, 3, 0, 0], vec.as_slice());
    /// assert_eq!(5, vec.capacity());
    ///
    /// vec.resize(0);
    /// assert_eq!(0, vec.capacity());
    /// ```
    pub fn resize(&mut self, length: usize)
    where
        T: Default,
    {
        self.resize_with(length, T::default);
    }

    /// Destroys the elements past `length`, if any.
    ///
    /// The capacity is unchanged.
    pub fn truncate(&mut self, length: usize) {
        if length >= self.length {
            return;
        }

        //  The length is lowered first, so that a panicking destructor leaks, rather than double drops.
        let former = mem::replace(&mut self.length, length);

        for index in length..former {
            //  Safety:
            //  -   `index` is within the formerly initialized slots, each destroyed once.
            unsafe { self.allocator.destroy(self.buffer.slot(index)) };
        }
    }

    /// Destroys all elements.
    ///
    /// The capacity is unchanged.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<_> = Vector::from([1, 2, 3]);
    ///
    /// vec.clear();
    ///
    /// assert_eq!(0, vec.len());
    /// assert_eq!(3, vec.capacity());
    /// ```
    pub fn clear(&mut self) { self.truncate(0) }

    /// Appends an element to the back, returning a `Cursor` to it.
    ///
    /// If the instance is full, it first grows as per its `GrowthPolicy`.
    ///
    /// #   Errors
    ///
    /// -   Returns `ElementsOverflow` if the new capacity overflows.
    /// -   Returns `BytesOverflow` if the size of the storage, in bytes, overflows.
    /// -   Returns `OutOfMemory` if the allocator fails to allocate.
    ///
    /// In case of failure, the instance is left unmodified.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<_> = Vector::new();
    ///
    /// let cursor = vec.try_push(1).unwrap();
    ///
    /// assert_eq!(Ok(&1), cursor.get(&vec));
    /// ```
    pub fn try_push(&mut self, value: T) -> Result<Cursor<T>> { self.try_push_with(|| value) }

    /// Appends an element to the back, returning a `Cursor` to it.
    ///
    /// #   Panics
    ///
    /// Panics if `try_push` fails.
    pub fn push(&mut self, value: T) -> Cursor<T> { self.try_push(value).unwrap_or_else(panic_from_failure) }

    /// Appends an element created by `f` to the back, returning a `Cursor` to it.
    ///
    /// `f` is only called once room is made for the element.
    ///
    /// #   Errors
    ///
    /// Fails as per `try_push`, in which case `f` is not called.
    pub fn try_push_with<F>(&mut self, f: F) -> Result<Cursor<T>>
    where
        F: FnOnce() -> T,
    {
        if self.length == self.buffer.capacity() {
            let capacity = growth::next_capacity(&self.growth, self.length, self.buffer.capacity())
                .ok_or(Failure::ElementsOverflow)?;

            self.try_reallocate(capacity)?;
        }

        let index = self.length;

        //  Safety:
        //  -   The length is strictly less than the capacity, as per the above.
        unsafe { self.construct_back(f()) };

        Ok(Cursor::new(self.identity, index))
    }

    /// Appends an element created by `f` to the back, returning a `Cursor` to it.
    ///
    /// #   Panics
    ///
    /// Panics if `try_push_with` fails.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<String> = Vector::new();
    ///
    /// let cursor = vec.push_with(|| "Hello".to_string());
    ///
    /// assert_eq!(Ok("Hello"), cursor.get(&vec).map(String::as_str));
    /// ```
    pub fn push_with<F>(&mut self, f: F) -> Cursor<T>
    where
        F: FnOnce() -> T,
    {
        self.try_push_with(f).unwrap_or_else(panic_from_failure)
    }

    /// Appends multiple elements to the back.
    ///
    /// #   Errors
    ///
    /// Fails as per `try_push`, in which case the elements appended so far are kept.
    pub fn try_extend<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.try_push(value)?;
        }

        Ok(())
    }

    /// Removes the last element, and returns it, if any.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<_> = Vector::from([1, 2]);
    ///
    /// assert_eq!(Some(2), vec.pop());
    /// assert_eq!(Some(1), vec.pop());
    /// assert_eq!(None, vec.pop());
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        let last = self.last().ok()?;

        self.length = last;

        //  Safety:
        //  -   The slot is initialized, and past the length, hence not read again.
        Some(unsafe { ptr::read(self.buffer.slot(last)) })
    }

    /// Destroys the last element, if any.
    pub fn pop_back(&mut self) { self.truncate(self.length.saturating_sub(1)) }

    /// Exchanges the elements of `self` and `other`.
    ///
    /// The allocators are exchanged too if `A::PROPAGATE_ON_SWAP`, otherwise each instance keeps its own allocator,
    /// and the allocators are required to be equal. The growth policies stay put. Cursors stay with their instance,
    /// not with the elements.
    ///
    /// #   Errors
    ///
    /// Returns `AllocatorMismatch` if the allocators are neither propagated nor equal, in which case neither
    /// instance is modified.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut one: Vector<_> = Vector::from([1, 2, 3]);
    /// let mut two: Vector<_> = Vector::from([4]);
    ///
    /// one.try_swap(&mut two).unwrap();
    ///
    /// assert_eq!(&[4], one.as_slice());
    /// assert_eq!(&[1, 2, 3], two.as_slice());
    /// ```
    pub fn try_swap(&mut self, other: &mut Self) -> Result<()> {
        if A::PROPAGATE_ON_SWAP {
            mem::swap(&mut self.allocator, &mut other.allocator);
        } else if self.allocator != other.allocator {
            return Err(Failure::AllocatorMismatch);
        }

        self.swap_storage(other);

        Ok(())
    }

    /// Exchanges the elements of `self` and `other`.
    ///
    /// #   Panics
    ///
    /// Panics if `try_swap` fails.
    pub fn swap(&mut self, other: &mut Self) {
        self.try_swap(other).unwrap_or_else(panic_from_failure);
    }

    /// Moves the elements of `other` into `self`, destroying the former elements of `self`.
    ///
    /// If `A::PROPAGATE_ON_MOVE`, or if the allocators are equal, the storage of `other` is taken over, along with its
    /// allocator in the former case. Otherwise, the elements are moved one at a time into storage allocated by the
    /// allocator of `self`.
    ///
    /// Afterwards, `other` is empty, and holds no storage. The growth policies stay put.
    ///
    /// #   Errors
    ///
    /// Fails as per `try_reserve` when moving the elements one at a time, in which case neither instance is modified.
    pub fn try_move_from(&mut self, other: &mut Self) -> Result<()> {
        if A::PROPAGATE_ON_MOVE || self.allocator == other.allocator {
            self.clear();
            self.release();
            self.swap_storage(other);

            if A::PROPAGATE_ON_MOVE {
                mem::swap(&mut self.allocator, &mut other.allocator);
            }

            return Ok(());
        }

        let length = other.length;
        let mut buffer = Buffer::allocate(length, &self.allocator)?;

        //  Safety:
        //  -   The first `length` slots of `other` are initialized, and the slots of `buffer` are not.
        //  -   `other` forgets about its elements right after.
        unsafe { other.buffer.relocate(&mut buffer, length, &self.allocator) };

        other.length = 0;
        other.release();

        mem::swap(&mut self.buffer, &mut buffer);
        let former = mem::replace(&mut self.length, length);

        //  Safety:
        //  -   The first `former` slots of `buffer` are initialized, and no longer referred to.
        //  -   `buffer` was allocated by `self.allocator`.
        unsafe {
            for index in 0..former {
                self.allocator.destroy(buffer.slot(index));
            }

            buffer.deallocate(&self.allocator);
        }

        Ok(())
    }

    /// Moves the elements of `other` into `self`, destroying the former elements of `self`.
    ///
    /// #   Panics
    ///
    /// Panics if `try_move_from` fails.
    pub fn move_from(&mut self, other: &mut Self) {
        self.try_move_from(other).unwrap_or_else(panic_from_failure);
    }

    /// Moves the elements out, into a new instance, leaving `self` empty and without storage.
    ///
    /// The new instance takes over the storage, and a clone of the allocator and growth policy.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use elastic::vector::Vector;
    /// let mut vec: Vector<_> = Vector::from([1, 2, 3]);
    ///
    /// let taken = vec.take();
    ///
    /// assert_eq!(&[1, 2, 3], taken.as_slice());
    /// assert_eq!(0, vec.len());
    /// assert_eq!(0, vec.capacity());
    /// ```
    pub fn take(&mut self) -> Self
    where
        A: Clone,
        G: Clone,
    {
        let mut result = Self::from_parts(self.allocator.clone(), self.growth.clone(), Buffer::new());
        result.swap_storage(self);
        result
    }

    //  Creates an empty instance around `buffer`.
    fn from_parts(allocator: A, growth: G, buffer: Buffer<T>) -> Self {
        Self { allocator, growth, identity: Identity::fresh(), length: 0, buffer }
    }

    //  Returns the identity of this instance.
    pub(crate) fn identity(&self) -> Identity { self.identity }

    //  Returns the index of the last element.
    fn last(&self) -> Result<usize> { self.length.checked_sub(1).ok_or(Failure::IndexOutOfRange) }

    //  Moves the elements into a block of exactly `capacity` slots, releasing the current block.
    //
    //  A `capacity` of 0 releases the storage.
    fn try_reallocate(&mut self, capacity: usize) -> Result<()> {
        debug_assert!(capacity >= self.length);

        let mut buffer = Buffer::allocate(capacity, &self.allocator)?;

        //  Safety:
        //  -   The first `self.length` slots are initialized, and the slots of `buffer` are not.
        //  -   The block was allocated by `self.allocator`, and its slots are forgotten right after.
        unsafe {
            self.buffer.relocate(&mut buffer, self.length, &self.allocator);
            self.buffer.deallocate(&self.allocator);
        }

        self.buffer = buffer;

        Ok(())
    }

    //  Releases the storage, if any.
    fn release(&mut self) {
        debug_assert_eq!(0, self.length);

        if !self.buffer.is_allocated() {
            return;
        }

        //  Safety:
        //  -   The block was allocated by `self.allocator`.
        //  -   No slot is initialized.
        unsafe { self.buffer.deallocate(&self.allocator) };
    }

    //  Exchanges the elements and storage, but not the allocators.
    fn swap_storage<H: GrowthPolicy>(&mut self, other: &mut Vector<T, A, H>) {
        mem::swap(&mut self.buffer, &mut other.buffer);
        mem::swap(&mut self.length, &mut other.length);
    }

    //  Constructs `value` in the first uninitialized slot.
    //
    //  #   Safety
    //
    //  -   Assumes that the length is strictly less than the capacity.
    unsafe fn construct_back(&mut self, value: T) {
        debug_assert!(self.length < self.buffer.capacity());

        //  Safety:
        //  -   The slot is within the block, and uninitialized.
        unsafe { self.allocator.construct(self.buffer.slot(self.length), value) };

        self.length += 1;
    }
}

impl<T: Clone, A: Allocator, G: GrowthPolicy> Vector<T, A, G> {
    /// Creates a copy of the instance.
    ///
    /// The copy uses the allocator selected by `A::select_on_copy`, and has the same capacity.
    ///
    /// If cloning an element panics, the elements cloned so far are destroyed, and the storage released.
    ///
    /// #   Errors
    ///
    /// Fails as per `try_reserve`.
    pub fn try_clone(&self) -> Result<Self>
    where
        A: Clone,
        G: Clone,
    {
        Self::try_copy_of(self.as_slice(), self.capacity(), self.allocator.select_on_copy(), self.growth.clone())
    }

    /// Replaces the elements of `self` by copies of those of `source`.
    ///
    /// If `A::PROPAGATE_ON_COPY`, the allocator of `source` replaces that of `self`, the former storage of `self` being
    /// released with its former allocator. The growth policy stays put.
    ///
    /// The copies are created in new storage, before the former elements are destroyed, hence in case of failure, or
    /// if cloning an element panics, `self` is left unmodified.
    ///
    /// #   Errors
    ///
    /// Fails as per `try_reserve`.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<()>
    where
        A: Clone,
    {
        let allocator = if A::PROPAGATE_ON_COPY { source.allocator.clone() } else { self.allocator.clone() };

        let mut staging =
            Vector::<T, A, ExactGrowth>::try_copy_of(source.as_slice(), source.capacity(), allocator, ExactGrowth)?;

        staging.swap_storage(self);

        if A::PROPAGATE_ON_COPY {
            mem::swap(&mut self.allocator, &mut staging.allocator);
        }

        //  `staging` destroys the former elements of `self`, with the allocator that created them.
        Ok(())
    }

    //  Creates an instance with exactly `capacity` slots, holding copies of `values`.
    fn try_copy_of(values: &[T], capacity: usize, allocator: A, growth: G) -> Result<Self> {
        debug_assert!(capacity >= values.len());

        let mut result = Self::try_with_capacity_allocator_and_growth(capacity, allocator, growth)?;

        for value in values {
            //  Safety:
            //  -   The length is strictly less than the capacity, as the capacity is at least `values.len()`.
            unsafe { result.construct_back(value.clone()) };
        }

        Ok(result)
    }
}

/// A `Vector<T>` can be `Send` across threads whenever a `Vec<T>` can, as long as its allocator and growth policy
/// can too.
///
/// #   Example of Send.
///
/// ```
/// # use elastic::vector::Vector;
/// fn ensure_send<T: Send>(_: T) {}
///
/// let mut vec: Vector<_> = Vector::new();
/// vec.push("Hello".to_string());
///
/// ensure_send(vec);
/// ```
///
/// #   Example of not Send.
///
/// Types that are not Send, however, prevent from sending `Vector` across threads.
///
/// ```compile_fail
/// # use std::rc::Rc;
/// # use elastic::vector::Vector;
/// fn ensure_send<T: Send>(_: T) {}
///
/// let mut vec: Vector<_> = Vector::new();
/// vec.push(Rc::new(3));
///
/// ensure_send(vec);
/// ```
unsafe impl<T: Send, A: Allocator + Send, G: GrowthPolicy + Send> Send for Vector<T, A, G> {}

/// A `Vector<T>` can be shared across threads whenever a `Vec<T>` can, as long as its allocator and growth policy
/// can too.
///
/// #   Example of not Sync.
///
/// ```compile_fail
/// # use std::cell::Cell;
/// # use elastic::vector::Vector;
/// fn ensure_sync<T: Sync>(_: T) {}
///
/// let mut vec: Vector<_> = Vector::new();
/// vec.push(Cell::new(1));
///
/// ensure_sync(vec);
/// ```
unsafe impl<T: Sync, A: Allocator + Sync, G: GrowthPolicy + Sync> Sync for Vector<T, A, G> {}

impl<T, A: Allocator, G: GrowthPolicy> Drop for Vector<T, A, G> {
    fn drop(&mut self) {
        self.clear();
        self.release();
    }
}

impl<T, A: Allocator + Default, G: GrowthPolicy + Default> Default for Vector<T, A, G> {
    fn default() -> Self { Self::new() }
}

impl<T: Clone, A: Allocator + Clone, G: GrowthPolicy + Clone> Clone for Vector<T, A, G> {
    fn clone(&self) -> Self { self.try_clone().unwrap_or_else(panic_from_failure) }

    fn clone_from(&mut self, source: &Self) { self.try_clone_from(source).unwrap_or_else(panic_from_failure); }
}

impl<T: fmt::Debug, A: Allocator, G: GrowthPolicy> fmt::Debug for Vector<T, A, G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Vector")
            .field("capacity", &self.capacity())
            .field("length", &self.length)
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<T, U, A, B, G, H> PartialEq<Vector<U, B, H>> for Vector<T, A, G>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
    G: GrowthPolicy,
    H: GrowthPolicy,
{
    fn eq(&self, other: &Vector<U, B, H>) -> bool { self.as_slice() == other.as_slice() }
}

impl<T: Eq, A: Allocator, G: GrowthPolicy> Eq for Vector<T, A, G> {}

impl<T, A: Allocator, G: GrowthPolicy> iter::Extend<T> for Vector<T, A, G> {
    fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.try_extend(values).unwrap_or_else(panic_from_failure);
    }
}

impl<T, A: Allocator + Default, G: GrowthPolicy + Default> iter::FromIterator<T> for Vector<T, A, G> {
    fn from_iter<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_values_in(values, A::default(), G::default())
    }
}

impl<T, A: Allocator + Default, G: GrowthPolicy + Default, const N: usize> From<[T; N]> for Vector<T, A, G> {
    fn from(values: [T; N]) -> Self { Self::from_values_in(values, A::default(), G::default()) }
}

impl<'a, T, A: Allocator, G: GrowthPolicy> IntoIterator for &'a Vector<T, A, G> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T, A: Allocator, G: GrowthPolicy> IntoIterator for &'a mut Vector<T, A, G> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

impl<T, A: Allocator, G: GrowthPolicy> ops::Index<usize> for Vector<T, A, G> {
    type Output = T;

    fn index(&self, index: usize) -> &T { self.at(index).unwrap_or_else(panic_from_failure) }
}

impl<T, A: Allocator, G: GrowthPolicy> ops::IndexMut<usize> for Vector<T, A, G> {
    fn index_mut(&mut self, index: usize) -> &mut T { self.at_mut(index).unwrap_or_else(panic_from_failure) }
}

//
//  Implementation Details
//

//  Truncates the vector back to `length` when dropped, unless forgotten.
struct Rollback<'a, T, A: Allocator, G: GrowthPolicy> {
    vector: &'a mut Vector<T, A, G>,
    length: usize,
}

impl<'a, T, A: Allocator, G: GrowthPolicy> Drop for Rollback<'a, T, A, G> {
    fn drop(&mut self) { self.vector.truncate(self.length); }
}

#[cold]
#[inline(never)]
fn panic_from_failure<R>(failure: Failure) -> R {
    panic!("{}", failure);
}

//  mod tests
