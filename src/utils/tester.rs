//! Internal testing utilities

use crate::root::{cell, iter, ops, ptr};
use crate::root::sync::atomic::{AtomicUsize, Ordering};

use crate::allocator::{Allocator, DefaultAllocator, Layout};

//  Allocation
//
//  Description of an allocation.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Allocation {
    //  The size of the allocation, in bytes.
    pub size: usize,
    //  The alignment of the allocation, in bytes.
    pub alignment: usize,
    //  The pointer allocated.
    pub pointer: *mut u8,
}

impl Allocation {
    pub fn new(pointer: *mut u8, layout: Layout) -> Self {
        Allocation {
            size: layout.size(),
            alignment: layout.align(),
            pointer,
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::from_size_align(self.size, self.alignment).unwrap()
    }
}

//  Test Allocator
//
//  An allocator specifically for testing:
//  -   Bears an identity, two instances being equal if their identities are.
//  -   Allows injecting allocation failures.
//  -   Checks that allocations and deallocations match.
//
//  Containers are expected to use it by reference, so that the test can inspect the allocations afterwards.
pub struct TestAllocator {
    //  The identity.
    pub id: u32,
    //  The actual allocator.
    pub allocator: DefaultAllocator,
    //  The number of allocations allowed.
    pub allowed: cell::Cell<usize>,
    //  The allocations performed; to check deallocation requests.
    pub allocations: cell::RefCell<Vec<Allocation>>,
}

impl TestAllocator {
    //  Creates an instance allowing any number of allocations.
    pub fn new(id: u32) -> Self { Self::limited(id, usize::MAX) }

    //  Creates an instance allowing only `allowed` allocations.
    pub fn limited(id: u32, allowed: usize) -> Self {
        TestAllocator {
            id,
            allocator: DefaultAllocator,
            allowed: cell::Cell::new(allowed),
            allocations: cell::RefCell::new(Vec::new()),
        }
    }

    pub fn allocations(&self) -> Vec<Allocation> {
        self.allocations.borrow().clone()
    }

    pub fn allocation_sizes(&self) -> Vec<usize> {
        self.allocations.borrow().iter()
            .map(|&a| a.size)
            .collect()
    }

    pub fn clear(&self) {
        for a in self.allocations.borrow().iter() {
            //  Safety:
            //  -   Were allocated, and not deallocated.
            unsafe { self.allocator.deallocate(a.pointer, a.layout()) };
        }
    }

    fn locate(&self, allocation: Allocation) -> Option<usize> {
        self.allocations.borrow().iter().position(|a| *a == allocation)
    }
}

impl PartialEq for TestAllocator {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Allocator for TestAllocator {
    unsafe fn allocate(&self, layout: Layout) -> *mut u8 {
        if self.allowed.get() == 0 {
            return ptr::null_mut();
        }

        self.allowed.set(self.allowed.get() - 1);

        let result = self.allocator.allocate(layout);
        assert_ne!(ptr::null_mut(), result);

        let allocation = Allocation::new(result, layout);
        self.allocations.borrow_mut().push(allocation);

        result
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        let allocation = Allocation::new(ptr, layout);

        if let Some(index) = self.locate(allocation) {
            self.allocations.borrow_mut().remove(index);
        } else {
            panic!("Could not find {:?} in {:?} of allocator {}",
                allocation, &*self.allocations.borrow(), self.id);
        }

        self.allocator.deallocate(ptr, layout);
    }
}

impl Drop for TestAllocator {
    fn drop(&mut self) { self.clear() }
}

//  A TestAllocator which follows its storage on copy, move, and swap.
#[derive(Clone, Copy)]
pub struct PropagatingTestAllocator<'a>(pub &'a TestAllocator);

impl<'a> ops::Deref for PropagatingTestAllocator<'a> {
    type Target = TestAllocator;

    fn deref(&self) -> &Self::Target { self.0 }
}

impl<'a> PartialEq for PropagatingTestAllocator<'a> {
    fn eq(&self, other: &Self) -> bool { self.0 == other.0 }
}

impl<'a> Allocator for PropagatingTestAllocator<'a> {
    const PROPAGATE_ON_COPY: bool = true;
    const PROPAGATE_ON_MOVE: bool = true;
    const PROPAGATE_ON_SWAP: bool = true;

    unsafe fn allocate(&self, layout: Layout) -> *mut u8 {
        self.0.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        self.0.deallocate(ptr, layout);
    }
}

//  SpyCount
//
//  A counter of the number of instances of elements.
pub struct SpyCount(AtomicUsize);

impl SpyCount {
    pub fn zero() -> Self { SpyCount(AtomicUsize::new(0)) }

    pub fn get(&self) -> usize { self.0.load(Ordering::Relaxed) }

    fn decrement(&self) { self.0.fetch_sub(1, Ordering::Relaxed); }

    fn increment(&self) { self.0.fetch_add(1, Ordering::Relaxed); }
}

//  Spy Element
//
//  An element tracking the number of instances, helpful to ensure proper drop.
pub struct SpyElement<'a> {
    count: &'a SpyCount,
}

impl<'a> SpyElement<'a> {
    pub fn new(count: &'a SpyCount) -> Self {
        count.increment();
        SpyElement { count }
    }
}

impl<'a> Clone for SpyElement<'a> {
    fn clone(&self) -> Self { Self::new(self.count) }
}

impl<'a> Drop for SpyElement<'a> {
    fn drop(&mut self) {
        self.count.decrement();
    }
}

//  A value which may panic on drop.
#[derive(Debug, Eq, Hash, PartialEq)]
pub struct PanickyDrop<T>(pub T, bool);

impl<T> PanickyDrop<T> {
    //  Creates a normal instance.
    pub fn new(value: T) -> Self { Self(value, false) }

    //  Creates a panicky instance.
    pub fn panicky(value: T) -> Self { Self(value, true) }
}

impl<T> Drop for PanickyDrop<T> {
    fn drop(&mut self) { if self.1 { panic!("Oh No!") } }
}

//  A value which panics on clone, once its budget of clones is exhausted.
//
//  The budget is shared by all the clones of a value, and each clone is counted in a SpyCount.
pub struct PanickyClone<'a> {
    value: i32,
    budget: &'a cell::Cell<usize>,
    count: &'a SpyCount,
}

impl<'a> PanickyClone<'a> {
    pub fn new(value: i32, budget: &'a cell::Cell<usize>, count: &'a SpyCount) -> Self {
        count.increment();
        Self { value, budget, count }
    }

    pub fn value(&self) -> i32 { self.value }
}

impl<'a> Clone for PanickyClone<'a> {
    fn clone(&self) -> Self {
        let budget = self.budget.get();

        if budget == 0 {
            panic!("Simulated copy failure");
        }

        self.budget.set(budget - 1);

        Self::new(self.value, self.budget, self.count)
    }
}

impl<'a> PartialEq for PanickyClone<'a> {
    fn eq(&self, other: &Self) -> bool { self.value == other.value }
}

impl<'a> Drop for PanickyClone<'a> {
    fn drop(&mut self) { self.count.decrement(); }
}

//  An Iterator which panics when reaching the configured count.
pub struct PanickyIterator(u32, u32);

impl PanickyIterator {
    //  Creates an instance configured to panic after yielding `count`
    //  elements.
    pub fn new(count: u32) -> PanickyIterator { PanickyIterator(0, count) }
}

impl iter::Iterator for PanickyIterator {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        assert_ne!(self.0, self.1);

        let result = self.0;
        self.0 += 1;
        Some(result)
    }
}
