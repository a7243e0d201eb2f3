//! The cursors of the Vector.
//!
//! A cursor is a position within one specific `Vector` instance: the identity of its owner, and an index. It holds no
//! reference to the `Vector`, and thus neither extends its lifetime nor prevents its modification; instead, every
//! access goes back through the `Vector`, which checks both the owner and the bounds.
//!
//! A default constructed cursor is unassociated: it has no owner, and every operation on it fails with
//! `Failure::UnassociatedIterator`. Operations involving two cursors fail with `Failure::UnrelatedIterators` when they
//! do not share the same owner.
//!
//! Moving a cursor before the start clamps it at the start, whilst moving it past the end is allowed, though any
//! access past the end then fails with `Failure::IndexOutOfRange`.

use super::root::{cmp, fmt, hash, marker};

use super::allocator::Allocator;
use super::failure::{Failure, Result};
use super::growth::GrowthPolicy;
use super::identity::Identity;
use super::Vector;

/// `Cursor`
///
/// A position within a `Vector`, allowing read and write accesses.
///
/// #   Example
///
/// ```
/// #   use elastic::vector::Vector;
/// let mut vec: Vector<_> = Vector::from([1, 2, 3]);
///
/// let begin = vec.begin();
/// let end = vec.end();
///
/// assert_eq!(Ok(3), end.distance(&begin));
/// assert_eq!(Ok(&2), begin.forward(1).and_then(|c| c.get(&vec)));
/// assert_eq!(Ok(&3), end.backward(1).and_then(|c| c.get(&vec)));
///
/// *begin.get_mut(&mut vec).unwrap() = 7;
/// assert_eq!(7, vec[0]);
/// ```
pub struct Cursor<T> {
    position: Position,
    _marker: marker::PhantomData<fn() -> T>,
}

/// `ConstCursor`
///
/// A position within a `Vector`, allowing only read accesses.
///
/// A `ConstCursor` can be obtained from a `Cursor`, but not the other way around.
///
/// #   Example
///
/// ```
/// #   use elastic::failure::Failure;
/// #   use elastic::vector::{ConstCursor, Vector};
/// let vec: Vector<_> = Vector::from([1, 2, 3]);
///
/// let mut cursor = vec.cbegin();
/// cursor.increment().unwrap();
/// assert_eq!(Ok(&2), cursor.get(&vec));
///
/// let unassociated = ConstCursor::<i32>::default();
/// assert_eq!(Err(Failure::UnassociatedIterator), unassociated.get(&vec));
/// ```
///
/// #   Example of no conversion back.
///
/// A `ConstCursor` cannot be turned into a `Cursor`.
///
/// ```compile_fail
/// # use elastic::vector::{Cursor, Vector};
/// let vec: Vector<_> = Vector::from([1, 2, 3]);
///
/// let cursor: Cursor<i32> = vec.cbegin().into();
/// ```
pub struct ConstCursor<T> {
    position: Position,
    _marker: marker::PhantomData<fn() -> T>,
}

macro_rules! cursor {
    ($name:ident) => {
        impl<T> $name<T> {
            //  Creates an instance associated to `owner`.
            pub(crate) fn new(owner: Identity, index: usize) -> Self {
                Self { position: Position::new(owner, index), _marker: marker::PhantomData }
            }

            /// Returns whether the cursor is associated to a `Vector`.
            pub fn is_associated(&self) -> bool { self.position.owner.is_some() }

            /// Moves the cursor to the next position.
            ///
            /// #   Errors
            ///
            /// -   Returns `UnassociatedIterator` if the cursor is unassociated.
            /// -   Returns `ElementsOverflow` if the position overflows.
            pub fn increment(&mut self) -> Result<()> { self.position.step_forward(1) }

            /// Moves the cursor to the previous position, if any.
            ///
            /// A cursor at the start stays at the start.
            ///
            /// #   Errors
            ///
            /// Returns `UnassociatedIterator` if the cursor is unassociated.
            pub fn decrement(&mut self) -> Result<()> { self.position.step_backward(1) }

            /// Moves the cursor by `offset` positions, clamping at the start.
            ///
            /// #   Errors
            ///
            /// -   Returns `UnassociatedIterator` if the cursor is unassociated.
            /// -   Returns `ElementsOverflow` if the position overflows.
            pub fn advance(&mut self, offset: isize) -> Result<()> { self.position.advance(offset) }

            /// Moves the cursor back by `offset` positions, clamping at the start.
            ///
            /// #   Errors
            ///
            /// -   Returns `UnassociatedIterator` if the cursor is unassociated.
            /// -   Returns `ElementsOverflow` if the position overflows.
            pub fn retreat(&mut self, offset: isize) -> Result<()> { self.position.retreat(offset) }

            /// Returns a cursor `offset` positions further, clamping at the start.
            ///
            /// #   Errors
            ///
            /// -   Returns `UnassociatedIterator` if the cursor is unassociated.
            /// -   Returns `ElementsOverflow` if the position overflows.
            pub fn forward(mut self, offset: isize) -> Result<Self> {
                self.advance(offset)?;
                Ok(self)
            }

            /// Returns a cursor `offset` positions back, clamping at the start.
            ///
            /// #   Errors
            ///
            /// -   Returns `UnassociatedIterator` if the cursor is unassociated.
            /// -   Returns `ElementsOverflow` if the position overflows.
            pub fn backward(mut self, offset: isize) -> Result<Self> {
                self.retreat(offset)?;
                Ok(self)
            }

            /// Returns the signed number of positions from `other` to `self`.
            ///
            /// #   Errors
            ///
            /// -   Returns `UnassociatedIterator` if `self` is unassociated.
            /// -   Returns `UnrelatedIterators` if `other` is not associated to the same `Vector`.
            pub fn distance(&self, other: &Self) -> Result<isize> { self.position.distance(&other.position) }

            /// Compares the positions of `self` and `other`.
            ///
            /// #   Errors
            ///
            /// -   Returns `UnassociatedIterator` if `self` is unassociated.
            /// -   Returns `UnrelatedIterators` if `other` is not associated to the same `Vector`.
            pub fn try_cmp(&self, other: &Self) -> Result<cmp::Ordering> { self.position.compare(&other.position) }

            /// Returns whether `self` is strictly before `other`.
            ///
            /// Fails as per `try_cmp`.
            pub fn try_lt(&self, other: &Self) -> Result<bool> {
                self.try_cmp(other).map(cmp::Ordering::is_lt)
            }

            /// Returns whether `self` is strictly after `other`.
            ///
            /// Fails as per `try_cmp`.
            pub fn try_gt(&self, other: &Self) -> Result<bool> {
                self.try_cmp(other).map(cmp::Ordering::is_gt)
            }

            /// Returns a reference to the element at the position of the cursor.
            ///
            /// #   Errors
            ///
            /// -   Returns `UnassociatedIterator` if the cursor is unassociated.
            /// -   Returns `UnrelatedIterators` if `vector` is not the `Vector` the cursor is associated to.
            /// -   Returns `IndexOutOfRange` if the position is past the last element.
            pub fn get<'v, A, G>(&self, vector: &'v Vector<T, A, G>) -> Result<&'v T>
            where
                A: Allocator,
                G: GrowthPolicy,
            {
                self.at(vector, 0)
            }

            /// Returns a reference to the element `offset` positions further than the cursor.
            ///
            /// The offset counts from the position of the cursor, not from the start of the `Vector`: `at(vec, 0)` is
            /// `get(vec)`, whatever the position.
            ///
            /// Fails as per `get`.
            pub fn at<'v, A, G>(&self, vector: &'v Vector<T, A, G>, offset: usize) -> Result<&'v T>
            where
                A: Allocator,
                G: GrowthPolicy,
            {
                let index = self.position.locate(offset, vector.identity())?;
                vector.at(index)
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self { *self }
        }

        impl<T> Copy for $name<T> {}

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self { position: Position::default(), _marker: marker::PhantomData }
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("owner", &self.position.owner)
                    .field("index", &self.position.index)
                    .finish()
            }
        }

        impl<T> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool { self.position == other.position }
        }

        impl<T> Eq for $name<T> {}

        impl<T> hash::Hash for $name<T> {
            fn hash<H: hash::Hasher>(&self, state: &mut H) { hash::Hash::hash(&self.position, state); }
        }
    }
}

cursor!{ Cursor }

cursor!{ ConstCursor }

impl<T> Cursor<T> {
    /// Returns a mutable reference to the element at the position of the cursor.
    ///
    /// Fails as per `get`.
    pub fn get_mut<'v, A, G>(&self, vector: &'v mut Vector<T, A, G>) -> Result<&'v mut T>
    where
        A: Allocator,
        G: GrowthPolicy,
    {
        self.at_mut(vector, 0)
    }

    /// Returns a mutable reference to the element `offset` positions further than the cursor.
    ///
    /// The offset counts from the position of the cursor, not from the start of the `Vector`.
    ///
    /// Fails as per `get`.
    pub fn at_mut<'v, A, G>(&self, vector: &'v mut Vector<T, A, G>, offset: usize) -> Result<&'v mut T>
    where
        A: Allocator,
        G: GrowthPolicy,
    {
        let index = self.position.locate(offset, vector.identity())?;
        vector.at_mut(index)
    }
}

impl<T> From<Cursor<T>> for ConstCursor<T> {
    fn from(cursor: Cursor<T>) -> Self {
        Self { position: cursor.position, _marker: marker::PhantomData }
    }
}

//
//  Implementation Details
//

//  The position shared by both cursors.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
struct Position {
    //  None if unassociated.
    owner: Option<Identity>,
    index: usize,
}

impl Position {
    fn new(owner: Identity, index: usize) -> Self { Self { owner: Some(owner), index } }

    fn owner(&self) -> Result<Identity> { self.owner.ok_or(Failure::UnassociatedIterator) }

    fn step_forward(&mut self, offset: usize) -> Result<()> {
        self.owner()?;

        self.index = self.index.checked_add(offset).ok_or(Failure::ElementsOverflow)?;

        Ok(())
    }

    fn step_backward(&mut self, offset: usize) -> Result<()> {
        self.owner()?;

        self.index = self.index.saturating_sub(offset);

        Ok(())
    }

    fn advance(&mut self, offset: isize) -> Result<()> {
        if offset < 0 {
            self.step_backward(offset.unsigned_abs())
        } else {
            self.step_forward(offset.unsigned_abs())
        }
    }

    fn retreat(&mut self, offset: isize) -> Result<()> {
        if offset < 0 {
            self.step_forward(offset.unsigned_abs())
        } else {
            self.step_backward(offset.unsigned_abs())
        }
    }

    fn related(&self, other: &Self) -> Result<()> {
        let owner = self.owner()?;

        if other.owner != Some(owner) {
            return Err(Failure::UnrelatedIterators);
        }

        Ok(())
    }

    fn distance(&self, other: &Self) -> Result<isize> {
        self.related(other)?;

        Ok(self.index.wrapping_sub(other.index) as isize)
    }

    fn compare(&self, other: &Self) -> Result<cmp::Ordering> {
        self.related(other)?;

        Ok(self.index.cmp(&other.index))
    }

    //  Returns the index `offset` positions further, if `identity` is that of the owner.
    fn locate(&self, offset: usize, identity: Identity) -> Result<usize> {
        let owner = self.owner()?;

        if owner != identity {
            return Err(Failure::UnrelatedIterators);
        }

        self.index.checked_add(offset).ok_or(Failure::IndexOutOfRange)
    }
}

#[cfg(test)]
mod tests {

use super::*;

use crate::foo::Foo;

fn abc() -> (Foo, Foo, Foo) { (Foo::new(1), Foo::new(2), Foo::new(3)) }

#[test]
fn cursor_dereference() {
    let (a, b, _) = abc();
    let mut vec: Vector<_> = [a.clone(), b.clone(), Foo::new(3)].into_iter().collect();

    let begin = vec.begin();

    assert_eq!(Ok(&a), begin.get(&vec));
    assert_eq!(Ok(1), begin.get(&vec).map(Foo::data));
    assert_eq!(Ok(&b), begin.at(&vec, 1));
}

#[test]
fn cursor_increment_decrement() {
    let (a, b, c) = abc();
    let mut vec: Vector<_> = Vector::from([a.clone(), b.clone(), c.clone()]);

    let mut cursor = vec.begin();
    assert_eq!(Ok(&a), cursor.get(&vec));

    cursor.increment().unwrap();
    assert_eq!(Ok(&b), cursor.get(&vec));

    cursor.increment().unwrap();
    assert_eq!(Ok(&c), cursor.get(&vec));

    cursor.decrement().unwrap();
    assert_eq!(Ok(&b), cursor.get(&vec));

    cursor.decrement().unwrap();
    assert_eq!(Ok(&a), cursor.get(&vec));

    //  Clamps at the start.
    cursor.decrement().unwrap();
    assert_eq!(Ok(&a), cursor.get(&vec));
    assert_eq!(vec.begin(), cursor);
}

#[test]
fn cursor_arithmetic() {
    let (a, b, c) = abc();
    let mut vec: Vector<_> = Vector::from([a, b.clone(), c.clone()]);

    let begin = vec.begin();
    let end = vec.end();

    assert_eq!(Ok(&b), begin.forward(1).and_then(|c| c.get(&vec)));
    assert_eq!(Ok(&c), end.backward(1).and_then(|c| c.get(&vec)));
    assert_eq!(Ok(&c), end.forward(-1).and_then(|c| c.get(&vec)));

    let mut cursor = begin;
    cursor.advance(2).unwrap();
    assert_eq!(Ok(&c), cursor.get(&vec));

    cursor.retreat(1).unwrap();
    assert_eq!(Ok(&b), cursor.get(&vec));

    cursor.retreat(-1).unwrap();
    assert_eq!(Ok(&c), cursor.get(&vec));
}

#[test]
fn cursor_distance() {
    let mut vec: Vector<_> = Vector::from([Foo::new(1), Foo::new(2), Foo::new(3)]);

    let begin = vec.begin();
    let middle = begin.forward(1).unwrap();
    let end = vec.end();

    assert_eq!(Ok(3), end.distance(&begin));
    assert_eq!(Ok(1), middle.distance(&begin));
    assert_eq!(Ok(-1), begin.distance(&middle));
}

#[test]
fn cursor_clamps_at_begin() {
    let mut vec: Vector<_> = Vector::from([Foo::new(1), Foo::new(2), Foo::new(3)]);

    let mut cursor = vec.end();
    cursor.retreat(4).unwrap();

    assert_eq!(vec.begin(), cursor);

    let cursor = vec.begin().forward(isize::MIN).unwrap();
    assert_eq!(vec.begin(), cursor);
}

#[test]
fn cursor_comparisons() {
    let mut vec: Vector<_> = Vector::from([Foo::new(1), Foo::new(2), Foo::new(3)]);

    let begin = vec.begin();
    let middle = begin.forward(1).unwrap();
    let end = vec.end();

    assert_eq!(begin, begin);
    assert_ne!(middle, end);

    assert_eq!(Ok(true), middle.try_lt(&end));
    assert_eq!(Ok(true), end.try_gt(&middle));
    assert_eq!(Ok(false), middle.try_gt(&end));
    assert_eq!(Ok(false), end.try_lt(&middle));
    assert_eq!(Ok(cmp::Ordering::Equal), begin.try_cmp(&begin));
}

#[test]
fn cursor_at_is_relative() {
    let (a, b, c) = abc();
    let mut vec: Vector<_> = Vector::from([a, b.clone(), c.clone()]);

    let middle = vec.begin().forward(1).unwrap();

    assert_eq!(Ok(&b), middle.at(&vec, 0));
    assert_eq!(Ok(&c), middle.at(&vec, 1));
    assert_eq!(Err(Failure::IndexOutOfRange), middle.at(&vec, 2));

    middle.at_mut(&mut vec, 1).unwrap().set_data(9);
    assert_eq!(9, vec[2].data());
}

#[test]
fn cursor_position_overflow() {
    let mut vec: Vector<Foo> = Vector::new();

    let mut cursor = vec.end();
    cursor.advance(isize::MAX).unwrap();
    cursor.advance(isize::MAX).unwrap();
    cursor.increment().unwrap();

    let last = cursor;

    assert_eq!(Err(Failure::ElementsOverflow), cursor.increment());
    assert_eq!(Err(Failure::ElementsOverflow), cursor.forward(1));
    assert_eq!(Err(Failure::ElementsOverflow), cursor.retreat(-1));
    assert_eq!(last, cursor);
}

#[test]
fn cursor_past_the_end() {
    let mut vec: Vector<_> = Vector::from([Foo::new(1)]);

    let end = vec.end();
    assert_eq!(Err(Failure::IndexOutOfRange), end.get(&vec));

    let far = end.forward(10).unwrap();
    assert_eq!(Err(Failure::IndexOutOfRange), far.get(&vec));
    assert_eq!(Err(Failure::IndexOutOfRange), vec.begin().at(&vec, usize::MAX));
}

#[test]
fn cursor_get_mut() {
    let mut vec: Vector<_> = Vector::from([Foo::new(1), Foo::new(2)]);

    let cursor = vec.begin();
    cursor.at_mut(&mut vec, 1).unwrap().set_data(5);
    cursor.get_mut(&mut vec).unwrap().set_data(4);

    assert_eq!(4, vec[0].data());
    assert_eq!(5, vec[1].data());
}

#[test]
fn cursor_unassociated() {
    let vec: Vector<Foo> = Vector::from([Foo::new(1)]);
    let mut other: Vector<Foo> = Vector::from([Foo::new(1)]);
    let mut cursor = Cursor::<Foo>::default();

    assert!(!cursor.is_associated());

    assert_eq!(Err(Failure::UnassociatedIterator), cursor.get(&vec));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.get_mut(&mut other).map(|_| ()));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.increment());
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.decrement());
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.forward(1));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.backward(1));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.advance(1));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.retreat(1));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.at(&vec, 0));

    //  Still unassociated, after all these failed attempts.
    assert_eq!(Cursor::default(), cursor);
}

#[test]
fn const_cursor_unassociated() {
    let vec: Vector<Foo> = Vector::from([Foo::new(1)]);
    let mut cursor = ConstCursor::<Foo>::default();

    assert_eq!(Err(Failure::UnassociatedIterator), cursor.get(&vec));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.increment());
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.decrement());
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.forward(1));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.backward(1));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.advance(1));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.retreat(1));
    assert_eq!(Err(Failure::UnassociatedIterator), cursor.at(&vec, 0));
}

#[test]
fn cursor_unassociated_comparisons() {
    let invalid = Cursor::<Foo>::default();
    let mut vec: Vector<_> = Vector::from([Foo::new(1)]);
    let valid = vec.begin();

    assert_eq!(Err(Failure::UnassociatedIterator), invalid.try_lt(&valid));
    assert_eq!(Err(Failure::UnrelatedIterators), valid.try_lt(&invalid));
    assert_eq!(Err(Failure::UnassociatedIterator), invalid.try_lt(&invalid));

    assert_eq!(Err(Failure::UnassociatedIterator), invalid.try_gt(&valid));
    assert_eq!(Err(Failure::UnrelatedIterators), valid.try_gt(&invalid));
    assert_eq!(Err(Failure::UnassociatedIterator), invalid.try_gt(&invalid));

    assert_eq!(Err(Failure::UnassociatedIterator), invalid.distance(&valid));
    assert_eq!(Err(Failure::UnrelatedIterators), valid.distance(&invalid));
    assert_eq!(Err(Failure::UnassociatedIterator), invalid.distance(&invalid));

    //  Equality never fails.
    assert_ne!(invalid, valid);
    assert_eq!(invalid, invalid);
}

#[test]
fn cursor_unrelated() {
    let mut one: Vector<Foo> = Vector::new();
    let mut two: Vector<Foo> = Vector::new();

    let first = one.begin();
    let second = two.begin();

    assert_ne!(first, second);
    assert_eq!(Err(Failure::UnrelatedIterators), first.distance(&second));
    assert_eq!(Err(Failure::UnrelatedIterators), first.try_lt(&second));
    assert_eq!(Err(Failure::UnrelatedIterators), second.try_gt(&first));

    let one = one.cbegin();
    let two = two.cbegin();

    assert_eq!(Err(Failure::UnrelatedIterators), one.distance(&two));
}

#[test]
fn cursor_wrong_vector() {
    let mut one: Vector<_> = Vector::from([Foo::new(1)]);
    let mut two: Vector<_> = Vector::from([Foo::new(1)]);

    let cursor = one.begin();

    assert_eq!(Err(Failure::UnrelatedIterators), cursor.get(&two));
    assert_eq!(Err(Failure::UnrelatedIterators), cursor.get_mut(&mut two).map(|_| ()));
    assert_eq!(Ok(1), cursor.get(&one).map(Foo::data));
}

#[test]
fn const_cursor_from_cursor() {
    let (a, b, c) = abc();
    let mut vec: Vector<_> = Vector::from([a.clone(), b.clone(), c.clone()]);

    let cursor = vec.begin().forward(1).unwrap();
    let converted = ConstCursor::from(cursor);

    assert_eq!(Ok(&b), converted.get(&vec));
    assert_eq!(vec.cbegin().forward(1), Ok(converted));

    let begin = vec.cbegin();
    let end = vec.cend();

    assert_eq!(Ok(3), end.distance(&begin));
    assert_eq!(Ok(&a), begin.get(&vec));
    assert_eq!(Ok(&c), end.backward(1).and_then(|c| c.get(&vec)));
}

#[test]
fn cursor_survives_reallocation() {
    let mut vec: Vector<i32> = Vector::new();

    let first = vec.push(1);
    vec.reserve(32);
    vec.push(2);

    assert_eq!(Ok(&1), first.get(&vec));

    vec.clear();
    vec.shrink_to_fit();

    assert_eq!(Err(Failure::IndexOutOfRange), first.get(&vec));
}

#[test]
fn cursor_debug() {
    let cursor = Cursor::<i32>::default();

    assert_eq!("Cursor { owner: None, index: 0 }", format!("{:?}", cursor));
}

}
