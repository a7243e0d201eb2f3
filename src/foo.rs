//! A heap-boxed integer.
//!
//! `Foo` owns its value through a `Box`, so that copying it allocates, and moving it out leaves a husk behind. It is
//! handy to exercise the copy, move and drop paths of a container with a type which is not trivially copyable.
//!
//! ```
//! use elastic::foo::Foo;
//!
//! let mut a = Foo::new(42);
//! let b = a.clone();
//! assert_eq!(a, b);
//!
//! let c = a.take();
//! assert_eq!(42, c.data());
//! assert!(a.is_moved_from());
//! ```

use super::root::fmt;

/// `Foo`
///
/// Two instances compare equal if their values are equal.
#[derive(Debug, Eq, Hash, PartialEq)]
pub struct Foo {
    //  None once moved-from.
    data: Option<Box<i32>>,
}

impl Foo {
    /// Creates an instance holding `data`.
    pub fn new(data: i32) -> Self { Self { data: Some(Box::new(data)) } }

    /// Returns the value.
    ///
    /// #   Panics
    ///
    /// Panics if the instance was moved-from.
    pub fn data(&self) -> i32 {
        match &self.data {
            Some(data) => **data,
            None => panic_moved_from(),
        }
    }

    /// Sets the value.
    ///
    /// #   Panics
    ///
    /// Panics if the instance was moved-from.
    pub fn set_data(&mut self, data: i32) {
        match &mut self.data {
            Some(slot) => **slot = data,
            None => panic_moved_from(),
        }
    }

    /// Returns whether the value was moved out of this instance.
    pub fn is_moved_from(&self) -> bool { self.data.is_none() }

    /// Moves the value out, into a new instance.
    ///
    /// The value is not copied: the box changes hands. Afterwards `self` is moved-from, and may only be assigned to,
    /// dropped, or queried with `is_moved_from`.
    pub fn take(&mut self) -> Foo { Foo { data: self.data.take() } }

    /// Moves the value of `other` into `self`, dropping the former value of `self`.
    ///
    /// Afterwards `other` is moved-from.
    ///
    /// ```
    /// use elastic::foo::Foo;
    ///
    /// let mut a = Foo::new(42);
    /// let mut b = Foo::new(100);
    ///
    /// b.assign_from(&mut a);
    ///
    /// assert_eq!(42, b.data());
    /// assert!(a.is_moved_from());
    /// ```
    pub fn assign_from(&mut self, other: &mut Foo) { self.data = other.data.take(); }
}

impl Clone for Foo {
    fn clone(&self) -> Self { Self { data: self.data.clone() } }

    //  Reuses the existing box, if any.
    fn clone_from(&mut self, source: &Self) {
        match (&mut self.data, &source.data) {
            (Some(mine), Some(theirs)) => **mine = **theirs,
            (mine, theirs) => *mine = theirs.clone(),
        }
    }
}

impl Default for Foo {
    fn default() -> Self { Self::new(0) }
}

impl fmt::Display for Foo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data())
    }
}

#[cold]
#[inline(never)]
fn panic_moved_from() -> ! {
    panic!("Access to a moved-from Foo");
}
