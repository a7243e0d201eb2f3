//! #   The Vector.
//!
//! The `Vector` is a contiguous growable array, much like `Vec`, whose storage is parameterized by an `Allocator`,
//! and whose growth is parameterized by a `GrowthPolicy`.
//!
//! ##  Under the covers.
//!
//! Under the covers the `Vector` is a single block of raw slots, of which the first `len()` hold elements. Elements
//! are constructed into, and destroyed from, their slot through the `Allocator`.
//!
//! The main consequences are:
//!
//! -   Growing the `Vector` moves its elements to a new block, hence references cannot survive it; the borrow checker
//!     sees to it.
//! -   Cursors, which hold no reference, do survive it, and remain usable as positions.
//!
//! #   Example: basic
//!
//! General usage of `Vector` involve pushing elements, either using `push`, to push one element at a time, or
//! `extend`, to push multiple elements at once.
//!
//! The faillible equivalent exist too: `try_push` and `try_extend` will return a `Result` indicating whether the
//! operation succeeded, and the cause of its failure if it did not.
//!
//! ```
//! use elastic::vector::Vector;
//!
//! let mut vec: Vector<_> = Vector::new();
//! vec.push(1);
//! vec.push(2);
//!
//! assert_eq!(2, vec.len());
//! assert_eq!(1, vec[0]);
//!
//! vec.extend([3, 4, 5]);
//!
//! assert_eq!(5, vec.len());
//! assert_eq!(4, vec[3]);
//!
//! assert_eq!(Some(5), vec.pop());
//! assert_eq!(&[1, 2, 3, 4], vec.as_slice());
//! ```
//!
//! #   Example: accessing elements
//!
//! `Vector` provides multiple ways to access elements:
//!
//! -   The `get` and `get_mut` methods return an `Option`.
//! -   The `at`, `front`, and `back` methods, and their `_mut` counterparts, return a `Result`.
//! -   The `Index` and `IndexMut` traits are implemented to provide infaillible checked scalar access.
//!
//! ```
//! use elastic::failure::Failure;
//! use elastic::vector::Vector;
//!
//! let mut vec: Vector<_> = Vector::from([1, 2, 3]);
//!
//! assert_eq!(Some(&1), vec.get(0));
//! assert_eq!(Ok(&3), vec.back());
//! assert_eq!(Err(Failure::IndexOutOfRange), vec.at(3));
//!
//! vec[1] = 9;
//! *vec.front_mut().unwrap() = 7;
//! assert_eq!(&[7, 9, 3], vec.as_slice());
//! ```
//!
//! #   Example: managing capacity
//!
//! -   The `reserve` and `try_reserve` calls allocate exactly the requested capacity, if larger than the current one.
//! -   The `resize` and `resize_with` calls grow, or shrink, the number of elements.
//! -   The `shrink_to_fit` calls release excess capacity.
//!
//! ```
//! use elastic::vector::Vector;
//!
//! let mut vec: Vector<i32> = Vector::new();
//!
//! vec.reserve(10);
//! assert_eq!(10, vec.capacity());
//!
//! vec.resize(3);
//! assert_eq!(&[0, 0, 0], vec.as_slice());
//!
//! vec.shrink_to_fit();
//! assert_eq!(3, vec.capacity());
//!
//! vec.clear();
//! vec.shrink_to_fit();
//! assert_eq!(0, vec.capacity());
//! ```
//!
//! #   Example: copies, moves, and swaps
//!
//! What happens to the allocator when the storage changes hands is decided by the `PROPAGATE_ON_XXX` constants of
//! the `Allocator`.
//!
//! ```
//! use elastic::allocator::PropagatingAllocator;
//! use elastic::vector::Vector;
//!
//! let mut one: Vector<i32, PropagatingAllocator> = Vector::with_allocator(PropagatingAllocator::new(1));
//! let mut two: Vector<i32, PropagatingAllocator> = Vector::with_allocator(PropagatingAllocator::new(2));
//!
//! one.extend([1, 2, 3]);
//!
//! //  Copies propagate the allocator.
//! two.clone_from(&one);
//! assert_eq!(one, two);
//! assert_eq!(1, two.allocator().id());
//!
//! //  Moves do not, the elements are moved into storage of the destination allocator instead.
//! let mut three: Vector<i32, PropagatingAllocator> = Vector::with_allocator(PropagatingAllocator::new(3));
//! three.move_from(&mut one);
//! assert_eq!(3, three.allocator().id());
//! assert_eq!(&[1, 2, 3], three.as_slice());
//! assert!(one.is_empty());
//! ```

mod buffer;
mod cursor;
mod identity;
mod vector;

pub use self::cursor::{ConstCursor, Cursor};
pub use self::vector::Vector;

use super::allocator;
use super::atomic;
use super::failure;
use super::growth;
use super::root;
