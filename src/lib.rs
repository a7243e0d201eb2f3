#![cfg_attr(not(feature = "with-std"), no_std)]
//  Lints
#![allow(clippy::module_inception)]

//! #   The Elastic Library
//!
//! A contiguous growable array, with pluggable storage and growth.
//! -   The `Vector`: a `Vec` parameterized by an `Allocator` and a `GrowthPolicy`.
//! -   The `Cursor` and `ConstCursor`: checked positions within a `Vector`.
//! -   The `Foo`: a heap-boxed integer, handy to exercise copies and moves.
//!
//! The storage is managed by hand: slots are allocated raw, and elements are constructed and destroyed in place through
//! the `Allocator`.

pub mod allocator;
pub mod failure;
#[cfg(feature = "with-std")]
pub mod foo;
pub mod growth;
pub mod vector;

mod utils;

use self::utils::atomic;
use self::utils::root;
