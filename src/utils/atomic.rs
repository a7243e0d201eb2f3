//! Atomics with a fixed memory ordering.
//!
//! Each type commits to a single `Ordering` for all its operations, so that a reader need not audit every call site.

use super::root::sync::atomic::{AtomicUsize, Ordering};

macro_rules! atomic {
    ($name:ident, $underlying:ident, $raw:ident, $ordering:expr) => {
        pub struct $name($underlying);

        impl $name {
            pub const fn new(v: $raw) -> Self { Self($underlying::new(v)) }

            //  Increments the value, returning the former value.
            //
            //  Wraps around on overflow.
            pub fn fetch_increment(&self) -> $raw { self.0.fetch_add(1, $ordering) }
        }
    }
}

//  Only uniqueness matters for a counter, not the ordering with respect to other memory.
atomic!{ RelaxedUsize, AtomicUsize, usize, Ordering::Relaxed }
