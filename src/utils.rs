//! Internal utilities.

pub mod atomic;
pub mod root;

#[cfg(test)]
pub mod tester;
