#![forbid(unsafe_code)]
//! A height balanced ordered set. See the set module for details.

pub(crate) mod avl;
pub mod set;
