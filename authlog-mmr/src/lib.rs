//! Merkle Mountain Range (MMR) accumulator.
//!
//! An MMR is an append-only data structure committing to an ordered
//! sequence of leaves through a set of "peaks", each the root of a perfect
//! binary subtree. Appending a leaf may merge equal-height peaks, exactly
//! like carry propagation in a binary counter: the multiset of peak heights
//! always equals the set bits of the leaf count.
//!
//! This engine keeps only the peak frontier, not the interior nodes: the
//! event-stream verifier replays a batch from scratch and compares peaks
//! against an on-chain commitment, so no inclusion paths are ever walked
//! locally.
//!
//! # Example
//!
//! ```rust
//! use authlog_mmr::MmrState;
//! use authlog_core::hash_leaf;
//!
//! let state = MmrState::new()
//!     .append_leaf(hash_leaf(b"event1"))
//!     .append_leaf(hash_leaf(b"event2"))
//!     .append_leaf(hash_leaf(b"event3"));
//!
//! assert_eq!(state.leaf_count(), 3);
//! // 3 = 0b11: one peak of height 1, one of height 0.
//! assert_eq!(state.peaks().len(), 2);
//!
//! let root = state.compute_root().unwrap();
//! assert!(!root.is_zero());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod leaf;
mod mmr;

#[cfg(test)]
mod proptest;

pub use leaf::hash_event;
pub use mmr::{MmrPeak, MmrState};
