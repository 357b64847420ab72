//! Core types for the authenticated event log.
//!
//! This crate provides the pieces shared by the MMR engine and the events
//! client:
//!
//! - [`crypto`] - the 32-byte [`Hash`] type and the domain-separated
//!   hashing scheme the accumulator is built on
//! - [`event`] - [`EventData`], one ledger event to be committed
//! - [`error`] - the workspace error type
//!
//! # Hashing scheme
//!
//! Leaves and internal nodes are domain-separated by a single-byte prefix:
//!
//! ```text
//! hash_leaf(data)        = SHA-256(0x00 || data)
//! hash_node(left, right) = SHA-256(0x01 || left || right)
//! bag_pair(left, right)  = SHA-256(left || right)
//! ```
//!
//! `bag_pair` carries no prefix: it is the combination the on-chain
//! structure uses when bagging peaks into a single root, and must stay
//! distinct from `hash_node`.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod crypto;
pub mod error;
pub mod event;

pub use crypto::{bag_pair, hash_leaf, hash_node, Hash};
pub use error::{Error, Result};
pub use event::EventData;
