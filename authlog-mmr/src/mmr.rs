//! Core MMR state and operations.
//!
//! The state is a snapshot: every mutation returns a new value, so callers
//! holding their own `MmrState` never observe interference. Positions are
//! assigned sequentially across the whole structure (leaves and merged
//! parents alike), so `size` counts every node ever created.
//!
//! ```text
//! append #1:  [h0@0]
//! append #2:  [h0@0, h0@1]  -> merge -> [h1@2]
//! append #3:  [h1@2, h0@3]
//! append #4:  [h1@2, h0@4]  -> merge -> [h1@2, h1@5] -> merge -> [h2@6]
//! ```

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use authlog_core::{bag_pair, hash_node, Error, Hash, Result};

/// One accumulator peak: the root of a perfect binary subtree that has not
/// yet merged with a sibling of equal height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MmrPeak {
    /// Height of the subtree this peak roots (0 = single leaf).
    pub height: u32,
    /// Sequential index assigned at creation across the whole structure.
    pub position: u64,
    /// 32-byte digest of the subtree.
    pub hash: Hash,
}

/// Snapshot of an MMR accumulator.
///
/// Peaks are kept in insertion order (taller trees first, since a new leaf
/// always enters at the tail); merges only ever happen at the tail, so at
/// most one peak per height is live and the multiset of peak heights
/// encodes the binary representation of `leaf_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MmrState {
    peaks: Vec<MmrPeak>,
    leaf_count: u64,
    size: u64,
}

impl MmrState {
    /// Create the empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leaves appended so far.
    pub fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    /// Total nodes ever created (leaves plus merged parents).
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The live peaks, in insertion order.
    pub fn peaks(&self) -> &[MmrPeak] {
        &self.peaks
    }

    /// Append one leaf hash, returning the advanced snapshot.
    ///
    /// Pushes a height-0 peak at `position = size`, then merges the last
    /// two peaks while they share a height. Appending the k-th leaf
    /// (0-indexed) triggers exactly as many merges as k has trailing
    /// one-bits.
    #[must_use]
    pub fn append_leaf(&self, leaf: Hash) -> MmrState {
        let mut next = self.clone();
        let mut position = next.size;

        next.peaks.push(MmrPeak {
            height: 0,
            position,
            hash: leaf,
        });
        position += 1;

        while next.peaks.len() >= 2 {
            let right = next.peaks[next.peaks.len() - 1];
            let left = next.peaks[next.peaks.len() - 2];
            if left.height != right.height {
                break;
            }
            next.peaks.truncate(next.peaks.len() - 2);
            next.peaks.push(MmrPeak {
                height: left.height + 1,
                position,
                hash: hash_node(left.hash, right.hash),
            });
            position += 1;
        }

        next.leaf_count += 1;
        next.size = position;
        next
    }

    /// Append a slice of leaf hashes in order.
    #[must_use]
    pub fn append_leaves(&self, leaves: &[Hash]) -> MmrState {
        leaves
            .iter()
            .fold(self.clone(), |state, leaf| state.append_leaf(*leaf))
    }

    /// Bag the peaks into a single 32-byte root, right to left.
    ///
    /// A single peak is returned verbatim; otherwise the accumulator starts
    /// from the last (highest-position) peak and each earlier peak is
    /// prepend-hashed via [`bag_pair`] (no domain prefix). Note the stream
    /// head commits to the peak list, not to this root; see
    /// [`verify_against_commitment`](Self::verify_against_commitment).
    pub fn compute_root(&self) -> Result<Hash> {
        let last = self
            .peaks
            .last()
            .ok_or_else(|| Error::EmptyMmr("cannot compute root of empty MMR".to_string()))?;

        let mut root = last.hash;
        for peak in self.peaks.iter().rev().skip(1) {
            root = bag_pair(peak.hash, root);
        }
        Ok(root)
    }

    /// Copies of the peak hashes in insertion order.
    pub fn peak_hashes(&self) -> Vec<Hash> {
        self.peaks.iter().map(|p| p.hash).collect()
    }

    /// Check the local peak set against a wire commitment.
    ///
    /// The commitment is the on-chain representation: one big-endian
    /// unsigned integer per peak, in the same order as
    /// [`peak_hashes`](Self::peak_hashes). Strict structural equality: any
    /// difference in count or any entry is a mismatch.
    pub fn verify_against_commitment(&self, commitment: &[U256]) -> bool {
        if self.peaks.len() != commitment.len() {
            return false;
        }
        self.peaks
            .iter()
            .zip(commitment.iter())
            .all(|(peak, expected)| U256::from_big_endian(peak.hash.as_bytes()) == *expected)
    }
}
