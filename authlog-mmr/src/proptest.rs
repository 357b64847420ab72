//! Property-based tests for MMR operations.
//!
//! Tests invariants of the accumulator under arbitrary append sequences.

use primitive_types::U256;
use proptest::prelude::*;

use crate::MmrState;
use authlog_core::Hash;

/// Generate arbitrary hash values (simulating leaf data).
fn arb_hash() -> impl Strategy<Value = Hash> {
    prop::array::uniform32(any::<u8>()).prop_map(Hash::from_bytes)
}

/// Generate a vector of arbitrary hashes.
fn arb_hashes(max_count: usize) -> impl Strategy<Value = Vec<Hash>> {
    prop::collection::vec(arb_hash(), 0..max_count)
}

fn build(leaves: &[Hash]) -> MmrState {
    leaves
        .iter()
        .fold(MmrState::new(), |state, leaf| state.append_leaf(*leaf))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Appending n leaves produces leaf_count == n, and size grows by at
    /// least one per append.
    #[test]
    fn prop_leaf_count_and_size(leaves in arb_hashes(100)) {
        let mut state = MmrState::new();
        for leaf in &leaves {
            let prev_size = state.size();
            state = state.append_leaf(*leaf);
            prop_assert!(state.size() >= prev_size + 1);
        }
        prop_assert_eq!(state.leaf_count(), leaves.len() as u64);
        prop_assert!(state.size() >= state.leaf_count());
    }

    /// Appending the k-th leaf (0-indexed) merges once per trailing one-bit
    /// of k, so size advances by 1 + trailing_ones(k).
    #[test]
    fn prop_merge_cadence(leaves in arb_hashes(80)) {
        let mut state = MmrState::new();
        for (k, leaf) in leaves.iter().enumerate() {
            let prev_size = state.size();
            state = state.append_leaf(*leaf);
            let merges = (k as u64).trailing_ones() as u64;
            prop_assert_eq!(state.size(), prev_size + 1 + merges);
        }
    }

    /// Peak heights encode the binary representation of the leaf count.
    #[test]
    fn prop_binary_counter_correspondence(leaves in arb_hashes(100)) {
        let state = build(&leaves);
        let n = state.leaf_count();

        let mut expected: Vec<u32> =
            (0..64).filter(|bit| n & (1u64 << bit) != 0).collect();
        expected.reverse(); // peaks are ordered high to low

        let heights: Vec<u32> = state.peaks().iter().map(|p| p.height).collect();
        prop_assert_eq!(heights, expected);
    }

    /// At most one live peak per height.
    #[test]
    fn prop_peak_heights_unique(leaves in arb_hashes(100)) {
        let state = build(&leaves);
        let mut heights: Vec<u32> = state.peaks().iter().map(|p| p.height).collect();
        let before = heights.len();
        heights.dedup();
        prop_assert_eq!(heights.len(), before);
    }

    /// Peak positions are strictly increasing and below size.
    #[test]
    fn prop_peak_positions_ordered(leaves in arb_hashes(100)) {
        let state = build(&leaves);
        for pair in state.peaks().windows(2) {
            prop_assert!(pair[0].position < pair[1].position);
        }
        for peak in state.peaks() {
            prop_assert!(peak.position < state.size());
        }
    }

    /// Same append sequence from two empty states yields identical peaks.
    #[test]
    fn prop_deterministic(leaves in arb_hashes(50)) {
        prop_assert_eq!(build(&leaves).peak_hashes(), build(&leaves).peak_hashes());
    }

    /// Reversed order produces different peaks (sequence, not set).
    #[test]
    fn prop_order_matters(leaves in arb_hashes(20)) {
        prop_assume!(leaves.len() >= 2);
        let reversed: Vec<Hash> = leaves.iter().rev().copied().collect();
        prop_assume!(reversed != leaves);

        prop_assert_ne!(build(&leaves).peak_hashes(), build(&reversed).peak_hashes());
    }

    /// A state always verifies against its own peaks as a commitment, and
    /// never against one with a flipped entry.
    #[test]
    fn prop_commitment_self_consistent(leaves in arb_hashes(60), flip in 0usize..60) {
        prop_assume!(!leaves.is_empty());
        let state = build(&leaves);

        let commitment: Vec<U256> = state
            .peak_hashes()
            .iter()
            .map(|h| U256::from_big_endian(h.as_bytes()))
            .collect();
        prop_assert!(state.verify_against_commitment(&commitment));

        let mut tampered = commitment.clone();
        let idx = flip % tampered.len();
        tampered[idx] = tampered[idx].overflowing_add(U256::one()).0;
        prop_assert!(!state.verify_against_commitment(&tampered));
    }

    /// Root is defined for every non-empty state and changes on append.
    #[test]
    fn prop_root_changes_on_append(leaves in arb_hashes(30)) {
        prop_assume!(!leaves.is_empty());

        let mut state = MmrState::new();
        let mut prev_root = None;
        for leaf in &leaves {
            state = state.append_leaf(*leaf);
            let root = state.compute_root().expect("non-empty state has a root");
            prop_assert_ne!(Some(root), prev_root);
            prev_root = Some(root);
        }
    }
}
