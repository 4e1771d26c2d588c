//! Property-based tests for the hfmn codec.
//!
//! Round trip, reproducible output, prefix-free codes, and optimal trees, checked over
//! generated inputs with proptest.

use proptest::prelude::*;
use std::collections::HashSet;

use hfmn::compression::header::read_tree;
use hfmn::{
    build_tree, decode, decode_bytes, decode_str, encode, encode_bytes, encode_str, freqs,
    CodeTable, FrequencyMap,
};

// =============================================================================
// GENERATORS
// =============================================================================

/// Byte inputs with at least two distinct values
fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 2..3000)
        .prop_filter("needs two distinct bytes", |data| {
            data.iter().collect::<HashSet<_>>().len() >= 2
        })
}

/// Small frequency maps, cheap enough to check against every possible merge order
fn small_weights_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1_u64..60, 2..=6)
}

/// Lowest possible weighted path length over all binary trees with these leaf weights.
/// Every tree is some sequence of pairwise merges, and its cost is the sum of the merges.
fn brute_force_cost(weights: &[u64]) -> u64 {
    if weights.len() < 2 {
        return 0;
    }
    let mut best = u64::MAX;
    for i in 0..weights.len() {
        for j in i + 1..weights.len() {
            let merged = weights[i] + weights[j];
            let mut rest = weights
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, w)| *w)
                .collect::<Vec<_>>();
            rest.push(merged);
            best = best.min(merged + brute_force_cost(&rest));
        }
    }
    best
}

// =============================================================================
// CODEC PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_bytes_round_trip(data in bytes_strategy()) {
        let packed = encode_bytes(&data).unwrap();
        prop_assert_eq!(decode_bytes(&packed).unwrap(), data);
    }

    #[test]
    fn prop_text_round_trip(text in "[a-zé€ 🌍]{0,200}") {
        prop_assume!(text.chars().collect::<HashSet<_>>().len() >= 2);
        let packed = encode_str(&text).unwrap();
        prop_assert_eq!(decode_str(&packed).unwrap(), text);
    }

    #[test]
    fn prop_wide_symbol_round_trip(
        symbols in prop::collection::vec(0_u16..500, 2..1000)
    ) {
        prop_assume!(symbols.iter().collect::<HashSet<_>>().len() >= 2);
        let packed = encode(&symbols).unwrap();
        prop_assert_eq!(decode::<u16>(&packed).unwrap(), symbols);
    }

    #[test]
    fn prop_encoding_is_reproducible(data in bytes_strategy()) {
        prop_assert_eq!(encode_bytes(&data).unwrap(), encode_bytes(&data).unwrap());
    }

    #[test]
    fn prop_header_length_is_exact(data in bytes_strategy()) {
        let packed = encode_bytes(&data).unwrap();
        let len = u16::from_be_bytes([packed[0], packed[1]]) as usize;
        let tree = read_tree::<u8>(&packed[2..2 + len]).unwrap();
        prop_assert_eq!(tree.leaf_count(), data.iter().collect::<HashSet<_>>().len());
    }

    #[test]
    fn prop_codes_are_prefix_free(data in bytes_strategy()) {
        let tree = build_tree(&freqs(&data).unwrap()).unwrap();
        let table = CodeTable::from_tree(&tree).unwrap();
        let codes = table.iter().map(|(_, code)| code.clone()).collect::<Vec<_>>();
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                prop_assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a));
            }
        }
    }

    #[test]
    fn prop_tree_is_optimal(weights in small_weights_strategy()) {
        let map = weights
            .iter()
            .enumerate()
            .map(|(sym, &w)| (sym as u8, w))
            .collect::<FrequencyMap<u8>>();
        let tree = build_tree(&map).unwrap();
        prop_assert_eq!(tree.weighted_path_length(), brute_force_cost(&weights));
        prop_assert_eq!(tree.weight(), weights.iter().sum::<u64>());
    }
}

// =============================================================================
// FIXED SCENARIOS
// =============================================================================

#[test]
fn large_input_round_trip() {
    // Over the parallel counting threshold
    let data = (0..150_000_u32)
        .map(|i| ((i * 7) % 97) as u8)
        .collect::<Vec<_>>();
    let packed = encode_bytes(&data).unwrap();
    assert!(packed.len() < data.len());
    assert_eq!(decode_bytes(&packed).unwrap(), data);
}

#[test]
fn classic_weights_path_length() {
    let map = [('a', 5), ('b', 9), ('c', 12), ('d', 13), ('e', 16), ('f', 45)]
        .into_iter()
        .collect::<FrequencyMap<char>>();
    let tree = build_tree(&map).unwrap();
    assert_eq!(tree.weighted_path_length(), 224);
    assert_eq!(
        tree.weighted_path_length(),
        brute_force_cost(&[5, 9, 12, 13, 16, 45])
    );
}
