//! Integration tests for the full huffcode pipeline.
//!
//! These tests verify end-to-end behavior: source -> count -> tree -> codes
//! -> encode -> artifact -> decode, plus the algebraic properties every
//! Huffman code must satisfy.

use huffcode_core::{
    bitio::EncodedStream,
    framing::{frame_decimal, parse_decimal},
    metrics::{average_code_length, encoded_bit_len, entropy},
    tree::HuffmanTree,
    Alphabet, CodeTable, Error, FrequencyModel, UnknownSymbolPolicy,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Count, build and assign in one step.
fn coded_model(source: &[u8], alphabet: &Alphabet) -> (FrequencyModel, CodeTable) {
    let mut model = FrequencyModel::count(source, alphabet);
    let tree = HuffmanTree::build(&model.weights()).expect("non-empty alphabet");
    let table = huffcode_core::assign_codes(&tree, &mut model);
    (model, table)
}

/// Seeded text over the reference alphabet with a skewed letter mix.
fn seeded_text(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let common = b"etaoin shrdlu";
    let alphabet = Alphabet::reference();

    (0..len)
        .map(|_| {
            if rng.gen_bool(0.7) {
                common[rng.gen_range(0..common.len())]
            } else {
                alphabet.symbols()[rng.gen_range(0..alphabet.len())]
            }
        })
        .collect()
}

/// Smallest Σ weight·length over every length vector satisfying Kraft's
/// inequality, by exhaustive search.
fn brute_force_optimum(weights: &[u64]) -> u64 {
    let n = weights.len();
    if n == 1 {
        return weights[0];
    }
    let max_len = n - 1;
    let mut lengths = vec![1usize; n];
    let mut best = u64::MAX;

    loop {
        let kraft: u64 = lengths.iter().map(|&l| 1u64 << (max_len - l)).sum();
        if kraft <= 1u64 << max_len {
            let cost: u64 = weights.iter().zip(&lengths).map(|(&w, &l)| w * l as u64).sum();
            best = best.min(cost);
        }

        // Odometer over lengths in 1..=max_len
        let mut i = 0;
        while i < n && lengths[i] == max_len {
            lengths[i] = 1;
            i += 1;
        }
        if i == n {
            break;
        }
        lengths[i] += 1;
    }

    best
}

#[test]
fn test_textbook_example() {
    let alphabet = Alphabet::new(*b"abc").unwrap();
    // a: 0.5, b: 0.25, c: 0.25
    let (model, table) = coded_model(b"aabc", &alphabet);

    assert_eq!(table.get(b'a').unwrap().to_string(), "0");
    assert_eq!(table.get(b'b').unwrap().len(), 2);
    assert_eq!(table.get(b'c').unwrap().len(), 2);
    assert!((average_code_length(model.stats()) - 1.5).abs() < 1e-12);

    let stream = huffcode_core::encode(b"abc", &table, UnknownSymbolPolicy::Strict).unwrap();
    assert_eq!(stream.bit_len(), 5);
    assert_eq!(huffcode_core::decode(&stream, &table).unwrap(), b"abc");
}

#[test]
fn test_full_pipeline_seeded_text() {
    let source = seeded_text(42, 20_000);
    let run = huffcode_core::run(&source, &Alphabet::reference(), UnknownSymbolPolicy::Strict)
        .expect("pipeline failed");

    assert_eq!(run.decoded, source, "output doesn't match input");
    assert!(run.report.round_trip_ok);
    // Skewed text over 30 symbols codes below the 5-bit fixed-length cost
    assert!(run.report.average_code_length < 5.0);
    assert!(run.report.average_code_length >= run.report.entropy);
    assert!(run.report.average_code_length < run.report.entropy + 1.0);
}

#[test]
fn test_artifacts_round_trip_through_text() {
    let source = seeded_text(7, 3001);
    let (_, table) = coded_model(&source, &Alphabet::reference());
    let stream = huffcode_core::encode(&source, &table, UnknownSymbolPolicy::Strict).unwrap();

    let from_decimal = parse_decimal(&frame_decimal(&stream)).unwrap();
    let from_bits = EncodedStream::from_bit_text(&stream.to_bit_text()).unwrap();

    assert_eq!(from_decimal, stream);
    assert_eq!(from_bits, stream);
    assert_eq!(huffcode_core::decode(&from_decimal, &table).unwrap(), source);
}

#[test]
fn test_corrupted_artifact_detected() {
    let source = seeded_text(9, 500);
    let (_, table) = coded_model(&source, &Alphabet::reference());
    let stream = huffcode_core::encode(&source, &table, UnknownSymbolPolicy::Strict).unwrap();

    let framed = frame_decimal(&stream);
    let (header, payload) = framed.split_once('\n').unwrap();
    let mut tokens: Vec<u8> = payload
        .split_whitespace()
        .map(|t| t.parse().unwrap())
        .collect();
    tokens[10] ^= 0x40;
    let corrupted = format!(
        "{header}\n{}\n",
        tokens.iter().map(|b| format!("{b} ")).collect::<String>()
    );

    assert!(matches!(parse_decimal(&corrupted), Err(Error::Crc { .. })));
}

#[test]
fn test_single_symbol_alphabet() {
    let alphabet = Alphabet::new(*b"x").unwrap();
    let (model, table) = coded_model(b"xxxxxxx", &alphabet);

    assert_eq!(table.get(b'x').unwrap().len(), 1);
    assert_eq!(average_code_length(model.stats()), 1.0);
    assert_eq!(entropy(model.stats()), 0.0);

    let stream = huffcode_core::encode(b"xxxxxxx", &table, UnknownSymbolPolicy::Strict).unwrap();
    assert_eq!(stream.bit_len(), 7);
    assert_eq!(huffcode_core::decode(&stream, &table).unwrap(), b"xxxxxxx");
}

#[test]
fn test_concentrated_weight() {
    // All weight on one symbol of the reference alphabet
    let source = vec![b'e'; 1000];
    let run = huffcode_core::run(&source, &Alphabet::reference(), UnknownSymbolPolicy::Strict)
        .unwrap();

    assert_eq!(run.decoded, source);
    assert!(run.table.get(b'e').unwrap().len() >= 1);
    assert!(run.table.is_prefix_free());
}

#[test]
fn test_huffman_matches_brute_force_optimum() {
    let cases: &[&[u64]] = &[
        &[5, 1],
        &[1, 1, 1],
        &[10, 3, 2, 1],
        &[1, 1, 2, 3, 5, 8],
        &[7, 7, 7, 7, 7],
        &[100, 1, 1, 1, 1, 1],
        &[4, 0, 0, 9],
    ];

    for weights in cases {
        let pairs: Vec<(u8, f64)> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (i as u8, w as f64))
            .collect();
        let table = CodeTable::from_tree(&HuffmanTree::build(&pairs).unwrap());

        let huffman_cost: u64 = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| w * table.get(i as u8).unwrap().len() as u64)
            .sum();

        assert_eq!(huffman_cost, brute_force_optimum(weights), "weights {weights:?}");
    }
}

/// An alphabet of distinct bytes plus a source drawn from it.
fn alphabet_and_source() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    prop::collection::btree_set(any::<u8>(), 1..40)
        .prop_map(|set| set.into_iter().collect::<Vec<u8>>())
        .prop_flat_map(|symbols| {
            let n = symbols.len();
            (
                Just(symbols),
                prop::collection::vec(0..n, 0..400),
            )
        })
        .prop_map(|(symbols, picks)| {
            let source: Vec<u8> = picks.iter().map(|&i| symbols[i]).collect();
            (symbols, source)
        })
}

proptest! {
    #[test]
    fn prop_leaves_are_input_symbols_and_codes_prefix_free(
        weights in prop::collection::vec(1u32..1000, 1..60)
    ) {
        let pairs: Vec<(u8, f64)> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (i as u8, f64::from(w)))
            .collect();
        let tree = HuffmanTree::build(&pairs).unwrap();

        let mut leaves = tree.leaves();
        leaves.sort_unstable();
        let expected: Vec<u8> = (0..pairs.len() as u8).collect();
        prop_assert_eq!(leaves, expected);
        prop_assert!(tree.height() < pairs.len().max(2));

        let table = CodeTable::from_tree(&tree);
        prop_assert_eq!(table.len(), pairs.len());
        prop_assert!(table.is_prefix_free());
        prop_assert!(table.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn prop_round_trip((symbols, source) in alphabet_and_source()) {
        let alphabet = Alphabet::new(symbols).unwrap();
        let run = huffcode_core::run(&source, &alphabet, UnknownSymbolPolicy::Strict).unwrap();
        prop_assert_eq!(run.decoded, source);
    }

    #[test]
    fn prop_encoded_length_is_weighted_code_length((symbols, source) in alphabet_and_source()) {
        let alphabet = Alphabet::new(symbols).unwrap();
        let (model, table) = coded_model(&source, &alphabet);
        let stream = huffcode_core::encode(&source, &table, UnknownSymbolPolicy::Strict).unwrap();
        prop_assert_eq!(stream.bit_len() as u64, encoded_bit_len(model.stats()));
    }

    #[test]
    fn prop_average_length_bounded_by_entropy((symbols, source) in alphabet_and_source()) {
        let alphabet = Alphabet::new(symbols).unwrap();
        let (model, _) = coded_model(&source, &alphabet);
        let h = entropy(model.stats());
        let l = average_code_length(model.stats());
        prop_assert!(l + 1e-9 >= h, "average {} below entropy {}", l, h);
        if !source.is_empty() {
            prop_assert!(l < h + 1.0 + 1e-9, "average {} not within one bit of entropy {}", l, h);
        }
    }

    #[test]
    fn prop_chunked_counting_matches(
        (symbols, source) in alphabet_and_source(),
        chunk_size in 1usize..64
    ) {
        let alphabet = Alphabet::new(symbols).unwrap();
        prop_assert_eq!(
            FrequencyModel::count_chunked(&source, &alphabet, chunk_size),
            FrequencyModel::count(&source, &alphabet)
        );
    }

    #[test]
    fn prop_skip_policy_drops_only_unknown(source in prop::collection::vec(any::<u8>(), 0..300)) {
        let alphabet = Alphabet::reference();
        let run = huffcode_core::run(&source, &alphabet, UnknownSymbolPolicy::Skip).unwrap();
        let kept: Vec<u8> = source.iter().copied().filter(|&b| alphabet.contains(b)).collect();
        prop_assert_eq!(run.decoded, kept);
    }
}
