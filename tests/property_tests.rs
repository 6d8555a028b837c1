use huffpack::header::Header;
use huffpack::static_huff::{compress,compress_with_order,decompress};
use huffpack::tools::frequency::FrequencyTable;
use huffpack::tools::tree::HuffmanTree;
use huffpack::{BitOrder,Error};
use proptest::prelude::*;

/// Smallest sum of frequency times length over all code lengths satisfying
/// Kraft's inequality, every such assignment is realized by some prefix code.
fn brute_force_minimum(freqs: &[u64]) -> u64 {
    let n = freqs.len();
    if n == 1 {
        return freqs[0];
    }
    let max_len = n - 1;
    let mut lens = vec![1usize;n];
    let mut best = u64::MAX;
    loop {
        let kraft: u64 = lens.iter().map(|l| 1u64 << (max_len - l)).sum();
        if kraft <= 1u64 << max_len {
            let cost = freqs.iter().zip(&lens).map(|(f,l)| f * *l as u64).sum();
            best = u64::min(best,cost);
        }
        // next assignment, odometer style
        let mut i = 0;
        while i < n && lens[i] == max_len {
            lens[i] = 1;
            i += 1;
        }
        if i == n {
            return best;
        }
        lens[i] += 1;
    }
}

proptest! {
    #[test]
    fn round_trip(input in prop::collection::vec(any::<u8>(), 1..600), lsb in any::<bool>()) {
        let ord = if lsb { BitOrder::Lsb0 } else { BitOrder::Msb0 };
        let (header,packed) = compress_with_order(&input,ord).unwrap();
        let (parsed,used) = Header::from_bytes(&header.to_bytes()).unwrap();
        prop_assert_eq!(used,header.to_bytes().len());
        prop_assert_eq!(decompress(&parsed,&packed).unwrap(),input);
    }

    #[test]
    fn skewed_round_trip(input in prop::collection::vec(prop_oneof![8 => Just(b'e'), 2 => Just(b't'), 1 => any::<u8>()], 1..2000)) {
        let (header,packed) = compress(&input).unwrap();
        prop_assert_eq!(decompress(&header,&packed).unwrap(),input);
    }

    #[test]
    fn optimal(freqs in prop::collection::vec(1..60u64, 1..7)) {
        let table: FrequencyTable = freqs.iter().enumerate().map(|(s,f)| (s as u8,*f)).collect();
        let tree = HuffmanTree::build(&table).unwrap();
        prop_assert_eq!(tree.weighted_path_length(),brute_force_minimum(&freqs));
    }

    #[test]
    fn prefix_free(input in prop::collection::vec(any::<u8>(), 1..400)) {
        let tree = HuffmanTree::build(&FrequencyTable::count(&input)).unwrap();
        let table = tree.code_table();
        prop_assert!(table.is_prefix_free());
        prop_assert_eq!(table.len(),FrequencyTable::count(&input).len());
    }

    #[test]
    fn deterministic(input in prop::collection::vec(any::<u8>(), 1..400)) {
        let (h1,p1) = compress(&input).unwrap();
        let (h2,p2) = compress(&input).unwrap();
        prop_assert_eq!(h1.to_bytes(),h2.to_bytes());
        prop_assert_eq!(p1,p2);
    }

    #[test]
    fn truncated_by_one_byte(input in prop::collection::vec(any::<u8>(), 1..400)) {
        let (header,packed) = compress(&input).unwrap();
        prop_assert_eq!(decompress(&header,&packed[..packed.len()-1]),Err(Error::TruncatedStream));
    }
}

#[test]
fn known_vector_is_optimal() {
    let tree = HuffmanTree::build(&FrequencyTable::count(b"aaabbc")).unwrap();
    assert_eq!(brute_force_minimum(&[3,2,1]),9);
    assert_eq!(tree.weighted_path_length(),9);
}

#[test]
fn single_symbol() {
    let input = vec![0x41u8;1000];
    let (header,packed) = compress(&input).unwrap();
    assert_eq!(header.table.len(),1);
    assert_eq!(header.table.get(0x41).map(|c| c.len()),Some(1));
    assert_eq!(decompress(&header,&packed).unwrap(),input);
}

#[test]
fn empty_input() {
    assert_eq!(compress(&[]),Err(Error::EmptyInput));
}
