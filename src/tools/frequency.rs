//! Symbol frequency counting, the first stage of static Huffman coding.

use std::collections::BTreeMap;

/// Occurrence count of each byte value present in some input.
/// Symbols that never occur are not stored, iteration is in ascending symbol order.
#[derive(Clone,Debug,Default,PartialEq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8,u64>
}

impl FrequencyTable {
    /// Count every byte in `dat`, empty input gives an empty table.
    pub fn count(dat: &[u8]) -> Self {
        let mut tally: [u64;256] = [0;256];
        for c in dat {
            tally[*c as usize] += 1;
        }
        tally.iter().enumerate().map(|(symb,n)| (symb as u8,*n)).collect()
    }
    /// count for `symbol`, 0 if it does not occur
    pub fn get(&self,symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }
    /// number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// sum of all counts, equals the length of the counted input, saturates at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0,|acc,n| acc.saturating_add(*n))
    }
    pub fn iter(&self) -> impl Iterator<Item = (u8,u64)> + '_ {
        self.counts.iter().map(|(s,n)| (*s,*n))
    }
}

/// Zero counts are dropped, repeated symbols accumulate and saturate at `u64::MAX`.
impl FromIterator<(u8,u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8,u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (symbol,n) in iter {
            if n > 0 {
                let count = counts.entry(symbol).or_insert(0u64);
                *count = count.saturating_add(n);
            }
        }
        Self { counts }
    }
}

#[test]
fn counts_sum_to_length() {
    let freq = FrequencyTable::count("I am Sam. Sam I am.".as_bytes());
    assert_eq!(freq.total(),19);
    assert_eq!(freq.get(b'a'),2);
    assert_eq!(freq.get(b'S'),2);
    assert_eq!(freq.get(b' '),5);
    assert_eq!(freq.get(b'z'),0);
    assert_eq!(freq.len(),7);
}

#[test]
fn empty_input() {
    let freq = FrequencyTable::count(&[]);
    assert!(freq.is_empty());
    assert_eq!(freq.total(),0);
}

#[test]
fn saturating_counts() {
    let freq: FrequencyTable = [(7,u64::MAX),(7,5),(9,0),(8,1)].into_iter().collect();
    assert_eq!(freq.get(7),u64::MAX);
    assert_eq!(freq.len(),2);
    assert_eq!(freq.total(),u64::MAX);
}

#[test]
fn ascending_symbols() {
    let freq = FrequencyTable::count(&[0xff,0x00,0x7f,0x00]);
    let v: Vec<(u8,u64)> = freq.iter().collect();
    assert_eq!(v,vec![(0x00,2),(0x7f,1),(0xff,1)]);
}
