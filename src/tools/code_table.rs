//! Mapping from symbols to their Huffman codes.

use bit_vec::BitVec;
use std::collections::BTreeMap;

/// Code for every symbol of an alphabet, iteration is in ascending symbol order.
/// Tables are produced by `HuffmanTree::code_table` or parsed from a `Header`,
/// in either case they are prefix-free and every code is non-empty.
#[derive(Clone,Debug,Default,PartialEq)]
pub struct CodeTable {
    codes: BTreeMap<u8,BitVec>
}

impl CodeTable {
    pub fn new() -> Self {
        Self { codes: BTreeMap::new() }
    }
    /// Returns the code previously assigned to `symbol`, if any.
    pub(crate) fn insert(&mut self,symbol: u8,code: BitVec) -> Option<BitVec> {
        self.codes.insert(symbol,code)
    }
    pub fn get(&self,symbol: u8) -> Option<&BitVec> {
        self.codes.get(&symbol)
    }
    pub fn len(&self) -> usize {
        self.codes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (u8,&BitVec)> + '_ {
        self.codes.iter().map(|(s,c)| (*s,c))
    }
    /// True if no code is a prefix of another (identical codes count as prefixes).
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitVec> = self.codes.values().collect();
        for (i,a) in codes.iter().enumerate() {
            for b in &codes[i+1..] {
                let n = usize::min(a.len(),b.len());
                if a.iter().take(n).eq(b.iter().take(n)) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
fn table(entries: &[(u8,&str)]) -> CodeTable {
    let mut ans = CodeTable::new();
    for (symbol,code) in entries {
        ans.insert(*symbol,code.chars().map(|c| c=='1').collect());
    }
    ans
}

#[test]
fn prefix_free() {
    assert!(table(&[(b'a',"0"),(b'b',"11"),(b'c',"10")]).is_prefix_free());
    assert!(table(&[(b'a',"0")]).is_prefix_free());
    assert!(!table(&[(b'a',"1"),(b'b',"11"),(b'c',"0")]).is_prefix_free());
    assert!(!table(&[(b'a',"01"),(b'b',"01")]).is_prefix_free());
}
