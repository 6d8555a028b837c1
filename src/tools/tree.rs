//! Huffman tree stored as an arena of nodes.
//!
//! Nodes refer to their sons by index into the arena, the root has no parent.
//! A tree built from frequencies is full, i.e., every branch has two sons.
//! A tree rebuilt from a code table can have empty slots where the transmitted
//! code is incomplete, walking into such a slot is a decoding error.
//!
//! Construction is deterministic.  Among nodes with equal frequency, the one with
//! the lowest arena index is extracted first.  Leaves are created first in ascending
//! symbol order, and branches are appended as they are merged, so a leaf wins a tie
//! against a branch, a lower symbol wins a tie against a higher one, and an older
//! branch wins a tie against a newer one.  The first node extracted becomes the left son.

use bit_vec::BitVec;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use super::frequency::FrequencyTable;
use super::code_table::CodeTable;
use crate::Error;

#[derive(Clone,Debug,PartialEq)]
pub enum Node {
    Leaf {
        symbol: u8,
        freq: u64
    },
    /// `son[0]` is reached with a 0 bit, `son[1]` with a 1 bit
    Branch {
        freq: u64,
        son: [Option<usize>;2]
    }
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Branch { freq, .. } => *freq
        }
    }
}

#[derive(Clone,Debug)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize
}

impl HuffmanTree {
    /// Build an optimal tree for the given frequencies.
    /// Fails with `EmptyInput` if there are no symbols, or `FrequencyOverflow`
    /// if the frequencies do not sum within `u64`.
    pub fn build(freq: &FrequencyTable) -> Result<Self,Error> {
        let mut nodes = Vec::with_capacity(2*freq.len());
        let mut queue = BinaryHeap::new();
        for (symbol,n) in freq.iter() {
            queue.push(Reverse((n,nodes.len())));
            nodes.push(Node::Leaf { symbol, freq: n });
        }
        log::debug!("building tree for {} symbols",nodes.len());
        let root = loop {
            let Some(Reverse((f0,lson))) = queue.pop() else {
                return Err(Error::EmptyInput);
            };
            let Some(Reverse((f1,rson))) = queue.pop() else {
                break lson;
            };
            log::trace!("merge {} ({}) with {} ({})",lson,f0,rson,f1);
            let Some(freq) = f0.checked_add(f1) else {
                log::error!("frequency overflow merging {} with {}",f0,f1);
                return Err(Error::FrequencyOverflow);
            };
            queue.push(Reverse((freq,nodes.len())));
            nodes.push(Node::Branch { freq, son: [Some(lson),Some(rson)] });
        };
        Ok(Self { nodes, root })
    }
    /// Rebuild a decoding tree from a code table, frequencies are unknown and set to 0.
    /// Fails with `MalformedHeader` if a code is empty, duplicated, or a prefix of another code.
    pub fn from_code_table(table: &CodeTable) -> Result<Self,Error> {
        let mut nodes = vec![Node::Branch { freq: 0, son: [None,None] }];
        for (symbol,code) in table.iter() {
            if code.is_empty() {
                log::error!("empty code for symbol {:#04x}",symbol);
                return Err(Error::MalformedHeader);
            }
            let mut curs = 0;
            for (depth,bit) in code.iter().enumerate() {
                let last = depth + 1 == code.len();
                let next = nodes.len();
                let slot = match &mut nodes[curs] {
                    Node::Branch { son, .. } => &mut son[bit as usize],
                    Node::Leaf { .. } => {
                        log::error!("code for {:#04x} extends another code",symbol);
                        return Err(Error::MalformedHeader);
                    }
                };
                curs = match (*slot,last) {
                    (Some(_),true) => {
                        log::error!("code for {:#04x} collides with another code",symbol);
                        return Err(Error::MalformedHeader);
                    },
                    (Some(c),false) => c,
                    (None,true) => {
                        *slot = Some(next);
                        nodes.push(Node::Leaf { symbol, freq: 0 });
                        next
                    },
                    (None,false) => {
                        *slot = Some(next);
                        nodes.push(Node::Branch { freq: 0, son: [None,None] });
                        next
                    }
                };
            }
        }
        Ok(Self { nodes, root: 0 })
    }
    pub fn root(&self) -> usize {
        self.root
    }
    pub fn node(&self,idx: usize) -> &Node {
        &self.nodes[idx]
    }
    /// symbol if `idx` is a leaf
    pub fn symbol(&self,idx: usize) -> Option<u8> {
        match self.nodes[idx] {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Branch { .. } => None
        }
    }
    /// Follow `bit` from node `idx`, None if there is no node in that direction.
    /// A root leaf (one symbol alphabet) has code `0` and leads back to itself.
    pub fn descend(&self,idx: usize,bit: bool) -> Option<usize> {
        match &self.nodes[idx] {
            Node::Branch { son, .. } => son[bit as usize],
            Node::Leaf { .. } if idx==self.root && !bit => Some(idx),
            Node::Leaf { .. } => None
        }
    }
    /// Visit every leaf with its path from the root.
    fn leaf_paths(&self) -> Vec<(usize,BitVec)> {
        if let Node::Leaf { .. } = self.nodes[self.root] {
            return vec![(self.root,BitVec::from_elem(1,false))];
        }
        let mut ans = Vec::new();
        let mut stack = vec![(self.root,BitVec::new())];
        while let Some((curs,path)) = stack.pop() {
            match &self.nodes[curs] {
                Node::Leaf { .. } => ans.push((curs,path)),
                Node::Branch { son, .. } => {
                    for (bit,child) in son.iter().enumerate() {
                        if let Some(child) = child {
                            let mut longer = path.clone();
                            longer.push(bit==1);
                            stack.push((*child,longer));
                        }
                    }
                }
            }
        }
        ans
    }
    /// Codes from root-to-leaf paths, 0 going left and 1 going right.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        for (leaf,path) in self.leaf_paths() {
            if let Some(symbol) = self.symbol(leaf) {
                table.insert(symbol,path);
            }
        }
        table
    }
    /// sum over symbols of frequency times code length, saturates at `u64::MAX`
    pub fn weighted_path_length(&self) -> u64 {
        self.leaf_paths().iter()
            .map(|(leaf,path)| self.nodes[*leaf].freq().saturating_mul(path.len() as u64))
            .fold(0,u64::saturating_add)
    }
}

#[cfg(test)]
fn codes(tree: &HuffmanTree) -> Vec<(u8,String)> {
    tree.code_table().iter().map(|(s,c)| (s,super::bits::to_string(c))).collect()
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
fn known_vector() {
    let tree = HuffmanTree::build(&FrequencyTable::count("aaabbc".as_bytes())).expect("build failed");
    assert_eq!(tree.weighted_path_length(),9);
    assert_eq!(tree.node(tree.root()).freq(),6);
    assert_eq!(codes(&tree),vec![
        (b'a',"0".to_string()),
        (b'b',"11".to_string()),
        (b'c',"10".to_string())
    ]);
}

#[test]
fn ties_go_to_lower_symbols() {
    let freq: FrequencyTable = [(3,1),(1,1),(2,1),(0,1)].into_iter().collect();
    let tree = HuffmanTree::build(&freq).expect("build failed");
    assert_eq!(tree.weighted_path_length(),8);
    assert_eq!(codes(&tree),vec![
        (0,"00".to_string()),
        (1,"01".to_string()),
        (2,"10".to_string()),
        (3,"11".to_string())
    ]);
}

#[test]
fn skewed_distribution() {
    let freq: FrequencyTable = [(b'a',1),(b'b',1),(b'c',2),(b'd',3),(b'e',5)].into_iter().collect();
    let tree = HuffmanTree::build(&freq).expect("build failed");
    assert_eq!(tree.weighted_path_length(),25);
    assert!(tree.code_table().is_prefix_free());
}

#[test]
fn single_symbol() {
    let tree = HuffmanTree::build(&FrequencyTable::count(&[0x41;1000])).expect("build failed");
    assert_eq!(codes(&tree),vec![(0x41,"0".to_string())]);
    assert_eq!(tree.weighted_path_length(),1000);
    assert_eq!(tree.descend(tree.root(),false),Some(tree.root()));
    assert_eq!(tree.descend(tree.root(),true),None);
}

#[test]
fn empty_table() {
    assert!(matches!(HuffmanTree::build(&FrequencyTable::default()),Err(Error::EmptyInput)));
}

#[test]
fn frequency_overflow() {
    let freq: FrequencyTable = [(0,u64::MAX),(1,1)].into_iter().collect();
    assert!(matches!(HuffmanTree::build(&freq),Err(Error::FrequencyOverflow)));
    let freq: FrequencyTable = [(0,u64::MAX/2),(1,u64::MAX/2),(2,1)].into_iter().collect();
    let tree = HuffmanTree::build(&freq).expect("build failed");
    assert_eq!(tree.node(tree.root()).freq(),u64::MAX);
    assert_eq!(tree.weighted_path_length(),u64::MAX);
}

#[test]
fn rebuild_from_codes() {
    let built = HuffmanTree::build(&FrequencyTable::count("I am Sam. Sam I am.".as_bytes())).expect("build failed");
    let rebuilt = HuffmanTree::from_code_table(&built.code_table()).expect("rebuild failed");
    assert_eq!(built.code_table(),rebuilt.code_table());
}

#[test]
fn rebuild_incomplete_code() {
    let tree = HuffmanTree::from_code_table(&table(&[(b'a',"0"),(b'b',"10")])).expect("rebuild failed");
    let b = tree.descend(tree.root(),true).expect("missing branch");
    assert_eq!(tree.descend(b,true),None);
    let leaf = tree.descend(b,false).expect("missing leaf");
    assert_eq!(tree.symbol(leaf),Some(b'b'));
}

#[test]
fn reject_bad_tables() {
    let bad = [
        table(&[(b'a',"0"),(b'b',"0")]),
        table(&[(b'a',"0"),(b'b',"01")]),
        table(&[(b'a',"01"),(b'b',"0")]),
        table(&[(b'a',"")])
    ];
    for t in bad {
        assert!(matches!(HuffmanTree::from_code_table(&t),Err(Error::MalformedHeader)));
    }
}
