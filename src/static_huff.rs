//! Static Huffman Coding
//!
//! Frequencies are counted over the whole buffer, an optimal tree is built once,
//! and every byte is replaced by its code.  The code table travels in a `Header`
//! alongside the packed payload, so the decoder never needs the frequencies.
//!
//! * This transforms buffers, see the `container` module for files
//! * Bits are packed MSB first unless another order is requested
//! * Tree construction is deterministic, equal inputs give equal outputs

use bit_vec::BitVec;
use crate::tools::bits;
use crate::tools::frequency::FrequencyTable;
use crate::tools::code_table::CodeTable;
use crate::tools::tree::HuffmanTree;
use crate::header::Header;
use crate::{BitOrder,Error};

/// Concatenate the code of each byte of `ibuf` and pack the bits.
/// Returns the packed bytes and the number of bits before padding.
pub fn encode(ibuf: &[u8],table: &CodeTable,ord: BitOrder) -> Result<(Vec<u8>,u64),Error> {
    let mut obuf = BitVec::new();
    for c in ibuf {
        match table.get(*c) {
            Some(code) => {
                for bit in code.iter() {
                    obuf.push(bit);
                }
            },
            None => {
                log::error!("no code for {:#04x}",c);
                return Err(Error::SymbolNotInTable(*c));
            }
        }
    }
    let bit_count = obuf.len() as u64;
    log::debug!("encoded {} bytes into {} bits",ibuf.len(),bit_count);
    Ok((bits::pack(&obuf,ord),bit_count))
}

/// Walk the tree one bit at a time, emitting a symbol at each leaf, until exactly
/// `bit_count` bits are consumed.  Padding beyond `bit_count` must be zero and
/// shorter than a byte.
pub fn decode(packed: &[u8],bit_count: u64,tree: &HuffmanTree,ord: BitOrder) -> Result<Vec<u8>,Error> {
    let available = packed.len() as u64 * 8;
    if bit_count > available {
        log::error!("payload needs {} bits, only {} available",bit_count,available);
        return Err(Error::TruncatedStream);
    }
    if available - bit_count >= 8 {
        log::error!("{} bytes follow the payload",(available - bit_count)/8);
        return Err(Error::TrailingData);
    }
    let bits = bits::unpack(packed,ord);
    if bits.iter().skip(bit_count as usize).any(|b| b) {
        log::error!("padding bits after bit {} are set",bit_count);
        return Err(Error::TrailingData);
    }
    let mut ans = Vec::new();
    let root = tree.root();
    let mut curs = root;
    let mut code_len = 0;
    for (i,bit) in bits.iter().take(bit_count as usize).enumerate() {
        curs = match tree.descend(curs,bit) {
            Some(next) => next,
            None => {
                log::error!("bit {} leads nowhere",i);
                return Err(Error::UnassignedCode);
            }
        };
        code_len += 1;
        if let Some(symbol) = tree.symbol(curs) {
            log::trace!("{} bit code for {:#04x}",code_len,symbol);
            ans.push(symbol);
            curs = root;
            code_len = 0;
        }
    }
    if code_len > 0 {
        log::error!("payload ends inside a {} bit prefix",code_len);
        return Err(Error::TruncatedStream);
    }
    Ok(ans)
}

/// Main compression function, packs MSB first
pub fn compress(ibuf: &[u8]) -> Result<(Header,Vec<u8>),Error> {
    compress_with_order(ibuf,BitOrder::Msb0)
}

/// Compression with a given bit order for the payload
pub fn compress_with_order(ibuf: &[u8],ord: BitOrder) -> Result<(Header,Vec<u8>),Error> {
    if ibuf.is_empty() {
        return Err(Error::EmptyInput);
    }
    let freq = FrequencyTable::count(ibuf);
    let tree = HuffmanTree::build(&freq)?;
    let table = tree.code_table();
    let (packed,payload_bits) = encode(ibuf,&table,ord)?;
    Ok((Header { ord, table, payload_bits },packed))
}

/// Main decompression function
pub fn decompress(header: &Header,packed: &[u8]) -> Result<Vec<u8>,Error> {
    let tree = HuffmanTree::from_code_table(&header.table)?;
    decode(packed,header.payload_bits,&tree,header.ord)
}

#[test]
fn compression_works() {
    let (header,packed) = compress("aaabbc".as_bytes()).expect("compression failed");
    assert_eq!(header.payload_bits,9);
    assert_eq!(packed,vec![0x1f,0x00]);
    let (header,packed) = compress_with_order("aaabbc".as_bytes(),BitOrder::Lsb0).expect("compression failed");
    assert_eq!(header.ord,BitOrder::Lsb0);
    assert_eq!(packed,vec![0xf8,0x00]);
}

#[test]
fn invertibility() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    for ord in [BitOrder::Msb0,BitOrder::Lsb0] {
        let (header,packed) = compress_with_order(test_data,ord).expect("compression failed");
        let expanded = decompress(&header,&packed).expect("expansion failed");
        assert_eq!(test_data.to_vec(),expanded);
    }
}

#[test]
fn control_characters() {
    let test_data: Vec<u8> = (0..=255).chain([b' ',b'\n',b'\r',0,0,0]).collect();
    let (header,packed) = compress(&test_data).expect("compression failed");
    let (parsed,_) = Header::from_bytes(&header.to_bytes()).expect("parse failed");
    assert_eq!(parsed,header);
    assert_eq!(decompress(&parsed,&packed).expect("expansion failed"),test_data);
}

#[test]
fn single_symbol() {
    let test_data = vec![0x41;1000];
    let (header,packed) = compress(&test_data).expect("compression failed");
    assert_eq!(header.table.len(),1);
    assert_eq!(bits::to_string(header.table.get(0x41).unwrap()),"0");
    assert_eq!(header.payload_bits,1000);
    assert_eq!(packed,vec![0;125]);
    assert_eq!(decompress(&header,&packed).expect("expansion failed"),test_data);
}

#[test]
fn decode_with_built_tree() {
    for test_data in [vec![7;9],"abracadabra".as_bytes().to_vec()] {
        let tree = HuffmanTree::build(&FrequencyTable::count(&test_data)).expect("build failed");
        let (packed,bit_count) = encode(&test_data,&tree.code_table(),BitOrder::Msb0).expect("encode failed");
        assert_eq!(decode(&packed,bit_count,&tree,BitOrder::Msb0).expect("decode failed"),test_data);
    }
}

#[test]
fn empty_input() {
    assert_eq!(compress(&[]),Err(Error::EmptyInput));
}

#[test]
fn truncation() {
    let (header,packed) = compress("I am Sam. Sam I am.".as_bytes()).expect("compression failed");
    assert_eq!(decompress(&header,&packed[0..packed.len()-1]),Err(Error::TruncatedStream));
}

#[test]
fn ends_inside_code() {
    // c is 10, declaring 10 bits leaves a dangling 1
    let (mut header,_) = compress("aaabbc".as_bytes()).expect("compression failed");
    header.payload_bits = 10;
    assert_eq!(decompress(&header,&[0x1f,0x40]),Err(Error::TruncatedStream));
}

#[test]
fn trailing_bytes() {
    let (header,mut packed) = compress("aaabbc".as_bytes()).expect("compression failed");
    packed.push(0);
    assert_eq!(decompress(&header,&packed),Err(Error::TrailingData));
}

#[test]
fn padding_must_be_zero() {
    let (header,packed) = compress("aaabbc".as_bytes()).expect("compression failed");
    assert_eq!(packed,vec![0x1f,0x00]);
    assert_eq!(decompress(&header,&[0x1f,0x01]),Err(Error::TrailingData));
    let (header,packed) = compress_with_order("aaabbc".as_bytes(),BitOrder::Lsb0).expect("compression failed");
    assert_eq!(packed,vec![0xf8,0x00]);
    assert_eq!(decompress(&header,&[0xf8,0x80]),Err(Error::TrailingData));
    assert_eq!(decompress(&header,&[0xf8,0x00]).expect("expansion failed"),"aaabbc".as_bytes().to_vec());
}

#[test]
fn unassigned_code() {
    let (header,_) = compress(&[0x41;3]).expect("compression failed");
    assert_eq!(decompress(&header,&[0x20]),Err(Error::UnassignedCode));
}

#[test]
fn missing_symbol() {
    let (header,_) = compress("aaabbc".as_bytes()).expect("compression failed");
    assert_eq!(encode("abcd".as_bytes(),&header.table,BitOrder::Msb0),Err(Error::SymbolNotInTable(b'd')));
}
