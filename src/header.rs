//! Binary header describing a packed payload.
//!
//! The header carries everything the decoder needs: the bit order of the payload,
//! the code table, and the exact number of payload bits so that padding is discarded.
//! Multi-byte integers are little endian.
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0      | 1    | bit order, 0 = MSB first, 1 = LSB first |
//! | 1      | 2    | number of entries `n`, 1 to 256 |
//! | 3      | ...  | `n` entries: symbol, code length `L` (1 to 255), code packed MSB first into `ceil(L/8)` bytes |
//! | ...    | 8    | payload bit count |
//!
//! Unused bits in the last byte of a code must be zero.

use bit_vec::BitVec;
use num_traits::FromPrimitive;
use crate::tools::code_table::CodeTable;
use crate::tools::tree::HuffmanTree;
use crate::{BitOrder,Error};

#[derive(Clone,Debug,PartialEq)]
pub struct Header {
    /// bit order of the payload, codes in the header are always MSB first
    pub ord: BitOrder,
    pub table: CodeTable,
    /// number of payload bits, not counting padding
    pub payload_bits: u64
}

/// Reads header fields, any attempt to read past the end is a malformed header.
struct Fields<'a> {
    dat: &'a [u8],
    ptr: usize
}

impl <'a> Fields<'a> {
    fn take(&mut self,n: usize) -> Result<&'a [u8],Error> {
        if self.ptr + n > self.dat.len() {
            log::error!("header ends at {}, need {} bytes at {}",self.dat.len(),n,self.ptr);
            return Err(Error::MalformedHeader);
        }
        let ans = &self.dat[self.ptr..self.ptr+n];
        self.ptr += n;
        Ok(ans)
    }
    fn byte(&mut self) -> Result<u8,Error> {
        Ok(self.take(1)?[0])
    }
}

impl Header {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut ans = vec![self.ord as u8];
        ans.extend_from_slice(&u16::to_le_bytes(self.table.len() as u16));
        for (symbol,code) in self.table.iter() {
            ans.push(symbol);
            ans.push(code.len() as u8);
            ans.append(&mut code.to_bytes());
        }
        ans.extend_from_slice(&u64::to_le_bytes(self.payload_bits));
        ans
    }
    /// Parse a header from the start of `dat`, returns the header and the number of bytes it occupied.
    /// The code table is checked for being prefix-free before returning.
    pub fn from_bytes(dat: &[u8]) -> Result<(Self,usize),Error> {
        let mut fields = Fields { dat, ptr: 0 };
        let ord_code = fields.byte()?;
        let ord = match BitOrder::from_u8(ord_code) {
            Some(ord) => ord,
            None => {
                log::error!("unknown bit order {}",ord_code);
                return Err(Error::MalformedHeader);
            }
        };
        let count_bytes = fields.take(2)?;
        let count = u16::from_le_bytes([count_bytes[0],count_bytes[1]]) as usize;
        if count==0 || count > 256 {
            log::error!("header has {} entries",count);
            return Err(Error::MalformedHeader);
        }
        let mut table = CodeTable::new();
        for _i in 0..count {
            let symbol = fields.byte()?;
            let len = fields.byte()? as usize;
            if len==0 {
                log::error!("zero length code for {:#04x}",symbol);
                return Err(Error::MalformedHeader);
            }
            let mut code = BitVec::from_bytes(fields.take((len + 7) / 8)?);
            if code.iter().skip(len).any(|b| b) {
                log::error!("padding bits set in code for {:#04x}",symbol);
                return Err(Error::MalformedHeader);
            }
            code.truncate(len);
            if table.insert(symbol,code).is_some() {
                log::error!("symbol {:#04x} appears twice",symbol);
                return Err(Error::MalformedHeader);
            }
        }
        let bit_bytes = fields.take(8)?;
        let mut payload_bits: [u8;8] = [0;8];
        payload_bits.copy_from_slice(bit_bytes);
        HuffmanTree::from_code_table(&table)?;
        let ans = Self {
            ord,
            table,
            payload_bits: u64::from_le_bytes(payload_bits)
        };
        log::debug!("header with {} codes, {} payload bits, {} bytes",count,ans.payload_bits,fields.ptr);
        Ok((ans,fields.ptr))
    }
}

#[cfg(test)]
const AAABBC_HEADER: &str = "00 03 00 61 01 00 62 02 C0 63 02 80 09 00 00 00 00 00 00 00";

#[test]
fn known_header() {
    let header = crate::static_huff::compress("aaabbc".as_bytes()).expect("compress failed").0;
    assert_eq!(header.to_bytes(),hex::decode(AAABBC_HEADER.replace(" ","")).unwrap());
}

#[test]
fn parse_with_trailing_payload() {
    let mut dat = hex::decode(AAABBC_HEADER.replace(" ","")).unwrap();
    dat.extend_from_slice(&[0x1f,0x00]);
    let (header,used) = Header::from_bytes(&dat).expect("parse failed");
    assert_eq!(used,20);
    assert_eq!(header.ord,BitOrder::Msb0);
    assert_eq!(header.payload_bits,9);
    assert_eq!(header.table.len(),3);
    assert_eq!(crate::tools::bits::to_string(header.table.get(b'b').unwrap()),"11");
}

#[test]
fn long_code() {
    // 9 bit code needs two bytes
    let dat = hex::decode("00 02 00 00 09 00 80 01 01 80 01 00 00 00 00 00 00 00".replace(" ","")).unwrap();
    let (header,used) = Header::from_bytes(&dat).expect("parse failed");
    assert_eq!(used,dat.len());
    assert_eq!(crate::tools::bits::to_string(header.table.get(0).unwrap()),"000000001");
    assert_eq!(header.to_bytes(),dat);
}

#[test]
fn malformed_headers() {
    let bad = [
        "",                                                        // nothing
        "02 01 00 41 01 00 08 00 00 00 00 00 00 00",               // unknown bit order
        "00 00 00 08 00 00 00 00 00 00 00",                        // no entries
        "00 01 01 41 01 00 08 00 00 00 00 00 00 00",               // 257 entries
        "00 01 00 41 00 08 00 00 00 00 00 00 00",                  // zero length code
        "00 01 00 41 01 40 08 00 00 00 00 00 00 00",               // padding bit set
        "00 02 00 41 01 00 41 01 80 08 00 00 00 00 00 00 00",      // duplicate symbol
        "00 02 00 41 01 00 42 01 00 08 00 00 00 00 00 00 00",      // duplicate code
        "00 02 00 41 01 00 42 02 00 08 00 00 00 00 00 00 00",      // prefix
        "00 03 00 61 01 00 62 02 C0 63 02 80 09 00 00 00"          // cut short
    ];
    for h in bad {
        let dat = hex::decode(h.replace(" ","")).unwrap();
        assert_eq!(Header::from_bytes(&dat),Err(Error::MalformedHeader),"accepted {}",h);
    }
}
