//! Conversion between bit vectors and byte buffers in either bit order.
//! The `bit_vec` crate only handles MSB first, LSB first is done by hand.
//! Padding bits at the end of the last byte are always zero.

use bit_vec::BitVec;
use crate::BitOrder;

fn bits_to_bytes_lsb0(bits: &BitVec) -> Vec<u8> {
    let mut ans = vec![0;(bits.len() + 7) / 8];
    for (i,bit) in bits.iter().enumerate() {
        ans[i/8] |= (bit as u8) << (i%8);
    }
    ans
}

fn bytes_to_bits_lsb0(bytes: &[u8]) -> BitVec {
    let mut ans = BitVec::with_capacity(bytes.len()*8);
    for val in bytes {
        for b in 0..8 {
            ans.push((val & (1 << b)) != 0);
        }
    }
    ans
}

/// Pack bits into bytes, zero padding the last byte.
pub fn pack(bits: &BitVec,ord: BitOrder) -> Vec<u8> {
    match ord {
        BitOrder::Msb0 => bits.to_bytes(),
        BitOrder::Lsb0 => bits_to_bytes_lsb0(bits)
    }
}

/// Unpack bytes into bits, every bit of every byte is included.
pub fn unpack(bytes: &[u8],ord: BitOrder) -> BitVec {
    match ord {
        BitOrder::Msb0 => BitVec::from_bytes(bytes),
        BitOrder::Lsb0 => bytes_to_bits_lsb0(bytes)
    }
}

/// Render bits as a string of `0` and `1`
pub fn to_string(bits: &BitVec) -> String {
    bits.iter().map(|b| if b { '1' } else { '0' }).collect()
}

#[cfg(test)]
fn from_str(s: &str) -> BitVec {
    s.chars().map(|c| c=='1').collect()
}

#[test]
fn msb_padding() {
    let bits = from_str("000111110");
    assert_eq!(pack(&bits,BitOrder::Msb0),vec![0x1f,0x00]);
}

#[test]
fn lsb_padding() {
    let bits = from_str("000111110");
    assert_eq!(pack(&bits,BitOrder::Lsb0),vec![0xf8,0x00]);
}

#[test]
fn unpack_both_orders() {
    assert_eq!(to_string(&unpack(&[0x81,0x02],BitOrder::Msb0)),"1000000100000010");
    assert_eq!(to_string(&unpack(&[0x81,0x02],BitOrder::Lsb0)),"1000000101000000");
}
