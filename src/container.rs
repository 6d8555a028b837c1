//! Huffpack container
//!
//! A container is the 2-byte signature `HF`, followed by the header, followed by the
//! packed payload.  This module moves whole streams into memory and hands them to
//! `static_huff`, so inputs are expected to be easily buffered.

use std::io::{Cursor,Read,Write,Seek,SeekFrom,BufReader,BufWriter};
use crate::header::Header;
use crate::static_huff;
use crate::{BitOrder,DYNERR};

const SIGNATURE: [u8;2] = *b"HF";

/// Options controlling compression
#[derive(Clone)]
pub struct Options {
    /// starting position in the input file
    pub in_offset: u64,
    /// starting position in the output file
    pub out_offset: u64,
    /// bit packing strategy for the payload, ignored when expanding
    pub ord: BitOrder,
    /// return error if file is larger
    pub max_file_size: u64
}

pub const STD_OPTIONS: Options = Options {
    in_offset: 0,
    out_offset: 0,
    ord: BitOrder::Msb0,
    max_file_size: u32::MAX as u64/4
};

/// Read everything from `opt.in_offset` to the end, checking the size limits.
fn read_input<R: Read + Seek>(reader: &mut BufReader<R>,opt: &Options) -> Result<Vec<u8>,DYNERR> {
    let mut length = reader.seek(SeekFrom::End(0))?;
    if opt.in_offset > length {
        return Err(Box::new(crate::Error::FileFormatMismatch));
    }
    length -= opt.in_offset;
    if length > opt.max_file_size {
        return Err(Box::new(crate::Error::FileTooLarge));
    }
    reader.seek(SeekFrom::Start(opt.in_offset))?;
    let mut ibuf = Vec::with_capacity(length as usize);
    reader.read_to_end(&mut ibuf)?;
    Ok(ibuf)
}

/// Main compression function.
/// `expanded_in` is an object with `Read` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<&[u8]>`.
/// `compressed_out` is an object with `Write` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<Vec<u8>>`.
/// Returns (in_size,out_size) or error.
pub fn compress<R,W>(expanded_in: &mut R, compressed_out: &mut W, opt: &Options) -> Result<(u64,u64),DYNERR>
where R: Read + Seek, W: Write + Seek {
    let mut reader = BufReader::new(expanded_in);
    let mut writer = BufWriter::new(compressed_out);
    let ibuf = read_input(&mut reader,opt)?;
    let (header,packed) = static_huff::compress_with_order(&ibuf,opt.ord)?;
    let header_bytes = header.to_bytes();
    log::debug!("{} codes, header is {} bytes, payload is {} bytes",header.table.len(),header_bytes.len(),packed.len());
    writer.seek(SeekFrom::Start(opt.out_offset))?;
    writer.write_all(&SIGNATURE)?;
    writer.write_all(&header_bytes)?;
    writer.write_all(&packed)?;
    writer.flush()?;
    Ok((ibuf.len() as u64,writer.stream_position()? - opt.out_offset))
}

/// Main decompression function.
/// `compressed_in` is an object with `Read` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<&[u8]>`.
/// `expanded_out` is an object with `Write` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<Vec<u8>>`.
/// Returns (in_size,out_size) or error.
pub fn expand<R,W>(compressed_in: &mut R, expanded_out: &mut W, opt: &Options) -> Result<(u64,u64),DYNERR>
where R: Read + Seek, W: Write + Seek {
    let mut reader = BufReader::new(compressed_in);
    let mut writer = BufWriter::new(expanded_out);
    let ibuf = read_input(&mut reader,opt)?;
    if ibuf.len() < SIGNATURE.len() || ibuf[0..2] != SIGNATURE {
        log::error!("huffpack signature not found");
        return Err(Box::new(crate::Error::FileFormatMismatch));
    }
    let (header,header_len) = Header::from_bytes(&ibuf[2..])?;
    let expanded = static_huff::decompress(&header,&ibuf[2+header_len..])?;
    writer.seek(SeekFrom::Start(opt.out_offset))?;
    writer.write_all(&expanded)?;
    writer.flush()?;
    Ok((ibuf.len() as u64,writer.stream_position()? - opt.out_offset))
}

/// Convenience function, calls `compress` with a slice returning a Vec
pub fn compress_slice(slice: &[u8],opt: &Options) -> Result<Vec<u8>,DYNERR> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    compress(&mut src,&mut ans,opt)?;
    Ok(ans.into_inner())
}

/// Convenience function, calls `expand` with a slice returning a Vec
pub fn expand_slice(slice: &[u8],opt: &Options) -> Result<Vec<u8>,DYNERR> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    expand(&mut src,&mut ans,opt)?;
    Ok(ans.into_inner())
}

#[test]
fn compression_works() {
    let test_data = "aaabbc".as_bytes();
    let huff_str = "48 46 00 03 00 61 01 00 62 02 C0 63 02 80 09 00 00 00 00 00 00 00 1F 00";
    let compressed = compress_slice(test_data,&STD_OPTIONS).expect("compression failed");
    assert_eq!(compressed,hex::decode(huff_str.replace(" ","")).unwrap());
}

#[test]
fn invertibility() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let mut opt = STD_OPTIONS;
    for ord in [BitOrder::Msb0,BitOrder::Lsb0] {
        opt.ord = ord;
        let compressed = compress_slice(test_data,&opt).expect("compression failed");
        let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
        assert_eq!(test_data.to_vec(),expanded);
    }
}

#[test]
fn offsets() {
    let test_data = "0123456789I am Sam. Sam I am.".as_bytes();
    let mut opt = STD_OPTIONS;
    opt.in_offset = 10;
    opt.out_offset = 4;
    let compressed = compress_slice(test_data,&opt).expect("compression failed");
    assert_eq!(compressed[0..4],[0,0,0,0]);
    assert_eq!(compressed[4..6],SIGNATURE);
    let mut opt = STD_OPTIONS;
    opt.in_offset = 4;
    let expanded = expand_slice(&compressed,&opt).expect("expansion failed");
    assert_eq!(expanded,test_data[10..].to_vec());
}

#[test]
fn bad_signature() {
    let compressed = compress_slice("I am Sam.".as_bytes(),&STD_OPTIONS).expect("compression failed");
    let mut bad = compressed.clone();
    bad[0] = b'h';
    let err = expand_slice(&bad,&STD_OPTIONS).expect_err("expansion should fail");
    assert_eq!(err.downcast_ref::<crate::Error>(),Some(&crate::Error::FileFormatMismatch));
    let err = expand_slice(&compressed[0..compressed.len()-1],&STD_OPTIONS).expect_err("expansion should fail");
    assert_eq!(err.downcast_ref::<crate::Error>(),Some(&crate::Error::TruncatedStream));
}

#[test]
fn size_limits() {
    let mut opt = STD_OPTIONS;
    opt.max_file_size = 4;
    let err = compress_slice("I am Sam.".as_bytes(),&opt).expect_err("compression should fail");
    assert_eq!(err.downcast_ref::<crate::Error>(),Some(&crate::Error::FileTooLarge));
    let err = compress_slice(&[],&STD_OPTIONS).expect_err("compression should fail");
    assert_eq!(err.downcast_ref::<crate::Error>(),Some(&crate::Error::EmptyInput));
}
