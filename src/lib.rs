//! # Huffpack
//!
//! Static Huffman compression of byte buffers.
//!
//! * `static_huff` holds the codec proper: `compress` produces a `Header` and a packed
//!   payload, `decompress` reverses it.
//! * `header` serializes the code table with an explicit, length-prefixed binary layout.
//! * `container` wraps header and payload in a single stream for files or cursors.
//!
//! ```rust
//! let (header,packed) = huffpack::static_huff::compress(b"abracadabra")?;
//! let expanded = huffpack::static_huff::decompress(&header,&packed)?;
//! assert_eq!(expanded,b"abracadabra");
//! # Ok::<(),huffpack::Error>(())
//! ```

use num_derive::FromPrimitive;

pub mod tools;
pub mod header;
pub mod static_huff;
pub mod container;

type DYNERR = Box<dyn std::error::Error>;

/// Codec Errors
#[derive(thiserror::Error,Debug,PartialEq)]
pub enum Error {
    #[error("no symbols to encode")]
    EmptyInput,
    #[error("header does not describe a prefix-free code table")]
    MalformedHeader,
    #[error("bit stream ended before the declared payload")]
    TruncatedStream,
    #[error("bit sequence matches no code")]
    UnassignedCode,
    #[error("data follows the declared payload")]
    TrailingData,
    #[error("frequencies sum past the counter range")]
    FrequencyOverflow,
    #[error("symbol {0:#04x} has no code")]
    SymbolNotInTable(u8),
    #[error("file format mismatch")]
    FileFormatMismatch,
    #[error("file too large")]
    FileTooLarge
}

/// Order in which bits are packed into each byte of the payload.
/// The discriminant is the value stored in the header.
#[derive(FromPrimitive,Clone,Copy,Debug,PartialEq)]
pub enum BitOrder {
    /// most significant bit first
    Msb0 = 0,
    /// least significant bit first
    Lsb0 = 1
}
