//! DER definite length octets
//!
//! DER always uses the shortest form:
//! - **Short form** (1 byte): lengths 0-127
//! - **Long form**: first byte `0x80 | count`, followed by `count` big-endian bytes
//!
//! Long form is limited to two length bytes here, so the largest encodable
//! content is 65535 bytes.

use derw_core::{DerError, DerResult};

/// Largest content length this writer encodes
pub const MAX_CONTENT_LEN: usize = 0xFFFF;

/// Length octets in forward reading order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthOctets {
    bytes: [u8; 3],
    len: usize,
}

impl LengthOctets {
    /// Compute the DER length octets for `n` content bytes
    ///
    /// # Errors
    /// Returns `DerError::UnsupportedLength` if `n > 0xFFFF`.
    pub fn new(n: usize) -> DerResult<Self> {
        if n > MAX_CONTENT_LEN {
            log::debug!("DER content length {} exceeds the 16-bit limit", n);
            return Err(DerError::UnsupportedLength(n));
        }

        let octets = if n > 0xFF {
            Self {
                bytes: [0x82, (n >> 8) as u8, (n & 0xFF) as u8],
                len: 3,
            }
        } else if n > 0x7F {
            Self {
                bytes: [0x81, n as u8, 0],
                len: 2,
            }
        } else {
            Self {
                bytes: [n as u8, 0, 0],
                len: 1,
            }
        };
        Ok(octets)
    }

    /// The octets, first to last
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of octets
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a length is at least one octet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Number of octets needed to encode a content length of `n`
pub fn encoded_length_len(n: usize) -> DerResult<usize> {
    LengthOctets::new(n).map(|octets| octets.len())
}
