//! Primitive encoders for the counter + backward-cursor convention
//!
//! Every function here writes one complete TLV in front of the sink cursor
//! (value first, then length, then tag), adds the emitted bytes to `cnt`,
//! and returns the updated running count.
//!
//! # Usage Example
//!
//! ```rust
//! use derw_writer::{DerSink, primitive};
//!
//! let mut buf = [0u8; 16];
//! let mut sink = DerSink::writing(&mut buf);
//! let mut cnt = 0;
//! primitive::write_unsigned(&mut sink, &mut cnt, 0x80)?;
//! assert_eq!(sink.written(), &[0x02, 0x02, 0x00, 0x80]);
//! # Ok::<(), derw_writer::DerError>(())
//! ```

use crate::bignum::BigNumber;
use crate::sink::DerSink;
use derw_core::{DerError, DerResult, Tag};

/// Content octets of a non-negative INTEGER that fits in 64 bits
///
/// Minimal big-endian magnitude, with a leading `0x00` when the top bit of
/// the first magnitude byte is set. Zero encodes as a single `0x00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnsignedOctets {
    bytes: [u8; 9],
    start: usize,
}

impl UnsignedOctets {
    pub(crate) fn new(value: u64) -> Self {
        let mut bytes = [0u8; 9];
        bytes[1..].copy_from_slice(&value.to_be_bytes());
        // Keep at least one magnitude byte so that zero yields [0x00]
        let mut start = 1 + ((value.leading_zeros() / 8) as usize).min(7);
        if bytes[start] > 0x7F {
            start -= 1;
        }
        Self { bytes, start }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[self.start..]
    }
}

/// Write a BOOLEAN
///
/// `true` is `01 01 FF`; `false` carries no content octet and is `01 00`.
pub fn write_boolean(sink: &mut DerSink<'_>, cnt: &mut usize, value: bool) -> DerResult<usize> {
    let start = *cnt;
    if value {
        sink.put_byte(cnt, 0xFF)?;
    }
    sink.put_header(cnt, *cnt - start, Tag::BOOLEAN)
}

/// Write a non-negative INTEGER from a native unsigned value
///
/// # Arguments
/// * `sink` - Destination sink, sizing or writing
/// * `cnt` - Running length of the current nesting level
/// * `value` - Value to encode
///
/// # Returns
/// The updated running count.
///
/// # Why This Design?
/// The content octets are derived from `value` alone, never read back from
/// the window, so a sizing pass and a writing pass always add the same
/// amount to `cnt`.
pub fn write_unsigned(sink: &mut DerSink<'_>, cnt: &mut usize, value: u64) -> DerResult<usize> {
    let start = *cnt;
    sink.put_bytes(cnt, UnsignedOctets::new(value).as_bytes())?;
    sink.put_header(cnt, *cnt - start, Tag::INTEGER)
}

/// Write a non-negative INTEGER from an arbitrary-precision value
///
/// After the magnitude is serialized, its first byte is compared with
/// [`BigNumber::top_byte`]. A mismatch means the backend is inconsistent and
/// is reported as `DerError::InternalInvariantViolation`.
///
/// # Errors
/// - `DerError::NegativeValueUnsupported` if `value` is negative
/// - `DerError::InternalInvariantViolation` on a top byte mismatch
/// - `DerError::BufferUnderflow` / `DerError::UnsupportedLength` from the sink
pub fn write_integer<N>(sink: &mut DerSink<'_>, cnt: &mut usize, value: &N) -> DerResult<usize>
where
    N: BigNumber + ?Sized,
{
    if value.is_negative() {
        log::debug!("Rejecting negative INTEGER");
        return Err(DerError::NegativeValueUnsupported);
    }
    if value.is_zero() {
        return write_unsigned(sink, cnt, 0);
    }

    let start = *cnt;
    let top_byte = value.top_byte();
    if let Some(span) = sink.reserve(cnt, value.num_bytes())? {
        value.write_be(span);
        check_top_byte(top_byte, span)?;
    }
    if top_byte > 0x7F {
        sink.put_byte(cnt, 0x00)?;
    }
    sink.put_header(cnt, *cnt - start, Tag::INTEGER)
}

/// Compare a serialized magnitude's first byte with the expected top byte
pub(crate) fn check_top_byte(expected: u8, magnitude: &[u8]) -> DerResult<()> {
    let found = magnitude.first().copied();
    if found != Some(expected) {
        log::error!(
            "INTEGER top byte mismatch: expected {:#04x}, serialized {:?}",
            expected,
            found
        );
        return Err(DerError::InternalInvariantViolation {
            expected: usize::from(expected),
            found: found.map_or(0, usize::from),
        });
    }
    Ok(())
}

/// Write a NULL (`05 00`)
pub fn write_null(sink: &mut DerSink<'_>, cnt: &mut usize) -> DerResult<usize> {
    sink.put_header(cnt, 0, Tag::NULL)
}

/// Copy an already DER-encoded blob verbatim
///
/// The blob is not inspected.
pub fn write_precompiled(sink: &mut DerSink<'_>, cnt: &mut usize, der: &[u8]) -> DerResult<usize> {
    sink.put_bytes(cnt, der)?;
    Ok(*cnt)
}
