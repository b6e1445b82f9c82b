//! Constructed encoders (SEQUENCE and explicit context tags)
//!
//! A constructed encoder never sees its children. When it is called, the
//! children have already been written in front of the cursor, and `cnt`
//! holds the sum of their sizes for the current nesting level. The wrapper
//! writes Length(`*cnt`) then the identifier octet, and adds both to `cnt`.
//!
//! Nesting therefore needs one counter per level:
//!
//! ```rust
//! use derw_writer::{DerSink, constructed, primitive};
//!
//! let mut buf = [0u8; 16];
//! let mut sink = DerSink::writing(&mut buf);
//!
//! // SEQUENCE { [2] INTEGER 20 }
//! let mut tagged = 0;
//! primitive::write_unsigned(&mut sink, &mut tagged, 20)?;
//! constructed::write_context(&mut sink, &mut tagged, 2)?;
//! let mut seq = tagged;
//! constructed::write_sequence(&mut sink, &mut seq)?;
//! assert_eq!(sink.written(), &[0x30, 0x05, 0xA2, 0x03, 0x02, 0x01, 0x14]);
//! # Ok::<(), derw_writer::DerError>(())
//! ```

use crate::sink::{DerSink, add_len};
use derw_core::{DerResult, Tag};

/// Wrap the `*cnt` bytes already written at this level in a SEQUENCE
pub fn write_sequence(sink: &mut DerSink<'_>, cnt: &mut usize) -> DerResult<usize> {
    let content_len = *cnt;
    sink.put_header(cnt, content_len, Tag::SEQUENCE)
}

/// Like [`write_sequence`], after adding `n` separately measured bytes
///
/// `n` must not be the same variable as `cnt`.
///
/// # Arguments
/// * `sink` - Destination sink, sizing or writing
/// * `cnt` - Running length of this level; the extra term is merged into it
/// * `n` - Length of content measured on a separate counter
///
/// # Returns
/// The updated running count, including the SEQUENCE header.
///
/// # Errors
/// Returns `DerError::UnsupportedLength` if `*cnt + n` overflows or needs
/// more than two length octets. `cnt` is unchanged on failure.
pub fn write_sequence_n(sink: &mut DerSink<'_>, cnt: &mut usize, n: usize) -> DerResult<usize> {
    let mut level = add_len(*cnt, n)?;
    write_sequence(sink, &mut level)?;
    *cnt = level;
    Ok(level)
}

/// Wrap the `*cnt` bytes already written at this level in `[num]`
///
/// # Errors
/// Returns `DerError::TagOutOfRange` if `num` is not in 0-29. Nothing is
/// written in that case.
pub fn write_context(sink: &mut DerSink<'_>, cnt: &mut usize, num: u32) -> DerResult<usize> {
    let tag = context_tag(num)?;
    let content_len = *cnt;
    sink.put_header(cnt, content_len, tag)
}

/// Like [`write_context`], after adding `n` separately measured bytes
pub fn write_context_n(
    sink: &mut DerSink<'_>,
    cnt: &mut usize,
    num: u32,
    n: usize,
) -> DerResult<usize> {
    let tag = context_tag(num)?;
    let mut level = add_len(*cnt, n)?;
    let content_len = level;
    sink.put_header(&mut level, content_len, tag)?;
    *cnt = level;
    Ok(level)
}

/// Open a fresh level, run `children` on it, wrap it in a SEQUENCE, and add
/// the whole SEQUENCE to the parent `cnt`
///
/// `children` must write in backward order: last child first.
pub fn nest_sequence<'a, F>(sink: &mut DerSink<'a>, cnt: &mut usize, children: F) -> DerResult<usize>
where
    F: FnOnce(&mut DerSink<'a>, &mut usize) -> DerResult<usize>,
{
    let mut level = 0;
    children(sink, &mut level)?;
    write_sequence(sink, &mut level)?;
    *cnt = add_len(*cnt, level)?;
    Ok(*cnt)
}

/// Open a fresh level, run `children` on it, wrap it in `[num]`, and add the
/// result to the parent `cnt`
pub fn nest_context<'a, F>(
    sink: &mut DerSink<'a>,
    cnt: &mut usize,
    num: u32,
    children: F,
) -> DerResult<usize>
where
    F: FnOnce(&mut DerSink<'a>, &mut usize) -> DerResult<usize>,
{
    context_tag(num)?;
    let mut level = 0;
    children(sink, &mut level)?;
    write_context(sink, &mut level, num)?;
    *cnt = add_len(*cnt, level)?;
    Ok(*cnt)
}

fn context_tag(num: u32) -> DerResult<Tag> {
    Tag::context(num).inspect_err(|_| log::debug!("Context tag [{}] out of range", num))
}
