//! Forward region builder
//!
//! [`RegionBuilder`] is the auto-managed calling convention. Elements are
//! appended in natural reading order; constructed elements are opened with
//! `start_*` and closed with `end_*`. The builder keeps the stack of open
//! regions as `(start offset, kind)` records. Closing a region pops it,
//! computes its length as `current offset - start offset`, and moves the
//! identifier and length octets in front of the region content.
//!
//! The output is byte-identical to the counter + backward-cursor convention
//! for the same logical structure.
//!
//! # Usage Example
//!
//! ```rust
//! use derw_writer::RegionBuilder;
//!
//! let mut builder = RegionBuilder::new();
//! builder.start_sequence()?;
//! builder.unsigned_in_context(2, 20)?;
//! builder.end_sequence()?;
//! let der = builder.finish()?;
//! assert_eq!(&der[..], &[0x30, 0x05, 0xA2, 0x03, 0x02, 0x01, 0x14]);
//! # Ok::<(), derw_writer::DerError>(())
//! ```
//!
//! Any failure poisons the builder: every later call, including
//! [`RegionBuilder::finish`], returns `DerError::Poisoned`.

use crate::bignum::BigNumber;
use crate::config::BuilderConfig;
use crate::length::LengthOctets;
use crate::primitive::{UnsignedOctets, check_top_byte};
use bytes::{BufMut, Bytes, BytesMut};
use derw_core::{DerError, DerResult, Tag};
use std::fmt;

/// Kind of an open region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// SEQUENCE
    Sequence,
    /// Explicit context tag `[n]`
    Context(u32),
}

impl RegionKind {
    fn tag(self) -> DerResult<Tag> {
        match self {
            RegionKind::Sequence => Ok(Tag::SEQUENCE),
            RegionKind::Context(num) => Tag::context(num),
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionKind::Sequence => write!(f, "SEQUENCE"),
            RegionKind::Context(num) => write!(f, "[{}]", num),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Region {
    start: usize,
    kind: RegionKind,
}

/// Forward DER builder with an internal stack of open regions
#[derive(Debug)]
pub struct RegionBuilder {
    buffer: BytesMut,
    regions: Vec<Region>,
    max_len: Option<usize>,
    failure: Option<DerError>,
}

impl RegionBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    /// Create a builder with the given configuration
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            buffer: BytesMut::with_capacity(config.initial_capacity),
            regions: Vec::new(),
            max_len: config.max_len,
            failure: None,
        }
    }

    /// Bytes appended so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check whether nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of regions currently open
    pub fn depth(&self) -> usize {
        self.regions.len()
    }

    /// Open a SEQUENCE region
    pub fn start_sequence(&mut self) -> DerResult<()> {
        self.check()?;
        self.open(RegionKind::Sequence);
        Ok(())
    }

    /// Open an explicit context tag region `[num]`
    ///
    /// # Arguments
    /// * `num` - Context tag number; the identifier octet is `0xA0 | num`
    ///
    /// The region must be closed with [`RegionBuilder::end_context`]. Closing
    /// it with `end_sequence` is a `DerError::RegionMismatch`.
    ///
    /// # Errors
    /// Returns `DerError::TagOutOfRange` if `num` is not in 0-29.
    pub fn start_context(&mut self, num: u32) -> DerResult<()> {
        self.check()?;
        let tag = Tag::context(num);
        self.guard(tag)?;
        self.open(RegionKind::Context(num));
        Ok(())
    }

    /// Close the innermost region, which must be a SEQUENCE
    pub fn end_sequence(&mut self) -> DerResult<()> {
        self.check()?;
        let result = self.close(false);
        self.guard(result)
    }

    /// Close the innermost region, which must be a context tag
    pub fn end_context(&mut self) -> DerResult<()> {
        self.check()?;
        let result = self.close(true);
        self.guard(result)
    }

    /// Append a BOOLEAN
    pub fn boolean(&mut self, value: bool) -> DerResult<()> {
        self.check()?;
        let content: &[u8] = if value { &[0xFF] } else { &[] };
        let result = self.append_tlv(Tag::BOOLEAN, content);
        self.guard(result)
    }

    /// Append a non-negative INTEGER from a native unsigned value
    pub fn unsigned(&mut self, value: u64) -> DerResult<()> {
        self.check()?;
        let result = self.append_tlv(Tag::INTEGER, UnsignedOctets::new(value).as_bytes());
        self.guard(result)
    }

    /// Append a non-negative INTEGER from an arbitrary-precision value
    ///
    /// Applies the same top byte cross-check as
    /// [`write_integer`](crate::primitive::write_integer).
    pub fn integer<N>(&mut self, value: &N) -> DerResult<()>
    where
        N: BigNumber + ?Sized,
    {
        self.check()?;
        let result = self.append_integer(value);
        self.guard(result)
    }

    /// Append a NULL
    pub fn null(&mut self) -> DerResult<()> {
        self.check()?;
        let result = self.append_tlv(Tag::NULL, &[]);
        self.guard(result)
    }

    /// Append an already DER-encoded blob verbatim
    pub fn precompiled(&mut self, der: &[u8]) -> DerResult<()> {
        self.check()?;
        let result = self.grow(der.len());
        self.guard(result)?;
        self.buffer.extend_from_slice(der);
        Ok(())
    }

    /// Append `[num] BOOLEAN`
    pub fn boolean_in_context(&mut self, num: u32, value: bool) -> DerResult<()> {
        self.start_context(num)?;
        self.boolean(value)?;
        self.end_context()
    }

    /// Append `[num] INTEGER` from a native unsigned value
    pub fn unsigned_in_context(&mut self, num: u32, value: u64) -> DerResult<()> {
        self.start_context(num)?;
        self.unsigned(value)?;
        self.end_context()
    }

    /// Append `[num] INTEGER` from an arbitrary-precision value
    pub fn integer_in_context<N>(&mut self, num: u32, value: &N) -> DerResult<()>
    where
        N: BigNumber + ?Sized,
    {
        self.start_context(num)?;
        self.integer(value)?;
        self.end_context()
    }

    /// Append `[num] NULL`
    pub fn null_in_context(&mut self, num: u32) -> DerResult<()> {
        self.start_context(num)?;
        self.null()?;
        self.end_context()
    }

    /// Append `[num]` wrapping an already DER-encoded blob
    pub fn precompiled_in_context(&mut self, num: u32, der: &[u8]) -> DerResult<()> {
        self.start_context(num)?;
        self.precompiled(der)?;
        self.end_context()
    }

    /// Flush the completed output
    ///
    /// # Errors
    /// - `DerError::Poisoned` if any earlier call failed
    /// - `DerError::UnclosedRegion` if a region is still open
    pub fn finish(self) -> DerResult<Bytes> {
        if let Some(failure) = self.failure {
            return Err(DerError::Poisoned(Box::new(failure)));
        }
        if !self.regions.is_empty() {
            log::debug!("Finishing with {} open region(s)", self.regions.len());
            return Err(DerError::UnclosedRegion(self.regions.len()));
        }
        log::trace!("Region builder finished with {} bytes", self.buffer.len());
        Ok(self.buffer.freeze())
    }

    fn check(&self) -> DerResult<()> {
        match &self.failure {
            Some(failure) => Err(DerError::Poisoned(Box::new(failure.clone()))),
            None => Ok(()),
        }
    }

    fn guard<T>(&mut self, result: DerResult<T>) -> DerResult<T> {
        if let Err(e) = &result {
            self.failure = Some(e.clone());
        }
        result
    }

    fn open(&mut self, kind: RegionKind) {
        log::trace!("Opening {} region at offset {}", kind, self.buffer.len());
        self.regions.push(Region {
            start: self.buffer.len(),
            kind,
        });
    }

    fn close(&mut self, context: bool) -> DerResult<()> {
        let region = self.regions.pop().ok_or(DerError::NoOpenRegion)?;
        let matches = match region.kind {
            RegionKind::Sequence => !context,
            RegionKind::Context(_) => context,
        };
        if !matches {
            let found = if context { "context" } else { "SEQUENCE" };
            log::debug!("Closing {} while {} is innermost", found, region.kind);
            return Err(DerError::RegionMismatch {
                expected: region.kind.to_string(),
                found: found.to_string(),
            });
        }

        let tag = region.kind.tag()?;
        let content_len = self.buffer.len() - region.start;
        let length = LengthOctets::new(content_len)?;
        let header_len = 1 + length.len();
        self.grow(header_len)?;

        self.buffer.put_u8(tag.to_byte());
        self.buffer.extend_from_slice(length.as_bytes());
        self.buffer[region.start..].rotate_right(header_len);
        log::trace!(
            "Closed {} region at offset {} with {} content bytes",
            region.kind,
            region.start,
            content_len
        );
        Ok(())
    }

    fn append_tlv(&mut self, tag: Tag, content: &[u8]) -> DerResult<()> {
        let length = LengthOctets::new(content.len())?;
        self.grow(1 + length.len() + content.len())?;
        self.buffer.put_u8(tag.to_byte());
        self.buffer.extend_from_slice(length.as_bytes());
        self.buffer.extend_from_slice(content);
        Ok(())
    }

    fn append_integer<N>(&mut self, value: &N) -> DerResult<()>
    where
        N: BigNumber + ?Sized,
    {
        if value.is_negative() {
            log::debug!("Rejecting negative INTEGER");
            return Err(DerError::NegativeValueUnsupported);
        }
        if value.is_zero() {
            return self.append_tlv(Tag::INTEGER, UnsignedOctets::new(0).as_bytes());
        }

        let magnitude_len = value.num_bytes();
        let top_byte = value.top_byte();
        let pad = usize::from(top_byte > 0x7F);
        let length = LengthOctets::new(magnitude_len + pad)?;
        self.grow(1 + length.len() + pad + magnitude_len)?;

        self.buffer.put_u8(Tag::INTEGER.to_byte());
        self.buffer.extend_from_slice(length.as_bytes());
        if pad == 1 {
            self.buffer.put_u8(0x00);
        }
        let start = self.buffer.len();
        self.buffer.resize(start + magnitude_len, 0);
        let magnitude = &mut self.buffer[start..];
        value.write_be(magnitude);
        check_top_byte(top_byte, magnitude)
    }

    fn grow(&mut self, additional: usize) -> DerResult<()> {
        let needed = self.buffer.len() + additional;
        if let Some(max_len) = self.max_len {
            if needed > max_len {
                log::debug!("Region builder limit {} exceeded ({} bytes)", max_len, needed);
                return Err(DerError::AllocationFailure(format!(
                    "buffer would grow to {} bytes, limit is {}",
                    needed, max_len
                )));
            }
        }
        self.buffer.reserve(additional);
        Ok(())
    }
}

impl Default for RegionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
