//! Dual-mode byte sink for backward DER construction
//!
//! A [`DerSink`] is either:
//! - **Sizing**: no destination; every write only adds to the caller's counter
//! - **Writing**: a borrowed window with a cursor that starts at the window end
//!   and moves toward its start with each write
//!
//! Both modes add exactly the same amounts to the counter for the same calls,
//! which is what makes measuring first and writing second agree.

use crate::length::LengthOctets;
use derw_core::{DerError, DerResult, Tag};

/// Byte sink that writes from the end of a window toward its start
#[derive(Debug)]
pub struct DerSink<'a> {
    window: Option<&'a mut [u8]>,
    cursor: usize,
}

impl<'a> DerSink<'a> {
    /// Create a sink that only counts bytes
    pub fn sizing() -> Self {
        Self {
            window: None,
            cursor: 0,
        }
    }

    /// Create a sink writing backward into `window`
    ///
    /// The cursor starts at `window.len()`. Finished output occupies the
    /// tail of the window, see [`DerSink::written`].
    pub fn writing(window: &'a mut [u8]) -> Self {
        let cursor = window.len();
        Self {
            window: Some(window),
            cursor,
        }
    }

    /// Check whether this sink only counts bytes
    pub fn is_sizing(&self) -> bool {
        self.window.is_none()
    }

    /// Bytes still available in front of the cursor (always 0 when sizing)
    pub fn remaining(&self) -> usize {
        self.cursor
    }

    /// Bytes written so far, from the cursor to the window end
    pub fn written(&self) -> &[u8] {
        match self.window.as_deref() {
            Some(window) => &window[self.cursor..],
            None => &[],
        }
    }

    /// Reserve `n` bytes in front of the cursor and add them to `cnt`
    ///
    /// Returns the reserved span in writing mode, `None` in sizing mode.
    /// The caller fills the span in forward order.
    ///
    /// # Errors
    /// - `DerError::BufferUnderflow` if fewer than `n` bytes remain
    /// - `DerError::UnsupportedLength` if `cnt + n` overflows `usize`
    ///
    /// The counter is left untouched on failure.
    pub fn reserve(&mut self, cnt: &mut usize, n: usize) -> DerResult<Option<&mut [u8]>> {
        let total = add_len(*cnt, n)?;
        match self.window.as_deref_mut() {
            None => {
                *cnt = total;
                Ok(None)
            }
            Some(window) => {
                if n > self.cursor {
                    log::debug!(
                        "DER window underflow: {} bytes requested, {} available",
                        n,
                        self.cursor
                    );
                    return Err(DerError::BufferUnderflow {
                        requested: n,
                        available: self.cursor,
                    });
                }
                self.cursor -= n;
                *cnt = total;
                Ok(Some(&mut window[self.cursor..self.cursor + n]))
            }
        }
    }

    /// Write one byte in front of the cursor
    ///
    /// # Arguments
    /// * `cnt` - Running length of the current nesting level, incremented by 1
    /// * `byte` - The octet to write
    ///
    /// # Errors
    /// Returns `DerError::BufferUnderflow` if the window is full.
    pub fn put_byte(&mut self, cnt: &mut usize, byte: u8) -> DerResult<()> {
        if let Some(span) = self.reserve(cnt, 1)? {
            span[0] = byte;
        }
        Ok(())
    }

    /// Write `bytes` in front of the cursor, keeping their forward order
    ///
    /// # Arguments
    /// * `cnt` - Running length of the current nesting level
    /// * `bytes` - Octets in their final left-to-right order
    ///
    /// # Why This Design?
    /// The sink moves backward but a multi-byte payload is copied as one
    /// span, so callers never reverse anything themselves.
    pub fn put_bytes(&mut self, cnt: &mut usize, bytes: &[u8]) -> DerResult<()> {
        if let Some(span) = self.reserve(cnt, bytes.len())? {
            span.copy_from_slice(bytes);
        }
        Ok(())
    }

    /// Write the DER length octets for `n` content bytes
    pub fn put_length(&mut self, cnt: &mut usize, n: usize) -> DerResult<()> {
        let octets = LengthOctets::new(n)?;
        self.put_bytes(cnt, octets.as_bytes())
    }

    /// Write length then identifier octet in front of `content_len` content bytes
    ///
    /// Returns the updated running count.
    pub fn put_header(&mut self, cnt: &mut usize, content_len: usize, tag: Tag) -> DerResult<usize> {
        self.put_length(cnt, content_len)?;
        self.put_byte(cnt, tag.to_byte())?;
        Ok(*cnt)
    }
}

/// Add `n` to a running length, failing instead of wrapping
pub(crate) fn add_len(cnt: usize, n: usize) -> DerResult<usize> {
    cnt.checked_add(n).ok_or_else(|| {
        log::debug!("DER running length overflow: {} + {}", cnt, n);
        DerError::UnsupportedLength(n)
    })
}
