//! DER identifier octets (Tag class, constructed flag, tag number)
//!
//! X.690 numbers the identifier octet bits 8 to 1:
//!
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//!
//! - CC = Class (00=Universal, 01=Application, 10=Context, 11=Private)
//! - P = Primitive (0) or Constructed (1)
//! - TTTTT = Tag number
//!
//! Only the single-octet form is produced by this workspace.

use crate::error::{DerError, DerResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Constructed flag, occupying bit 6 of the identifier octet
pub const CONSTRUCTED: u8 = 0x20;

/// Universal tag number for BOOLEAN
pub const BOOLEAN: u8 = 1;
/// Universal tag number for INTEGER
pub const INTEGER: u8 = 2;
/// Universal tag number for NULL
pub const NULL: u8 = 5;
/// Universal tag number for SEQUENCE / SEQUENCE OF
pub const SEQUENCE: u8 = 16;

/// Highest context tag number accepted by the context wrapper
pub const MAX_CONTEXT_TAG: u32 = 29;

/// Tag Class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl TagClass {
    /// Get tag class from bits (bits 8-7 of the identifier octet)
    pub fn from_bits(bits: u8) -> Self {
        match (bits >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    /// Convert tag class to bits (for encoding)
    pub fn to_bits(self) -> u8 {
        (self as u8) << 6
    }
}

/// A single-octet DER tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    class: TagClass,
    constructed: bool,
    number: u8,
}

impl Tag {
    /// BOOLEAN, universal primitive (`0x01`)
    pub const BOOLEAN: Tag = Tag::universal(false, BOOLEAN);
    /// INTEGER, universal primitive (`0x02`)
    pub const INTEGER: Tag = Tag::universal(false, INTEGER);
    /// NULL, universal primitive (`0x05`)
    pub const NULL: Tag = Tag::universal(false, NULL);
    /// SEQUENCE, universal constructed (`0x30`)
    pub const SEQUENCE: Tag = Tag::universal(true, SEQUENCE);

    const fn universal(constructed: bool, number: u8) -> Self {
        Self {
            class: TagClass::Universal,
            constructed,
            number,
        }
    }

    /// Create an explicit, constructed context tag `[number]`
    ///
    /// # Errors
    /// Returns `DerError::TagOutOfRange` if `number` is greater than 29.
    pub fn context(number: u32) -> DerResult<Self> {
        if number > MAX_CONTEXT_TAG {
            return Err(DerError::TagOutOfRange(number));
        }
        Ok(Self {
            class: TagClass::ContextSpecific,
            constructed: true,
            number: number as u8,
        })
    }

    /// Get tag class
    pub fn class(&self) -> TagClass {
        self.class
    }

    /// Check if tag is constructed
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Get tag number
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Encode the identifier octet
    pub fn to_byte(&self) -> u8 {
        let constructed_bit = if self.constructed { CONSTRUCTED } else { 0x00 };
        self.class.to_bits() | constructed_bit | (self.number & 0x1F)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.class, self.number) {
            (TagClass::Universal, BOOLEAN) => write!(f, "BOOLEAN"),
            (TagClass::Universal, INTEGER) => write!(f, "INTEGER"),
            (TagClass::Universal, NULL) => write!(f, "NULL"),
            (TagClass::Universal, SEQUENCE) => write!(f, "SEQUENCE"),
            (TagClass::ContextSpecific, n) => write!(f, "[{}]", n),
            (class, n) => write!(f, "{:?} {}", class, n),
        }
    }
}
