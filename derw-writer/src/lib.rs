//! DER TLV writer
//!
//! This crate encodes BOOLEAN, INTEGER, NULL, SEQUENCE, explicit context tags
//! and precompiled blobs in DER without a length patching pass.
//!
//! Two calling conventions are provided:
//!
//! - **Counter + backward cursor** ([`DerSink`], [`primitive`], [`constructed`]):
//!   content is written from the end of a caller-owned window toward its
//!   start, so each length is known by the time its octets are written. Run
//!   once against [`DerSink::sizing`] to learn the size, then against
//!   [`DerSink::writing`]. [`Encode`], [`Element`] and [`to_vec`] package the
//!   two passes.
//! - **Forward regions** ([`RegionBuilder`]): open and close nested regions on
//!   one growable builder and flush the result with
//!   [`RegionBuilder::finish`].
//!
//! Both produce identical bytes for the same structure.
//!
//! # Limits
//!
//! - Content lengths up to 65535 bytes
//! - Context tags 0-29
//! - Non-negative integers only

pub mod bignum;
pub mod config;
pub mod constructed;
pub mod encode;
pub mod length;
pub mod primitive;
pub mod region;
pub mod sink;

pub use bignum::{BigNumber, LimbInteger};
pub use config::BuilderConfig;
pub use derw_core::{DerError, DerResult, Tag, TagClass};
pub use encode::{Element, Encode, EncodeFn, measure, to_vec, two_pass, write};
pub use length::{LengthOctets, MAX_CONTENT_LEN, encoded_length_len};
pub use region::{RegionBuilder, RegionKind};
pub use sink::DerSink;
