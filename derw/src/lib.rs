//! derw - DER TLV writer for cryptographic structures
//!
//! This library encodes DER structures such as algorithm identifiers and key
//! structures without a general ASN.1 compiler.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `derw-core`: Error taxonomy and identifier octet types
//! - `derw-writer`: Length encoder, byte sink, primitive and constructed
//!   encoders, the forward region builder and two-phase orchestration
//! - `derw-algorithm`: AlgorithmIdentifier and RSA key structure encoders
//!
//! # Usage
//!
//! ```rust
//! use derw::{Element, RegionBuilder, to_vec};
//!
//! let tree = Element::Context(2, vec![Element::Unsigned(20)]);
//! let backward = to_vec(&tree)?;
//!
//! let mut builder = RegionBuilder::new();
//! builder.unsigned_in_context(2, 20)?;
//! assert_eq!(backward, &builder.finish()?[..]);
//! # Ok::<(), derw::DerError>(())
//! ```

// Re-export core types
pub use derw_core::{DerError, DerResult, Tag, TagClass};

// Re-export the writer API
pub use derw_writer::{
    BigNumber, BuilderConfig, DerSink, Element, Encode, EncodeFn, LimbInteger, RegionBuilder,
    RegionKind, measure, to_vec, two_pass, write,
};

pub mod writer {
    pub use derw_writer::*;
}

pub mod algorithm {
    pub use derw_algorithm::*;
}
