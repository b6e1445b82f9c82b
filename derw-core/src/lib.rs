//! Core types and errors for the derw DER writer
//!
//! This crate provides the error taxonomy and identifier octet types shared
//! by the writer and its consumers.

pub mod error;
pub mod tag;

pub use error::{DerError, DerResult};
pub use tag::{Tag, TagClass};
