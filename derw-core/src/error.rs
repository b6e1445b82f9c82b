use thiserror::Error;

/// Error type for all DER writing operations
///
/// Every encoder returns this through [`DerResult`]. A returned error means the
/// destination buffer holds no usable output and must be discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DerError {
    #[error("Buffer underflow: {requested} bytes requested, {available} available")]
    BufferUnderflow { requested: usize, available: usize },

    #[error("Unsupported length: {0} exceeds the 16-bit DER length limit")]
    UnsupportedLength(usize),

    #[error("Context tag out of range: {0} (expected 0-29)")]
    TagOutOfRange(u32),

    #[error("Negative value unsupported by unsigned INTEGER encoder")]
    NegativeValueUnsupported,

    /// The writer disagreed with itself or with its big number backend.
    ///
    /// This is a defect signal, never an input validation failure.
    #[error("Internal invariant violation: expected {expected:#04x}, found {found:#04x}")]
    InternalInvariantViolation { expected: usize, found: usize },

    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    #[error("Region mismatch: closing {found} but innermost open region is {expected}")]
    RegionMismatch { expected: String, found: String },

    #[error("No open region to close")]
    NoOpenRegion,

    #[error("Unclosed region: {0} region(s) still open")]
    UnclosedRegion(usize),

    #[error("Builder poisoned by an earlier failure: {0}")]
    Poisoned(Box<DerError>),
}

impl From<std::collections::TryReserveError> for DerError {
    fn from(e: std::collections::TryReserveError) -> Self {
        DerError::AllocationFailure(e.to_string())
    }
}

/// Result type alias for DER writing operations
pub type DerResult<T> = Result<T, DerError>;
