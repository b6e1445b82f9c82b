//! Region builder configuration

use serde::{Deserialize, Serialize};

/// Configuration for [`RegionBuilder`](crate::region::RegionBuilder)
///
/// # Default Settings
/// - Initial capacity: 256 bytes
/// - Maximum length: unbounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Bytes to pre-allocate for the output buffer
    pub initial_capacity: usize,
    /// Ceiling on the total output size; growing past it fails with
    /// `DerError::AllocationFailure`
    pub max_len: Option<usize>,
}

impl BuilderConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial buffer capacity
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Bound the total output size
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 256,
            max_len: None,
        }
    }
}
