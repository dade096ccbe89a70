//! Error types for RTF extraction

use thiserror::Error;

/// Errors that can occur while flattening RTF to plain text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RtfError {
    /// A `}` closed a group that was never opened
    #[error("Unbalanced group: unexpected '}}' at position {position}")]
    UnbalancedGroup {
        /// Byte offset of the offending brace
        position: usize,
    },
}

impl RtfError {
    /// Create an unbalanced group error at a specific position
    pub fn unbalanced_group(position: usize) -> Self {
        Self::UnbalancedGroup { position }
    }

    /// Byte offset in the input where the error was detected
    pub fn position(&self) -> usize {
        match self {
            Self::UnbalancedGroup { position } => *position,
        }
    }
}

/// Result type for RTF operations
pub type RtfResult<T> = std::result::Result<T, RtfError>;
