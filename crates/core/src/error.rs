//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic, caller-recoverable failures only. Storage and configuration
/// failures belong to the infrastructure crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed validation (non-positive quantity, unknown item, bad coefficient).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A row index outside `[0, len)`.
    #[error("row index {index} out of range (ledger has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// True for `InvalidInput`.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_range_message_names_index_and_len() {
        let err = DomainError::index_out_of_range(3, 2);
        assert_eq!(
            err.to_string(),
            "row index 3 out of range (ledger has 2 entries)"
        );
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn invalid_input_carries_message() {
        let err = DomainError::invalid_input("quantity must be at least 1");
        assert_eq!(err, DomainError::InvalidInput("quantity must be at least 1".into()));
        assert!(err.is_invalid_input());
    }
}
