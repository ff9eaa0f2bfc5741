//! Record store error types
//!
//! Lookups never fail: unknown ids come back as `None`. The only errors are
//! integrity violations found while loading a dataset.

use thiserror::Error;

use super::types::RecordId;

/// Errors raised while validating a dataset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A prescription points at a professional that does not exist
    #[error("Prescription {prescription} references unknown professional {professional}")]
    UnknownProfessional {
        prescription: RecordId,
        professional: RecordId,
    },

    /// A dose change points at a medication that does not exist
    #[error("Medication change {change} references unknown medication {medication}")]
    UnknownMedication { change: RecordId, medication: RecordId },

    /// Two records in the same collection share an id
    #[error("Duplicate {collection} id: {id}")]
    DuplicateId {
        collection: &'static str,
        id: RecordId,
    },

    /// Two users share an e-mail
    #[error("Duplicate user e-mail: {0}")]
    DuplicateEmail(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::UnknownProfessional {
            prescription: 3,
            professional: 9,
        };
        assert_eq!(
            err.to_string(),
            "Prescription 3 references unknown professional 9"
        );

        let err = StoreError::DuplicateId {
            collection: "medications",
            id: 2,
        };
        assert_eq!(err.to_string(), "Duplicate medications id: 2");
    }
}
