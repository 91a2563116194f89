//! Error types for intake operations.

use crate::ValidationError;

/// Errors that can occur inside a form store implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The unique-id retry budget was spent without finding an unused id.
    IdGenerationExhausted,
    /// An I/O or transaction fault occurred in the storage backend.
    Internal(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdGenerationExhausted => {
                write!(f, "Could not generate an unused form id within the retry budget")
            }
            Self::Internal(msg) => write!(f, "Internal storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Internal(e.to_string())
    }
}

/// Failure taxonomy for service operations.
///
/// The service is the only layer that translates lower-layer failures, so
/// nothing below this taxonomy (SQL text, connection errors) ever reaches a
/// caller. The HTTP boundary maps each kind to a transport status code.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Caller-supplied data violates one or more business rules.
    Validation(ValidationError),
    /// The supplied record identifier is not a syntactically valid UUID.
    InvalidIdFormat,
    /// No record exists at the supplied identifier, including races where it
    /// vanished mid-operation.
    NotFound,
    /// The unique-id retry budget was exhausted. Internal; not expected in
    /// practice.
    IdGenerationExhausted,
    /// The storage backend failed. Not recoverable by the caller.
    Storage(String),
}

impl ServiceError {
    /// Caller-facing messages for the response envelope. Internal failure
    /// kinds surface a generic message; the detail is logged at the point of
    /// occurrence instead.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(e) => e.messages(),
            Self::InvalidIdFormat => {
                vec!["The supplied id is not a valid UUID.".to_string()]
            }
            Self::NotFound => vec!["Client form not found.".to_string()],
            Self::IdGenerationExhausted | Self::Storage(_) => {
                vec!["Internal server error.".to_string()]
            }
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{}", e),
            Self::InvalidIdFormat => write!(f, "Invalid id format"),
            Self::NotFound => write!(f, "Client form not found"),
            Self::IdGenerationExhausted => write!(f, "Form id generation exhausted"),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<ValidationError> for ServiceError {
    fn from(e: ValidationError) -> Self {
        ServiceError::Validation(e)
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::IdGenerationExhausted => ServiceError::IdGenerationExhausted,
            StoreError::Internal(msg) => ServiceError::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_converts_to_service_error() {
        assert_eq!(
            ServiceError::from(StoreError::IdGenerationExhausted),
            ServiceError::IdGenerationExhausted
        );
        assert_eq!(
            ServiceError::from(StoreError::Internal("boom".to_string())),
            ServiceError::Storage("boom".to_string())
        );
    }

    #[test]
    fn internal_failures_surface_generic_message() {
        let messages = ServiceError::Storage("connection reset".to_string()).messages();
        assert_eq!(messages, vec!["Internal server error.".to_string()]);
        assert!(!messages[0].contains("connection reset"));

        let messages = ServiceError::IdGenerationExhausted.messages();
        assert_eq!(messages, vec!["Internal server error.".to_string()]);
    }

    #[test]
    fn not_found_message() {
        assert_eq!(
            ServiceError::NotFound.messages(),
            vec!["Client form not found.".to_string()]
        );
    }
}
