//! Uniform response envelope.
//!
//! Every service outcome, success or failure, is shaped as a message list
//! plus a data list. Single-record operations wrap the record in a
//! one-element list; delete and error paths carry an empty list; collection
//! reads carry the full sequence. Callers branch on the transport status
//! alongside the envelope, never on the envelope's shape.

use serde::{Deserialize, Serialize};

use crate::ClientForm;

/// The uniform response wrapper carried by every API outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Human-readable outcome messages. Always at least one element.
    pub message: Vec<String>,
    /// Zero, one, or many records, depending on the operation.
    pub data: Vec<ClientForm>,
}

impl ApiResponse {
    /// Envelope for a single-record success.
    pub fn record(message: impl Into<String>, form: ClientForm) -> Self {
        ApiResponse {
            message: vec![message.into()],
            data: vec![form],
        }
    }

    /// Envelope for a collection success.
    pub fn records(message: impl Into<String>, forms: Vec<ClientForm>) -> Self {
        ApiResponse {
            message: vec![message.into()],
            data: forms,
        }
    }

    /// Envelope for a success with no records (delete, empty list).
    pub fn empty(message: impl Into<String>) -> Self {
        ApiResponse {
            message: vec![message.into()],
            data: Vec::new(),
        }
    }

    /// Envelope for a failure: the error messages and an empty data list.
    pub fn failure(messages: Vec<String>) -> Self {
        ApiResponse {
            message: messages,
            data: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormId;
    use chrono::Utc;

    fn sample_form() -> ClientForm {
        let now = Utc::now();
        ClientForm {
            id: FormId::random(),
            full_name: "Ana Gomez".to_string(),
            email: "ana@x.com".to_string(),
            phone: 3001234567,
            message: "hola".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn record_wraps_single_element() {
        let envelope = ApiResponse::record("created", sample_form());
        assert_eq!(envelope.message.len(), 1);
        assert_eq!(envelope.data.len(), 1);
    }

    #[test]
    fn empty_and_failure_carry_no_data() {
        assert!(ApiResponse::empty("deleted").data.is_empty());
        let failure = ApiResponse::failure(vec!["a".to_string(), "b".to_string()]);
        assert!(failure.data.is_empty());
        assert_eq!(failure.message.len(), 2);
    }

    #[test]
    fn envelope_serialization_round_trip() {
        let envelope = ApiResponse::records("ok", vec![sample_form()]);
        let json = serde_json::to_string(&envelope).unwrap();
        let deserialized: ApiResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope, deserialized);
    }
}
