use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//////////////////////////////////////////////// FormId ////////////////////////////////////////////////

/// Number of id-generation attempts a store makes before giving up.
///
/// A v4 UUID collision is astronomically unlikely; the budget exists to turn
/// a theoretical infinite loop into a deterministic failure. The store's
/// primary-key constraint remains the true uniqueness guarantee.
pub const ID_RETRY_BUDGET: usize = 5;

/// Unique identifier for a client form record.
///
/// Form ids are UUID v4 values. They are assigned server-side at creation and
/// never reused or reassigned afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct FormId(Uuid);

impl FormId {
    /// Generates a fresh random (v4) form id.
    pub fn random() -> Self {
        FormId(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Display for FormId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Error returned when parsing an invalid form id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormIdParseError {
    invalid_id: String,
}

impl FormIdParseError {
    /// Returns the invalid input that caused the error.
    pub fn invalid_id(&self) -> &str {
        &self.invalid_id
    }
}

impl Display for FormIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Invalid form id {:?}. Form ids must be UUIDs", self.invalid_id)
    }
}

impl std::error::Error for FormIdParseError {}

impl FromStr for FormId {
    type Err = FormIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(FormId)
            .map_err(|_| FormIdParseError {
                invalid_id: s.to_string(),
            })
    }
}

/////////////////////////////////////////////// ClientForm /////////////////////////////////////////////

/// A client intake form record as persisted by the store.
///
/// Every field is populated: a record is either fully present or does not
/// exist at all. `created_at` is set once at creation; `updated_at` is reset
/// on every successful non-empty update, so `created_at <= updated_at` holds
/// for the record's whole lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientForm {
    /// The record's unique identifier.
    pub id: FormId,
    /// The client's full name, title-cased and trimmed.
    pub full_name: String,
    /// The client's email address.
    pub email: String,
    /// The client's phone number (7-15 decimal digits).
    pub phone: i64,
    /// The client's message, trimmed.
    pub message: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

////////////////////////////////////////////// Payloads ////////////////////////////////////////////////

/// Create payload as submitted by a caller. All four business fields are
/// required; validation and normalization happen in [`crate::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFormRequest {
    /// The client's full name.
    pub full_name: String,
    /// The client's email address.
    pub email: String,
    /// The client's phone number as an integer.
    pub phone: i64,
    /// The client's message.
    pub message: String,
}

/// Partial update payload. Absent fields are left untouched; present fields
/// are validated with the same rules as creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFormRequest {
    /// New full name, if the caller wants to change it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New email address, if the caller wants to change it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New phone number, if the caller wants to change it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<i64>,
    /// New message, if the caller wants to change it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A create payload that has passed validation, with normalized field values.
/// This is the only shape the store accepts for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewForm {
    /// Title-cased, trimmed full name.
    pub full_name: String,
    /// Validated email address.
    pub email: String,
    /// Validated phone number.
    pub phone: i64,
    /// Trimmed message.
    pub message: String,
}

/// A validated update subset. Fields that are `None` are left unchanged by
/// the store; an all-`None` change-set degenerates to a pure read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormChanges {
    /// Normalized replacement full name.
    pub full_name: Option<String>,
    /// Replacement email address.
    pub email: Option<String>,
    /// Replacement phone number.
    pub phone: Option<i64>,
    /// Normalized replacement message.
    pub message: Option<String>,
}

impl FormChanges {
    /// True when no field is being changed.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.message.is_none()
    }
}
