//! # Intake: Client Form Record Management
//!
//! Intake is a record-management service for client intake forms: create,
//! read (single or all), partial update, and delete, backed by PostgreSQL.
//! The interesting part is the three-layer request pipeline: input
//! validation, business-rule enforcement, and transactional persistence with
//! collision-safe identifier generation, with every outcome shaped into one
//! uniform response envelope.
//!
//! ## Architecture
//!
//! The system follows a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ HTTP API Layer (Axum routes)            │
//! ├─────────────────────────────────────────┤
//! │ Service (policy + envelope shaping)     │
//! ├─────────────────────────────────────────┤
//! │ Validator (pure field rules)            │
//! ├─────────────────────────────────────────┤
//! │ Form Store (trait-based abstraction)    │
//! ├─────────────────────────────────────────┤
//! │ Persistence (PostgreSQL transactions)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Core Concepts
//!
//! ### Records
//! A [`ClientForm`] carries a server-assigned UUID id, four business fields
//! (full name, email, phone, message), and a pair of timestamps. A record is
//! either fully present or absent; there is no partial or tombstone state.
//!
//! ### Validation
//! Create payloads require all four business fields; update payloads name a
//! subset. Both are validated by the same pure rules and normalized
//! (trimming, title-casing) before anything touches the store. Each failing
//! field contributes one violation to the caller-facing report.
//!
//! ### Identifier Generation
//! Ids are random v4 UUIDs checked against the store before use, with a
//! bounded retry budget. The primary-key constraint remains the true
//! uniqueness guarantee; the pre-check exists to produce a clean
//! application-level error instead of a raw constraint violation.
//!
//! ### The Envelope
//! Every outcome, success or failure, is an [`ApiResponse`]: a message list
//! plus a data list. Callers branch on the transport status code, never on
//! the body's shape.
//!
//! ## Usage Examples
//!
//! ### Validating and normalizing a payload
//!
//! ```rust
//! use intake::{CreateFormRequest, validate_create};
//!
//! let request = CreateFormRequest {
//!     full_name: "ana gomez".to_string(),
//!     email: "ana@x.com".to_string(),
//!     phone: 3001234567,
//!     message: "hola".to_string(),
//! };
//!
//! let form = validate_create(&request).unwrap();
//! assert_eq!(form.full_name, "Ana Gomez");
//!
//! let mut bad = request.clone();
//! bad.phone = 123;
//! let err = validate_create(&bad).unwrap_err();
//! assert_eq!(err.violations()[0].field, "phone");
//! ```
//!
//! ### Shaping outcomes
//!
//! ```rust
//! use intake::{ApiResponse, ServiceError};
//!
//! let failure = ApiResponse::failure(ServiceError::NotFound.messages());
//! assert!(failure.data.is_empty());
//! assert_eq!(failure.message, vec!["Client form not found."]);
//! ```

#![deny(missing_docs)]
mod envelope;
mod errors;
mod form;
mod http;
mod service;
mod store;
mod validate;

/// Command-line interface utilities for program termination and output
/// formatting.
///
/// This module provides common CLI utilities for intake binaries, including
/// error handling, formatted output, and program termination functions.
pub mod cli_utils;

/// Command-line interface command handlers.
///
/// This module contains the command handlers for the intakectl CLI
/// application.
pub mod commands;

/// HTTP client utilities for interacting with intake services.
///
/// This module provides a standardized HTTP client for communicating with
/// the intake HTTP API, handling requests, responses, and error conditions.
pub mod http_utils;

/// PostgreSQL database operations.
///
/// This module contains the statement-level functions behind the
/// PostgreSQL-backed form store, organized by data type.
pub mod sql;

pub use envelope::ApiResponse;
pub use errors::{ServiceError, StoreError};
pub use form::{
    ClientForm, CreateFormRequest, FormChanges, FormId, FormIdParseError, ID_RETRY_BUDGET,
    NewForm, UpdateFormRequest,
};
pub use http::{HealthResponse, create_form_router, create_health_router, status_for};
pub use service::FormService;
pub use store::{FormStore, InMemoryFormStore, PgFormStore};
pub use validate::{FieldViolation, ValidationError, validate_create, validate_update};
