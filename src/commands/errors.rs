//! # Command Error Handling
//!
//! This module provides error handling utilities for intakectl CLI commands
//! using the handled crate for consistent error property extraction.

use handled::Handle;

use crate::FormIdParseError;

/// User-friendly error information that can be extracted from various error
/// types.
#[derive(Debug, Clone)]
pub struct UserError {
    /// The main error message to display to the user.
    pub message: String,
    /// Optional usage hint to help the user correct the error.
    pub usage_hint: Option<String>,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Implements Handle<UserError> for itself to allow extraction.
impl Handle<UserError> for UserError {
    fn handle(&self) -> Option<UserError> {
        Some(self.clone())
    }
}

impl Handle<UserError> for FormIdParseError {
    fn handle(&self) -> Option<UserError> {
        Some(UserError {
            message: format!("Invalid form id '{}'", self.invalid_id()),
            usage_hint: Some(
                "Form ids are UUIDs like 123e4567-e89b-12d3-a456-426614174000".to_string(),
            ),
        })
    }
}

/// Enhanced error formatting for CLI output.
pub fn format_cli_error<E>(error: &E) -> String
where
    E: Handle<UserError> + std::fmt::Display,
{
    if let Some(user_error) = error.handle() {
        let mut output = format!("Error: {}", user_error.message);
        if let Some(hint) = user_error.usage_hint {
            output.push_str(&format!("\nHint: {}", hint));
        }
        output
    } else {
        format!("Error: {}", error)
    }
}
