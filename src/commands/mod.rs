//! Command-line interface command handlers.
//!
//! This module contains the command handlers for the intakectl CLI
//! application, with user-facing error shaping in a dedicated submodule.

/// Error handling utilities for intakectl commands.
pub mod errors;

/// Client form command handlers.
pub mod form;
