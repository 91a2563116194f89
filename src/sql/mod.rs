//! PostgreSQL database operations for intake.
//!
//! This module provides functions for interacting with the PostgreSQL
//! database, organized by data type. Every function takes a transaction so
//! that a logical service operation can group its statements into one atomic
//! unit.

/// Client form operations with automatic timestamp tracking.
pub mod client_form;
