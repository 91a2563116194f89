//! # Form Service
//!
//! The service is the only layer callers interact with. It sequences id
//! validation, existence checks, payload validation, and store calls, and
//! shapes every outcome into the uniform [`ApiResponse`] envelope or a
//! [`ServiceError`] from the failure taxonomy.
//!
//! Existence is deliberately checked twice on update and delete: once before
//! the write, and again through the operation's own result. A record that
//! vanishes between the check and the write (a concurrent delete) is reported
//! as not-found rather than trusted from the stale pre-check. No
//! application-level locking is added; the store's own constraints are the
//! true consistency guarantee.

use std::str::FromStr;
use std::sync::Arc;

use tracing::error;

use crate::{
    ApiResponse, CreateFormRequest, FormId, FormStore, ServiceError, UpdateFormRequest,
    validate_create, validate_update,
};

/// Orchestrates client form operations over an injected [`FormStore`].
#[derive(Clone)]
pub struct FormService {
    store: Arc<dyn FormStore>,
}

impl FormService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn FormStore>) -> Self {
        Self { store }
    }

    /// Parses a caller-supplied id, rejecting anything that is not a UUID.
    fn parse_id(id: &str) -> Result<FormId, ServiceError> {
        FormId::from_str(id).map_err(|_| ServiceError::InvalidIdFormat)
    }

    /// Creates a new client form from a validated payload.
    pub async fn create(&self, request: &CreateFormRequest) -> Result<ApiResponse, ServiceError> {
        let form = validate_create(request)?;
        let created = self.store.create(&form).await.map_err(|e| {
            error!(error = %e, "failed to create client form");
            ServiceError::from(e)
        })?;
        Ok(ApiResponse::record(
            "Client form created successfully.",
            created,
        ))
    }

    /// Retrieves a single client form by id.
    pub async fn get(&self, id: &str) -> Result<ApiResponse, ServiceError> {
        let id = Self::parse_id(id)?;
        let form = self.store.find_by_id(&id).await.map_err(|e| {
            error!(error = %e, %id, "failed to look up client form");
            ServiceError::from(e)
        })?;
        match form {
            Some(form) => Ok(ApiResponse::record(
                "Client form retrieved successfully.",
                form,
            )),
            None => Err(ServiceError::NotFound),
        }
    }

    /// Lists all client forms, newest first. An empty store is a successful
    /// outcome carrying an informational message, never an error.
    pub async fn list(&self) -> Result<ApiResponse, ServiceError> {
        let forms = self.store.find_all().await.map_err(|e| {
            error!(error = %e, "failed to list client forms");
            ServiceError::from(e)
        })?;
        if forms.is_empty() {
            return Ok(ApiResponse::empty("No client forms found."));
        }
        Ok(ApiResponse::records(
            "Client forms retrieved successfully.",
            forms,
        ))
    }

    /// Applies a partial update to an existing client form.
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateFormRequest,
    ) -> Result<ApiResponse, ServiceError> {
        let id = Self::parse_id(id)?;

        let existing = self.store.find_by_id(&id).await.map_err(|e| {
            error!(error = %e, %id, "failed to look up client form before update");
            ServiceError::from(e)
        })?;
        if existing.is_none() {
            return Err(ServiceError::NotFound);
        }

        let changes = validate_update(request)?;
        let updated = self.store.update(&id, &changes).await.map_err(|e| {
            error!(error = %e, %id, "failed to update client form");
            ServiceError::from(e)
        })?;
        match updated {
            Some(form) => Ok(ApiResponse::record(
                "Client form updated successfully.",
                form,
            )),
            // The row vanished between the existence check and the write.
            None => Err(ServiceError::NotFound),
        }
    }

    /// Permanently deletes a client form.
    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ServiceError> {
        let id = Self::parse_id(id)?;

        let existing = self.store.find_by_id(&id).await.map_err(|e| {
            error!(error = %e, %id, "failed to look up client form before delete");
            ServiceError::from(e)
        })?;
        if existing.is_none() {
            return Err(ServiceError::NotFound);
        }

        let deleted = self.store.delete(&id).await.map_err(|e| {
            error!(error = %e, %id, "failed to delete client form");
            ServiceError::from(e)
        })?;
        if !deleted {
            // The row vanished between the existence check and the delete.
            return Err(ServiceError::NotFound);
        }
        Ok(ApiResponse::empty("Client form deleted successfully."))
    }
}
