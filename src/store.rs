//! # Form Storage Abstraction
//!
//! This module provides the storage interface for client form records. It
//! defines the [`FormStore`] trait plus two implementations:
//!
//! - **PgFormStore**: transactional CRUD against PostgreSQL; every logical
//!   operation runs in its own transaction (begin, statements, commit on
//!   success; an un-committed transaction rolls back when dropped, and the
//!   pooled connection is released unconditionally).
//! - **InMemoryFormStore**: thread-safe in-memory storage using
//!   `Mutex<HashMap>` with the same observable semantics, used by the daemon
//!   when no database is configured and by tests.
//!
//! Absence is an expected outcome, not an error: lookups return `Option`,
//! deletion returns whether a row was removed. Store faults surface as
//! [`StoreError`].

use std::collections::HashMap;
use std::sync::Mutex;

use axum::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::{ClientForm, FormChanges, FormId, ID_RETRY_BUDGET, NewForm, StoreError, sql};

/// Trait defining the storage interface for client form records.
///
/// Implementors must be thread-safe; a single store instance is shared across
/// concurrent requests. Each method is one atomic logical operation.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Persists a new record: assigns a collision-checked id and one current
    /// timestamp for both `created_at` and `updated_at`, and returns the row
    /// exactly as the store persisted it.
    async fn create(&self, form: &NewForm) -> Result<ClientForm, StoreError>;

    /// Point lookup. Absence is `None`, not an error.
    async fn find_by_id(&self, id: &FormId) -> Result<Option<ClientForm>, StoreError>;

    /// Full scan ordered by `created_at` descending (newest first).
    async fn find_all(&self) -> Result<Vec<ClientForm>, StoreError>;

    /// Applies a partial update touching exactly the supplied fields plus
    /// `updated_at`. An empty change-set degenerates to a pure read with no
    /// timestamp bump. Returns the post-update row, or `None` if the id does
    /// not exist.
    async fn update(
        &self,
        id: &FormId,
        changes: &FormChanges,
    ) -> Result<Option<ClientForm>, StoreError>;

    /// Hard delete. Returns whether a row was actually removed.
    async fn delete(&self, id: &FormId) -> Result<bool, StoreError>;
}

//////////////////////////////////////////// PgFormStore ///////////////////////////////////////////////

/// PostgreSQL-backed implementation of [`FormStore`].
///
/// Holds a connection pool; each operation acquires a connection by opening a
/// transaction and releases it when the transaction commits or is dropped.
pub struct PgFormStore {
    pool: PgPool,
}

impl PgFormStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormStore for PgFormStore {
    async fn create(&self, form: &NewForm) -> Result<ClientForm, StoreError> {
        let mut tx = self.pool.begin().await?;
        let id = sql::client_form::generate_unique_id(&mut tx).await?;
        let created = sql::client_form::insert(&mut tx, &id, form).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &FormId) -> Result<Option<ClientForm>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let form = sql::client_form::get(&mut tx, id).await?;
        tx.commit().await?;
        Ok(form)
    }

    async fn find_all(&self) -> Result<Vec<ClientForm>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let forms = sql::client_form::list(&mut tx).await?;
        tx.commit().await?;
        Ok(forms)
    }

    async fn update(
        &self,
        id: &FormId,
        changes: &FormChanges,
    ) -> Result<Option<ClientForm>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let form = sql::client_form::update(&mut tx, id, changes).await?;
        tx.commit().await?;
        Ok(form)
    }

    async fn delete(&self, id: &FormId) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let deleted = sql::client_form::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(deleted)
    }
}

////////////////////////////////////////// InMemoryFormStore ///////////////////////////////////////////

/// Thread-safe in-memory implementation of [`FormStore`].
///
/// Mirrors the PostgreSQL store's observable semantics: server-assigned ids
/// and timestamps, newest-first listing, empty-update no-op. No persistence
/// across restarts.
pub struct InMemoryFormStore {
    forms: Mutex<HashMap<FormId, ClientForm>>,
}

impl InMemoryFormStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            forms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryFormStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormStore for InMemoryFormStore {
    async fn create(&self, form: &NewForm) -> Result<ClientForm, StoreError> {
        let mut forms = self.forms.lock().unwrap();

        let mut id = None;
        for _ in 0..ID_RETRY_BUDGET {
            let candidate = FormId::random();
            if !forms.contains_key(&candidate) {
                id = Some(candidate);
                break;
            }
        }
        let id = id.ok_or(StoreError::IdGenerationExhausted)?;

        let now = Utc::now();
        let record = ClientForm {
            id,
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone: form.phone,
            message: form.message.clone(),
            created_at: now,
            updated_at: now,
        };
        forms.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &FormId) -> Result<Option<ClientForm>, StoreError> {
        let forms = self.forms.lock().unwrap();
        Ok(forms.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<ClientForm>, StoreError> {
        let forms = self.forms.lock().unwrap();
        let mut all: Vec<ClientForm> = forms.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update(
        &self,
        id: &FormId,
        changes: &FormChanges,
    ) -> Result<Option<ClientForm>, StoreError> {
        let mut forms = self.forms.lock().unwrap();

        let Some(record) = forms.get_mut(id) else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(record.clone()));
        }

        if let Some(full_name) = &changes.full_name {
            record.full_name = full_name.clone();
        }
        if let Some(email) = &changes.email {
            record.email = email.clone();
        }
        if let Some(phone) = changes.phone {
            record.phone = phone;
        }
        if let Some(message) = &changes.message {
            record.message = message.clone();
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &FormId) -> Result<bool, StoreError> {
        let mut forms = self.forms.lock().unwrap();
        Ok(forms.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_form(name: &str) -> NewForm {
        NewForm {
            full_name: name.to_string(),
            email: "ana@x.com".to_string(),
            phone: 3001234567,
            message: "hola".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_equal_timestamps() {
        let store = InMemoryFormStore::new();
        let created = store.create(&new_form("Ana Gomez")).await.unwrap();
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.full_name, "Ana Gomez");
    }

    #[tokio::test]
    async fn created_ids_are_distinct() {
        let store = InMemoryFormStore::new();
        let a = store.create(&new_form("Ana Gomez")).await.unwrap();
        let b = store.create(&new_form("Luis Perez")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let store = InMemoryFormStore::new();
        let created = store.create(&new_form("Ana Gomez")).await.unwrap();
        let found = store.find_by_id(&created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn find_missing_is_none() {
        let store = InMemoryFormStore::new();
        let found = store.find_by_id(&FormId::random()).await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn find_all_orders_newest_first() {
        let store = InMemoryFormStore::new();
        let first = store.create(&new_form("Ana Gomez")).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
        let second = store.create(&new_form("Luis Perez")).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn find_all_empty_store() {
        let store = InMemoryFormStore::new();
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields_and_updated_at() {
        let store = InMemoryFormStore::new();
        let created = store.create(&new_form("Ana Gomez")).await.unwrap();

        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;

        let changes = FormChanges {
            message: Some("nuevo mensaje".to_string()),
            ..FormChanges::default()
        };
        let updated = store.update(&created.id, &changes).await.unwrap().unwrap();

        assert_eq!(updated.message, "nuevo mensaje");
        assert_eq!(updated.full_name, created.full_name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.phone, created.phone);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn empty_update_is_a_pure_read() {
        let store = InMemoryFormStore::new();
        let created = store.create(&new_form("Ana Gomez")).await.unwrap();

        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;

        let unchanged = store
            .update(&created.id, &FormChanges::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged, created);
        assert_eq!(unchanged.updated_at, created.updated_at);
    }

    #[tokio::test]
    async fn update_missing_is_none() {
        let store = InMemoryFormStore::new();
        let changes = FormChanges {
            message: Some("nuevo".to_string()),
            ..FormChanges::default()
        };
        let result = store.update(&FormId::random(), &changes).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn delete_then_find_is_none() {
        let store = InMemoryFormStore::new();
        let created = store.create(&new_form("Ana Gomez")).await.unwrap();

        assert!(store.delete(&created.id).await.unwrap());
        assert_eq!(store.find_by_id(&created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_missing_reports_false() {
        let store = InMemoryFormStore::new();
        assert!(!store.delete(&FormId::random()).await.unwrap());
    }
}
