//! Client form operations for PostgreSQL.
//!
//! This module owns every statement issued against the `client_forms` table.
//! All functions take a transaction; callers decide the commit/rollback
//! boundary so that each logical operation stays atomic.

use chrono::Utc;
use sqlx::{Postgres, QueryBuilder, Transaction};
use tracing::error;

use crate::{ClientForm, FormChanges, FormId, ID_RETRY_BUDGET, NewForm, StoreError};

/// Result type for database operations.
pub type SqlResult<T> = Result<T, StoreError>;

const RETURNING_COLUMNS: &str = "id, full_name, email, phone, message, created_at, updated_at";

/// Checks whether a form id is already present in the table.
///
/// # Arguments
/// * `tx` - PostgreSQL transaction
/// * `id` - The id to probe
///
/// # Returns
/// * `Ok(true)` - A row with this id exists
/// * `Ok(false)` - The id is unused
/// * `Err(StoreError::Internal)` - Database error
pub async fn id_in_use(tx: &mut Transaction<'_, Postgres>, id: &FormId) -> SqlResult<bool> {
    let result = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(SELECT 1 FROM client_forms WHERE id = $1)
        "#,
    )
    .bind(*id)
    .fetch_one(&mut **tx)
    .await;

    match result {
        Ok(in_use) => Ok(in_use),
        Err(e) => {
            error!(error = %e, "database error probing form id");
            Err(StoreError::Internal(e.to_string()))
        }
    }
}

/// Generates a form id that is not yet present in the table.
///
/// Generates a random UUID, probes the table for prior use, and accepts the
/// id if unused; otherwise retries. Fails with
/// [`StoreError::IdGenerationExhausted`] after [`ID_RETRY_BUDGET`] attempts.
pub async fn generate_unique_id(tx: &mut Transaction<'_, Postgres>) -> SqlResult<FormId> {
    for _ in 0..ID_RETRY_BUDGET {
        let id = FormId::random();
        if !id_in_use(tx, &id).await? {
            return Ok(id);
        }
    }
    Err(StoreError::IdGenerationExhausted)
}

/// Inserts a new client form and returns the persisted row.
///
/// Both `created_at` and `updated_at` are set to the same current timestamp.
/// The row is returned exactly as the database stored it (`RETURNING`), not
/// re-derived client-side.
///
/// # Arguments
/// * `tx` - PostgreSQL transaction
/// * `id` - The id to assign (see [`generate_unique_id`])
/// * `form` - The validated, normalized payload
///
/// # Returns
/// * `Ok(ClientForm)` - The persisted row
/// * `Err(StoreError::Internal)` - Database error
pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    id: &FormId,
    form: &NewForm,
) -> SqlResult<ClientForm> {
    let now = Utc::now();

    let result = sqlx::query_as::<_, ClientForm>(&format!(
        r#"
        INSERT INTO client_forms (id, full_name, email, phone, message, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING {RETURNING_COLUMNS}
        "#
    ))
    .bind(*id)
    .bind(&form.full_name)
    .bind(&form.email)
    .bind(form.phone)
    .bind(&form.message)
    .bind(now)
    .fetch_one(&mut **tx)
    .await;

    match result {
        Ok(row) => Ok(row),
        Err(e) => {
            error!(error = %e, "database error creating client form");
            Err(StoreError::Internal(e.to_string()))
        }
    }
}

/// Retrieves a client form by id.
///
/// # Returns
/// * `Ok(Some(ClientForm))` - Form found
/// * `Ok(None)` - No form with this id
/// * `Err(StoreError::Internal)` - Database error
pub async fn get(
    tx: &mut Transaction<'_, Postgres>,
    id: &FormId,
) -> SqlResult<Option<ClientForm>> {
    let result = sqlx::query_as::<_, ClientForm>(&format!(
        r#"
        SELECT {RETURNING_COLUMNS}
        FROM client_forms
        WHERE id = $1
        "#
    ))
    .bind(*id)
    .fetch_optional(&mut **tx)
    .await;

    match result {
        Ok(row) => Ok(row),
        Err(e) => {
            error!(error = %e, "database error getting client form");
            Err(StoreError::Internal(e.to_string()))
        }
    }
}

/// Lists all client forms, newest first.
///
/// # Returns
/// * `Ok(Vec<ClientForm>)` - All forms ordered by `created_at` descending
/// * `Err(StoreError::Internal)` - Database error
pub async fn list(tx: &mut Transaction<'_, Postgres>) -> SqlResult<Vec<ClientForm>> {
    let result = sqlx::query_as::<_, ClientForm>(&format!(
        r#"
        SELECT {RETURNING_COLUMNS}
        FROM client_forms
        ORDER BY created_at DESC
        "#
    ))
    .fetch_all(&mut **tx)
    .await;

    match result {
        Ok(rows) => Ok(rows),
        Err(e) => {
            error!(error = %e, "database error listing client forms");
            Err(StoreError::Internal(e.to_string()))
        }
    }
}

/// Applies a partial update and returns the post-update row.
///
/// The statement is built from exactly the supplied field subset plus
/// `updated_at`, which is always touched. Values are always bound as
/// parameters, never concatenated. An empty change-set degenerates to a pure
/// read: no write is issued and `updated_at` keeps its value.
///
/// # Returns
/// * `Ok(Some(ClientForm))` - The row after the update
/// * `Ok(None)` - No form with this id
/// * `Err(StoreError::Internal)` - Database error
pub async fn update(
    tx: &mut Transaction<'_, Postgres>,
    id: &FormId,
    changes: &FormChanges,
) -> SqlResult<Option<ClientForm>> {
    if changes.is_empty() {
        return get(tx, id).await;
    }

    let mut builder = QueryBuilder::<Postgres>::new("UPDATE client_forms SET ");
    let mut fields = builder.separated(", ");
    if let Some(full_name) = &changes.full_name {
        fields.push("full_name = ");
        fields.push_bind_unseparated(full_name);
    }
    if let Some(email) = &changes.email {
        fields.push("email = ");
        fields.push_bind_unseparated(email);
    }
    if let Some(phone) = changes.phone {
        fields.push("phone = ");
        fields.push_bind_unseparated(phone);
    }
    if let Some(message) = &changes.message {
        fields.push("message = ");
        fields.push_bind_unseparated(message);
    }
    fields.push("updated_at = ");
    fields.push_bind_unseparated(Utc::now());

    builder.push(" WHERE id = ");
    builder.push_bind(*id);
    builder.push(format!(" RETURNING {RETURNING_COLUMNS}"));

    let result = builder
        .build_query_as::<ClientForm>()
        .fetch_optional(&mut **tx)
        .await;

    match result {
        Ok(row) => Ok(row),
        Err(e) => {
            error!(error = %e, "database error updating client form");
            Err(StoreError::Internal(e.to_string()))
        }
    }
}

/// Deletes a client form.
///
/// # Returns
/// * `Ok(true)` - A row existed and was removed
/// * `Ok(false)` - No form with this id
/// * `Err(StoreError::Internal)` - Database error
pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: &FormId) -> SqlResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM client_forms
        WHERE id = $1
        "#,
    )
    .bind(*id)
    .execute(&mut **tx)
    .await;

    match result {
        Ok(result) => Ok(result.rows_affected() > 0),
        Err(e) => {
            error!(error = %e, "database error deleting client form");
            Err(StoreError::Internal(e.to_string()))
        }
    }
}
