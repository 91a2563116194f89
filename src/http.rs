//! HTTP API layer.
//!
//! Thin axum handlers around [`FormService`]. This module owns the mapping
//! from the service failure taxonomy to transport status codes; every
//! response body, success or failure, is the uniform [`ApiResponse`]
//! envelope.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde::{Deserialize, Serialize};

use crate::{ApiResponse, CreateFormRequest, FormService, ServiceError, UpdateFormRequest};

/// Maps a service failure to its transport status code.
pub fn status_for(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::Validation(_) | ServiceError::InvalidIdFormat => StatusCode::BAD_REQUEST,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::IdGenerationExhausted | ServiceError::Storage(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: ServiceError) -> (StatusCode, Json<ApiResponse>) {
    (
        status_for(&error),
        Json(ApiResponse::failure(error.messages())),
    )
}

async fn create_form(
    State(service): State<FormService>,
    Json(request): Json<CreateFormRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    match service.create(&request).await {
        Ok(envelope) => (StatusCode::CREATED, Json(envelope)),
        Err(e) => error_response(e),
    }
}

async fn list_forms(State(service): State<FormService>) -> (StatusCode, Json<ApiResponse>) {
    match service.list().await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)),
        Err(e) => error_response(e),
    }
}

async fn get_form(
    State(service): State<FormService>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    match service.get(&id).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)),
        Err(e) => error_response(e),
    }
}

async fn update_form(
    State(service): State<FormService>,
    Path(id): Path<String>,
    Json(request): Json<UpdateFormRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    match service.update(&id, &request).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)),
        Err(e) => error_response(e),
    }
}

async fn delete_form(
    State(service): State<FormService>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    match service.delete(&id).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)),
        Err(e) => error_response(e),
    }
}

/// Creates an axum router with the client form endpoints.
///
/// # Routes
/// - `POST /form` - Create a new client form
/// - `GET /form` - List all client forms, newest first
/// - `GET /form/:id` - Get a specific client form
/// - `PUT /form/:id` - Apply a partial update
/// - `DELETE /form/:id` - Delete a client form
pub fn create_form_router(service: FormService) -> Router {
    Router::new()
        .route("/form", get(list_forms).post(create_form))
        .route(
            "/form/:id",
            get(get_form).put(update_form).delete(delete_form),
        )
        .with_state(service)
}

/////////////////////////////////////////////// Health /////////////////////////////////////////////////

/// Response body for the health endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving.
    pub status: String,
    /// Human-readable liveness message.
    pub message: String,
    /// The running server version.
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "intake service is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Creates an axum router with the health endpoint.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}
