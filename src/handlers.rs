use crate::config::Config;
use crate::errors::LeadError;
use crate::models::*;
use crate::pagination::PageRequest;
use crate::services::LeadService;
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead operations over the configured store.
    pub leads: LeadService,
    /// Application configuration.
    pub config: Config,
}

/// Health check endpoint.
///
/// Returns the service status and version.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-capture-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /lead/createLead
///
/// Stores a new lead submitted from the public form.
///
/// # Returns
///
/// * `201` with `{success: 1, message}` on success.
/// * `400` with `{success: 0, message, field}` when email or phone is already taken
///   (or a field is invalid, with validation enforced).
#[utoipa::path(
    post,
    path = "/lead/createLead",
    request_body = LeadInput,
    responses(
        (status = 201, description = "Lead stored", body = CreateLeadResponse),
        (status = 400, description = "Invalid field, duplicate email/phone, or store failure")
    ),
    tag = "leads"
)]
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LeadInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLeadResponse>), LeadError> {
    let Json(input) = payload.map_err(|e| LeadError::validation(e.body_text()))?;
    tracing::info!("POST /lead/createLead");

    state.leads.create(&input).await.map_err(|e| match e {
        // Create has always answered store failures with 400 and the raw message.
        LeadError::Internal(message) => LeadError::validation(message),
        other => other,
    })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLeadResponse {
            success: 1,
            message: "Form Submitted".to_string(),
        }),
    ))
}

/// GET /lead/showLeads?page=&limit=
///
/// Lists leads newest first, one page at a time.
#[utoipa::path(
    get,
    path = "/lead/showLeads",
    params(ListLeadsQuery),
    responses(
        (status = 200, description = "One page of leads", body = LeadPage),
        (status = 500, description = "Store failure")
    ),
    tag = "leads"
)]
pub async fn show_leads(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListLeadsQuery>, QueryRejection>,
) -> Result<Json<LeadPage>, LeadError> {
    let request = match query {
        Ok(Query(params)) => PageRequest::from_query(&params),
        Err(e) => {
            tracing::debug!("Unparseable list query, using defaults: {}", e);
            PageRequest::default()
        }
    };
    tracing::info!(
        "GET /lead/showLeads - page: {}, limit: {}",
        request.page,
        request.limit
    );

    let page = state.leads.list(request).await.map_err(|e| match e {
        LeadError::Internal(detail) => {
            tracing::error!("Error fetching leads: {}", detail);
            LeadError::Internal("Error fetching leads".to_string())
        }
        other => other,
    })?;

    Ok(Json(page))
}

/// PUT /lead/:id/updateLead
///
/// Sets a lead's status to `New` or `Contacted`.
#[utoipa::path(
    put,
    path = "/lead/{id}/updateLead",
    params(("id" = String, Path, description = "Lead id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = LeadActionResponse),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Lead not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "leads"
)]
pub async fn update_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<LeadActionResponse>, LeadError> {
    let Json(body) = payload.map_err(|e| LeadError::validation(e.body_text()))?;
    let status = body
        .status
        .as_ref()
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    tracing::info!("PUT /lead/{}/updateLead - status: {:?}", id, status);

    let lead = state.leads.update_status(&id, status).await?;

    Ok(Json(LeadActionResponse {
        success: 1,
        message: "Status Updated".to_string(),
        lead,
    }))
}

/// DELETE /lead/:id/deleteLead
///
/// Removes a lead and echoes it back.
#[utoipa::path(
    delete,
    path = "/lead/{id}/deleteLead",
    params(("id" = String, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead deleted", body = LeadActionResponse),
        (status = 404, description = "Lead not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "leads"
)]
pub async fn delete_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LeadActionResponse>, LeadError> {
    tracing::info!("DELETE /lead/{}/deleteLead", id);

    let lead = state.leads.delete(&id).await.map_err(|e| match e {
        LeadError::Internal(detail) => {
            tracing::error!("Error deleting lead {}: {}", id, detail);
            LeadError::Internal("Server error while deleting lead".to_string())
        }
        other => other,
    })?;

    Ok(Json(LeadActionResponse {
        success: 1,
        message: "Lead deleted successfully".to_string(),
        lead,
    }))
}
