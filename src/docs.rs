use utoipa::OpenApi;

use crate::handlers;
use crate::models::{
    CreateLeadResponse, Lead, LeadActionResponse, LeadInput, LeadPage, LeadStatus,
    UpdateStatusRequest,
};

/// OpenAPI description of the lead endpoints, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "Lead Capture API", description = "Lead submission and management"),
    paths(
        handlers::create_lead,
        handlers::show_leads,
        handlers::update_lead,
        handlers::delete_lead
    ),
    components(schemas(
        Lead,
        LeadStatus,
        LeadInput,
        UpdateStatusRequest,
        CreateLeadResponse,
        LeadPage,
        LeadActionResponse
    )),
    tags((name = "leads", description = "Lead capture and follow-up"))
)]
pub struct ApiDoc;
