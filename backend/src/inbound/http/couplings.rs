//! Coupling HTTP handlers.
//!
//! ```text
//! POST   /api/v1/couplings
//! GET    /api/v1/couplings?childName=&dadName=&momName=
//! GET    /api/v1/couplings/{id}
//! DELETE /api/v1/couplings/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::CreateCouplingRequest;
use crate::domain::{ChildName, Coupling, CouplingId, CouplingSearchCriteria, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::mounts::MountResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require};

const DAD_ID: FieldName = FieldName::new("dadId");
const MOM_ID: FieldName = FieldName::new("momId");
const COUPLING_ID: FieldName = FieldName::new("couplingId");

/// Coupling with the parent snapshots taken when it was recorded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouplingResponse {
    /// Coupling identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Male parent snapshot.
    pub dad: MountResponse,
    /// Female parent snapshot.
    pub mom: MountResponse,
    /// Expected offspring name.
    pub child_name: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<&Coupling> for CouplingResponse {
    fn from(coupling: &Coupling) -> Self {
        Self {
            id: coupling.id().to_string(),
            user_id: coupling.user_id().to_string(),
            dad: MountResponse::from(coupling.dad()),
            mom: MountResponse::from(coupling.mom()),
            child_name: coupling.child_name().map(|name| name.as_str().to_owned()),
            created_at: coupling.created_at().to_rfc3339(),
        }
    }
}

/// Request payload for recording a coupling.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouplingRequest {
    /// Male parent id.
    pub dad_id: Option<String>,
    /// Female parent id.
    pub mom_id: Option<String>,
    /// Optional; blank names are treated as absent.
    pub child_name: Option<String>,
}

/// Optional name prefixes. Matching is case-insensitive and literal.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CouplingSearchQuery {
    /// Child name prefix.
    pub child_name: Option<String>,
    /// Dad name prefix.
    pub dad_name: Option<String>,
    /// Mom name prefix.
    pub mom_name: Option<String>,
}

impl From<CouplingSearchQuery> for CouplingSearchCriteria {
    fn from(query: CouplingSearchQuery) -> Self {
        CouplingSearchCriteria::from_raw(query.child_name, query.dad_name, query.mom_name)
    }
}

fn parse_coupling_request(payload: CouplingRequest) -> Result<CreateCouplingRequest, Error> {
    Ok(CreateCouplingRequest {
        dad_id: parse_id(&require(payload.dad_id, DAD_ID)?, DAD_ID)?,
        mom_id: parse_id(&require(payload.mom_id, MOM_ID)?, MOM_ID)?,
        child_name: payload.child_name.as_deref().and_then(ChildName::parse),
    })
}

/// Record a coupling between two of the signed-in user's mounts.
#[utoipa::path(
    post,
    path = "/api/v1/couplings",
    request_body = CouplingRequest,
    responses(
        (status = 201, description = "Coupling recorded", body = CouplingResponse),
        (status = 400, description = "Invalid gender or type mismatch", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "A parent belongs to another user", body = ErrorSchema),
        (status = 404, description = "A parent does not exist", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["couplings"],
    operation_id = "createCoupling"
)]
#[post("/couplings")]
pub async fn create_coupling(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CouplingRequest>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_requester()?;
    let request = parse_coupling_request(payload.into_inner())?;
    let coupling = state
        .coupling_commands
        .create_coupling(request, &requester)
        .await?;
    Ok(HttpResponse::Created().json(CouplingResponse::from(&coupling)))
}

/// Search the signed-in user's couplings by name prefixes.
#[utoipa::path(
    get,
    path = "/api/v1/couplings",
    params(CouplingSearchQuery),
    responses(
        (status = 200, description = "Matching couplings, oldest first", body = [CouplingResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["couplings"],
    operation_id = "searchCouplings"
)]
#[get("/couplings")]
pub async fn search_couplings(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CouplingSearchQuery>,
) -> ApiResult<web::Json<Vec<CouplingResponse>>> {
    let requester = session.require_requester()?;
    let couplings = state
        .couplings
        .search_couplings(query.into_inner().into(), &requester)
        .await?;
    Ok(web::Json(couplings.iter().map(CouplingResponse::from).collect()))
}

/// Fetch one of the signed-in user's couplings.
#[utoipa::path(
    get,
    path = "/api/v1/couplings/{id}",
    params(("id" = String, Path, description = "Coupling identifier")),
    responses(
        (status = 200, description = "Coupling", body = CouplingResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Coupling belongs to another user", body = ErrorSchema),
        (status = 404, description = "Coupling not found", body = ErrorSchema)
    ),
    tags = ["couplings"],
    operation_id = "getCoupling"
)]
#[get("/couplings/{id}")]
pub async fn get_coupling(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CouplingResponse>> {
    let requester = session.require_requester()?;
    let coupling_id: CouplingId = parse_id(&path.into_inner(), COUPLING_ID)?;
    let coupling = state.couplings.get_coupling(coupling_id, &requester).await?;
    Ok(web::Json(CouplingResponse::from(&coupling)))
}

/// Delete one of the signed-in user's couplings.
#[utoipa::path(
    delete,
    path = "/api/v1/couplings/{id}",
    params(("id" = String, Path, description = "Coupling identifier")),
    responses(
        (status = 204, description = "Coupling deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Coupling belongs to another user", body = ErrorSchema),
        (status = 404, description = "Coupling not found", body = ErrorSchema)
    ),
    tags = ["couplings"],
    operation_id = "deleteCoupling"
)]
#[delete("/couplings/{id}")]
pub async fn delete_coupling(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_requester()?;
    let coupling_id: CouplingId = parse_id(&path.into_inner(), COUPLING_ID)?;
    state
        .coupling_commands
        .delete_coupling(coupling_id, &requester)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "couplings_tests.rs"]
mod tests;
