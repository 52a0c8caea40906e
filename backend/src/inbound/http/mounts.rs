//! Mount HTTP handlers.
//!
//! ```text
//! POST   /api/v1/mounts
//! GET    /api/v1/mounts
//! GET    /api/v1/mounts/{id}
//! PUT    /api/v1/mounts/{id}
//! DELETE /api/v1/mounts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, LocalizedNames, Mount, MountColorId, MountGender, MountId, MountPatch, MountType,
    NewMount,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum, parse_id, require};

const NAME: FieldName = FieldName::new("name");
const GENDER: FieldName = FieldName::new("gender");
const TYPE: FieldName = FieldName::new("type");
const COLOR_ID: FieldName = FieldName::new("colorId");
const MAX_CHILDREN: FieldName = FieldName::new("maxNumberOfChild");
const MOUNT_ID: FieldName = FieldName::new("mountId");

/// Mount as returned to clients. Coupling snapshots use the same shape.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MountResponse {
    /// Mount identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Male or female.
    pub gender: MountGender,
    /// Species.
    #[serde(rename = "type")]
    pub mount_type: MountType,
    /// Catalogue colour the mount was created with.
    pub color_id: String,
    /// Colour names copied at creation.
    pub color: LocalizedNames,
    /// Offspring capacity.
    pub max_number_of_child: u32,
    /// Offspring so far.
    pub number_of_child: u32,
}

impl From<&Mount> for MountResponse {
    fn from(mount: &Mount) -> Self {
        Self {
            id: mount.id().to_string(),
            user_id: mount.user_id().to_string(),
            name: mount.name().to_owned(),
            gender: mount.gender(),
            mount_type: mount.mount_type(),
            color_id: mount.color_id().to_string(),
            color: mount.color().clone(),
            max_number_of_child: mount.max_number_of_child(),
            number_of_child: mount.number_of_child(),
        }
    }
}

/// Request payload for creating a mount.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMountRequest {
    /// Display name.
    pub name: Option<String>,
    /// `Male` or `Female`.
    #[schema(example = "Male")]
    pub gender: Option<String>,
    /// Species.
    #[serde(rename = "type")]
    #[schema(example = "Dragon")]
    pub mount_type: Option<String>,
    /// Catalogue colour id.
    pub color_id: Option<String>,
    /// Offspring capacity.
    pub max_number_of_child: Option<u32>,
}

/// Partial mount update. Omitted fields keep their stored values.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMountRequest {
    /// New display name.
    pub name: Option<String>,
    /// New gender.
    pub gender: Option<String>,
    /// New species.
    #[serde(rename = "type")]
    pub mount_type: Option<String>,
    /// New catalogue colour id.
    pub color_id: Option<String>,
    /// New offspring capacity.
    pub max_number_of_child: Option<u32>,
    /// New offspring count.
    pub number_of_child: Option<u32>,
}

fn parse_create_request(payload: CreateMountRequest) -> Result<NewMount, Error> {
    Ok(NewMount {
        name: require(payload.name, NAME)?,
        gender: parse_enum(&require(payload.gender, GENDER)?, GENDER)?,
        mount_type: parse_enum(&require(payload.mount_type, TYPE)?, TYPE)?,
        color_id: parse_id::<MountColorId>(&require(payload.color_id, COLOR_ID)?, COLOR_ID)?,
        max_number_of_child: require(payload.max_number_of_child, MAX_CHILDREN)?,
    })
}

fn parse_update_request(payload: UpdateMountRequest) -> Result<MountPatch, Error> {
    Ok(MountPatch {
        name: payload.name,
        gender: payload
            .gender
            .map(|raw| parse_enum(&raw, GENDER))
            .transpose()?,
        mount_type: payload
            .mount_type
            .map(|raw| parse_enum(&raw, TYPE))
            .transpose()?,
        color_id: payload
            .color_id
            .map(|raw| parse_id(&raw, COLOR_ID))
            .transpose()?,
        max_number_of_child: payload.max_number_of_child,
        number_of_child: payload.number_of_child,
    })
}

/// Create a mount for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/mounts",
    request_body = CreateMountRequest,
    responses(
        (status = 201, description = "Mount created", body = MountResponse),
        (status = 400, description = "Invalid request or disallowed type", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account settings or colour not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "createMount"
)]
#[post("/mounts")]
pub async fn create_mount(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateMountRequest>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_requester()?;
    let new_mount = parse_create_request(payload.into_inner())?;
    let mount = state
        .mount_commands
        .create_mount(&requester, new_mount)
        .await?;
    Ok(HttpResponse::Created().json(MountResponse::from(&mount)))
}

/// List the signed-in user's mounts, ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/mounts",
    responses(
        (status = 200, description = "Mounts", body = [MountResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "listMounts"
)]
#[get("/mounts")]
pub async fn list_mounts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<MountResponse>>> {
    let requester = session.require_requester()?;
    let mounts = state.mounts.list_mounts(&requester).await?;
    Ok(web::Json(mounts.iter().map(MountResponse::from).collect()))
}

/// Fetch one of the signed-in user's mounts.
#[utoipa::path(
    get,
    path = "/api/v1/mounts/{id}",
    params(("id" = String, Path, description = "Mount identifier")),
    responses(
        (status = 200, description = "Mount", body = MountResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Mount belongs to another user", body = ErrorSchema),
        (status = 404, description = "Mount not found", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "getMount"
)]
#[get("/mounts/{id}")]
pub async fn get_mount(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MountResponse>> {
    let requester = session.require_requester()?;
    let mount_id: MountId = parse_id(&path.into_inner(), MOUNT_ID)?;
    let mount = state.mounts.get_mount(mount_id, &requester).await?;
    Ok(web::Json(MountResponse::from(&mount)))
}

/// Partially update one of the signed-in user's mounts.
#[utoipa::path(
    put,
    path = "/api/v1/mounts/{id}",
    params(("id" = String, Path, description = "Mount identifier")),
    request_body = UpdateMountRequest,
    responses(
        (status = 200, description = "Updated mount", body = MountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Mount belongs to another user", body = ErrorSchema),
        (status = 404, description = "Mount or colour not found", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "updateMount"
)]
#[put("/mounts/{id}")]
pub async fn update_mount(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateMountRequest>,
) -> ApiResult<web::Json<MountResponse>> {
    let requester = session.require_requester()?;
    let mount_id: MountId = parse_id(&path.into_inner(), MOUNT_ID)?;
    let patch = parse_update_request(payload.into_inner())?;
    let mount = state
        .mount_commands
        .update_mount(mount_id, &requester, patch)
        .await?;
    Ok(web::Json(MountResponse::from(&mount)))
}

/// Delete one of the signed-in user's mounts.
#[utoipa::path(
    delete,
    path = "/api/v1/mounts/{id}",
    params(("id" = String, Path, description = "Mount identifier")),
    responses(
        (status = 204, description = "Mount deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Mount belongs to another user", body = ErrorSchema),
        (status = 404, description = "Mount not found", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "deleteMount"
)]
#[delete("/mounts/{id}")]
pub async fn delete_mount(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_requester()?;
    let mount_id: MountId = parse_id(&path.into_inner(), MOUNT_ID)?;
    state
        .mount_commands
        .delete_mount(mount_id, &requester)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "mounts_tests.rs"]
mod tests;
