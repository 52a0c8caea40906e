//! Colour catalogue HTTP handlers.
//!
//! ```text
//! GET    /api/v1/mount-colors?mountType=Dragon
//! POST   /api/v1/mount-colors
//! GET    /api/v1/mount-colors/{id}
//! PUT    /api/v1/mount-colors/{id}
//! DELETE /api/v1/mount-colors/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, LocalizedNames, MountColor, MountColorDraft, MountColorId, MountType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum, parse_id, require};

const MOUNT_TYPE: FieldName = FieldName::new("mountType");
const NAMES: FieldName = FieldName::new("names");
const COLOR_ID: FieldName = FieldName::new("colorId");

/// Catalogue colour as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MountColorResponse {
    /// Colour identifier used as a mount's `colorId`.
    pub id: String,
    /// Mount type the colour belongs to.
    pub mount_type: MountType,
    /// Localized display names.
    pub names: LocalizedNames,
}

impl From<MountColor> for MountColorResponse {
    fn from(color: MountColor) -> Self {
        Self {
            id: color.id.to_string(),
            mount_type: color.mount_type,
            names: color.names,
        }
    }
}

/// Colour fields for creation and full replacement.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MountColorRequest {
    /// `Dragon` or `Wolf`.
    #[schema(example = "Wolf")]
    pub mount_type: Option<String>,
    /// Names in every supported locale; both must be non-blank.
    pub names: Option<LocalizedNames>,
}

/// Query string for [`list_mount_colors`].
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MountColorQueryParams {
    /// `Dragon` or `Wolf`.
    pub mount_type: Option<String>,
}

fn parse_color_request(payload: MountColorRequest) -> Result<MountColorDraft, Error> {
    Ok(MountColorDraft {
        mount_type: parse_enum(&require(payload.mount_type, MOUNT_TYPE)?, MOUNT_TYPE)?,
        names: require(payload.names, NAMES)?,
    })
}

/// List the colours available for a mount type.
#[utoipa::path(
    get,
    path = "/api/v1/mount-colors",
    params(MountColorQueryParams),
    responses(
        (status = 200, description = "Colours ordered by English name", body = [MountColorResponse]),
        (status = 400, description = "Missing or unknown mount type", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "listMountColors"
)]
#[get("/mount-colors")]
pub async fn list_mount_colors(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MountColorQueryParams>,
) -> ApiResult<web::Json<Vec<MountColorResponse>>> {
    session.require_requester()?;
    let raw = require(query.into_inner().mount_type, MOUNT_TYPE)?;
    let mount_type: MountType = parse_enum(&raw, MOUNT_TYPE)?;
    let colors = state.mount_colors.list_mount_colors(mount_type).await?;
    Ok(web::Json(colors.into_iter().map(MountColorResponse::from).collect()))
}

/// Add a colour to the catalogue.
#[utoipa::path(
    post,
    path = "/api/v1/mount-colors",
    request_body = MountColorRequest,
    responses(
        (status = 201, description = "Colour added", body = MountColorResponse),
        (status = 400, description = "Missing type or blank name", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "createMountColor"
)]
#[post("/mount-colors")]
pub async fn create_mount_color(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MountColorRequest>,
) -> ApiResult<HttpResponse> {
    session.require_requester()?;
    let draft = parse_color_request(payload.into_inner())?;
    let color = state.mount_color_commands.create_mount_color(draft).await?;
    Ok(HttpResponse::Created().json(MountColorResponse::from(color)))
}

/// Fetch one catalogue colour.
#[utoipa::path(
    get,
    path = "/api/v1/mount-colors/{id}",
    params(("id" = String, Path, description = "Colour identifier")),
    responses(
        (status = 200, description = "Colour", body = MountColorResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Colour not found", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "getMountColor"
)]
#[get("/mount-colors/{id}")]
pub async fn get_mount_color(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MountColorResponse>> {
    session.require_requester()?;
    let color_id: MountColorId = parse_id(&path.into_inner(), COLOR_ID)?;
    let color = state.mount_colors.get_mount_color(color_id).await?;
    Ok(web::Json(MountColorResponse::from(color)))
}

/// Replace the type and names of a catalogue colour.
///
/// Mounts already using the colour keep the names they copied.
#[utoipa::path(
    put,
    path = "/api/v1/mount-colors/{id}",
    params(("id" = String, Path, description = "Colour identifier")),
    request_body = MountColorRequest,
    responses(
        (status = 200, description = "Updated colour", body = MountColorResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Colour not found", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "updateMountColor"
)]
#[put("/mount-colors/{id}")]
pub async fn update_mount_color(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<MountColorRequest>,
) -> ApiResult<web::Json<MountColorResponse>> {
    session.require_requester()?;
    let color_id: MountColorId = parse_id(&path.into_inner(), COLOR_ID)?;
    let draft = parse_color_request(payload.into_inner())?;
    let color = state
        .mount_color_commands
        .update_mount_color(color_id, draft)
        .await?;
    Ok(web::Json(MountColorResponse::from(color)))
}

/// Remove a colour from the catalogue.
#[utoipa::path(
    delete,
    path = "/api/v1/mount-colors/{id}",
    params(("id" = String, Path, description = "Colour identifier")),
    responses(
        (status = 204, description = "Colour removed"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Colour not found", body = ErrorSchema)
    ),
    tags = ["mounts"],
    operation_id = "deleteMountColor"
)]
#[delete("/mount-colors/{id}")]
pub async fn delete_mount_color(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_requester()?;
    let color_id: MountColorId = parse_id(&path.into_inner(), COLOR_ID)?;
    state
        .mount_color_commands
        .delete_mount_color(color_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
