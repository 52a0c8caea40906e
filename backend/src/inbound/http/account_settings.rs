//! Account settings HTTP handlers.
//!
//! ```text
//! POST /api/v1/account-settings
//! GET  /api/v1/account-settings/me
//! PUT  /api/v1/account-settings/{id}
//! ```

use std::collections::BTreeSet;

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountSettings, AccountSettingsId, AccountSettingsPatch, Error, MountType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum, parse_id, require};

const MOUNT_TYPES: FieldName = FieldName::new("mountTypes");
const SETTINGS_ID: FieldName = FieldName::new("settingsId");

/// Account settings as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettingsResponse {
    /// Settings identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Mount types the account may create, in a stable order.
    pub mount_types: Vec<MountType>,
    /// Game server name, when one is set.
    pub server_name: Option<String>,
    /// In-game character name.
    pub ig_username: Option<String>,
    /// Whether coupling forms prefill the child name.
    pub auto_fill_child_name: bool,
}

impl From<AccountSettings> for AccountSettingsResponse {
    fn from(settings: AccountSettings) -> Self {
        Self {
            id: settings.id.to_string(),
            user_id: settings.user_id.to_string(),
            mount_types: settings.mount_types.into_iter().collect(),
            server_name: settings.server_name,
            ig_username: settings.ig_username,
            auto_fill_child_name: settings.auto_fill_child_name,
        }
    }
}

/// Request payload for creating the signed-in user's settings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountSettingsRequest {
    /// Initial mount types; defaults to all.
    #[schema(example = json!(["Dragon"]))]
    pub mount_types: Option<Vec<String>>,
}

/// Partial settings update. Blank strings leave stored values untouched.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountSettingsRequest {
    /// Server name; must exist in the directory.
    pub server_name: Option<String>,
    /// In-game character name.
    pub ig_username: Option<String>,
    /// Replacement mount type list.
    pub mount_types: Option<Vec<String>>,
    /// Prefill toggle.
    pub auto_fill_child_name: Option<bool>,
}

fn parse_mount_types(raw: Vec<String>) -> Result<BTreeSet<MountType>, Error> {
    raw.iter()
        .map(|value| parse_enum(value, MOUNT_TYPES))
        .collect()
}

fn parse_update_request(payload: UpdateAccountSettingsRequest) -> Result<AccountSettingsPatch, Error> {
    let mount_types = payload.mount_types.map(parse_mount_types).transpose()?;
    Ok(AccountSettingsPatch::new(
        payload.server_name,
        payload.ig_username,
        mount_types,
        payload.auto_fill_child_name,
    ))
}

/// Create default settings for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/account-settings",
    request_body = CreateAccountSettingsRequest,
    responses(
        (status = 201, description = "Settings created", body = AccountSettingsResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Settings already exist", body = ErrorSchema)
    ),
    tags = ["account-settings"],
    operation_id = "createAccountSettings"
)]
#[post("/account-settings")]
pub async fn create_account_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateAccountSettingsRequest>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_requester()?;
    let mount_types = parse_mount_types(require(payload.into_inner().mount_types, MOUNT_TYPES)?)?;
    let settings = state
        .account_settings_commands
        .create_account_settings(&requester, mount_types)
        .await?;
    Ok(HttpResponse::Created().json(AccountSettingsResponse::from(settings)))
}

/// Fetch the signed-in user's settings.
#[utoipa::path(
    get,
    path = "/api/v1/account-settings/me",
    responses(
        (status = 200, description = "Settings", body = AccountSettingsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No settings yet", body = ErrorSchema)
    ),
    tags = ["account-settings"],
    operation_id = "getAccountSettings"
)]
#[get("/account-settings/me")]
pub async fn get_account_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountSettingsResponse>> {
    let requester = session.require_requester()?;
    let settings = state
        .account_settings
        .fetch_account_settings(&requester)
        .await?;
    Ok(web::Json(AccountSettingsResponse::from(settings)))
}

/// Partially update settings owned by the signed-in user.
#[utoipa::path(
    put,
    path = "/api/v1/account-settings/{id}",
    params(("id" = String, Path, description = "Settings identifier")),
    request_body = UpdateAccountSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = AccountSettingsResponse),
        (status = 400, description = "Unknown server name", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Settings belong to another user", body = ErrorSchema),
        (status = 404, description = "Settings not found", body = ErrorSchema)
    ),
    tags = ["account-settings"],
    operation_id = "updateAccountSettings"
)]
#[put("/account-settings/{id}")]
pub async fn update_account_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateAccountSettingsRequest>,
) -> ApiResult<web::Json<AccountSettingsResponse>> {
    let requester = session.require_requester()?;
    let settings_id: AccountSettingsId = parse_id(&path.into_inner(), SETTINGS_ID)?;
    let patch = parse_update_request(payload.into_inner())?;
    let settings = state
        .account_settings_commands
        .update_account_settings(settings_id, &requester, patch)
        .await?;
    Ok(web::Json(AccountSettingsResponse::from(settings)))
}
