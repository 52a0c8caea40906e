//! OpenAPI document for the REST API.
//!
//! Registers every handler under `inbound::http` plus the error schemas.
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::account_settings::{
    AccountSettingsResponse, CreateAccountSettingsRequest, UpdateAccountSettingsRequest,
};
use crate::inbound::http::couplings::{CouplingRequest, CouplingResponse};
use crate::inbound::http::mount_colors::{MountColorRequest, MountColorResponse};
use crate::inbound::http::mounts::{CreateMountRequest, MountResponse, UpdateMountRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie holding the requester's user id.",
            ))),
        );
    }
}

/// OpenAPI root listing every documented path and schema.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Mount Manager API",
        description = "Mounts, breeding couplings and account settings for signed-in players."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::mounts::create_mount,
        crate::inbound::http::mounts::list_mounts,
        crate::inbound::http::mounts::get_mount,
        crate::inbound::http::mounts::update_mount,
        crate::inbound::http::mounts::delete_mount,
        crate::inbound::http::mount_colors::list_mount_colors,
        crate::inbound::http::mount_colors::create_mount_color,
        crate::inbound::http::mount_colors::get_mount_color,
        crate::inbound::http::mount_colors::update_mount_color,
        crate::inbound::http::mount_colors::delete_mount_color,
        crate::inbound::http::couplings::create_coupling,
        crate::inbound::http::couplings::search_couplings,
        crate::inbound::http::couplings::get_coupling,
        crate::inbound::http::couplings::delete_coupling,
        crate::inbound::http::account_settings::create_account_settings,
        crate::inbound::http::account_settings::get_account_settings,
        crate::inbound::http::account_settings::update_account_settings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MountResponse,
        CreateMountRequest,
        UpdateMountRequest,
        MountColorResponse,
        MountColorRequest,
        CouplingResponse,
        CouplingRequest,
        AccountSettingsResponse,
        CreateAccountSettingsRequest,
        UpdateAccountSettingsRequest,
    )),
    tags(
        (name = "mounts", description = "Mounts and the colour catalogue"),
        (name = "couplings", description = "Breeding records and search"),
        (name = "account-settings", description = "Per-user preferences"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => false,
        }
    }

    #[rstest]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("crate.domain.Error").expect("Error schema");
        assert!(has_field(error, "code"));
        assert!(has_field(error, "traceId"));
    }

    #[rstest]
    #[case("/api/v1/couplings")]
    #[case("/api/v1/couplings/{id}")]
    #[case("/api/v1/mounts")]
    #[case("/api/v1/mounts/{id}")]
    #[case("/api/v1/mount-colors")]
    #[case("/api/v1/mount-colors/{id}")]
    #[case("/api/v1/account-settings")]
    #[case("/api/v1/account-settings/me")]
    #[case("/api/v1/account-settings/{id}")]
    #[case("/health/ready")]
    fn path_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn coupling_response_embeds_mount_schema() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let coupling = schemas.get("CouplingResponse").expect("CouplingResponse");
        assert!(has_field(coupling, "dad"));
        assert!(has_field(coupling, "childName"));
    }
}
