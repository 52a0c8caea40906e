//! Internal Diesel row structs.
//!
//! Never exposed to the domain; repositories convert to and from domain
//! types at the adapter boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{account_settings, couplings, mount_colors, mounts};

// ---------------------------------------------------------------------------
// Mount models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MountRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub gender: String,
    pub mount_type: String,
    pub color_id: Uuid,
    pub color: serde_json::Value,
    pub max_number_of_child: i32,
    pub number_of_child: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mounts)]
pub(crate) struct NewMountRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub gender: &'a str,
    pub mount_type: &'a str,
    pub color_id: Uuid,
    pub color: serde_json::Value,
    pub max_number_of_child: i32,
    pub number_of_child: i32,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = mounts)]
pub(crate) struct MountUpdate<'a> {
    pub name: &'a str,
    pub gender: &'a str,
    pub mount_type: &'a str,
    pub color_id: Uuid,
    pub color: serde_json::Value,
    pub max_number_of_child: i32,
    pub number_of_child: i32,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Coupling models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = couplings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CouplingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dad: serde_json::Value,
    pub mom: serde_json::Value,
    pub child_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = couplings)]
pub(crate) struct NewCouplingRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dad: serde_json::Value,
    pub mom: serde_json::Value,
    pub dad_name: &'a str,
    pub mom_name: &'a str,
    pub child_name: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Account settings models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = account_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountSettingsRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mount_types: Vec<String>,
    pub server_name: Option<String>,
    pub ig_username: Option<String>,
    pub auto_fill_child_name: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = account_settings)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AccountSettingsUpdate<'a> {
    pub mount_types: Vec<String>,
    pub server_name: Option<&'a str>,
    pub ig_username: Option<&'a str>,
    pub auto_fill_child_name: bool,
}

// ---------------------------------------------------------------------------
// Catalogue models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mount_colors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MountColorRow {
    pub id: Uuid,
    pub mount_type: String,
    pub name_en: String,
    pub name_fr: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mount_colors)]
pub(crate) struct NewMountColorRow<'a> {
    pub id: Uuid,
    pub mount_type: &'a str,
    pub name_en: &'a str,
    pub name_fr: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = mount_colors)]
pub(crate) struct MountColorUpdate<'a> {
    pub mount_type: &'a str,
    pub name_en: &'a str,
    pub name_fr: &'a str,
}
