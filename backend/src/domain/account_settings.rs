//! Per-user account settings.
//!
//! Each user has at most one settings record. It names the mount types the
//! user manages, an optional game server and in-game username, and whether
//! child names should be filled in automatically.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{AccountSettingsId, MountType, UserId};

/// Settings owned by a single user.
///
/// # Examples
/// ```
/// use mount_manager::domain::{AccountSettings, AccountSettingsId, MountType, UserId};
///
/// let settings =
///     AccountSettings::new_default(AccountSettingsId::random(), UserId::random(), [MountType::Dragon]);
/// assert!(!settings.auto_fill_child_name);
/// assert!(settings.server_name.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    /// Settings identifier used by `PUT /account-settings/{id}`.
    pub id: AccountSettingsId,
    /// Owner; unique across all settings records.
    pub user_id: UserId,
    /// Mount types the owner may create mounts of.
    pub mount_types: BTreeSet<MountType>,
    /// Game server the owner plays on, when known.
    pub server_name: Option<String>,
    /// In-game username, when known.
    pub ig_username: Option<String>,
    /// Whether clients should suggest child names.
    pub auto_fill_child_name: bool,
}

impl AccountSettings {
    /// Settings for a newly registered user: only the mount types are set.
    #[must_use]
    pub fn new_default(
        id: AccountSettingsId,
        user_id: UserId,
        mount_types: impl IntoIterator<Item = MountType>,
    ) -> Self {
        Self {
            id,
            user_id,
            mount_types: mount_types.into_iter().collect(),
            server_name: None,
            ig_username: None,
            auto_fill_child_name: false,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: AccountSettingsPatch) {
        if let Some(server_name) = patch.server_name {
            self.server_name = Some(server_name);
        }
        if let Some(ig_username) = patch.ig_username {
            self.ig_username = Some(ig_username);
        }
        if let Some(mount_types) = patch.mount_types {
            self.mount_types = mount_types;
        }
        if let Some(auto_fill) = patch.auto_fill_child_name {
            self.auto_fill_child_name = auto_fill;
        }
    }
}

/// Partial settings update.
///
/// Blank strings are normalised to `None` by [`AccountSettingsPatch::new`],
/// so an empty `serverName` neither triggers server validation nor clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSettingsPatch {
    /// Replacement server name; must name a known server.
    pub server_name: Option<String>,
    /// Replacement in-game username.
    pub ig_username: Option<String>,
    /// Replacement mount type set.
    pub mount_types: Option<BTreeSet<MountType>>,
    /// Replacement auto-fill flag.
    pub auto_fill_child_name: Option<bool>,
}

impl AccountSettingsPatch {
    /// Build a patch, dropping blank strings.
    #[must_use]
    pub fn new(
        server_name: Option<String>,
        ig_username: Option<String>,
        mount_types: Option<BTreeSet<MountType>>,
        auto_fill_child_name: Option<bool>,
    ) -> Self {
        Self {
            server_name: non_blank(server_name),
            ig_username: non_blank(ig_username),
            mount_types,
            auto_fill_child_name,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn patch_drops_blank_strings() {
        let patch = AccountSettingsPatch::new(Some("  ".into()), Some(" Ada ".into()), None, None);
        assert_eq!(patch.server_name, None);
        assert_eq!(patch.ig_username.as_deref(), Some("Ada"));
    }

    #[rstest]
    fn apply_only_touches_supplied_fields() {
        let mut settings = AccountSettings::new_default(
            AccountSettingsId::random(),
            UserId::random(),
            [MountType::Dragon],
        );
        settings.ig_username = Some("Ada".into());

        settings.apply(AccountSettingsPatch {
            server_name: Some("Draconiros".into()),
            auto_fill_child_name: Some(true),
            ..AccountSettingsPatch::default()
        });

        assert_eq!(settings.server_name.as_deref(), Some("Draconiros"));
        assert_eq!(settings.ig_username.as_deref(), Some("Ada"));
        assert!(settings.auto_fill_child_name);
        assert!(settings.mount_types.contains(&MountType::Dragon));
    }

    #[rstest]
    fn serialises_mount_types_as_ordered_list() {
        let settings = AccountSettings::new_default(
            AccountSettingsId::random(),
            UserId::random(),
            [MountType::Wolf, MountType::Dragon],
        );
        let value = serde_json::to_value(&settings).expect("serialises");
        assert_eq!(value["mountTypes"], serde_json::json!(["Dragon", "Wolf"]));
        assert_eq!(value["autoFillChildName"], false);
    }
}
