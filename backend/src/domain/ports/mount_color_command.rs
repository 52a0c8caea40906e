//! Driving port for colour catalogue maintenance.

use async_trait::async_trait;

use crate::domain::{Error, MountColor, MountColorDraft, MountColorId};

/// Use-case port for adding, replacing and removing catalogue colours.
///
/// Mounts copy colour names when they are created or recoloured, so edits
/// here never rewrite existing mounts or coupling snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MountColorCommand: Send + Sync {
    /// Add a colour under a fresh id.
    ///
    /// # Errors
    /// `InvalidRequest` when a localized name is blank.
    async fn create_mount_color(&self, draft: MountColorDraft) -> Result<MountColor, Error>;

    /// Replace the type and names of an existing colour.
    ///
    /// # Errors
    /// `InvalidRequest` when a localized name is blank, `NotFound` when no
    /// colour has this id.
    async fn update_mount_color(
        &self,
        color_id: MountColorId,
        draft: MountColorDraft,
    ) -> Result<MountColor, Error>;

    /// Remove a colour from the catalogue.
    ///
    /// # Errors
    /// `NotFound` when no colour has this id.
    async fn delete_mount_color(&self, color_id: MountColorId) -> Result<(), Error>;
}
