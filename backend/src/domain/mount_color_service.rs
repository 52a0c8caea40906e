//! Colour catalogue use cases.
//!
//! The catalogue is shared by every user. Edits only affect mounts created
//! or recoloured afterwards, since mounts copy the names they reference.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CatalogueRepositoryError, MountColorCommand, MountColorQuery, MountColorRepository,
};
use crate::domain::{EntityKind, Error, MountColor, MountColorDraft, MountColorId, MountType};

pub(crate) fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue error: {message}"))
        }
    }
}

/// Catalogue service implementing [`MountColorQuery`] and
/// [`MountColorCommand`].
#[derive(Clone)]
pub struct MountColorService<C> {
    colors: Arc<C>,
}

impl<C> MountColorService<C> {
    /// Serve the catalogue held by `colors`.
    #[must_use]
    pub const fn new(colors: Arc<C>) -> Self {
        Self { colors }
    }
}

#[async_trait]
impl<C> MountColorQuery for MountColorService<C>
where
    C: MountColorRepository,
{
    async fn list_mount_colors(&self, mount_type: MountType) -> Result<Vec<MountColor>, Error> {
        self.colors
            .list_by_type(mount_type)
            .await
            .map_err(map_catalogue_error)
    }

    async fn get_mount_color(&self, color_id: MountColorId) -> Result<MountColor, Error> {
        self.colors
            .find_by_id(&color_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::entity_not_found(EntityKind::MountColor, color_id))
    }
}

#[async_trait]
impl<C> MountColorCommand for MountColorService<C>
where
    C: MountColorRepository,
{
    async fn create_mount_color(&self, draft: MountColorDraft) -> Result<MountColor, Error> {
        let color = MountColor::from_draft(MountColorId::random(), draft)?;
        self.colors
            .insert(&color)
            .await
            .map_err(map_catalogue_error)?;
        tracing::debug!(color_id = %color.id, mount_type = %color.mount_type, "colour added");
        Ok(color)
    }

    async fn update_mount_color(
        &self,
        color_id: MountColorId,
        draft: MountColorDraft,
    ) -> Result<MountColor, Error> {
        let color = MountColor::from_draft(color_id, draft)?;
        let matched = self
            .colors
            .update(&color)
            .await
            .map_err(map_catalogue_error)?;
        if !matched {
            return Err(Error::entity_not_found(EntityKind::MountColor, color_id));
        }
        Ok(color)
    }

    async fn delete_mount_color(&self, color_id: MountColorId) -> Result<(), Error> {
        let removed = self
            .colors
            .delete(&color_id)
            .await
            .map_err(map_catalogue_error)?;
        if !removed {
            return Err(Error::entity_not_found(EntityKind::MountColor, color_id));
        }
        tracing::debug!(%color_id, "colour removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::LocalizedNames;
    use crate::domain::ports::MockMountColorRepository;
    use crate::domain::test_fixtures::color;
    use rstest::rstest;

    fn service(colors: MockMountColorRepository) -> MountColorService<MockMountColorRepository> {
        MountColorService::new(Arc::new(colors))
    }

    fn draft(en: &str, fr: &str) -> MountColorDraft {
        MountColorDraft {
            mount_type: MountType::Dragon,
            names: LocalizedNames {
                en: en.into(),
                fr: fr.into(),
            },
        }
    }

    #[rstest]
    #[tokio::test]
    async fn list_maps_query_errors() {
        let mut colors = MockMountColorRepository::new();
        colors
            .expect_list_by_type()
            .times(1)
            .return_once(|_| Err(CatalogueRepositoryError::query("syntax")));

        let err = service(colors)
            .list_mount_colors(MountType::Dragon)
            .await
            .expect_err("query failed");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn get_returns_stored_colour() {
        let golden = color(MountType::Dragon, "Golden");
        let id = golden.id;
        let mut colors = MockMountColorRepository::new();
        colors
            .expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .return_once(move |_| Ok(Some(golden)));

        let found = service(colors).get_mount_color(id).await.expect("found");

        assert_eq!(found.names.en, "Golden");
    }

    #[rstest]
    #[tokio::test]
    async fn get_missing_is_not_found() {
        let mut colors = MockMountColorRepository::new();
        colors.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let err = service(colors)
            .get_mount_color(MountColorId::random())
            .await
            .expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.detail_str("entity"), Some("MountColor"));
    }

    #[rstest]
    #[tokio::test]
    async fn create_stores_trimmed_names() {
        let mut colors = MockMountColorRepository::new();
        colors
            .expect_insert()
            .withf(|color| color.names.en == "Amber" && color.names.fr == "Ambre")
            .times(1)
            .return_once(|_| Ok(()));

        let created = service(colors)
            .create_mount_color(draft(" Amber ", "Ambre"))
            .await
            .expect("created");

        assert_eq!(created.mount_type, MountType::Dragon);
        assert_eq!(created.names.en, "Amber");
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_blank_name_before_storage() {
        let mut colors = MockMountColorRepository::new();
        colors.expect_insert().times(0);

        let err = service(colors)
            .create_mount_color(draft("Amber", "  "))
            .await
            .expect_err("blank fr name");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.detail_str("field"), Some("names.fr"));
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_the_path_id() {
        let id = MountColorId::random();
        let mut colors = MockMountColorRepository::new();
        colors
            .expect_update()
            .withf(move |color| color.id == id && color.names.en == "Jade")
            .times(1)
            .return_once(|_| Ok(true));

        let updated = service(colors)
            .update_mount_color(id, draft("Jade", "Jade"))
            .await
            .expect("updated");

        assert_eq!(updated.id, id);
    }

    #[rstest]
    #[case(false, Some(ErrorCode::NotFound))]
    #[case(true, None)]
    #[tokio::test]
    async fn update_without_match_is_not_found(
        #[case] matched: bool,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut colors = MockMountColorRepository::new();
        colors
            .expect_update()
            .times(1)
            .return_once(move |_| Ok(matched));

        let result = service(colors)
            .update_mount_color(MountColorId::random(), draft("Jade", "Jade"))
            .await;

        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn delete_reports_missing_colour(
        #[case] removed: bool,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut colors = MockMountColorRepository::new();
        colors
            .expect_delete()
            .times(1)
            .return_once(move |_| Ok(removed));

        let result = service(colors)
            .delete_mount_color(MountColorId::random())
            .await;

        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_maps_connection_errors() {
        let mut colors = MockMountColorRepository::new();
        colors
            .expect_delete()
            .times(1)
            .return_once(|_| Err(CatalogueRepositoryError::connection("refused")));

        let err = service(colors)
            .delete_mount_color(MountColorId::random())
            .await
            .expect_err("store down");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
