//! Shared builders for domain unit tests.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::domain::{
    AccountSettings, AccountSettingsId, ChildName, Coupling, CouplingId, LocalizedNames, Mount,
    MountColor, MountColorId, MountDraft, MountGender, MountId, MountType, UserId,
};

pub(crate) fn names(en: &str) -> LocalizedNames {
    LocalizedNames {
        en: en.to_owned(),
        fr: en.to_owned(),
    }
}

pub(crate) fn mount(
    owner: &UserId,
    name: &str,
    gender: MountGender,
    mount_type: MountType,
) -> Mount {
    Mount::try_from(MountDraft {
        id: MountId::random(),
        user_id: owner.clone(),
        name: name.to_owned(),
        gender,
        mount_type,
        color_id: MountColorId::random(),
        color: names("Golden"),
        max_number_of_child: 4,
        number_of_child: 0,
    })
    .expect("fixture mount is valid")
}

pub(crate) fn coupling(owner: &UserId, dad: &str, mom: &str, child: Option<&str>) -> Coupling {
    Coupling::new(
        CouplingId::random(),
        owner.clone(),
        mount(owner, dad, MountGender::Male, MountType::Dragon),
        mount(owner, mom, MountGender::Female, MountType::Dragon),
        child.and_then(ChildName::parse),
        Utc::now(),
    )
    .expect("fixture coupling is valid")
}

pub(crate) fn settings(owner: &UserId, types: &[MountType]) -> AccountSettings {
    AccountSettings::new_default(
        AccountSettingsId::random(),
        owner.clone(),
        types.iter().copied().collect::<BTreeSet<_>>(),
    )
}

pub(crate) fn color(mount_type: MountType, en: &str) -> MountColor {
    MountColor {
        id: MountColorId::random(),
        mount_type,
        names: names(en),
    }
}
