//! Behavioural tests for recording, searching and deleting couplings.

#[path = "mount_manager/harness.rs"]
mod harness;
#[path = "mount_manager/steps.rs"]
mod steps;

use harness::WorldFixture;
use rstest::fixture;
use rstest_bdd_macros::scenario;

#[fixture]
fn world() -> WorldFixture {
    harness::start_world()
}

#[scenario(
    path = "tests/features/couplings.feature",
    name = "Owner records a coupling and finds it by prefix"
)]
fn owner_records_a_coupling_and_finds_it_by_prefix(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/couplings.feature",
    name = "Parents given in swapped roles are rejected"
)]
fn parents_given_in_swapped_roles_are_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/couplings.feature",
    name = "Parents of different types are rejected"
)]
fn parents_of_different_types_are_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/couplings.feature",
    name = "Search prefixes match wildcard characters literally"
)]
fn search_prefixes_match_wildcard_characters_literally(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/couplings.feature",
    name = "Another user cannot delete a coupling"
)]
fn another_user_cannot_delete_a_coupling(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/couplings.feature",
    name = "Owner deletes a coupling"
)]
fn owner_deletes_a_coupling(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/couplings.feature",
    name = "Coupling snapshots ignore later mount edits"
)]
fn coupling_snapshots_ignore_later_mount_edits(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/couplings.feature",
    name = "Another user's mount cannot be coupled"
)]
fn another_users_mount_cannot_be_coupled(world: WorldFixture) {
    drop(world);
}
