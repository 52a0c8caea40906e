//! Behavioural tests for colour catalogue maintenance.

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
    path = "tests/features/mount_colors.feature",
    name = "A new colour is listed for its type"
)]
fn a_new_colour_is_listed_for_its_type(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/mount_colors.feature",
    name = "Renaming a colour leaves existing mounts unchanged"
)]
fn renaming_a_colour_leaves_existing_mounts_unchanged(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/mount_colors.feature",
    name = "Deleted colours are no longer found"
)]
fn deleted_colours_are_no_longer_found(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/mount_colors.feature",
    name = "Deleting a colour twice is not found"
)]
fn deleting_a_colour_twice_is_not_found(world: WorldFixture) {
    drop(world);
}
