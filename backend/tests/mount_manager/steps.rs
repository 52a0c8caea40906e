//! Step definitions shared by the mount manager feature files.

use actix_web::http::Method;
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

use crate::harness::{ApiCall, SharedWorld, WorldFixture, perform};

fn mount_types(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).collect()
}

fn mount_id(world: &SharedWorld, name: &str) -> String {
    world
        .borrow()
        .mounts
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("no mount named {name}"))
}

fn last_coupling_id(world: &SharedWorld) -> String {
    world
        .borrow()
        .last_coupling_id
        .clone()
        .expect("a coupling was recorded")
}

fn first_color_id(world: &SharedWorld, user: &str, kind: &str) -> String {
    let call = ApiCall::new(user, Method::GET, "/mount-colors").query("mountType", kind);
    let (status, body) = perform(world, call);
    assert_eq!(status, 200, "colour lookup for {kind}");
    body.as_ref()
        .and_then(Value::as_array)
        .and_then(|colors| colors.first())
        .and_then(|color| color.get("id"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .expect("catalogue has a colour")
}

fn request_mount(world: &SharedWorld, user: &str, gender: &str, kind: &str, name: &str) -> u16 {
    let color_id = first_color_id(world, user, kind);
    let payload = json!({
        "name": name,
        "gender": gender,
        "type": kind,
        "colorId": color_id,
        "maxNumberOfChild": 4,
    });
    let (status, body) = perform(world, ApiCall::new(user, Method::POST, "/mounts").json(payload));
    if status == 201 {
        let id = body
            .as_ref()
            .and_then(|body| body.get("id"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .expect("mount id");
        world.borrow_mut().mounts.insert(name.to_owned(), id);
    }
    status
}

fn request_coupling(world: &SharedWorld, user: &str, dad: &str, mom: &str, child: Option<&str>) {
    let payload = json!({
        "dadId": mount_id(world, dad),
        "momId": mount_id(world, mom),
        "childName": child,
    });
    let (status, body) = perform(
        world,
        ApiCall::new(user, Method::POST, "/couplings").json(payload),
    );
    if status == 201 {
        let id = body
            .as_ref()
            .and_then(|body| body.get("id"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        world.borrow_mut().last_coupling_id = id;
    }
}

fn catalogue_entry(world: &SharedWorld, name: &str) -> (String, String) {
    world
        .borrow()
        .colors
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("no catalogue colour named {name}"))
}

fn request_color(world: &SharedWorld, user: &str, kind: &str, name: &str) -> u16 {
    let payload = json!({
        "mountType": kind,
        "names": { "en": name, "fr": name },
    });
    let (status, body) = perform(
        world,
        ApiCall::new(user, Method::POST, "/mount-colors").json(payload),
    );
    if status == 201 {
        let id = body
            .as_ref()
            .and_then(|body| body.get("id"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .expect("colour id");
        world
            .borrow_mut()
            .colors
            .insert(name.to_owned(), (id, kind.to_owned()));
    }
    status
}

fn count_couplings(world: &SharedWorld, call: ApiCall<'_>) -> usize {
    let (status, body) = perform(world, call);
    assert_eq!(status, 200);
    body.as_ref()
        .and_then(Value::as_array)
        .map(Vec::len)
        .expect("coupling list")
}

fn last_body_str(world: &SharedWorld, pointer: &str) -> Option<String> {
    world
        .borrow()
        .last_body
        .as_ref()
        .and_then(|body| body.pointer(pointer))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[given("{user} has account settings allowing {types}")]
fn has_account_settings(world: &WorldFixture, user: String, types: String) {
    let world = world.world();
    let payload = json!({ "mountTypes": mount_types(&types) });
    let (status, _) = perform(
        &world,
        ApiCall::new(&user, Method::POST, "/account-settings").json(payload),
    );
    assert_eq!(status, 201);
}

#[given("{user} has updated her settings to allow {types}")]
fn has_updated_settings(world: &WorldFixture, user: String, types: String) {
    let world = world.world();
    let (status, body) = perform(
        &world,
        ApiCall::new(&user, Method::GET, "/account-settings/me"),
    );
    assert_eq!(status, 200);
    let id = body
        .as_ref()
        .and_then(|body| body.get("id"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .expect("settings id");

    let payload = json!({ "mountTypes": mount_types(&types) });
    let (status, _) = perform(
        &world,
        ApiCall::new(&user, Method::PUT, format!("/account-settings/{id}")).json(payload),
    );
    assert_eq!(status, 200);
}

#[given("{user} owns a {gender} {kind} named {name}")]
fn owns_a_mount(world: &WorldFixture, user: String, gender: String, kind: String, name: String) {
    let world = world.world();
    assert_eq!(request_mount(&world, &user, &gender, &kind, &name), 201);
}

#[when("{user} creates a {gender} {kind} named {name}")]
fn creates_a_mount(world: &WorldFixture, user: String, gender: String, kind: String, name: String) {
    let world = world.world();
    request_mount(&world, &user, &gender, &kind, &name);
}

#[given("{user} has added a {kind} colour named {name}")]
fn has_added_a_colour(world: &WorldFixture, user: String, kind: String, name: String) {
    assert_eq!(request_color(&world.world(), &user, &kind, &name), 201);
}

#[when("{user} adds a {kind} colour named {name}")]
fn adds_a_colour(world: &WorldFixture, user: String, kind: String, name: String) {
    request_color(&world.world(), &user, &kind, &name);
}

#[when("{user} changes the catalogue colour {old} to {new}")]
fn changes_catalogue_colour(world: &WorldFixture, user: String, old: String, new: String) {
    let world = world.world();
    let (id, kind) = catalogue_entry(&world, &old);
    let payload = json!({
        "mountType": kind,
        "names": { "en": new, "fr": new },
    });
    perform(
        &world,
        ApiCall::new(&user, Method::PUT, format!("/mount-colors/{id}")).json(payload),
    );
}

#[when("{user} deletes the catalogue colour {name}")]
fn deletes_catalogue_colour(world: &WorldFixture, user: String, name: String) {
    let world = world.world();
    let (id, _) = catalogue_entry(&world, &name);
    perform(
        &world,
        ApiCall::new(&user, Method::DELETE, format!("/mount-colors/{id}")),
    );
}

#[when("{user} looks up the catalogue colour {name}")]
fn looks_up_catalogue_colour(world: &WorldFixture, user: String, name: String) {
    let world = world.world();
    let (id, _) = catalogue_entry(&world, &name);
    perform(
        &world,
        ApiCall::new(&user, Method::GET, format!("/mount-colors/{id}")),
    );
}

#[when("{user} creates account settings allowing {types}")]
fn creates_account_settings(world: &WorldFixture, user: String, types: String) {
    let world = world.world();
    let payload = json!({ "mountTypes": mount_types(&types) });
    perform(
        &world,
        ApiCall::new(&user, Method::POST, "/account-settings").json(payload),
    );
}

#[when("{user} records a coupling of {dad} and {mom} named {child}")]
fn records_named_coupling(world: &WorldFixture, user: String, dad: String, mom: String, child: String) {
    request_coupling(&world.world(), &user, &dad, &mom, Some(&child));
}

#[when("{user} records an unnamed coupling of {dad} and {mom}")]
fn records_unnamed_coupling(world: &WorldFixture, user: String, dad: String, mom: String) {
    request_coupling(&world.world(), &user, &dad, &mom, None);
}

#[when("{user} searches couplings by {field} prefix {prefix}")]
fn searches_couplings(world: &WorldFixture, user: String, field: String, prefix: String) {
    let world = world.world();
    let call = ApiCall::new(&user, Method::GET, "/couplings").query(field.as_str(), prefix);
    perform(&world, call);
}

#[when("{user} deletes the last coupling")]
fn deletes_last_coupling(world: &WorldFixture, user: String) {
    let world = world.world();
    let id = last_coupling_id(&world);
    perform(
        &world,
        ApiCall::new(&user, Method::DELETE, format!("/couplings/{id}")),
    );
}

#[when("{user} renames {old} to {new}")]
fn renames_mount(world: &WorldFixture, user: String, old: String, new: String) {
    let world = world.world();
    let id = mount_id(&world, &old);
    perform(
        &world,
        ApiCall::new(&user, Method::PUT, format!("/mounts/{id}")).json(json!({ "name": new })),
    );
}

#[then("the response status is {status}")]
fn response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(world.world().borrow().last_status, Some(status));
}

#[then("the error code is {code}")]
fn error_code_is(world: &WorldFixture, code: String) {
    assert_eq!(last_body_str(&world.world(), "/code"), Some(code));
}

#[then("the error reason is {reason}")]
fn error_reason_is(world: &WorldFixture, reason: String) {
    assert_eq!(last_body_str(&world.world(), "/details/reason"), Some(reason));
}

#[then("the last coupling has child name {child}")]
fn last_coupling_has_child_name(world: &WorldFixture, child: String) {
    assert_eq!(last_body_str(&world.world(), "/childName"), Some(child));
}

#[then("the search returns {count} couplings")]
fn search_returns(world: &WorldFixture, count: usize) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(200));
    let found = ctx
        .last_body
        .as_ref()
        .and_then(Value::as_array)
        .map(Vec::len);
    assert_eq!(found, Some(count));
}

#[then("{user} still has {count} couplings")]
fn still_has_couplings(world: &WorldFixture, user: String, count: usize) {
    let world = world.world();
    let call = ApiCall::new(&user, Method::GET, "/couplings");
    assert_eq!(count_couplings(&world, call), count);
}

#[then("{user} sees the last coupling with dad {name}")]
fn sees_last_coupling_with_dad(world: &WorldFixture, user: String, name: String) {
    let world = world.world();
    let id = last_coupling_id(&world);
    let (status, _) = perform(
        &world,
        ApiCall::new(&user, Method::GET, format!("/couplings/{id}")),
    );
    assert_eq!(status, 200);
    assert_eq!(last_body_str(&world, "/dad/name"), Some(name));
}

#[then("{user} finds {name} in the {kind} catalogue")]
fn finds_in_catalogue(world: &WorldFixture, user: String, name: String, kind: String) {
    let world = world.world();
    let call = ApiCall::new(&user, Method::GET, "/mount-colors").query("mountType", kind);
    let (status, body) = perform(&world, call);
    assert_eq!(status, 200);
    let listed = body
        .as_ref()
        .and_then(Value::as_array)
        .is_some_and(|colors| {
            colors
                .iter()
                .any(|color| color.pointer("/names/en").and_then(Value::as_str) == Some(name.as_str()))
        });
    assert!(listed, "{name} missing from catalogue");
}

#[then("{user} sees {mount} with colour {color}")]
fn sees_mount_with_colour(world: &WorldFixture, user: String, mount: String, color: String) {
    let world = world.world();
    let id = mount_id(&world, &mount);
    let (status, _) = perform(&world, ApiCall::new(&user, Method::GET, format!("/mounts/{id}")));
    assert_eq!(status, 200);
    assert_eq!(last_body_str(&world, "/color/en"), Some(color));
}
