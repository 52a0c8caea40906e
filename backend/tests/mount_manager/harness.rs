//! Loopback mount manager server and shared scenario state.
//!
//! The harness owns a current-thread Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping the `WorldFixture` stops the
//! server even if a step panics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpResponse, HttpServer, web};
use awc::Client;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use mount_manager::Trace;
use mount_manager::domain::{
    AccountSettingsService, CouplingService, Error, MountColorService, MountService, UserId,
};
use mount_manager::inbound::http::ApiResult;
use mount_manager::inbound::http::account_settings::{
    create_account_settings, get_account_settings, update_account_settings,
};
use mount_manager::inbound::http::couplings::{
    create_coupling, delete_coupling, get_coupling, search_couplings,
};
use mount_manager::inbound::http::mount_colors::{
    create_mount_color, delete_mount_color, get_mount_color, list_mount_colors, update_mount_color,
};
use mount_manager::inbound::http::mounts::{
    create_mount, delete_mount, get_mount, list_mounts, update_mount,
};
use mount_manager::inbound::http::session::SessionContext;
use mount_manager::inbound::http::state::HttpState;
use mount_manager::outbound::memory::InMemoryStore;

/// Users the scenarios can sign in as.
const USERS: [(&str, &str); 2] = [
    ("alice", "11111111-1111-1111-1111-111111111111"),
    ("bob", "22222222-2222-2222-2222-222222222222"),
];

pub(crate) struct MountManagerWorld {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    server: ServerHandle,
    /// Session cookie per signed-in user alias.
    pub(crate) cookies: HashMap<String, String>,
    /// Mount id per mount name.
    pub(crate) mounts: HashMap<String, String>,
    /// Catalogue id and mount type per colour added by a scenario.
    pub(crate) colors: HashMap<String, (String, String)>,
    pub(crate) last_coupling_id: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<MountManagerWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Run `operation` against the server. The future must not touch the world.
pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

async fn test_login(session: SessionContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::with_default_catalogue());
    HttpState::from_services(
        Arc::new(MountService::new(store.clone(), store.clone(), store.clone())),
        Arc::new(MountColorService::new(store.clone())),
        Arc::new(CouplingService::new(store.clone(), store.clone())),
        Arc::new(AccountSettingsService::new(store.clone(), store)),
    )
}

fn spawn_server() -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let state = web::Data::new(memory_state());

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .cookie_same_site(SameSite::Lax)
            .build();
        let api = web::scope("/api/v1")
            .wrap(session)
            .route("/test-login/{user_id}", web::post().to(test_login))
            .service(create_mount)
            .service(list_mounts)
            .service(get_mount)
            .service(update_mount)
            .service(delete_mount)
            .service(list_mount_colors)
            .service(create_mount_color)
            .service(get_mount_color)
            .service(update_mount_color)
            .service(delete_mount_color)
            .service(create_coupling)
            .service(search_couplings)
            .service(get_coupling)
            .service(delete_coupling)
            .service(create_account_settings)
            .service(get_account_settings)
            .service(update_account_settings);

        App::new().app_data(state.clone()).wrap(Trace).service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

/// Start a fresh server with an empty store and default catalogue.
pub(crate) fn start_world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let (base_url, server) = local
        .block_on(&runtime, async { spawn_server() })
        .expect("server starts");

    WorldFixture {
        world: Rc::new(RefCell::new(MountManagerWorld {
            runtime,
            local,
            base_url,
            server,
            cookies: HashMap::new(),
            mounts: HashMap::new(),
            colors: HashMap::new(),
            last_coupling_id: None,
            last_status: None,
            last_body: None,
        })),
    }
}

fn user_id_for(alias: &str) -> &'static str {
    USERS
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, id)| *id)
        .unwrap_or_else(|| panic!("unknown user alias {alias}"))
}

/// Sign `alias` in once and remember the session cookie.
pub(crate) fn sign_in(world: &SharedWorld, alias: &str) {
    if world.borrow().cookies.contains_key(alias) {
        return;
    }
    let user_id = user_id_for(alias);
    let cookie = with_world_async(world, |base_url| async move {
        let response = Client::default()
            .post(format!("{base_url}/api/v1/test-login/{user_id}"))
            .send()
            .await
            .expect("login request");
        assert_eq!(response.status().as_u16(), 204);
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::to_owned)
            .expect("session cookie")
    });
    world.borrow_mut().cookies.insert(alias.to_owned(), cookie);
}

pub(crate) struct ApiCall<'a> {
    pub(crate) user: &'a str,
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(&'a str, String)>,
    pub(crate) payload: Option<Value>,
}

impl<'a> ApiCall<'a> {
    pub(crate) fn new(user: &'a str, method: Method, path: impl Into<String>) -> Self {
        Self {
            user,
            method,
            path: path.into(),
            query: Vec::new(),
            payload: None,
        }
    }

    pub(crate) fn json(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub(crate) fn query(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }
}

/// Perform `call` as its user and record status and body.
pub(crate) fn perform(world: &SharedWorld, call: ApiCall<'_>) -> (u16, Option<Value>) {
    sign_in(world, call.user);
    let cookie = world.borrow().cookies.get(call.user).cloned();
    let ApiCall {
        method,
        path,
        query,
        payload,
        ..
    } = call;

    let (status, body) = with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}/api/v1{path}"));
        if !query.is_empty() {
            request = request.query(&query).expect("query encodes");
        }
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect("json request"),
            None => request.send().await.expect("request"),
        };
        let status = response.status().as_u16();
        let bytes = response.body().await.expect("body");
        let body = (!bytes.is_empty())
            .then(|| serde_json::from_slice::<Value>(&bytes).expect("json body"));
        (status, body)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_body = body.clone();
    (status, body)
}
