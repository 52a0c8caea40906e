//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
pub(crate) use metrics::build_prometheus;
#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use mount_manager::Trace;
#[cfg(debug_assertions)]
use mount_manager::doc::ApiDoc;
use mount_manager::inbound::http::account_settings::{
    create_account_settings, get_account_settings, update_account_settings,
};
use mount_manager::inbound::http::couplings::{
    create_coupling, delete_coupling, get_coupling, search_couplings,
};
use mount_manager::inbound::http::health::{HealthState, live, ready};
use mount_manager::inbound::http::mount_colors::{
    create_mount_color, delete_mount_color, get_mount_color, list_mount_colors, update_mount_color,
};
use mount_manager::inbound::http::mounts::{
    create_mount, delete_mount, get_mount, list_mounts, update_mount,
};
use mount_manager::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // Literal segments (`/account-settings/me`) are registered before the
    // `{id}` patterns they would otherwise collide with.
    let api = web::scope("/api/v1")
        .wrap(session)
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

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
