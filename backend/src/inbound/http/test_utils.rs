//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::test::{self, TestRequest};
use actix_web::{App, HttpResponse, web};

use crate::domain::ports::{
    MockAccountSettingsCommand, MockAccountSettingsQuery, MockCouplingCommand, MockCouplingQuery,
    MockMountColorCommand, MockMountColorQuery, MockMountCommand, MockMountQuery,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Session middleware with a fresh key and a non-`Secure` cookie named
/// `session`.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Mocks for every driving port, converted into an [`HttpState`].
#[derive(Default)]
pub struct MockPorts {
    pub mounts: MockMountQuery,
    pub mount_commands: MockMountCommand,
    pub mount_colors: MockMountColorQuery,
    pub mount_color_commands: MockMountColorCommand,
    pub couplings: MockCouplingQuery,
    pub coupling_commands: MockCouplingCommand,
    pub account_settings: MockAccountSettingsQuery,
    pub account_settings_commands: MockAccountSettingsCommand,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            mounts: Arc::new(self.mounts),
            mount_commands: Arc::new(self.mount_commands),
            mount_colors: Arc::new(self.mount_colors),
            mount_color_commands: Arc::new(self.mount_color_commands),
            couplings: Arc::new(self.couplings),
            coupling_commands: Arc::new(self.coupling_commands),
            account_settings: Arc::new(self.account_settings),
            account_settings_commands: Arc::new(self.account_settings_commands),
        }
    }
}

async fn login_as(session: SessionContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Serve `request` through an app exposing the handlers registered by
/// `configure`, optionally signed in as `requester`.
pub async fn call_as(
    state: HttpState,
    configure: fn(&mut web::ServiceConfig),
    requester: Option<&UserId>,
    request: TestRequest,
) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .route("/test-login/{user_id}", web::post().to(login_as))
            .configure(configure),
    )
    .await;

    let request = match requester {
        Some(user_id) => {
            let login = test::call_service(
                &app,
                TestRequest::post()
                    .uri(&format!("/test-login/{user_id}"))
                    .to_request(),
            )
            .await;
            request.cookie(session_cookie(&login))
        }
        None => request,
    };

    test::call_service(&app, request.to_request())
        .await
        .map_into_boxed_body()
}
