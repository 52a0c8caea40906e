//! Requester identity carried in the cookie session.
//!
//! The service does not authenticate users itself; whatever user id the
//! surrounding login flow stored in the session is trusted as the requester.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Handler extractor exposing the session-held requester.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an extracted actix session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `user_id` as the requester for subsequent calls.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The session-held requester, if any. A malformed id is treated as
    /// absent.
    pub fn requester(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| {
            UserId::new(value)
                .inspect_err(|error| warn!(%error, "discarding malformed session user id"))
                .ok()
        }))
    }

    /// The requester, or `401 Unauthorized` when the session has none.
    pub fn require_requester(&self) -> Result<UserId, Error> {
        self.requester()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
