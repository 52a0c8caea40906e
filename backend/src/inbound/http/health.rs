//! Liveness and readiness checks.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Readiness and liveness flags shared with the health handlers.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Live but not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report ready once startup has finished.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Current readiness.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Current liveness.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn health_response(ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness check: 200 once the server is wired, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    health_response(state.is_ready())
}

/// Liveness check: 200 until the process is marked unhealthy.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    health_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    async fn status_of(state: web::Data<HealthState>, uri: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(ready)
                .service(live),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(b"no-store".as_slice())
        );
        res.status()
    }

    #[rstest]
    #[actix_web::test]
    async fn ready_flips_after_mark_ready() {
        let state = web::Data::new(HealthState::new());
        assert_eq!(status_of(state.clone(), "/health/ready").await, StatusCode::SERVICE_UNAVAILABLE);
        state.mark_ready();
        assert_eq!(status_of(state, "/health/ready").await, StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn live_fails_once_unhealthy() {
        let state = web::Data::new(HealthState::new());
        assert_eq!(status_of(state.clone(), "/health/live").await, StatusCode::OK);
        state.mark_unhealthy();
        assert_eq!(status_of(state, "/health/live").await, StatusCode::SERVICE_UNAVAILABLE);
    }
}
