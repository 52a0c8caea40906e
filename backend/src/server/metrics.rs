//! Optional Prometheus request metrics.
//!
//! The layer is always installed when the `metrics` feature is on; a
//! disabled layer only boxes the response body so both arms share a type.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;

/// Metric name prefix for every exported series.
const NAMESPACE: &str = "mount_manager";
/// Scrape endpoint served by the middleware itself.
pub(crate) const METRICS_ENDPOINT: &str = "/metrics";

/// Build the request metrics middleware.
///
/// # Errors
/// Returns [`std::io::Error`] when the collectors cannot be registered.
pub(crate) fn build_prometheus() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint(METRICS_ENDPOINT)
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}

#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

type BoxedService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedService;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::Enabled(metrics) => {
                let pending = Compat::new(metrics.as_ref().clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            Self::Disabled => {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Box::pin(async move { Ok(boxed::service(svc)) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    async fn status_of(layer: MetricsLayer, uri: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(layer)
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request())
            .await
            .status()
    }

    #[rstest]
    #[actix_rt::test]
    async fn disabled_layer_passes_requests_through() {
        assert_eq!(status_of(MetricsLayer::from_option(None), "/ping").await, StatusCode::OK);
        assert_eq!(
            status_of(MetricsLayer::Disabled, METRICS_ENDPOINT).await,
            StatusCode::NOT_FOUND
        );
    }

    #[rstest]
    #[actix_rt::test]
    async fn enabled_layer_serves_scrape_endpoint() {
        let metrics = build_prometheus().expect("metrics build");
        let layer = MetricsLayer::from_option(Some(metrics));
        assert_eq!(status_of(layer, METRICS_ENDPOINT).await, StatusCode::OK);
    }
}
