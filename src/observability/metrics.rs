//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirector_requests_total` (counter): requests by `outcome` (`redirect`, `fallback`)
//!   and `table` (which redirect table answered, `none` for fallbacks)
//!
//! # Design Decisions
//! - Counted once per request by [`OutcomeService`] wrapped around the whole chain
//! - Recording without an installed exporter is a no-op
//! - No per-path labels to keep cardinality bounded

use std::net::SocketAddr;
use std::task::{Context, Poll};

use axum::{http::Request, response::Response};
use futures_util::future::{MapOk, TryFutureExt};
use metrics_exporter_prometheus::PrometheusBuilder;
use tower::{Layer, Service};

use crate::routing::dispatcher::RedirectedBy;

/// `table` label value for requests no table answered.
pub const NO_TABLE: &str = "none";

/// What the redirect chain did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Redirect,
    Fallback,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Redirect => "redirect",
            Outcome::Fallback => "fallback",
        }
    }
}

/// Count one dispatched request.
pub fn record_outcome(outcome: Outcome, table: &'static str) {
    ::metrics::counter!(
        "redirector_requests_total",
        "outcome" => outcome.as_str(),
        "table" => table
    )
    .increment(1);
}

fn record_response(resp: Response) -> Response {
    match resp.extensions().get::<RedirectedBy>() {
        Some(&RedirectedBy(table)) => record_outcome(Outcome::Redirect, table),
        None => record_outcome(Outcome::Fallback, NO_TABLE),
    }
    resp
}

/// Counts each response of the wrapped redirect chain exactly once.
#[derive(Debug, Clone)]
pub struct OutcomeService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for OutcomeService<S>
where
    S: Service<Request<B>, Response = Response>,
{
    type Response = Response;
    type Error = S::Error;
    type Future = MapOk<S::Future, fn(Response) -> Response>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        self.inner
            .call(req)
            .map_ok(record_response as fn(Response) -> Response)
    }
}

/// Layer producing [`OutcomeService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeLayer;

impl<S> Layer<S> for OutcomeLayer {
    type Service = OutcomeService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OutcomeService { inner }
    }
}

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Redirect.as_str(), "redirect");
        assert_eq!(Outcome::Fallback.as_str(), "fallback");
        // No recorder installed: must not panic
        record_outcome(Outcome::Redirect, "document");
    }
}
