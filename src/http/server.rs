//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the redirect chain: document table → inline table → default fallback
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve on a listener until shutdown is signalled

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RedirectorConfig;
use crate::http::fallback::default_fallback;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::metrics::{OutcomeLayer, OutcomeService};
use crate::routing::{RedirectLayer, RedirectMap, RedirectService};

type RedirectChain = OutcomeService<RedirectService<RedirectService<Router>>>;

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server answering from `document` first, then the inline entries in `config`.
    pub fn new(config: RedirectorConfig, document: RedirectMap) -> Self {
        let inline = RedirectMap::from_pairs(
            config
                .redirects
                .entries
                .iter()
                .map(|entry| (entry.path.clone(), entry.url.clone())),
        );

        tracing::info!(
            document_redirects = document.len(),
            inline_redirects = inline.len(),
            "Redirect tables built"
        );

        let chain = ServiceBuilder::new()
            .layer(OutcomeLayer)
            .layer(RedirectLayer::new(document).named("document"))
            .layer(RedirectLayer::new(inline).named("inline"))
            .service(default_fallback());

        let router = Self::build_router(&config, chain);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RedirectorConfig, chain: RedirectChain) -> Router {
        Router::new()
            .fallback_service(chain)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for serving through other means.
    pub fn into_router(self) -> Router {
        self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathUrlPair;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let mut config = RedirectorConfig::default();
        config.redirects.entries = vec![
            PathUrlPair {
                path: "/urlshort-godoc".into(),
                url: "https://godoc.org/github.com/gophercises/urlshort".into(),
            },
            PathUrlPair {
                path: "/dogs".into(),
                url: "https://inline.example.com/dogs".into(),
            },
        ];
        let document = RedirectMap::from_pairs([("/dogs", "https://example.com/dogs")]);
        HttpServer::new(config, document)
    }

    async fn get(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_document_takes_precedence() {
        let resp = get(server().into_router(), "/dogs").await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], "https://example.com/dogs");
        assert!(resp.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_inline_entries_served() {
        let resp = get(server().into_router(), "/urlshort-godoc").await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers()[header::LOCATION],
            "https://godoc.org/github.com/gophercises/urlshort"
        );
    }

    #[tokio::test]
    async fn test_default_fallback_reached() {
        let router = server().into_router();

        assert_eq!(get(router.clone(), "/").await.status(), StatusCode::OK);
        assert_eq!(get(router, "/cats").await.status(), StatusCode::NOT_FOUND);
    }

    fn request_counts(snapshotter: &Snapshotter) -> HashMap<(String, String), u64> {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(composite, _, _, value)| {
                let key = composite.key();
                if key.name() != "redirector_requests_total" {
                    return None;
                }
                let label = |name: &str| {
                    key.labels()
                        .find(|l| l.key() == name)
                        .map(|l| l.value().to_string())
                        .unwrap_or_default()
                };
                match value {
                    DebugValue::Counter(n) => Some(((label("outcome"), label("table")), n)),
                    _ => None,
                }
            })
            .collect()
    }

    #[test]
    fn test_each_request_counted_once() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async {
                let router = server().into_router();
                for uri in ["/dogs", "/urlshort-godoc", "/cats", "/"] {
                    get(router.clone(), uri).await;
                }
            });
        });

        let counts = request_counts(&snapshotter);
        let count = |outcome: &str, table: &str| {
            counts
                .get(&(outcome.to_string(), table.to_string()))
                .copied()
                .unwrap_or(0)
        };

        assert_eq!(count("redirect", "document"), 1);
        assert_eq!(count("redirect", "inline"), 1);
        assert_eq!(count("fallback", "none"), 2);
        assert_eq!(counts.values().sum::<u64>(), 4);
    }
}
