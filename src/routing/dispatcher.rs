//! Redirect dispatch.
//!
//! # Responsibilities
//! - Wrap a fallback service with an exact-match redirect table
//! - Answer matches with `302 Found`
//! - Forward misses to the fallback untouched
//!
//! # Design Decisions
//! - The table is shared through `Arc` and never written after construction
//! - Readiness is the fallback's readiness; a redirect needs no capacity
//! - A miss is not an error
//! - Redirect responses carry a [`RedirectedBy`] extension naming the table;
//!   counting happens once, around the whole chain

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{http::Request, response::Response};
use futures_util::future::{self, Either, Ready};
use tower::{Layer, Service};

use crate::config::document::{parse_json, parse_yaml, ParseError};
use crate::http::response;
use crate::routing::matcher::request_path;
use crate::routing::RedirectMap;

/// Table name used when none is given.
pub const DEFAULT_TABLE: &str = "default";

/// Response extension set on redirects: the name of the table that answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectedBy(pub &'static str);

/// Service that redirects mapped paths and delegates everything else.
#[derive(Debug)]
pub struct RedirectService<S> {
    redirects: Arc<RedirectMap>,
    table: &'static str,
    fallback: S,
}

impl<S> RedirectService<S> {
    pub fn new(redirects: impl Into<Arc<RedirectMap>>, fallback: S) -> Self {
        Self {
            redirects: redirects.into(),
            table: DEFAULT_TABLE,
            fallback,
        }
    }

    /// Name the table for the [`RedirectedBy`] extension.
    pub fn named(mut self, table: &'static str) -> Self {
        self.table = table;
        self
    }

    /// The table this service answers from.
    pub fn redirects(&self) -> &RedirectMap {
        &self.redirects
    }

    fn redirect_for<B>(&self, req: &Request<B>) -> Option<Response> {
        let path = request_path(req);
        let target = self.redirects.lookup(&path)?;

        match response::found(req.method(), target) {
            Some(mut resp) => {
                tracing::debug!(path = %path, target = %target, table = self.table, "Redirecting");
                resp.extensions_mut().insert(RedirectedBy(self.table));
                Some(resp)
            }
            None => {
                tracing::warn!(
                    path = %path,
                    target = ?target,
                    "Redirect target is not a valid Location header, using fallback"
                );
                None
            }
        }
    }
}

impl<S: Clone> Clone for RedirectService<S> {
    fn clone(&self) -> Self {
        Self {
            redirects: self.redirects.clone(),
            table: self.table,
            fallback: self.fallback.clone(),
        }
    }
}

impl<S, B> Service<Request<B>> for RedirectService<S>
where
    S: Service<Request<B>, Response = Response>,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Either<Ready<Result<Response, S::Error>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.fallback.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        if let Some(resp) = self.redirect_for(&req) {
            return Either::Left(future::ready(Ok(resp)));
        }

        tracing::debug!(path = %req.uri().path(), table = self.table, "No redirect, delegating");
        Either::Right(self.fallback.call(req))
    }
}

/// Layer that wraps services in a [`RedirectService`] sharing one table.
#[derive(Debug, Clone)]
pub struct RedirectLayer {
    redirects: Arc<RedirectMap>,
    table: &'static str,
}

impl RedirectLayer {
    pub fn new(redirects: impl Into<Arc<RedirectMap>>) -> Self {
        Self {
            redirects: redirects.into(),
            table: DEFAULT_TABLE,
        }
    }

    /// Name the table for the [`RedirectedBy`] extension.
    pub fn named(mut self, table: &'static str) -> Self {
        self.table = table;
        self
    }
}

impl<S> Layer<S> for RedirectLayer {
    type Service = RedirectService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RedirectService {
            redirects: self.redirects.clone(),
            table: self.table,
            fallback: inner,
        }
    }
}

/// Redirect the paths in `redirects`, delegating everything else to `fallback`.
pub fn map_handler<S>(redirects: RedirectMap, fallback: S) -> RedirectService<S> {
    RedirectService::new(redirects, fallback)
}

/// Parse a YAML redirect document and wrap `fallback` with it.
///
/// The only failure is an undecodable document.
pub fn yaml_handler<S>(yaml: &[u8], fallback: S) -> Result<RedirectService<S>, ParseError> {
    Ok(map_handler(parse_yaml(yaml)?, fallback))
}

/// Parse a JSON redirect document and wrap `fallback` with it.
pub fn json_handler<S>(json: &[u8], fallback: S) -> Result<RedirectService<S>, ParseError> {
    Ok(map_handler(parse_json(json)?, fallback))
}
