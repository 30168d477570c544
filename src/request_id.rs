//! Ambient request identifiers.
//!
//! The [`Emitter`](crate::emitter::Emitter) never inspects its execution
//! environment directly. It asks an injected [`RequestIdSource`], which may
//! or may not know the id of the inbound request currently being handled.

use std::future::Future;

/// Name of the inbound header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static REQUEST_ID: String;
}

/// Lookup of the current request's identifier.
///
/// Returning `None` means "no identifier here"; it is a normal outcome
/// outside of a request scope, not an error.
pub trait RequestIdSource: Send + Sync {
    fn request_id(&self) -> Option<String>;
}

/// Source for contexts that never handle inbound requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRequestContext;

impl RequestIdSource for NoRequestContext {
    fn request_id(&self) -> Option<String> {
        None
    }
}

impl<F> RequestIdSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn request_id(&self) -> Option<String> {
        self()
    }
}

/// Task-local request scope.
///
/// Server code wraps each request handler in [`RequestScope::run`] (or
/// [`RequestScope::from_headers`]); any emitter built with
/// [`TaskLocalRequestId`] then picks the id up without it being threaded
/// through every call.
pub struct RequestScope;

impl RequestScope {
    /// Run `fut` with `request_id` as the ambient identifier.
    pub async fn run<F: Future>(request_id: impl Into<String>, fut: F) -> F::Output {
        REQUEST_ID.scope(request_id.into(), fut).await
    }

    /// Synchronous counterpart of [`RequestScope::run`].
    pub fn run_sync<R>(request_id: impl Into<String>, f: impl FnOnce() -> R) -> R {
        REQUEST_ID.sync_scope(request_id.into(), f)
    }

    /// Run `fut` inside a scope keyed by an already extracted
    /// `x-request-id` header value. `None` runs `fut` without a scope.
    ///
    /// Works with any server stack: pass
    /// `headers.get("x-request-id").and_then(|v| v.to_str().ok())`.
    pub async fn from_header_value<F: Future>(value: Option<&str>, fut: F) -> F::Output {
        match value {
            Some(id) => Self::run(id, fut).await,
            None => fut.await,
        }
    }

    /// Run `fut` inside a scope keyed by the inbound `x-request-id` header.
    ///
    /// A missing or non-UTF-8 header runs `fut` without a scope.
    ///
    /// `HeaderMap` here is reqwest's re-export, i.e. `http` 0.2. Servers on
    /// `http` 1.x (hyper 1, axum 0.7) should use
    /// [`RequestScope::from_header_value`] instead.
    #[cfg(feature = "axiom")]
    pub async fn from_headers<F: Future>(headers: &reqwest::header::HeaderMap, fut: F) -> F::Output {
        let value = headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok());
        Self::from_header_value(value, fut).await
    }

    /// Identifier of the enclosing scope, if any.
    pub fn current() -> Option<String> {
        REQUEST_ID.try_with(|id| id.clone()).ok()
    }
}

/// [`RequestIdSource`] backed by [`RequestScope`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskLocalRequestId;

impl RequestIdSource for TaskLocalRequestId {
    fn request_id(&self) -> Option<String> {
        RequestScope::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn task_local_outside_scope_is_none() {
        assert_eq!(TaskLocalRequestId.request_id(), None);
    }

    #[tokio::test]
    async fn task_local_inside_scope() {
        let seen = RequestScope::run("abc-123", async { TaskLocalRequestId.request_id() }).await;
        assert_eq!(seen.as_deref(), Some("abc-123"));
        assert_eq!(TaskLocalRequestId.request_id(), None);
    }

    #[test]
    fn sync_scope() {
        let seen = RequestScope::run_sync("sync-1", || TaskLocalRequestId.request_id());
        assert_eq!(seen.as_deref(), Some("sync-1"));
    }

    #[tokio::test]
    async fn scope_from_header_value() {
        let seen = RequestScope::from_header_value(Some("raw-5"), async { RequestScope::current() }).await;
        assert_eq!(seen.as_deref(), Some("raw-5"));

        let seen = RequestScope::from_header_value(None, async { RequestScope::current() }).await;
        assert_eq!(seen, None);
    }

    #[test]
    fn closures_are_sources() {
        let source = || Some("from-closure".to_string());
        assert_eq!(source.request_id().as_deref(), Some("from-closure"));
        assert_eq!(NoRequestContext.request_id(), None);
    }

    #[cfg(feature = "axiom")]
    #[tokio::test]
    async fn scope_from_headers() {
        use reqwest::header::{HeaderMap, HeaderValue};

        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("hdr-9"));
        let seen = RequestScope::from_headers(&headers, async { RequestScope::current() }).await;
        assert_eq!(seen.as_deref(), Some("hdr-9"));

        let seen = RequestScope::from_headers(&HeaderMap::new(), async { RequestScope::current() }).await;
        assert_eq!(seen, None);
    }
}
