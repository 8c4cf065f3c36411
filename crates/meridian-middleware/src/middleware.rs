//! Core middleware trait and chain types.
//!
//! This module defines the [`Middleware`] trait the three pipeline stages
//! implement, and the [`Next`] callback that links them together.
//!
//! A stage receives the request context, the request, and a [`Next`] value.
//! It may short-circuit by returning its own response (the headers stage
//! does this for 415/406 rejections), fail by returning a
//! [`HandlerError`](meridian_core::HandlerError), or call `next.run()`
//! exactly once to continue the chain.
//!
//! # Example
//!
//! ```ignore
//! use meridian_middleware::{BoxFuture, Middleware, Next, Request, RequestContext, Response};
//! use meridian_core::HandlerResult;
//!
//! struct TimingMiddleware;
//!
//! impl Middleware for TimingMiddleware {
//!     fn name(&self) -> &'static str {
//!         "timing"
//!     }
//!
//!     fn process<'a>(
//!         &'a self,
//!         ctx: &'a mut RequestContext,
//!         request: Request,
//!         next: Next<'a>,
//!     ) -> BoxFuture<'a, HandlerResult<Response>> {
//!         Box::pin(async move {
//!             let result = next.run(ctx, request).await;
//!             tracing::debug!(elapsed = ?ctx.elapsed(), "request finished");
//!             result
//!         })
//!     }
//! }
//! ```

use crate::context::RequestContext;
use crate::types::{Request, Response};
use meridian_core::HandlerResult;
use std::future::Future;
use std::pin::Pin;

/// A boxed future returned by middleware stages and handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The core middleware trait.
///
/// # Invariants
///
/// - A stage MUST call `next.run()` exactly once, unless it short-circuits
///   with its own response or failure
/// - A stage MUST NOT swallow failures from downstream stages; only the
///   error formatter converts failures to responses
/// - Stages hold no per-request state; everything request-scoped lives in
///   the [`RequestContext`]
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this middleware stage.
    ///
    /// This name is used for logging and debugging.
    fn name(&self) -> &'static str;

    /// Processes the request through this middleware.
    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, HandlerResult<Response>>;
}

/// Callback to invoke the next middleware or the handler.
///
/// Consumed by `run`, so it can only be called once. A middleware that
/// never calls it short-circuits the pipeline.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

/// Internal representation of the remaining chain.
enum NextInner<'a> {
    /// More middleware to process.
    Chain {
        middleware: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    /// End of chain: invoke the handler.
    Handler(
        Box<
            dyn FnOnce(&mut RequestContext, Request) -> BoxFuture<'static, HandlerResult<Response>>
                + Send
                + 'a,
        >,
    ),
}

impl<'a> Next<'a> {
    /// Creates a `Next` that will invoke the given middleware.
    pub(crate) fn new(middleware: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Chain {
                middleware,
                next: Box::new(next),
            },
        }
    }

    /// Creates a terminal `Next` that invokes the handler.
    pub(crate) fn handler<F>(f: F) -> Self
    where
        F: FnOnce(&mut RequestContext, Request) -> BoxFuture<'static, HandlerResult<Response>>
            + Send
            + 'a,
    {
        Self {
            inner: NextInner::Handler(Box::new(f)),
        }
    }

    /// Invokes the next middleware or handler in the chain.
    pub async fn run(self, ctx: &mut RequestContext, request: Request) -> HandlerResult<Response> {
        match self.inner {
            NextInner::Chain { middleware, next } => middleware.process(ctx, request, *next).await,
            NextInner::Handler(handler) => handler(ctx, request).await,
        }
    }
}

/// A middleware built from a function returning a boxed future.
///
/// Convenient for tests and for small application-side stages that do not
/// warrant a named type. The function may lend the request context to the
/// future it returns.
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a new function-based middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(
            &'a mut RequestContext,
            Request,
            Next<'a>,
        ) -> BoxFuture<'a, HandlerResult<Response>>
        + Send
        + Sync
        + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, HandlerResult<Response>> {
        (self.func)(ctx, request, next)
    }
}
