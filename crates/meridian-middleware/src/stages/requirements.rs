//! Method requirements middleware.
//!
//! Ensures a handler declares the capabilities its default method logic
//! depends on before the handler runs.
//!
//! # Pipeline Position
//!
//! ```text
//! Request → ErrorFormatter → Headers → [Requirements] → Handler
//! ```
//!
//! Every method except DELETE requires the handler to declare
//! [`Capability::Schema`]: listing, fetching, creating, and updating a
//! resource all serialize through the schema, while deleting one does not.
//!
//! A missing capability is a handler misconfiguration, not a request-input
//! problem. The stage fails with a [`ConfigError`] that travels the
//! unexpected-failure path: re-raised for developer tooling in
//! debug/propagate mode, translated to a generic envelope in production.

use crate::context::RequestContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{Request, Response};
use http::Method;
use meridian_core::{Capability, ConfigError, HandlerResult};

/// Middleware that checks handler capabilities per HTTP method.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementsMiddleware;

impl RequirementsMiddleware {
    /// Creates the method requirements middleware.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for RequirementsMiddleware {
    fn name(&self) -> &'static str {
        "method_requirements"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, HandlerResult<Response>> {
        Box::pin(async move {
            if *request.method() != Method::DELETE
                && !ctx.handler().supports(Capability::Schema)
            {
                let error = ConfigError::missing_schema(ctx.handler().name(), request.method());
                tracing::debug!(
                    request_id = %ctx.request_id(),
                    handler = ctx.handler().name(),
                    method = %request.method(),
                    "handler declares no schema capability"
                );
                return Err(error.into());
            }

            next.run(ctx, request).await
        })
    }
}
