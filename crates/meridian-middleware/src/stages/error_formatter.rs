//! Error formatter middleware.
//!
//! The single point where failures become responses. Wraps the whole chain
//! and guarantees that every failing request receives a well-formed JSON:API
//! error envelope with the correct status and content type, except when
//! the host application runs in debug/propagate mode, where unexpected
//! failures are handed back raw for developer tooling.
//!
//! # Pipeline Position
//!
//! ```text
//! Request → [ErrorFormatter] → Headers → Requirements → Handler
//! ```
//!
//! # Translation rules
//!
//! - A successful response passes through untouched.
//! - A [`JsonApiError`] becomes a single-element envelope with the error's
//!   own status.
//! - Any other failure is reported to the configured [`ErrorReporter`]
//!   (best-effort, panic-isolated), then translated using the members it
//!   exposes through [`Failure`](meridian_core::Failure): detail falls back
//!   to the configured global error message, then to the failure's string
//!   representation; status defaults to 400.

use crate::context::RequestContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{Request, Response, ResponseExt};
use http::StatusCode;
use meridian_core::{
    AppConfig, ErrorEnvelope, ErrorReporter, Failure, HandlerError, HandlerResult, JsonApiError,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Middleware that translates failures into JSON:API error responses.
#[derive(Clone)]
pub struct ErrorFormatterMiddleware {
    config: AppConfig,
    reporter: Option<Arc<dyn ErrorReporter>>,
}

impl std::fmt::Debug for ErrorFormatterMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorFormatterMiddleware")
            .field("config", &self.config)
            .field("reporter", &self.reporter.is_some())
            .finish()
    }
}

/// What the formatter translated, recorded in the request context.
#[derive(Debug, Clone)]
pub struct TranslatedError {
    /// The status of the formatted response.
    pub status: StatusCode,
    /// The detail rendered into the envelope.
    pub detail: String,
    /// True when the failure was a domain error rather than an unexpected
    /// one.
    pub was_domain: bool,
}

impl ErrorFormatterMiddleware {
    /// Creates the formatter with the given host-application configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            reporter: None,
        }
    }

    /// Attaches a fire-and-forget error reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Forwards a failure to the reporter, if one is configured.
    ///
    /// The reporter contract forbids panicking, but a misbehaving reporter
    /// must not take the response down with it: panics are caught and
    /// logged.
    fn report(&self, failure: &dyn Failure) {
        let Some(reporter) = &self.reporter else {
            return;
        };
        if catch_unwind(AssertUnwindSafe(|| reporter.capture(failure))).is_err() {
            tracing::warn!("error reporter panicked while capturing a failure");
        }
    }

    /// Renders a domain error as an envelope response and records what was
    /// translated.
    fn respond(ctx: &mut RequestContext, error: &JsonApiError, was_domain: bool) -> Response {
        let status = error.status_code();
        ctx.set_extension(TranslatedError {
            status,
            detail: error.detail().to_string(),
            was_domain,
        });
        Response::jsonapi_error(status, &ErrorEnvelope::one(error.to_error_object()))
    }
}

impl Middleware for ErrorFormatterMiddleware {
    fn name(&self) -> &'static str {
        "error_formatter"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, HandlerResult<Response>> {
        Box::pin(async move {
            match next.run(ctx, request).await {
                Ok(response) => Ok(response),
                Err(HandlerError::JsonApi(error)) => {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        status = error.status(),
                        "formatting domain error"
                    );
                    Ok(Self::respond(ctx, &error, true))
                }
                Err(HandlerError::Unexpected(failure)) => {
                    if self.config.should_propagate() {
                        return Err(HandlerError::Unexpected(failure));
                    }

                    self.report(failure.as_ref());

                    let fallback = self
                        .config
                        .global_error_message()
                        .map_or_else(|| failure.to_string(), str::to_string);
                    let error = JsonApiError::from_failure(failure.as_ref(), fallback);
                    tracing::error!(
                        request_id = %ctx.request_id(),
                        error = %failure,
                        status = error.status(),
                        "translated unexpected failure"
                    );
                    Ok(Self::respond(ctx, &error, false))
                }
            }
        })
    }
}
