//! Fixed-order middleware pipeline.
//!
//! All requests flow through the same three stages, wired in an order that
//! cannot be changed by users:
//!
//! 1. **Error Formatter** - wraps the whole chain, converts failures to the
//!    JSON:API envelope
//! 2. **Headers** - enforces the Content-Type / Accept media-type contract
//! 3. **Requirements** - checks handler capabilities before dispatch
//!
//! The pipeline is configured once from an [`AppConfig`] (plus an optional
//! error reporter) and then processes any number of concurrent requests;
//! the stages themselves hold no per-request state.

use crate::context::RequestContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::stages::{ErrorFormatterMiddleware, HeadersMiddleware, RequirementsMiddleware};
use crate::types::{Request, Response};
use meridian_core::{AppConfig, ErrorReporter, HandlerResult};
use std::sync::Arc;

/// A type-erased middleware stage.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// The fixed-order middleware pipeline.
///
/// # Example
///
/// ```ignore
/// use meridian_core::AppConfig;
/// use meridian_middleware::pipeline::Pipeline;
///
/// let pipeline = Pipeline::builder(AppConfig::default()).build();
/// let result = pipeline.process(ctx, request, handler).await;
/// ```
pub struct Pipeline {
    /// The stages, outermost first.
    stages: Vec<BoxedMiddleware>,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration and no reporter.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self::builder(config).build()
    }

    /// Creates a pipeline builder.
    #[must_use]
    pub fn builder(config: AppConfig) -> PipelineBuilder {
        PipelineBuilder::new(config)
    }

    /// Processes a request through the entire pipeline.
    ///
    /// The request flows through the header and requirements guards, then to
    /// the handler; the error formatter sees the combined outcome. An `Err`
    /// escapes only when debug/propagate mode re-raises an unexpected
    /// failure.
    pub async fn process<H>(
        &self,
        mut ctx: RequestContext,
        request: Request,
        handler: H,
    ) -> HandlerResult<Response>
    where
        H: FnOnce(&mut RequestContext, Request) -> BoxFuture<'static, HandlerResult<Response>>
            + Send
            + 'static,
    {
        let next = self.build_chain(handler);
        next.run(&mut ctx, request).await
    }

    /// Builds the middleware chain for a request, innermost stage last.
    fn build_chain<'a, H>(&'a self, handler: H) -> Next<'a>
    where
        H: FnOnce(&mut RequestContext, Request) -> BoxFuture<'static, HandlerResult<Response>>
            + Send
            + 'a,
    {
        let mut next = Next::handler(handler);
        for middleware in self.stages.iter().rev() {
            next = Next::new(middleware.as_ref(), next);
        }
        next
    }

    /// Returns the names of all stages in order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|mw| mw.name()).collect()
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

/// Builder for constructing a [`Pipeline`].
///
/// The stage order is fixed; the builder only configures the error
/// formatter's reporter.
pub struct PipelineBuilder {
    config: AppConfig,
    reporter: Option<Arc<dyn ErrorReporter>>,
}

impl PipelineBuilder {
    /// Creates a builder with the given host-application configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            reporter: None,
        }
    }

    /// Attaches a fire-and-forget error reporter to the error formatter.
    #[must_use]
    pub fn reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Builds the pipeline with its fixed stage order.
    #[must_use]
    pub fn build(self) -> Pipeline {
        let mut formatter = ErrorFormatterMiddleware::new(self.config);
        if let Some(reporter) = self.reporter {
            formatter = formatter.with_reporter(reporter);
        }

        Pipeline {
            stages: vec![
                Arc::new(formatter),
                Arc::new(HeadersMiddleware::new()),
                Arc::new(RequirementsMiddleware::new()),
            ],
        }
    }
}

/// The fixed pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Stage 1: failure-to-envelope translation (wraps the whole chain).
    ErrorFormatter = 1,
    /// Stage 2: Content-Type / Accept enforcement.
    Headers = 2,
    /// Stage 3: handler capability check.
    Requirements = 3,
}

impl Stage {
    /// Returns the stage name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ErrorFormatter => "error_formatter",
            Self::Headers => "check_headers",
            Self::Requirements => "method_requirements",
        }
    }

    /// Returns all stages in order.
    #[must_use]
    pub const fn all() -> [Stage; 3] {
        [Self::ErrorFormatter, Self::Headers, Self::Requirements]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_fixed() {
        let stages = Stage::all();
        assert_eq!(stages.len(), 3);
        assert_eq!(stages[0].name(), "error_formatter");
        assert_eq!(stages[1].name(), "check_headers");
        assert_eq!(stages[2].name(), "method_requirements");
    }

    #[test]
    fn test_pipeline_wires_all_stages() {
        let pipeline = Pipeline::new(AppConfig::default());
        assert_eq!(pipeline.stage_count(), 3);
        assert_eq!(
            pipeline.stage_names(),
            vec!["error_formatter", "check_headers", "method_requirements"]
        );
    }

    #[test]
    fn test_builder_with_reporter() {
        let pipeline = Pipeline::builder(AppConfig::default())
            .reporter(Arc::new(meridian_core::TracingReporter::new()))
            .build();
        assert_eq!(pipeline.stage_count(), 3);
    }
}
