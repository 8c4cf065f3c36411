//! # Meridian Middleware
//!
//! Fixed-order middleware pipeline enforcing the JSON:API media-type
//! contract and a uniform error-response envelope.
//!
//! Three stages wrap every request handler, always in the same order:
//!
//! ```text
//! Request → ErrorFormatter → Headers → Requirements → Handler
//!                  ↑                                      │
//!                  └──────── failures translated ←────────┘
//! ```
//!
//! | Stage | Middleware       | Purpose                                       |
//! |-------|------------------|-----------------------------------------------|
//! | 1     | Error Formatter  | Convert any failure to the JSON:API envelope  |
//! | 2     | Headers          | Enforce Content-Type / Accept media types     |
//! | 3     | Requirements     | Check handler capabilities before dispatch    |
//!
//! The headers stage short-circuits with a formatted 415/406 response before
//! any business logic runs. The requirements stage fails with a
//! configuration error when a handler lacks a schema capability. The error
//! formatter is the single point where failures become responses: domain
//! errors keep their own status, anything else becomes a generic 400, or is
//! handed back raw when the host application runs in debug/propagate mode.
//!
//! ## Example
//!
//! ```
//! use meridian_middleware::pipeline::{Pipeline, Stage};
//!
//! // Pipeline stages are fixed
//! let stages = Stage::all();
//! assert_eq!(stages.len(), 3);
//! assert_eq!(stages[0].name(), "error_formatter");
//! assert_eq!(stages[2].name(), "method_requirements");
//! ```

#![doc(html_root_url = "https://docs.rs/meridian-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod middleware;
pub mod pipeline;
pub mod stages;
pub mod types;

// Re-export main types at crate root
pub use context::RequestContext;
pub use middleware::{BoxFuture, FnMiddleware, Middleware, Next};
pub use pipeline::{Pipeline, PipelineBuilder, Stage};
pub use types::{Request, Response, ResponseExt, JSONAPI_MEDIA_TYPE};
