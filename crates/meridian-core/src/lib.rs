//! # Meridian Core
//!
//! Core types for the Meridian JSON:API middleware layer.
//!
//! This crate defines the shared vocabulary the middleware pipeline is built
//! from:
//!
//! - The JSON:API error model ([`ErrorObject`], [`ErrorEnvelope`])
//! - The domain exception type ([`JsonApiError`])
//! - The handler misconfiguration error ([`ConfigError`])
//! - The pipeline failure type ([`HandlerError`]) and the optional
//!   structured-failure interface ([`Failure`])
//! - Ambient application configuration ([`AppConfig`])
//! - The fire-and-forget error reporter abstraction ([`ErrorReporter`])
//! - The handler capability view ([`HandlerProfile`], [`Capability`])
//!
//! None of these types perform I/O. The crate is intentionally small so the
//! middleware crate can be tested without a running host application.

#![doc(html_root_url = "https://docs.rs/meridian-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod envelope;
pub mod error;
pub mod profile;
pub mod report;

// Re-export main types at crate root
pub use config::AppConfig;
pub use envelope::{ErrorEnvelope, ErrorObject, Links, Meta};
pub use error::{ConfigError, Failure, HandlerError, HandlerResult, JsonApiError, OpaqueFailure};
pub use profile::{Capability, HandlerProfile};
pub use report::{ErrorReporter, TracingReporter};
