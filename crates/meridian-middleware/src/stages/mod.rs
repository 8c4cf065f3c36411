//! The three fixed middleware stages.
//!
//! Stages execute in a fixed order and cannot be disabled or reordered:
//!
//! 1. [`error_formatter`] - Convert any failure to the JSON:API envelope
//! 2. [`headers`] - Enforce the Content-Type / Accept media-type contract
//! 3. [`requirements`] - Check handler capabilities before dispatch
//!
//! The error formatter is listed first because it wraps the whole chain; it
//! is the last stage to see the outcome of a request.

pub mod error_formatter;
pub mod headers;
pub mod requirements;

// Re-export main types
pub use error_formatter::{ErrorFormatterMiddleware, TranslatedError};
pub use headers::HeadersMiddleware;
pub use requirements::RequirementsMiddleware;
