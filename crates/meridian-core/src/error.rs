//! Error types for the Meridian pipeline.
//!
//! The pipeline distinguishes three kinds of failure:
//!
//! - [`JsonApiError`]: an expected, user-facing domain error carrying its own
//!   status and detail. Always converted to the standard envelope.
//! - [`ConfigError`]: a handler misconfiguration detected before dispatch.
//!   A programmer error, not a request-input error: it travels the
//!   *unexpected* path below, never the domain path.
//! - Any other failure is wrapped as an unexpected failure and either
//!   translated to a generic envelope (production) or handed back raw
//!   (debug/propagate mode).
//!
//! Failure values may optionally implement [`Failure`] to expose structured
//! members (`detail`, `status`, `code`, …) that the error formatter copies
//! into the envelope. Types that don't care inherit the all-`None` defaults.

use crate::envelope::{ErrorObject, Links, Meta};
use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Result type used by handlers and middleware stages.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// The default status for a domain error that does not set one.
const DEFAULT_STATUS: &str = "400";

/// An expected, user-facing JSON:API error.
///
/// Constructed at the point a domain rule is violated, propagated up the
/// call stack, and consumed exactly once by the error formatter, which turns
/// it into a single-element [`crate::ErrorEnvelope`].
///
/// # Example
///
/// ```
/// use meridian_core::JsonApiError;
///
/// let err = JsonApiError::new("Person not found").with_status("404");
/// assert_eq!(err.status(), "404");
/// assert_eq!(err.status_code(), http::StatusCode::NOT_FOUND);
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{detail}")]
pub struct JsonApiError {
    detail: String,
    // Named to avoid thiserror treating this as the error's cause.
    source_ptr: String,
    title: Option<String>,
    status: String,
    code: Option<String>,
    id: Option<String>,
    links: Option<Links>,
    meta: Option<Meta>,
}

impl JsonApiError {
    /// Creates a domain error with the given detail and the default 400
    /// status.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            source_ptr: String::new(),
            title: None,
            status: DEFAULT_STATUS.to_string(),
            code: None,
            id: None,
            links: None,
            meta: None,
        }
    }

    /// Sets the source pointer.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_ptr = source.into();
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the HTTP status string (e.g. `"404"`).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the application error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the unique error id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the related links.
    #[must_use]
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }

    /// Sets the metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Returns the human-readable detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Returns the status string.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Parses the status string into an [`StatusCode`].
    ///
    /// An unparseable status falls back to 400, the same default applied
    /// when no status is set at all.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_bytes(self.status.as_bytes()).unwrap_or(StatusCode::BAD_REQUEST)
    }

    /// Converts this error into an envelope entry.
    #[must_use]
    pub fn to_error_object(&self) -> ErrorObject {
        ErrorObject {
            source: self.source_ptr.clone(),
            detail: self.detail.clone(),
            title: self.title.clone(),
            status: self.status.clone(),
            code: self.code.clone(),
            id: self.id.clone(),
            links: self.links.clone(),
            meta: self.meta.clone(),
        }
    }

    /// Builds a domain error from a structured failure's members.
    ///
    /// Members the failure does not expose are left at their defaults;
    /// `detail` falls back to `fallback_detail` when the failure exposes
    /// none.
    #[must_use]
    pub fn from_failure(failure: &dyn Failure, fallback_detail: impl Into<String>) -> Self {
        let mut err = Self::new(failure.detail().unwrap_or_else(|| fallback_detail.into()));
        if let Some(source) = failure.source_pointer() {
            err = err.with_source(source);
        }
        if let Some(title) = failure.title() {
            err = err.with_title(title);
        }
        if let Some(status) = failure.status() {
            err = err.with_status(status);
        }
        if let Some(code) = failure.code() {
            err = err.with_code(code);
        }
        if let Some(id) = failure.error_id() {
            err = err.with_id(id);
        }
        if let Some(links) = failure.links() {
            err = err.with_links(links);
        }
        if let Some(meta) = failure.meta() {
            err = err.with_meta(meta);
        }
        err
    }
}

/// Handler misconfiguration detected by the requirements stage.
///
/// The message mirrors the capability check wording:
/// `You must provide a schema class in PersonDetail to get access to the
/// default get method`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("You must provide {requirement} in {handler} to get access to the default {method} method")]
pub struct ConfigError {
    handler: String,
    method: String,
    requirement: &'static str,
}

impl ConfigError {
    /// A handler that exposes no schema capability.
    ///
    /// The method name is lower-cased in the rendered message.
    #[must_use]
    pub fn missing_schema(handler: impl Into<String>, method: &http::Method) -> Self {
        Self {
            handler: handler.into(),
            method: method.as_str().to_ascii_lowercase(),
            requirement: "a schema class",
        }
    }

    /// Returns the handler type name the error refers to.
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }
}

// ConfigError deliberately exposes no structured members: it is translated
// only through the generic unexpected-failure path, status 400, detail equal
// to its rendered message.
impl Failure for ConfigError {}

/// Optional structured-error interface for arbitrary failures.
///
/// The error formatter copies any member a failure exposes into the
/// envelope; every accessor defaults to `None`, so implementors override
/// only what they have. This replaces attribute probing on unknown error
/// values with an explicit capability check.
///
/// # Example
///
/// ```
/// use meridian_core::Failure;
/// use thiserror::Error;
///
/// #[derive(Error, Debug)]
/// #[error("quota exhausted")]
/// struct QuotaError;
///
/// impl Failure for QuotaError {
///     fn status(&self) -> Option<String> {
///         Some("429".to_string())
///     }
/// }
/// ```
pub trait Failure: std::error::Error + Send + Sync + 'static {
    /// Human-readable detail, if the failure carries one.
    fn detail(&self) -> Option<String> {
        None
    }

    /// Pointer to the offending part of the input.
    fn source_pointer(&self) -> Option<String> {
        None
    }

    /// Short category label.
    fn title(&self) -> Option<String> {
        None
    }

    /// HTTP status string (e.g. `"429"`).
    fn status(&self) -> Option<String> {
        None
    }

    /// Application error code.
    fn code(&self) -> Option<String> {
        None
    }

    /// Unique identifier for this error occurrence.
    fn error_id(&self) -> Option<String> {
        None
    }

    /// Links related to the error.
    fn links(&self) -> Option<Links> {
        None
    }

    /// Free-form metadata.
    fn meta(&self) -> Option<Meta> {
        None
    }
}

/// An arbitrary failure with no structured members.
///
/// Wraps any error that enters the pipeline without implementing
/// [`Failure`]; the formatter falls back to its string representation.
pub struct OpaqueFailure(anyhow::Error);

impl OpaqueFailure {
    /// Wraps an arbitrary error.
    #[must_use]
    pub fn new(error: anyhow::Error) -> Self {
        Self(error)
    }
}

impl fmt::Debug for OpaqueFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for OpaqueFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for OpaqueFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl Failure for OpaqueFailure {}

/// A failure flowing out of a handler or middleware stage.
#[derive(Debug)]
pub enum HandlerError {
    /// An expected domain error with explicit status and detail.
    JsonApi(JsonApiError),
    /// Anything else, including configuration errors.
    Unexpected(Box<dyn Failure>),
}

impl HandlerError {
    /// Wraps a structured failure.
    #[must_use]
    pub fn structured<F: Failure>(failure: F) -> Self {
        Self::Unexpected(Box::new(failure))
    }

    /// Wraps an arbitrary error with no structured members.
    #[must_use]
    pub fn unexpected(error: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected(Box::new(OpaqueFailure::new(error.into())))
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonApi(e) => fmt::Display::fmt(e, f),
            Self::Unexpected(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::JsonApi(e) => Some(e),
            Self::Unexpected(e) => e.source(),
        }
    }
}

impl From<JsonApiError> for HandlerError {
    fn from(err: JsonApiError) -> Self {
        Self::JsonApi(err)
    }
}

impl From<ConfigError> for HandlerError {
    fn from(err: ConfigError) -> Self {
        Self::structured(err)
    }
}

impl From<anyhow::Error> for HandlerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Unexpected(Box::new(OpaqueFailure::new(err)))
    }
}
