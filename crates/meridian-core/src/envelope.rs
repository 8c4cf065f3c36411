//! JSON:API error envelope types.
//!
//! Every error response leaving the pipeline is a single top-level envelope:
//!
//! ```json
//! {
//!   "errors": [
//!     {
//!       "source": "",
//!       "detail": "Content-Type header must be application/vnd.api+json",
//!       "title": "Invalid request header",
//!       "status": "415"
//!     }
//!   ]
//! }
//! ```
//!
//! Optional members (`title`, `code`, `id`, `links`, `meta`) are omitted from
//! the serialized form when unset, so rendering the same error twice produces
//! byte-identical output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Related links attached to an error object.
pub type Links = BTreeMap<String, String>;

/// Free-form metadata attached to an error object.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// A single structured error, serialized as one entry of the `errors` array.
///
/// `status` must hold a valid 3-digit HTTP status string when rendered;
/// [`crate::JsonApiError`] guarantees this by defaulting to `"400"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Pointer to the offending part of the input. May be empty.
    #[serde(default)]
    pub source: String,

    /// Human-readable description of the error.
    pub detail: String,

    /// Short category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// HTTP status code as a string (e.g. `"415"`).
    pub status: String,

    /// Application-specific error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Unique identifier for this occurrence of the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Links related to the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,

    /// Non-standard metadata about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl ErrorObject {
    /// Creates an error object with the required members only.
    #[must_use]
    pub fn new(detail: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            source: String::new(),
            detail: detail.into(),
            title: None,
            status: status.into(),
            code: None,
            id: None,
            links: None,
            meta: None,
        }
    }

    /// Sets the `title` member.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the `source` member.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// The top-level error response body: an ordered, non-empty list of
/// [`ErrorObject`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The errors, in the order they were recorded.
    pub errors: Vec<ErrorObject>,
}

impl ErrorEnvelope {
    /// Wraps a single error in an envelope.
    #[must_use]
    pub fn one(error: ErrorObject) -> Self {
        Self { errors: vec![error] }
    }

    /// Wraps an ordered sequence of errors in an envelope.
    ///
    /// The envelope invariant requires at least one error; an empty iterator
    /// here is a caller bug and will produce an invalid body.
    #[must_use]
    pub fn from_errors(errors: impl IntoIterator<Item = ErrorObject>) -> Self {
        Self {
            errors: errors.into_iter().collect(),
        }
    }

    /// Serializes the envelope to a JSON byte vector.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
