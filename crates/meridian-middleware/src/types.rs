//! Common types used throughout the middleware pipeline.
//!
//! This module defines the HTTP request/response aliases, the accepted
//! JSON:API media-type set, and helpers for building envelope responses.

use bytes::Bytes;
use http_body_util::Full;
use meridian_core::ErrorEnvelope;

/// The HTTP request type used in the middleware pipeline.
///
/// This is a standard `http::Request` with a `Full<Bytes>` body.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type used in the middleware pipeline.
///
/// This is a standard `http::Response` with a `Full<Bytes>` body.
pub type Response = http::Response<Full<Bytes>>;

/// The JSON:API media type, used both for negotiation and on every error
/// response.
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Media types accepted for `Content-Type` and `Accept` negotiation.
pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = [JSONAPI_MEDIA_TYPE, "application/json"];

/// Returns true if `value` is exactly one of the accepted media types.
#[must_use]
pub fn is_accepted_media_type(value: &str) -> bool {
    ACCEPTED_MEDIA_TYPES.contains(&value)
}

/// Extension trait for building JSON:API error responses.
pub trait ResponseExt {
    /// Renders an error envelope with the given status and the
    /// `application/vnd.api+json` content type.
    fn jsonapi_error(status: http::StatusCode, envelope: &ErrorEnvelope) -> Response;
}

impl ResponseExt for Response {
    fn jsonapi_error(status: http::StatusCode, envelope: &ErrorEnvelope) -> Response {
        let body = envelope
            .to_json()
            .expect("error envelope serialization cannot fail");

        http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, JSONAPI_MEDIA_TYPE)
            .body(Full::new(Bytes::from(body)))
            .expect("failed to build JSON:API error response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use meridian_core::ErrorObject;

    #[test]
    fn test_accepted_media_types() {
        assert!(is_accepted_media_type("application/vnd.api+json"));
        assert!(is_accepted_media_type("application/json"));
        assert!(!is_accepted_media_type("text/html"));
        assert!(!is_accepted_media_type("application/vnd.api+json; charset=utf-8"));
    }

    #[test]
    fn test_jsonapi_error_response() {
        let envelope = ErrorEnvelope::one(
            ErrorObject::new("Content-Type header must be application/vnd.api+json", "415")
                .with_title("Invalid request header"),
        );
        let response = Response::jsonapi_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, &envelope);

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).unwrap(),
            JSONAPI_MEDIA_TYPE
        );
    }
}
