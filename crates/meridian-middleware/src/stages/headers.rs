//! Header negotiation middleware.
//!
//! Rejects requests whose `Content-Type` or `Accept` headers do not conform
//! to the JSON:API media-type contract before any business logic runs.
//!
//! # Pipeline Position
//!
//! ```text
//! Request → ErrorFormatter → [Headers] → Requirements → Handler
//! ```
//!
//! # Checks
//!
//! - **POST / PATCH**: at least one `Content-Type` header value must be
//!   exactly `application/vnd.api+json` or `application/json`. Otherwise the
//!   request is rejected with a formatted 415 envelope.
//! - **Any method with `Accept`**: the comma-separated candidates are
//!   scanned in order. An exact accepted-media-type match ends the scan and
//!   the request passes. A candidate that carries `application/vnd.api+json`
//!   with media-type parameters marks the request for rejection; if the scan
//!   ends with that mark set, the request is rejected with a 406 envelope.
//!   Arbitrary other Accept values (wildcards, unrelated types) pass: this
//!   is a deliberately narrow check, not full content negotiation.
//!
//! Rejections short-circuit the chain with a ready response; they never
//! reach the error formatter.

use crate::context::RequestContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{is_accepted_media_type, Request, Response, ResponseExt, JSONAPI_MEDIA_TYPE};
use http::{header, Method, StatusCode};
use meridian_core::{ErrorEnvelope, ErrorObject, HandlerResult};

const INVALID_HEADER_TITLE: &str = "Invalid request header";
const CONTENT_TYPE_DETAIL: &str = "Content-Type header must be application/vnd.api+json";
const ACCEPT_DETAIL: &str =
    "Accept header must be application/vnd.api+json without media type parameters";

/// Middleware that enforces the JSON:API media-type contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadersMiddleware;

impl HeadersMiddleware {
    /// Creates the header negotiation middleware.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns true if any `Content-Type` value on the request is an
    /// accepted media type. Repeated header values are each considered a
    /// candidate.
    fn content_type_is_accepted(request: &Request) -> bool {
        request
            .headers()
            .get_all(header::CONTENT_TYPE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|value| is_accepted_media_type(value.trim()))
    }

    /// Scans the `Accept` header candidates in order.
    ///
    /// Returns true if the request violates the Accept contract. An exact
    /// match anywhere ends the scan immediately and clears the violation,
    /// even if a parameterized candidate would have followed.
    fn accept_is_violated(value: &str) -> bool {
        let mut violation = false;
        for candidate in value.split(',') {
            let candidate = candidate.trim();
            if is_accepted_media_type(candidate) {
                violation = false;
                break;
            }
            // Exact matches broke out above, so containment here means the
            // candidate carries media-type parameters.
            if candidate.contains(JSONAPI_MEDIA_TYPE) {
                violation = true;
            }
        }
        violation
    }

    fn invalid_header_response(status: StatusCode, detail: &str) -> Response {
        let envelope = ErrorEnvelope::one(
            ErrorObject::new(detail, status.as_u16().to_string()).with_title(INVALID_HEADER_TITLE),
        );
        Response::jsonapi_error(status, &envelope)
    }
}

impl Middleware for HeadersMiddleware {
    fn name(&self) -> &'static str {
        "check_headers"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, HandlerResult<Response>> {
        Box::pin(async move {
            if matches!(*request.method(), Method::POST | Method::PATCH)
                && !Self::content_type_is_accepted(&request)
            {
                tracing::debug!(
                    request_id = %ctx.request_id(),
                    method = %request.method(),
                    "rejecting request with unacceptable Content-Type"
                );
                return Ok(Self::invalid_header_response(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    CONTENT_TYPE_DETAIL,
                ));
            }

            if let Some(accept) = request.headers().get(header::ACCEPT) {
                if accept.to_str().is_ok_and(Self::accept_is_violated) {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        "rejecting request with parameterized JSON:API Accept header"
                    );
                    return Ok(Self::invalid_header_response(
                        StatusCode::NOT_ACCEPTABLE,
                        ACCEPT_DETAIL,
                    ));
                }
            }

            next.run(ctx, request).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::Request as HttpRequest;
    use http_body_util::Full;
    use meridian_core::HandlerProfile;

    fn request(method: &str, headers: &[(&str, &str)]) -> Request {
        let mut builder = HttpRequest::builder().method(method).uri("/people");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Full::new(Bytes::new())).unwrap()
    }

    async fn run(req: Request) -> HandlerResult<Response> {
        let middleware = HeadersMiddleware::new();
        let mut ctx = RequestContext::new(HandlerProfile::named("PersonList"));
        let next = Next::handler(|_ctx, _req| {
            Box::pin(async {
                Ok(http::Response::builder()
                    .status(StatusCode::OK)
                    .body(Full::new(Bytes::new()))
                    .unwrap())
            })
        });
        middleware.process(&mut ctx, req, next).await
    }

    #[test]
    fn test_middleware_name() {
        assert_eq!(HeadersMiddleware::new().name(), "check_headers");
    }

    #[tokio::test]
    async fn test_post_without_content_type_is_415() {
        let response = run(request("POST", &[])).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            JSONAPI_MEDIA_TYPE
        );
    }

    #[tokio::test]
    async fn test_patch_with_wrong_content_type_is_415() {
        let response = run(request("PATCH", &[("content-type", "text/plain")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_post_with_jsonapi_content_type_passes() {
        let response = run(request(
            "POST",
            &[("content-type", "application/vnd.api+json")],
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_post_with_plain_json_content_type_passes() {
        let response = run(request("POST", &[("content-type", "application/json")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_repeated_content_type_values_are_candidates() {
        let response = run(request(
            "POST",
            &[
                ("content-type", "text/plain"),
                ("content-type", "application/json"),
            ],
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_skips_content_type_check() {
        let response = run(request("GET", &[("content-type", "text/plain")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_exact_accept_passes() {
        let response = run(request("GET", &[("accept", "application/vnd.api+json")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_parameterized_accept_is_406() {
        let response = run(request(
            "GET",
            &[("accept", "application/vnd.api+json; charset=utf-8")],
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn test_exact_match_among_candidates_short_circuits() {
        // The exact match appears first, so the scan never reaches the
        // parameterized candidate.
        let response = run(request(
            "GET",
            &[(
                "accept",
                "application/vnd.api+json, application/vnd.api+json; q=0.9",
            )],
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_exact_match_clears_earlier_violation() {
        let response = run(request(
            "GET",
            &[(
                "accept",
                "application/vnd.api+json; q=0.9, application/vnd.api+json",
            )],
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unrelated_accept_values_pass() {
        let response = run(request("GET", &[("accept", "text/html, */*")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_accept_with_html_and_exact_match_passes() {
        let response = run(request(
            "GET",
            &[("accept", "application/vnd.api+json, text/html")],
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
