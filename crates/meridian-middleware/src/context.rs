//! Per-request context.
//!
//! The [`RequestContext`] carries the handler's capability profile and
//! request-scoped bookkeeping through the middleware chain. It is created
//! once per inbound request and never shared between requests.

use meridian_core::HandlerProfile;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::time::Instant;
use uuid::Uuid;

/// Context that flows through the middleware pipeline.
///
/// Stages read the handler profile (the requirements stage) and may record
/// typed extension data for later stages or for the caller (the error
/// formatter records what it translated).
///
/// # Example
///
/// ```
/// use meridian_core::{Capability, HandlerProfile};
/// use meridian_middleware::context::RequestContext;
///
/// let profile = HandlerProfile::named("PersonDetail").with_capability(Capability::Schema);
/// let ctx = RequestContext::new(profile);
/// assert_eq!(ctx.handler().name(), "PersonDetail");
/// ```
pub struct RequestContext {
    /// Unique identifier for this request.
    request_id: Uuid,

    /// Capability view over the handler this request dispatches to.
    handler: HandlerProfile,

    /// When the request started processing.
    started_at: Instant,

    /// Type-erased extension data recorded by stages.
    extensions: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("handler", &self.handler)
            .field("extensions", &self.extensions.len())
            .finish_non_exhaustive()
    }
}

impl RequestContext {
    /// Creates a context for a request dispatching to the given handler.
    #[must_use]
    pub fn new(handler: HandlerProfile) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            handler,
            started_at: Instant::now(),
            extensions: HashMap::new(),
        }
    }

    /// Creates a context with a specific request ID.
    ///
    /// Useful when the ID was assigned by an upstream service.
    #[must_use]
    pub fn with_request_id(handler: HandlerProfile, request_id: Uuid) -> Self {
        Self {
            request_id,
            handler,
            started_at: Instant::now(),
            extensions: HashMap::new(),
        }
    }

    /// Returns the request ID.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Returns the handler profile.
    #[must_use]
    pub fn handler(&self) -> &HandlerProfile {
        &self.handler
    }

    /// Returns when the request started processing.
    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Returns the elapsed time since the request started.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Stores a typed extension value.
    pub fn set_extension<T: Send + Sync + 'static>(&mut self, value: T) {
        self.extensions.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Retrieves a typed extension value, if one was stored.
    #[must_use]
    pub fn get_extension<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Removes and returns a typed extension value.
    pub fn remove_extension<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.extensions
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|b| *b)
    }

    /// Checks if an extension of the given type exists.
    #[must_use]
    pub fn has_extension<T: Send + Sync + 'static>(&self) -> bool {
        self.extensions.contains_key(&TypeId::of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::Capability;

    #[test]
    fn test_new_context_carries_handler_profile() {
        let profile = HandlerProfile::named("PersonList").with_capability(Capability::Schema);
        let ctx = RequestContext::new(profile);

        assert_eq!(ctx.handler().name(), "PersonList");
        assert!(ctx.handler().supports(Capability::Schema));
    }

    #[test]
    fn test_with_request_id() {
        let id = Uuid::now_v7();
        let ctx = RequestContext::with_request_id(HandlerProfile::named("PersonList"), id);
        assert_eq!(ctx.request_id(), id);
    }

    #[test]
    fn test_extensions() {
        #[derive(Debug, Clone, PartialEq)]
        struct Marker {
            value: i32,
        }

        let mut ctx = RequestContext::new(HandlerProfile::named("PersonList"));

        assert!(!ctx.has_extension::<Marker>());
        ctx.set_extension(Marker { value: 42 });
        assert_eq!(ctx.get_extension::<Marker>(), Some(&Marker { value: 42 }));

        let removed = ctx.remove_extension::<Marker>();
        assert_eq!(removed, Some(Marker { value: 42 }));
        assert!(!ctx.has_extension::<Marker>());
    }

    #[test]
    fn test_elapsed_time() {
        let ctx = RequestContext::new(HandlerProfile::named("PersonList"));
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(ctx.elapsed() >= std::time::Duration::from_millis(5));
    }
}
