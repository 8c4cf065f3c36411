//! Handler capability profile.
//!
//! A handler declares up front which capabilities it supports instead of the
//! pipeline probing the handler object at request time. The requirements
//! stage checks capability membership before the handler's default method
//! logic runs.

/// A named capability a handler may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Capability {
    /// The handler has a schema configured for serializing and validating
    /// resource objects. Required for every method except DELETE.
    Schema,
}

/// The capability view over the handler a request dispatches to.
///
/// Carries the handler's type name (used in configuration-error messages)
/// and the set of capabilities it declares.
///
/// # Example
///
/// ```
/// use meridian_core::{Capability, HandlerProfile};
///
/// struct PersonDetail;
///
/// let profile = HandlerProfile::of::<PersonDetail>().with_capability(Capability::Schema);
/// assert_eq!(profile.name(), "PersonDetail");
/// assert!(profile.supports(Capability::Schema));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerProfile {
    name: String,
    capabilities: Vec<Capability>,
}

impl HandlerProfile {
    /// Creates a profile named after the type `T`.
    ///
    /// Only the final path segment of the type name is kept, so
    /// `my_api::people::PersonDetail` becomes `PersonDetail`.
    #[must_use]
    pub fn of<T>() -> Self {
        let full = std::any::type_name::<T>();
        let name = full.rsplit("::").next().unwrap_or(full);
        Self::named(name)
    }

    /// Creates a profile with an explicit handler name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: Vec::new(),
        }
    }

    /// Declares a capability.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Returns the handler's type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the handler declares the given capability.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PersonList;

    #[test]
    fn test_profile_name_from_type() {
        let profile = HandlerProfile::of::<PersonList>();
        assert_eq!(profile.name(), "PersonList");
    }

    #[test]
    fn test_capability_membership() {
        let bare = HandlerProfile::named("PersonDetail");
        assert!(!bare.supports(Capability::Schema));

        let with_schema = bare.with_capability(Capability::Schema);
        assert!(with_schema.supports(Capability::Schema));
    }

    #[test]
    fn test_duplicate_capability_is_idempotent() {
        let profile = HandlerProfile::named("PersonDetail")
            .with_capability(Capability::Schema)
            .with_capability(Capability::Schema);
        assert!(profile.supports(Capability::Schema));
    }
}
