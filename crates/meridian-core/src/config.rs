//! Ambient application configuration.
//!
//! The middleware chain receives its configuration explicitly at
//! construction rather than reading process-wide state, which keeps the
//! error formatter unit-testable without a running host application.

/// Host-application configuration read by the error formatter.
///
/// Effectively immutable for the process lifetime; cheap to clone into each
/// middleware stage.
///
/// # Example
///
/// ```
/// use meridian_core::AppConfig;
///
/// let config = AppConfig::default()
///     .with_global_error_message("Something went wrong");
/// assert!(!config.should_propagate());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Debug/development mode: unexpected failures are handed back raw.
    debug: bool,
    /// Propagate unexpected failures even outside debug mode.
    propagate_errors: bool,
    /// Replaces the detail of translated unexpected failures when set.
    global_error_message: Option<String>,
}

impl AppConfig {
    /// Production defaults: no debug, no propagation, no global message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables debug mode.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enables or disables unconditional failure propagation.
    #[must_use]
    pub fn with_propagate_errors(mut self, propagate: bool) -> Self {
        self.propagate_errors = propagate;
        self
    }

    /// Sets the global error message used for translated unexpected
    /// failures that expose no detail of their own.
    #[must_use]
    pub fn with_global_error_message(mut self, message: impl Into<String>) -> Self {
        self.global_error_message = Some(message.into());
        self
    }

    /// Returns true if debug mode is on.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns true when unexpected failures should be handed back raw
    /// instead of translated.
    #[must_use]
    pub fn should_propagate(&self) -> bool {
        self.debug || self.propagate_errors
    }

    /// Returns the global error message, if configured.
    #[must_use]
    pub fn global_error_message(&self) -> Option<&str> {
        self.global_error_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_production_mode() {
        let config = AppConfig::new();
        assert!(!config.debug());
        assert!(!config.should_propagate());
        assert!(config.global_error_message().is_none());
    }

    #[test]
    fn test_debug_implies_propagation() {
        let config = AppConfig::new().with_debug(true);
        assert!(config.should_propagate());
    }

    #[test]
    fn test_propagate_without_debug() {
        let config = AppConfig::new().with_propagate_errors(true);
        assert!(!config.debug());
        assert!(config.should_propagate());
    }

    #[test]
    fn test_global_error_message() {
        let config = AppConfig::new().with_global_error_message("Something went wrong");
        assert_eq!(config.global_error_message(), Some("Something went wrong"));
    }
}
