//! Tracking server configuration
//!
//! The tracking endpoint comes from one required environment variable,
//! [`TRACKING_URI_VAR`]. Absence is a hard configuration failure: the crate
//! has no default endpoint and must never silently log to a local fallback.

use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the tracking server address.
pub const TRACKING_URI_VAR: &str = "MLFLOW_TRACKING_URI";

/// Default timeout applied to every tracking server round-trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a tracking server.
///
/// Configuration is an explicit value passed to
/// [`TrackingClient::new`](crate::client::TrackingClient::new) rather than
/// process-global state, so run logging stays testable and free of hidden
/// cross-call coupling. Building a config twice from the same environment
/// simply reapplies the same values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingConfig {
    tracking_uri: String,
    timeout: Duration,
}

impl TrackingConfig {
    /// Create a config for an explicit tracking URI.
    ///
    /// A trailing `/` is trimmed so endpoint joining and link formatting
    /// are stable regardless of how the URI was written.
    #[must_use]
    pub fn new(tracking_uri: impl Into<String>) -> Self {
        let mut tracking_uri = tracking_uri.into();
        while tracking_uri.ends_with('/') {
            tracking_uri.pop();
        }
        Self {
            tracking_uri,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the tracking URI from [`TRACKING_URI_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTrackingUri`] when the variable is not set.
    /// This happens before any tracking server call is attempted.
    pub fn from_env() -> Result<Self> {
        let uri =
            std::env::var(TRACKING_URI_VAR).map_err(|_| Error::MissingTrackingUri(TRACKING_URI_VAR))?;
        tracing::info!(tracking_uri = %uri, "tracking URI configured");
        Ok(Self::new(uri))
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the configured tracking URI (no trailing slash).
    #[must_use]
    pub fn tracking_uri(&self) -> &str {
        &self.tracking_uri
    }

    /// Get the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = TrackingConfig::new("http://tracking.internal:5000/");
        assert_eq!(config.tracking_uri(), "http://tracking.internal:5000");

        let config = TrackingConfig::new("http://tracking.internal:5000");
        assert_eq!(config.tracking_uri(), "http://tracking.internal:5000");
    }

    #[test]
    fn test_default_timeout() {
        let config = TrackingConfig::new("http://localhost:5000");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);

        let config = config.with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    // Environment mutation happens in a single test so parallel test
    // execution cannot interleave set/remove of the shared variable.
    #[test]
    fn test_from_env_round_trip() {
        std::env::remove_var(TRACKING_URI_VAR);
        let missing = TrackingConfig::from_env();
        assert!(matches!(missing, Err(Error::MissingTrackingUri(var)) if var == TRACKING_URI_VAR));

        std::env::set_var(TRACKING_URI_VAR, "http://tracking.internal:5000/");
        let config = TrackingConfig::from_env().unwrap();
        assert_eq!(config.tracking_uri(), "http://tracking.internal:5000");
        std::env::remove_var(TRACKING_URI_VAR);
    }
}
