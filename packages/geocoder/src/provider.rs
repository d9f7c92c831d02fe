//! Current-location resolution with caching and timeout semantics.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::{DeviceFix, GeolocationError};

/// Options for a current-location request.
///
/// Defaults mirror the submission form's behavior: high accuracy
/// requested, a ten-second deadline, and acceptance of a cached fix up
/// to five minutes old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    /// Ask the provider for its most precise fix. Advisory; coarse
    /// providers (IP lookup) ignore it.
    pub high_accuracy: bool,
    /// Give up after this long without a fix.
    pub timeout: Duration,
    /// A cached fix younger than this is returned without consulting
    /// the provider at all.
    pub max_age: Duration,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            max_age: Duration::from_secs(300),
        }
    }
}

/// Anything that can produce a device fix on the host platform.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Returns a unique identifier for this provider (e.g., `"ip_api"`).
    fn id(&self) -> &str;

    /// Produces a fix for the current position.
    ///
    /// # Errors
    ///
    /// Returns [`GeolocationError`] if the position cannot be determined.
    /// Implementations report their own failure modes (permission denied,
    /// lookup failure); they are passed to the caller unmodified.
    async fn locate(&self, request: &LocationRequest) -> Result<DeviceFix, GeolocationError>;
}

/// Resolves the current location through a configured provider, honoring
/// the request's cache and timeout rules.
///
/// Holds the last successful fix so that repeated "use current location"
/// presses within [`LocationRequest::max_age`] are served locally.
pub struct LocationResolver {
    provider: Option<Box<dyn LocationProvider>>,
    last_fix: Mutex<Option<(DeviceFix, Instant)>>,
}

impl LocationResolver {
    /// Creates a resolver backed by the given provider.
    #[must_use]
    pub fn new(provider: impl LocationProvider + 'static) -> Self {
        Self {
            provider: Some(Box::new(provider)),
            last_fix: Mutex::new(None),
        }
    }

    /// Creates a resolver for a host with no location capability. Every
    /// resolve fails with [`GeolocationError::Unavailable`].
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            provider: None,
            last_fix: Mutex::new(None),
        }
    }

    /// Resolves the current position.
    ///
    /// A cached fix younger than `request.max_age` is returned without a
    /// provider round trip. Otherwise the provider is queried under
    /// `request.timeout`; provider errors surface unmodified and are not
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns [`GeolocationError::Unavailable`] when no provider is
    /// configured, [`GeolocationError::Timeout`] when the deadline
    /// passes, or whatever the provider itself reports.
    pub async fn resolve(
        &self,
        request: &LocationRequest,
    ) -> Result<DeviceFix, GeolocationError> {
        if let Some(fix) = self.cached_fix(request.max_age) {
            log::debug!("serving cached fix ({:.4}, {:.4})", fix.latitude, fix.longitude);
            return Ok(fix);
        }

        let provider = self
            .provider
            .as_deref()
            .ok_or(GeolocationError::Unavailable)?;

        let fix = tokio::time::timeout(request.timeout, provider.locate(request))
            .await
            .map_err(|_| GeolocationError::Timeout)??;

        let mut guard = self
            .last_fix
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some((fix, Instant::now()));

        Ok(fix)
    }

    /// Returns the cached fix if it is younger than `max_age`.
    fn cached_fix(&self, max_age: Duration) -> Option<DeviceFix> {
        let guard = self
            .last_fix
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|(_, at)| at.elapsed() <= max_age)
            .map(|(fix, _)| *fix)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct StaticProvider {
        fix: DeviceFix,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LocationProvider for StaticProvider {
        fn id(&self) -> &str {
            "static"
        }

        async fn locate(
            &self,
            _request: &LocationRequest,
        ) -> Result<DeviceFix, GeolocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.fix)
        }
    }

    struct DenyingProvider;

    #[async_trait]
    impl LocationProvider for DenyingProvider {
        fn id(&self) -> &str {
            "denying"
        }

        async fn locate(
            &self,
            _request: &LocationRequest,
        ) -> Result<DeviceFix, GeolocationError> {
            Err(GeolocationError::PermissionDenied)
        }
    }

    struct StalledProvider;

    #[async_trait]
    impl LocationProvider for StalledProvider {
        fn id(&self) -> &str {
            "stalled"
        }

        async fn locate(
            &self,
            _request: &LocationRequest,
        ) -> Result<DeviceFix, GeolocationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(GeolocationError::Unavailable)
        }
    }

    const NAIROBI: DeviceFix = DeviceFix {
        latitude: -1.2921,
        longitude: 36.8219,
    };

    #[tokio::test]
    async fn no_provider_is_unavailable() {
        let resolver = LocationResolver::unavailable();
        let err = resolver
            .resolve(&LocationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GeolocationError::Unavailable));
    }

    #[tokio::test]
    async fn fresh_fix_is_served_from_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = LocationResolver::new(StaticProvider {
            fix: NAIROBI,
            calls: Arc::clone(&calls),
        });
        let request = LocationRequest::default();

        let first = resolver.resolve(&request).await.unwrap();
        let second = resolver.resolve(&request).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_max_age_always_consults_provider() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = LocationResolver::new(StaticProvider {
            fix: NAIROBI,
            calls: Arc::clone(&calls),
        });
        let request = LocationRequest {
            max_age: Duration::ZERO,
            ..LocationRequest::default()
        };

        resolver.resolve(&request).await.unwrap();
        resolver.resolve(&request).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let resolver = LocationResolver::new(DenyingProvider);
        let err = resolver
            .resolve(&LocationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GeolocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn deadline_maps_to_timeout() {
        let resolver = LocationResolver::new(StalledProvider);
        let request = LocationRequest {
            timeout: Duration::from_millis(20),
            ..LocationRequest::default()
        };
        let err = resolver.resolve(&request).await.unwrap_err();
        assert!(matches!(err, GeolocationError::Timeout));
    }
}
