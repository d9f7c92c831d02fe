//! Compile-time registry of geolocation service configurations.
//!
//! Each provider is defined in a TOML file under `services/`. The
//! registry embeds these at compile time and exposes them via
//! [`all_services`] and [`enabled_services`].

use serde::Deserialize;

/// A geolocation service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationService {
    /// Unique identifier (e.g., `"nominatim"`, `"ip_api"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this service is active.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Execution order — lower values run first.
    pub priority: u32,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Nominatim / `OpenStreetMap` reverse geocoder.
    Nominatim {
        /// Reverse endpoint (e.g.,
        /// `"https://nominatim.openstreetmap.org/reverse"`).
        base_url: String,
        /// Minimum delay between requests in milliseconds.
        rate_limit_ms: u64,
    },
    /// IP-geolocation current-position provider.
    IpLookup {
        /// API base URL (e.g., `"http://ip-api.com/json"`).
        base_url: String,
    },
}

const fn default_true() -> bool {
    true
}

impl GeolocationService {
    /// Returns the provider's base URL regardless of variant.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match &self.provider {
            ProviderConfig::Nominatim { base_url, .. }
            | ProviderConfig::IpLookup { base_url } => base_url,
        }
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("nominatim", include_str!("../services/nominatim.toml")),
    ("ip_api", include_str!("../services/ip_api.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 2;

/// Returns all geolocation service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time
/// guarantee since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<GeolocationService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse geolocation service '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled services, sorted by priority (ascending).
#[must_use]
pub fn enabled_services() -> Vec<GeolocationService> {
    let mut services: Vec<GeolocationService> =
        all_services().into_iter().filter(|s| s.enabled).collect();
    services.sort_by_key(|s| s.priority);
    services
}

/// Returns the configured reverse-geocoding endpoint, if one is enabled.
#[must_use]
pub fn reverse_endpoint() -> Option<String> {
    enabled_services().into_iter().find_map(|s| match s.provider {
        ProviderConfig::Nominatim { base_url, .. } => Some(base_url),
        ProviderConfig::IpLookup { .. } => None,
    })
}

/// Returns the configured IP-lookup endpoint, if one is enabled.
#[must_use]
pub fn ip_lookup_endpoint() -> Option<String> {
    enabled_services().into_iter().find_map(|s| match s.provider {
        ProviderConfig::IpLookup { base_url } => Some(base_url),
        ProviderConfig::Nominatim { .. } => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_embedded_configs_parse() {
        let services = all_services();
        assert_eq!(services.len(), EXPECTED_SERVICE_COUNT);
    }

    #[test]
    fn enabled_services_sorted_by_priority() {
        let services = enabled_services();
        let priorities: Vec<u32> = services.iter().map(|s| s.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn endpoints_are_discoverable() {
        assert!(reverse_endpoint().is_some());
        assert!(ip_lookup_endpoint().is_some());
        assert!(reverse_endpoint().unwrap().contains("reverse"));
    }
}
