#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geolocation resolution and reverse geocoding for the sauti client.
//!
//! Two concerns live here:
//!
//! 1. **Current-location resolution** — the [`LocationProvider`] trait
//!    abstracts over whatever can produce a device fix on the host
//!    platform. [`LocationResolver`] adds the caching and timeout
//!    semantics of the submission form's "use current location" button
//!    (accept a cached fix up to five minutes old, give up after ten
//!    seconds). [`ip_lookup::IpLookupProvider`] is the bundled provider:
//!    a coarse IP-geolocation lookup.
//! 2. **Reverse geocoding** — [`nominatim::reverse_geocode`] turns a
//!    coordinate pair into a display address. It is decorative: every
//!    failure resolves to `None` and never blocks location selection.
//!
//! Providers are configured via TOML files in `services/`, embedded at
//! compile time and exposed through the [`service_registry`].

pub mod ip_lookup;
pub mod nominatim;
pub mod provider;
pub mod service_registry;

use thiserror::Error;

pub use provider::{LocationProvider, LocationRequest, LocationResolver};

/// A resolved device position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceFix {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// Errors from current-location resolution.
///
/// Provider errors are surfaced to the caller unmodified; nothing here
/// retries.
#[derive(Debug, Error)]
pub enum GeolocationError {
    /// No location provider is configured on this host.
    #[error("geolocation is not supported on this host")]
    Unavailable,

    /// The provider refused to disclose the position.
    #[error("location permission denied")]
    PermissionDenied,

    /// No fix arrived within the request timeout.
    #[error("timed out waiting for a location fix")]
    Timeout,

    /// The provider answered but could not produce a position.
    #[error("location lookup failed: {message}")]
    Lookup {
        /// Provider-reported failure description.
        message: String,
    },

    /// HTTP transport failure while querying a provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
