//! IP-geolocation provider.
//!
//! A terminal host has no GPS; the closest equivalent of a device fix is
//! the coarse position of the machine's public IP. Accuracy is city
//! level at best, so the request's `high_accuracy` flag is advisory
//! only.

use async_trait::async_trait;

use crate::provider::{LocationProvider, LocationRequest};
use crate::{DeviceFix, GeolocationError};

/// Resolves the current position from an `ip-api.com`-style JSON
/// endpoint.
pub struct IpLookupProvider {
    client: reqwest::Client,
    base_url: String,
}

impl IpLookupProvider {
    /// Creates a provider against the given endpoint (e.g.,
    /// `"http://ip-api.com/json"`).
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_owned(),
        }
    }
}

#[async_trait]
impl LocationProvider for IpLookupProvider {
    fn id(&self) -> &str {
        "ip_api"
    }

    async fn locate(&self, request: &LocationRequest) -> Result<DeviceFix, GeolocationError> {
        if request.high_accuracy {
            log::debug!("high accuracy requested; IP lookup is city-level at best");
        }

        let body: serde_json::Value = self
            .client
            .get(&self.base_url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await?
            .json()
            .await?;

        parse_response(&body)
    }
}

/// Extracts a fix from an `ip-api.com` response body.
fn parse_response(body: &serde_json::Value) -> Result<DeviceFix, GeolocationError> {
    let status = body.get("status").and_then(serde_json::Value::as_str);
    if status != Some("success") {
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("lookup did not succeed");
        return Err(GeolocationError::Lookup {
            message: message.to_owned(),
        });
    }

    let latitude = body.get("lat").and_then(serde_json::Value::as_f64);
    let longitude = body.get("lon").and_then(serde_json::Value::as_f64);

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(DeviceFix {
            latitude,
            longitude,
        }),
        _ => Err(GeolocationError::Lookup {
            message: "response is missing coordinates".to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_successful_lookup() {
        let body = serde_json::json!({
            "status": "success",
            "lat": -1.2921,
            "lon": 36.8219,
        });
        let fix = parse_response(&body).unwrap();
        assert!((fix.latitude - -1.2921).abs() < 1e-9);
        assert!((fix.longitude - 36.8219).abs() < 1e-9);
    }

    #[test]
    fn failed_status_is_lookup_error() {
        let body = serde_json::json!({
            "status": "fail",
            "message": "private range",
        });
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(
            err,
            GeolocationError::Lookup { message } if message == "private range"
        ));
    }

    #[test]
    fn missing_coordinates_is_lookup_error() {
        let body = serde_json::json!({ "status": "success" });
        assert!(matches!(
            parse_response(&body),
            Err(GeolocationError::Lookup { .. })
        ));
    }
}
