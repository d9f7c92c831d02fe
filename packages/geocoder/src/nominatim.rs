//! Nominatim / OpenStreetMap reverse-geocoder client.
//!
//! Reverse geocoding is decorative: the resolved address is shown next
//! to a selected location but nothing depends on it, so every failure
//! (network, empty result set, parse) resolves to `None` instead of an
//! error. Nominatim has strict rate limits: **1 request per second**
//! maximum on the public instance; see `rate_limit_ms` in the service
//! TOML configuration.
//!
//! See <https://nominatim.org/release-docs/develop/api/Reverse/>

/// Resolves a coordinate pair to a display address.
///
/// Returns the display name of the first result, or `None` on any
/// failure. Failures are logged at debug level and never propagated —
/// reverse geocoding must not block location selection.
pub async fn reverse_geocode(
    client: &reqwest::Client,
    base_url: &str,
    latitude: f64,
    longitude: f64,
) -> Option<String> {
    let response = client
        .get(base_url)
        .query(&[
            ("lat", latitude.to_string().as_str()),
            ("lon", longitude.to_string().as_str()),
            ("format", "jsonv2"),
        ])
        .send()
        .await;

    let body: serde_json::Value = match response {
        Ok(resp) => match resp.json().await {
            Ok(body) => body,
            Err(e) => {
                log::debug!("reverse geocode response unreadable: {e}");
                return None;
            }
        },
        Err(e) => {
            log::debug!("reverse geocode request failed: {e}");
            return None;
        }
    };

    parse_response(&body)
}

/// Extracts the display address from a Nominatim reverse response.
fn parse_response(body: &serde_json::Value) -> Option<String> {
    // An unmatched coordinate comes back as `{"error": "..."}`.
    if let Some(error) = body.get("error").and_then(serde_json::Value::as_str) {
        log::debug!("reverse geocode returned no result: {error}");
        return None;
    }

    body.get("display_name")
        .and_then(serde_json::Value::as_str)
        .filter(|name| !name.is_empty())
        .map(String::from)
}
