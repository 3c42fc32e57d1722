//! IP-address geolocation.

use serde::Deserialize;

use super::GeolocationError;
use crate::geo::GeoPoint;

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Parse an IP geolocation JSON body of the form
/// `{"status": "success", "lat": 40.7, "lon": -74.0}`.
///
/// `status` is optional; a `"fail"` status or missing coordinates is an
/// error.
pub fn parse_ip_response(body: &str) -> Result<GeoPoint, GeolocationError> {
    let response: IpApiResponse = serde_json::from_str(body)
        .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

    if response.status.as_deref() == Some("fail") {
        return Err(GeolocationError::Unavailable(
            response.message.unwrap_or_else(|| "lookup failed".into()),
        ));
    }

    match (response.lat, response.lon) {
        (Some(lat), Some(lon)) => Ok(GeoPoint::new(lat, lon)),
        _ => Err(GeolocationError::InvalidFix),
    }
}

/// Locates the user from their public IP address over HTTP.
#[cfg(feature = "geoip")]
#[derive(Debug, Clone)]
pub struct IpLocator {
    url: String,
    timeout: std::time::Duration,
}

#[cfg(feature = "geoip")]
impl IpLocator {
    /// Query `url` with a request timeout.
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

#[cfg(feature = "geoip")]
impl super::LocationProvider for IpLocator {
    fn locate(&self) -> Result<GeoPoint, GeolocationError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();
        let body = agent
            .get(&self.url)
            .call()
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?
            .into_body()
            .read_to_string()
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;
        parse_ip_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_body() {
        let point =
            parse_ip_response(r#"{"status":"success","lat":52.52,"lon":13.405}"#)
                .unwrap();
        assert_eq!(point, GeoPoint::new(52.52, 13.405));
    }

    #[test]
    fn status_is_optional() {
        let point = parse_ip_response(r#"{"lat":-1.5,"lon":36.8}"#).unwrap();
        assert_eq!(point.lat, -1.5);
    }

    #[test]
    fn fail_status_is_unavailable() {
        let err = parse_ip_response(r#"{"status":"fail","message":"private range"}"#)
            .unwrap_err();
        assert_eq!(err, GeolocationError::Unavailable("private range".into()));
    }

    #[test]
    fn missing_coordinates_is_invalid() {
        let err = parse_ip_response(r#"{"status":"success","lat":1.0}"#).unwrap_err();
        assert_eq!(err, GeolocationError::InvalidFix);
    }

    #[test]
    fn garbage_is_unavailable() {
        assert!(matches!(
            parse_ip_response("<html>"),
            Err(GeolocationError::Unavailable(_))
        ));
    }
}
