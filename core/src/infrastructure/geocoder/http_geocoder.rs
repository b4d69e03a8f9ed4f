use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::domain::{
    bootcamp::{
        ports::Geocoder,
        value_objects::{GeoPoint, GeocodedAddress},
    },
    common::{GeocoderConfig, entities::app_errors::CoreError},
};

/// Geocoder speaking the MapQuest `address` API.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    info: GeocodeInfo,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

/// Provider status reported in the body; `0` means success.
#[derive(Debug, Default, Deserialize)]
struct GeocodeInfo {
    #[serde(default)]
    statuscode: i64,
    #[serde(default)]
    messages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    locations: Vec<GeocodeLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeocodeLocation {
    lat_lng: LatLng,
    street: Option<String>,
    admin_area5: Option<String>,
    admin_area3: Option<String>,
    admin_area1: Option<String>,
    postal_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<GeocodeLocation> for GeocodedAddress {
    fn from(location: GeocodeLocation) -> Self {
        let street = non_empty(location.street);
        let city = non_empty(location.admin_area5);
        let state = non_empty(location.admin_area3);
        let zipcode = non_empty(location.postal_code);
        let country = non_empty(location.admin_area1);

        let state_zip = [state.clone(), zipcode.clone()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let parts: Vec<String> = [street.clone(), city.clone(), Some(state_zip), country.clone()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        Self {
            point: GeoPoint {
                latitude: location.lat_lng.lat,
                longitude: location.lat_lng.lng,
            },
            formatted_address: (!parts.is_empty()).then(|| parts.join(", ")),
            street,
            city,
            state,
            zipcode,
            country,
        }
    }
}

impl GeocodeResponse {
    fn into_address(self, address: &str) -> Result<GeocodedAddress, CoreError> {
        if self.info.statuscode != 0 {
            let messages = self.info.messages.join("; ");
            error!(
                "Geocoder reported status {}: {}",
                self.info.statuscode, messages
            );
            return Err(CoreError::ExternalServiceError(format!(
                "Geocoder returned status {}: {}",
                self.info.statuscode, messages
            )));
        }

        self.results
            .into_iter()
            .next()
            .and_then(|result| result.locations.into_iter().next())
            .map(GeocodedAddress::from)
            .ok_or_else(|| CoreError::Invalid(format!("No location found for '{address}'")))
    }
}

impl HttpGeocoder {
    pub fn new(config: GeocoderConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            client: Client::new(),
        }
    }
}

impl Geocoder for HttpGeocoder {
    async fn geocode(&self, address: String) -> Result<GeocodedAddress, CoreError> {
        let url = format!("{}/geocoding/v1/address", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("location", address.as_str())])
            .send()
            .await
            .map_err(|e| {
                error!("Geocoder request failed: {}", e);
                CoreError::ExternalServiceError(format!("Geocoder error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Geocoder error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Geocoder returned error: {}",
                status
            )));
        }

        let body: GeocodeResponse = response.json().await.map_err(|e| {
            error!("Failed to parse geocoder response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse geocoder response: {}", e))
        })?;

        body.into_address(&address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_maps_address_parts() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{
                "results": [{
                    "locations": [{
                        "street": "233 Bay State Rd",
                        "adminArea5": "Boston",
                        "adminArea3": "MA",
                        "adminArea1": "US",
                        "postalCode": "02215",
                        "latLng": { "lat": 42.350846, "lng": -71.105708 }
                    }]
                }]
            }"#,
        )
        .unwrap();

        let location = body
            .results
            .into_iter()
            .next()
            .and_then(|r| r.locations.into_iter().next())
            .unwrap();
        let address = GeocodedAddress::from(location);

        assert_eq!(address.point.latitude, 42.350846);
        assert_eq!(address.city.as_deref(), Some("Boston"));
        assert_eq!(
            address.formatted_address.as_deref(),
            Some("233 Bay State Rd, Boston, MA 02215, US")
        );
    }

    #[test]
    fn test_provider_status_error_is_external_failure() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{
                "info": {
                    "statuscode": 403,
                    "messages": ["The AppKey submitted with this request is invalid."]
                },
                "results": []
            }"#,
        )
        .unwrap();

        let result = body.into_address("02215");

        assert!(
            matches!(result, Err(CoreError::ExternalServiceError(ref message)) if message.contains("403")),
            "{result:?}"
        );
    }

    #[test]
    fn test_successful_status_without_match_is_invalid() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{ "info": { "statuscode": 0, "messages": [] }, "results": [{ "locations": [] }] }"#,
        )
        .unwrap();

        let result = body.into_address("nowhere");

        assert!(
            matches!(result, Err(CoreError::Invalid(ref message)) if message == "No location found for 'nowhere'"),
            "{result:?}"
        );
    }

    #[test]
    fn test_blank_parts_are_dropped() {
        let location = GeocodeLocation {
            lat_lng: LatLng { lat: 1.0, lng: 2.0 },
            street: Some(String::new()),
            admin_area5: None,
            admin_area3: Some("MA".to_string()),
            admin_area1: Some("US".to_string()),
            postal_code: Some(" ".to_string()),
        };

        let address = GeocodedAddress::from(location);

        assert_eq!(address.street, None);
        assert_eq!(address.zipcode, None);
        assert_eq!(address.formatted_address.as_deref(), Some("MA, US"));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let geocoder = HttpGeocoder::new(GeocoderConfig {
            base_url: "https://www.mapquestapi.com/".to_string(),
            api_key: "key".to_string(),
        });

        assert_eq!(geocoder.base_url, "https://www.mapquestapi.com");
    }
}
