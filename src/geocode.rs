//! Reverse geocoding
//!
//! Maps a coordinate pair to a country name via a Nominatim-style
//! provider. Provider failures and missing-country results are distinct
//! error kinds; this module never guesses a country.

use crate::config::Config;
use crate::error::TripSightError;
use crate::Result;
use tracing::{debug, instrument};

/// Fixed client identifier sent to the geocoding provider
const GEOCODE_USER_AGENT: &str = "safety-app";

/// Client for the reverse-geocoding provider
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeoClient {
    /// Create a client sharing the process-wide HTTP client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.geocode_base_url.clone(),
        }
    }

    /// Resolve a coordinate pair to a country name.
    ///
    /// Fails with `GeoUnavailable` when the provider is unreachable,
    /// times out or returns an error status, and with `CountryNotFound`
    /// when the result carries no country field.
    #[instrument(skip(self))]
    pub async fn resolve_country(&self, latitude: f64, longitude: f64) -> Result<String> {
        let url = format!(
            "{}/reverse?lat={latitude}&lon={longitude}&format=jsonv2&accept-language=en",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, GEOCODE_USER_AGENT)
            .send()
            .await
            .map_err(|e| {
                TripSightError::geo_unavailable(format!("reverse geocoding request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TripSightError::geo_unavailable(format!(
                "reverse geocoding provider returned {status}"
            )));
        }

        let body: wire::ReverseResponse = response.json().await.map_err(|e| {
            TripSightError::geo_unavailable(format!("malformed reverse geocoding response: {e}"))
        })?;

        let country = body
            .address
            .and_then(|address| address.country)
            .ok_or(TripSightError::CountryNotFound {
                latitude,
                longitude,
            })?;

        debug!("Resolved ({latitude}, {longitude}) to {country}");
        Ok(country)
    }
}

/// Wire types for the reverse-geocoding provider
mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ReverseResponse {
        pub address: Option<Address>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Address {
        pub country: Option<String>,
    }
}
