//! Request orchestration
//!
//! The aggregator owns the provider clients and the reference table and
//! merges their sub-results into one response per request. Each call is
//! stateless beyond the outbound provider calls and performs exactly one
//! attempt per upstream.

use anyhow::Context;
use tracing::instrument;

use crate::config::Config;
use crate::emergency::ReferenceTable;
use crate::error::TripSightError;
use crate::geocode::GeoClient;
use crate::images::ImageClient;
use crate::models::{
    CityDataResponse, CoordinateQuery, EmergencyAlertQuery, EmergencyAlertResponse,
    EmergencyNumbersResponse, ItineraryQuery, ItineraryResponse, PlaceQuery,
};
use crate::narrative::{parse_narrative, NarrativeClient};
use crate::Result;

/// Orchestrates the provider components behind the HTTP surface
pub struct Aggregator {
    narrative: NarrativeClient,
    images: ImageClient,
    geocoder: GeoClient,
    reference: ReferenceTable,
}

impl Aggregator {
    /// Build the aggregator with one shared HTTP client carrying the
    /// configured upstream timeout.
    pub fn new(config: &Config, reference: ReferenceTable) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(concat!("TripSight/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            narrative: NarrativeClient::new(client.clone(), config),
            images: ImageClient::new(client.clone(), config),
            geocoder: GeoClient::new(client, config),
            reference,
        })
    }

    /// Fetch the composite place answer: narrative plus best-effort image.
    ///
    /// The two branches have no data dependency and are issued
    /// concurrently. A narrative failure is fatal to the whole call --
    /// no narrative means no usable response -- while an image failure
    /// has already been folded into a sentinel by the image client. The
    /// asymmetry is intentional.
    #[instrument(skip(self), fields(place = %query.place_name))]
    pub async fn get_city_data(&self, query: &PlaceQuery) -> Result<CityDataResponse> {
        let place_name = query.place_name.trim();
        if place_name.is_empty() {
            return Err(TripSightError::empty_query("place name is required"));
        }

        let (raw_narrative, image_url) = tokio::join!(
            self.narrative.fetch_narrative(place_name),
            self.images.fetch_image(place_name)
        );

        let narrative = parse_narrative(&raw_narrative?);
        Ok(CityDataResponse::merge(
            place_name.to_string(),
            narrative,
            image_url,
        ))
    }

    /// Resolve the country for a coordinate pair and look up its
    /// emergency numbers. Geocoding failures propagate; the table lookup
    /// is total and defaults to "Unknown" for unrecognized countries.
    #[instrument(skip(self))]
    pub async fn get_emergency_numbers(
        &self,
        query: &CoordinateQuery,
    ) -> Result<EmergencyNumbersResponse> {
        if !query.is_valid() {
            return Err(TripSightError::empty_query(
                "latitude must be in [-90, 90] and longitude in [-180, 180]",
            ));
        }

        let country = self
            .geocoder
            .resolve_country(query.latitude, query.longitude)
            .await?;
        let emergency_numbers = self.reference.lookup(&country);

        Ok(EmergencyNumbersResponse {
            country,
            emergency_numbers,
        })
    }

    /// Plan an itinerary between two places, reformatted as bullet points
    #[instrument(skip(self))]
    pub async fn plan_itinerary(&self, query: &ItineraryQuery) -> Result<ItineraryResponse> {
        let start = query.start_location.trim();
        let end = query.end_location.trim();
        if start.is_empty() || end.is_empty() {
            return Err(TripSightError::empty_query(
                "start and end locations are required",
            ));
        }

        let text = self.narrative.fetch_itinerary(start, end, &query.stops).await?;
        Ok(ItineraryResponse {
            response: format_bullets(&text),
        })
    }

    /// Send a simulated emergency alert: resolves the caller's country
    /// and numbers and echoes the alert back. No real dispatch happens.
    #[instrument(skip(self))]
    pub async fn send_emergency_alert(
        &self,
        query: &EmergencyAlertQuery,
    ) -> Result<EmergencyAlertResponse> {
        let coordinates = CoordinateQuery {
            latitude: query.latitude,
            longitude: query.longitude,
        };
        let numbers = self.get_emergency_numbers(&coordinates).await?;

        Ok(EmergencyAlertResponse {
            message: format!("Simulated emergency alert: {}", query.message),
            country: numbers.country,
            emergency_numbers: numbers.emergency_numbers,
        })
    }
}

/// Prefix every non-blank line with a bullet point
fn format_bullets(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("\u{2022} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
