//! Request and response types shared across the service

use serde::{Deserialize, Serialize};

/// A place lookup by name; created per request
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceQuery {
    pub place_name: String,
}

/// A lookup by coordinate pair; created per request
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordinateQuery {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoordinateQuery {
    /// Whether the coordinates are within valid WGS84 ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Structured fields extracted from the narrative provider's free text.
///
/// All three fields are always populated; when the text does not honor
/// the expected format each falls back to its documented default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeResult {
    pub description: String,
    pub safety_score: String,
    pub safety_description: String,
}

/// Emergency contact numbers for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyNumbers {
    #[serde(rename = "Police")]
    pub police: String,
    #[serde(rename = "Ambulance")]
    pub ambulance: String,
    #[serde(rename = "Fire")]
    pub fire: String,
}

impl EmergencyNumbers {
    /// The all-"Unknown" record returned for unrecognized countries
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            police: "Unknown".to_string(),
            ambulance: "Unknown".to_string(),
            fire: "Unknown".to_string(),
        }
    }
}

/// Composite answer for a place lookup, merged fresh per request
#[derive(Debug, Clone, Serialize)]
pub struct CityDataResponse {
    pub city_name: String,
    pub description: String,
    pub safety_score: String,
    pub safety_description: String,
    pub image_url: String,
}

impl CityDataResponse {
    /// Merge the narrative and image branches for one place
    #[must_use]
    pub fn merge(city_name: String, narrative: NarrativeResult, image_url: String) -> Self {
        Self {
            city_name,
            description: narrative.description,
            safety_score: narrative.safety_score,
            safety_description: narrative.safety_description,
            image_url,
        }
    }
}

/// Emergency numbers for the country resolved from a coordinate pair
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyNumbersResponse {
    pub country: String,
    pub emergency_numbers: EmergencyNumbers,
}

/// Request body for the itinerary planner
#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryQuery {
    #[serde(default)]
    pub start_location: String,
    #[serde(default)]
    pub end_location: String,
    #[serde(default)]
    pub stops: Vec<String>,
}

/// Bullet-formatted itinerary text
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryResponse {
    pub response: String,
}

/// Request body for a simulated emergency alert
#[derive(Debug, Clone, Deserialize)]
pub struct EmergencyAlertQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub message: String,
}

/// Confirmation of a simulated emergency alert
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyAlertResponse {
    pub message: String,
    pub country: String,
    pub emergency_numbers: EmergencyNumbers,
}
