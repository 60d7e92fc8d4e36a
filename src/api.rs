//! HTTP API
//!
//! Thin axum handlers over the aggregator. Error kinds map to statuses
//! here and serialize as `{"error": "<message>"}`.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use serde_json::json;

use crate::aggregator::Aggregator;
use crate::error::TripSightError;
use crate::models::{
    CityDataResponse, CoordinateQuery, EmergencyAlertQuery, EmergencyAlertResponse,
    EmergencyNumbersResponse, ItineraryQuery, ItineraryResponse, PlaceQuery,
};

impl IntoResponse for TripSightError {
    fn into_response(self) -> Response {
        let status = match &self {
            TripSightError::EmptyQuery { .. } | TripSightError::CountryNotFound { .. } => {
                StatusCode::BAD_REQUEST
            }
            TripSightError::Upstream { .. } | TripSightError::GeoUnavailable { .. } => {
                StatusCode::BAD_GATEWAY
            }
            TripSightError::Load { .. } | TripSightError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(aggregator: Arc<Aggregator>) -> Router {
    Router::new()
        .route("/place-data", post(place_data))
        .route("/emergency-numbers", post(emergency_numbers))
        .route("/plan-itinerary", post(plan_itinerary))
        .route("/emergency-alert", post(emergency_alert))
        .with_state(aggregator)
}

async fn place_data(
    State(aggregator): State<Arc<Aggregator>>,
    Json(query): Json<PlaceQuery>,
) -> Result<Json<CityDataResponse>, TripSightError> {
    Ok(Json(aggregator.get_city_data(&query).await?))
}

async fn emergency_numbers(
    State(aggregator): State<Arc<Aggregator>>,
    Json(query): Json<CoordinateQuery>,
) -> Result<Json<EmergencyNumbersResponse>, TripSightError> {
    Ok(Json(aggregator.get_emergency_numbers(&query).await?))
}

async fn plan_itinerary(
    State(aggregator): State<Arc<Aggregator>>,
    Json(query): Json<ItineraryQuery>,
) -> Result<Json<ItineraryResponse>, TripSightError> {
    Ok(Json(aggregator.plan_itinerary(&query).await?))
}

async fn emergency_alert(
    State(aggregator): State<Arc<Aggregator>>,
    Json(query): Json<EmergencyAlertQuery>,
) -> Result<Json<EmergencyAlertResponse>, TripSightError> {
    Ok(Json(aggregator.send_emergency_alert(&query).await?))
}
