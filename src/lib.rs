//! `TripSight` - Travel-safety information service
//!
//! This library assembles composite travel answers from independent
//! upstream providers: a text-completion narrative, an image search, and
//! a country-keyed emergency-numbers table reached via reverse geocoding.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod emergency;
pub mod error;
pub mod geocode;
pub mod images;
pub mod models;
pub mod narrative;
pub mod web;

// Re-export core types for public API
pub use aggregator::Aggregator;
pub use config::Config;
pub use emergency::ReferenceTable;
pub use error::TripSightError;
pub use geocode::GeoClient;
pub use images::{ERROR_SENTINEL, ImageClient, NO_IMAGE_SENTINEL};
pub use models::{
    CityDataResponse, CoordinateQuery, EmergencyNumbers, EmergencyNumbersResponse,
    NarrativeResult, PlaceQuery,
};
pub use narrative::{NarrativeClient, parse_narrative};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripSightError>;
