//! Error types and handling for the `TripSight` service

use thiserror::Error;

/// Main error type for the `TripSight` service
#[derive(Error, Debug)]
pub enum TripSightError {
    /// Caller supplied a blank or invalid query (400)
    #[error("Invalid input: {message}")]
    EmptyQuery { message: String },

    /// An upstream provider failed (transport error, timeout, non-2xx,
    /// malformed envelope). Carries the upstream status where one exists
    /// so callers can tell retryable from non-retryable failures.
    #[error("Upstream error ({status:?}): {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Reverse geocoding provider unreachable or timed out (502)
    #[error("Geocoding unavailable: {message}")]
    GeoUnavailable { message: String },

    /// Geocoding succeeded but the result carried no country (400)
    #[error("Could not determine country for coordinates ({latitude}, {longitude})")]
    CountryNotFound { latitude: f64, longitude: f64 },

    /// Reference data missing or malformed at startup (fatal)
    #[error("Load error: {message}")]
    Load { message: String },

    /// Configuration-related errors (missing/empty credentials)
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl TripSightError {
    /// Create a new caller-input error
    pub fn empty_query<S: Into<String>>(message: S) -> Self {
        Self::EmptyQuery {
            message: message.into(),
        }
    }

    /// Create a new upstream error without a provider status
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// Create a new upstream error carrying the provider's HTTP status
    pub fn upstream_status<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Upstream {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a new geocoding-unavailable error
    pub fn geo_unavailable<S: Into<String>>(message: S) -> Self {
        Self::GeoUnavailable {
            message: message.into(),
        }
    }

    /// Create a new reference-data load error
    pub fn load<S: Into<String>>(message: S) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripSightError::EmptyQuery { message } => format!("Invalid input: {message}"),
            TripSightError::Upstream { .. } => {
                "Unable to reach an upstream provider. Please try again later.".to_string()
            }
            TripSightError::GeoUnavailable { .. } => {
                "The geocoding service is currently unavailable.".to_string()
            }
            TripSightError::CountryNotFound { .. } => {
                "Could not determine a country for the given coordinates.".to_string()
            }
            TripSightError::Load { .. } => {
                "Reference data could not be loaded. Please check the data file.".to_string()
            }
            TripSightError::Config { .. } => {
                "Configuration error. Please check your environment variables.".to_string()
            }
        }
    }
}
