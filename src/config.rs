//! Configuration for the `TripSight` service
//!
//! All settings come from the environment. Credentials are validated
//! non-empty at startup so the process fails fast instead of serving
//! requests it cannot fulfill.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_NARRATIVE_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_IMAGE_BASE_URL: &str = "https://api.unsplash.com";
const DEFAULT_GEOCODE_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_REFERENCE_PATH: &str = "data/emergency_numbers.csv";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_PORT: u16 = 8000;

/// Runtime configuration, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the text-completion provider
    pub narrative_api_key: String,
    /// Credential for the image-search provider
    pub image_access_key: String,
    /// Base URL of the text-completion provider
    pub narrative_base_url: String,
    /// Base URL of the image-search provider
    pub image_base_url: String,
    /// Base URL of the reverse-geocoding provider
    pub geocode_base_url: String,
    /// Path to the emergency-numbers reference CSV
    pub reference_path: String,
    /// Timeout applied to every upstream call
    pub upstream_timeout: Duration,
    /// Port the web server listens on
    pub port: u16,
}

impl Config {
    /// Build configuration from environment variables.
    ///
    /// `GROQ_API_KEY` and `UNSPLASH_ACCESS_KEY` are required; everything
    /// else has a sensible default.
    pub fn from_env() -> Result<Self> {
        let narrative_api_key =
            env::var("GROQ_API_KEY").context("Missing GROQ_API_KEY env var")?;
        let image_access_key =
            env::var("UNSPLASH_ACCESS_KEY").context("Missing UNSPLASH_ACCESS_KEY env var")?;

        let config = Self {
            narrative_api_key,
            image_access_key,
            narrative_base_url: env_or("TRIPSIGHT_NARRATIVE_BASE_URL", DEFAULT_NARRATIVE_BASE_URL),
            image_base_url: env_or("TRIPSIGHT_IMAGE_BASE_URL", DEFAULT_IMAGE_BASE_URL),
            geocode_base_url: env_or("TRIPSIGHT_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL),
            reference_path: env_or("TRIPSIGHT_REFERENCE_PATH", DEFAULT_REFERENCE_PATH),
            upstream_timeout: Duration::from_secs(
                env::var("TRIPSIGHT_UPSTREAM_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ),
            port: env::var("TRIPSIGHT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate credentials and URLs
    pub fn validate(&self) -> Result<()> {
        if self.narrative_api_key.trim().is_empty() {
            anyhow::bail!("GROQ_API_KEY must not be empty");
        }
        if self.image_access_key.trim().is_empty() {
            anyhow::bail!("UNSPLASH_ACCESS_KEY must not be empty");
        }
        for url in [
            &self.narrative_base_url,
            &self.image_base_url,
            &self.geocode_base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("Provider base URL must be an HTTP or HTTPS URL: {url}");
            }
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
