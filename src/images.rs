//! Image provider
//!
//! Queries an Unsplash-style photo search for a single representative
//! image. This call never fails past its own boundary: every failure is
//! folded into one of two distinct sentinel values so the place-lookup
//! merge stays unconditional.

use crate::config::Config;
use tracing::{debug, instrument, warn};

/// Sentinel for a well-formed but empty provider result set
pub const NO_IMAGE_SENTINEL: &str = "no-image-available";
/// Sentinel for a transport or provider failure
pub const ERROR_SENTINEL: &str = "error-fetching-image";

/// Client for the image-search provider
#[derive(Debug, Clone)]
pub struct ImageClient {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl ImageClient {
    /// Create a client sharing the process-wide HTTP client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.image_base_url.clone(),
            access_key: config.image_access_key.clone(),
        }
    }

    /// Fetch a representative photo URL for a place.
    ///
    /// Returns the first result's URL, `NO_IMAGE_SENTINEL` for an empty
    /// result set, or `ERROR_SENTINEL` for any transport/provider
    /// failure. The two sentinels are distinct so callers can tell the
    /// cases apart.
    #[instrument(skip(self))]
    pub async fn fetch_image(&self, place_name: &str) -> String {
        match self.search(place_name).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!("Image provider returned no results for {place_name}");
                NO_IMAGE_SENTINEL.to_string()
            }
            Err(e) => {
                // A place description with a broken image is still useful,
                // so the failure is absorbed here rather than propagated.
                warn!("Failed to fetch image for {place_name}: {e}");
                ERROR_SENTINEL.to_string()
            }
        }
    }

    async fn search(&self, place_name: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!(
            "{}/search/photos?query={}&per_page=1&client_id={}",
            self.base_url,
            urlencoding::encode(place_name),
            self.access_key
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: wire::SearchResponse = response.json().await?;

        Ok(body
            .results
            .into_iter()
            .next()
            .map(|photo| photo.urls.regular))
    }
}

/// Wire types for the image-search provider
mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        #[serde(default)]
        pub results: Vec<Photo>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Photo {
        pub urls: PhotoUrls,
    }

    #[derive(Debug, Deserialize)]
    pub struct PhotoUrls {
        pub regular: String,
    }
}
