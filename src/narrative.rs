//! Narrative provider and parser
//!
//! Talks to an OpenAI-compatible chat-completions provider for the travel
//! narrative, then parses the free-text reply into structured fields. The
//! prompt fixes an exact three-line output format, but the reply is
//! untrusted: parsing is a pure, total function with documented defaults.

use crate::config::Config;
use crate::error::TripSightError;
use crate::models::NarrativeResult;
use crate::Result;
use tracing::{debug, instrument};

/// Default description when the reply does not honor the format
pub const DEFAULT_DESCRIPTION: &str = "Unknown";
/// Default safety score when the reply does not honor the format
pub const DEFAULT_SAFETY_SCORE: &str = "No safety score provided";
/// Default safety description when the reply does not honor the format
pub const DEFAULT_SAFETY_DESCRIPTION: &str = "No safety description provided";

const DESCRIPTION_MARKER: &str = "Description:";
const SAFETY_SCORE_MARKER: &str = "Safety Score:";
const SAFETY_DESCRIPTION_MARKER: &str = "Safety Description:";

const NARRATIVE_MODEL: &str = "llama-3.3-70b-versatile";
const ITINERARY_MODEL: &str = "llama3-8b-8192";

const NARRATIVE_SYSTEM_PROMPT: &str = "You are a travel guide AI, geography and safety expert. \
     Be detailed and unbiased. Provide the response in this exact format:\n\n\
     Description: <text>\n\
     Safety Score: <number>\n\
     Safety Description: <text>";

const ITINERARY_SYSTEM_PROMPT: &str = "You are a safety-focused travel assistant.";

/// Client for the text-completion provider
#[derive(Debug, Clone)]
pub struct NarrativeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NarrativeClient {
    /// Create a client sharing the process-wide HTTP client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.narrative_base_url.clone(),
            api_key: config.narrative_api_key.clone(),
        }
    }

    /// Fetch the raw narrative text for a place.
    ///
    /// Single attempt, explicit timeout on the shared client. Any
    /// transport failure, non-2xx status or malformed envelope surfaces
    /// as `Upstream` and is fatal to the place lookup.
    #[instrument(skip(self))]
    pub async fn fetch_narrative(&self, place_name: &str) -> Result<String> {
        let user_prompt = format!(
            "Describe {place_name} for travelers and provide a safety score (1-10). \
             Also, provide a safety description."
        );
        self.complete(NARRATIVE_MODEL, NARRATIVE_SYSTEM_PROMPT, &user_prompt, 300, None)
            .await
    }

    /// Fetch an itinerary suggestion for a start/end/stops route
    #[instrument(skip(self))]
    pub async fn fetch_itinerary(
        &self,
        start_location: &str,
        end_location: &str,
        stops: &[String],
    ) -> Result<String> {
        let user_prompt = format!(
            "Plan a safe itinerary from {start_location} to {end_location} with stops at {}.",
            stops.join(", ")
        );
        self.complete(ITINERARY_MODEL, ITINERARY_SYSTEM_PROMPT, &user_prompt, 1024, Some(1.0))
            .await
    }

    async fn complete(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: Option<f32>,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = wire::CompletionRequest {
            model,
            messages: vec![
                wire::Message {
                    role: "system",
                    content: system_prompt,
                },
                wire::Message {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                TripSightError::upstream(format!("narrative provider request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TripSightError::upstream_status(
                status.as_u16(),
                format!("narrative provider returned {status}: {body}"),
            ));
        }

        let completion: wire::CompletionResponse = response.json().await.map_err(|e| {
            TripSightError::upstream(format!("malformed narrative provider response: {e}"))
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| TripSightError::upstream("narrative provider returned no choices"))?;

        debug!("Narrative provider returned {} characters", text.len());
        Ok(text)
    }
}

/// Parse the raw narrative text into structured fields.
///
/// All three markers must be present somewhere in the text before any
/// extraction happens; otherwise the all-default record is returned with
/// no attempt at partial extraction. This all-or-nothing gate is a
/// deliberate trade-off: partially honored formats are treated the same
/// as free-form replies. When markers are present, each matching line is
/// assigned in order, so a repeated marker keeps its last occurrence, and
/// a marker followed by nothing keeps the empty string rather than the
/// default.
#[must_use]
pub fn parse_narrative(raw: &str) -> NarrativeResult {
    let mut result = NarrativeResult {
        description: DEFAULT_DESCRIPTION.to_string(),
        safety_score: DEFAULT_SAFETY_SCORE.to_string(),
        safety_description: DEFAULT_SAFETY_DESCRIPTION.to_string(),
    };

    let has_all_markers = raw.contains(DESCRIPTION_MARKER)
        && raw.contains(SAFETY_SCORE_MARKER)
        && raw.contains(SAFETY_DESCRIPTION_MARKER);
    if !has_all_markers {
        return result;
    }

    for line in raw.lines() {
        if let Some(value) = line.strip_prefix(SAFETY_DESCRIPTION_MARKER) {
            result.safety_description = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(SAFETY_SCORE_MARKER) {
            result.safety_score = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(DESCRIPTION_MARKER) {
            result.description = value.trim().to_string();
        }
    }

    result
}

/// Wire types for the chat-completions provider
mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct CompletionRequest<'a> {
        pub model: &'a str,
        pub messages: Vec<Message<'a>>,
        pub max_tokens: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub temperature: Option<f32>,
    }

    #[derive(Debug, Serialize)]
    pub struct Message<'a> {
        pub role: &'a str,
        pub content: &'a str,
    }

    #[derive(Debug, Deserialize)]
    pub struct CompletionResponse {
        pub choices: Vec<Choice>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Choice {
        pub message: ChoiceMessage,
    }

    #[derive(Debug, Deserialize)]
    pub struct ChoiceMessage {
        pub content: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn defaults() -> NarrativeResult {
        NarrativeResult {
            description: DEFAULT_DESCRIPTION.to_string(),
            safety_score: DEFAULT_SAFETY_SCORE.to_string(),
            safety_description: DEFAULT_SAFETY_DESCRIPTION.to_string(),
        }
    }

    #[test]
    fn test_well_formed_reply() {
        let raw = "Description: Paris is lovely.\nSafety Score: 7\nSafety Description: Generally safe at night.";
        let parsed = parse_narrative(raw);
        assert_eq!(parsed.description, "Paris is lovely.");
        assert_eq!(parsed.safety_score, "7");
        assert_eq!(parsed.safety_description, "Generally safe at night.");
    }

    #[test]
    fn test_markers_in_any_order() {
        let raw = "Safety Description: Watch your bags.\nDescription: Busy port city.\nSafety Score: 6";
        let parsed = parse_narrative(raw);
        assert_eq!(parsed.description, "Busy port city.");
        assert_eq!(parsed.safety_score, "6");
        assert_eq!(parsed.safety_description, "Watch your bags.");
    }

    #[rstest]
    #[case("just some prose about a city")]
    #[case("Description: only one marker present")]
    #[case("Description: text\nSafety Score: 5")]
    #[case("Safety Score: 5\nSafety Description: fine")]
    #[case("")]
    fn test_missing_marker_yields_all_defaults(#[case] raw: &str) {
        assert_eq!(parse_narrative(raw), defaults());
    }

    #[test]
    fn test_repeated_marker_last_occurrence_wins() {
        let raw = "Description: first\nSafety Score: 3\nSafety Description: early\nDescription: second\nSafety Description: late";
        let parsed = parse_narrative(raw);
        assert_eq!(parsed.description, "second");
        assert_eq!(parsed.safety_score, "3");
        assert_eq!(parsed.safety_description, "late");
    }

    #[test]
    fn test_empty_value_kept_not_defaulted() {
        let raw = "Description:\nSafety Score: 8\nSafety Description: fine";
        let parsed = parse_narrative(raw);
        assert_eq!(parsed.description, "");
        assert_eq!(parsed.safety_score, "8");
    }

    #[test]
    fn test_value_whitespace_trimmed() {
        let raw = "Description:   spaced out   \nSafety Score:  9 \nSafety Description:  ok ";
        let parsed = parse_narrative(raw);
        assert_eq!(parsed.description, "spaced out");
        assert_eq!(parsed.safety_score, "9");
        assert_eq!(parsed.safety_description, "ok");
    }

    #[test]
    fn test_surrounding_prose_ignored() {
        let raw = "Here is what I found:\nDescription: A quiet town.\nSafety Score: 9\nSafety Description: Very safe.\nHope that helps!";
        let parsed = parse_narrative(raw);
        assert_eq!(parsed.description, "A quiet town.");
        assert_eq!(parsed.safety_description, "Very safe.");
    }

    #[test]
    fn test_safety_description_not_mistaken_for_description() {
        // "Safety Description:" does not start with "Description:", so the
        // description marker must stay untouched by that line.
        let raw = "Description: The city.\nSafety Score: 4\nSafety Description: Caution advised.";
        let parsed = parse_narrative(raw);
        assert_eq!(parsed.description, "The city.");
        assert_eq!(parsed.safety_description, "Caution advised.");
    }
}
