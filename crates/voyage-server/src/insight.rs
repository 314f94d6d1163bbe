//! Gemini-backed insight generator.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use voyage_core::{InsightGenerator, InsightRequest, ProviderError};

use crate::config::Config;
use crate::weather::provider_error;

const TEMPERATURE: f64 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 500;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

pub struct GeminiInsightGenerator {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GeminiInsightGenerator {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.gemini_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
            timeout: Duration::from_secs(config.insight_timeout_s.max(1)),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl InsightGenerator for GeminiInsightGenerator {
    async fn generate(&self, request: &InsightRequest) -> Result<String, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::Unavailable(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        };

        let prompt = request.prompt();
        let payload = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(provider_error)?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "insight provider HTTP {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        tracing::debug!(route = %request.route_name, "Received insight response");
        body.first_text()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderError::Malformed("response has no candidate text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use voyage_core::LaycanStatus;

    fn request() -> InsightRequest {
        InsightRequest {
            route_name: "Rotterdam to Singapore".to_string(),
            route_distance_nm: 6795.0,
            eta: Utc::now(),
            laycan_start: None,
            laycan_end: None,
            laycan_status: LaycanStatus::Unspecified,
            laycan_risk_hours: 0,
            average_wind_knots: 12.0,
            average_wave_m: 2.0,
            total_fuel_tons: 900.0,
            estimated_cost: 585_000.0,
            total_duration_hours: 560.0,
        }
    }

    #[test]
    fn payload_uses_generate_content_shape() {
        let payload = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 500);
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "[]"}, {"text": "ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.first_text().as_deref(), Some("[]"));

        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(empty.first_text(), None);
    }

    #[tokio::test]
    async fn missing_key_is_unavailable() {
        let mut config = Config::from_env();
        config.gemini_api_key = None;
        let generator = GeminiInsightGenerator::new(Client::new(), &config);
        assert!(!generator.is_configured());
        let result = generator.generate(&request()).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[test]
    fn endpoint_includes_model() {
        let mut config = Config::from_env();
        config.gemini_url = "https://example.test/v1beta/".to_string();
        config.gemini_model = "gemini-1.5-flash-latest".to_string();
        let generator = GeminiInsightGenerator::new(Client::new(), &config);
        assert_eq!(
            generator.endpoint(),
            "https://example.test/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }
}
