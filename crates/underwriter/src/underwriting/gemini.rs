//! Google Gemini client used to structure policy text.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::resolver::{PolicyStructurer, StructurerError};
use crate::config::GeminiConfig;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
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
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Blocking Gemini `generateContent` client with bounded retries.
pub struct GeminiClient {
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn generate(
        &self,
        http: &Client,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, StructurerError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|err| StructurerError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(StructurerError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StructurerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .map_err(|err| StructurerError::Decode(err.to_string()))?;

        payload.into_text().ok_or(StructurerError::EmptyResponse)
    }
}

impl PolicyStructurer for GeminiClient {
    fn structure(&self, prompt: &str) -> Result<String, StructurerError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(StructurerError::MissingApiKey)?;

        let http = Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|err| StructurerError::Transport(err.to_string()))?;

        self.config.retry.run(
            |attempt| {
                debug!(attempt, model = %self.config.model, "calling Gemini generateContent");
                self.generate(&http, api_key, prompt)
            },
            StructurerError::is_retryable,
        )
    }
}
