//! GeminiClient - handles communication with the Gemini generateContent API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The environment variable name for a Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default base URL for the Gemini API.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// API version path segment.
const API_VERSION: &str = "v1beta";

/// Default timeout for HTTP requests (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Safety settings sent with every generation call: all built-in blocking
/// categories disabled. Deliberate policy for this tool's creative-content
/// domain, not an oversight.
const SAFETY_OFF: [(&str, &str); 4] = [
    ("HARM_CATEGORY_HARASSMENT", "BLOCK_NONE"),
    ("HARM_CATEGORY_HATE_SPEECH", "BLOCK_NONE"),
    ("HARM_CATEGORY_SEXUALLY_EXPLICIT", "BLOCK_NONE"),
    ("HARM_CATEGORY_DANGEROUS_CONTENT", "BLOCK_NONE"),
];

/// Validate a prompt before sending it to the API.
///
/// # Returns
/// `Ok(())` if the prompt is non-empty, `Err(GeminiError::EmptyPrompt)` otherwise.
pub fn validate_prompt(prompt: &str) -> Result<(), GeminiError> {
    if prompt.trim().is_empty() {
        return Err(GeminiError::EmptyPrompt);
    }
    Ok(())
}

/// One model entry from the model listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Fully-qualified model name, e.g. `models/gemini-1.5-flash`.
    pub name: String,
    /// Generation methods the model supports, e.g. `generateContent`.
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Whether this model can serve `generateContent` calls.
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// Request body for a generateContent call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    safety_settings: Vec<SafetySetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

/// Client for communicating with the Gemini API.
///
/// The client itself holds no credential: keys are supplied per call so a
/// single client can serve a whole rotating key pool.
pub struct GeminiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new GeminiClient against the production API.
    pub fn new() -> Result<Self, GeminiError> {
        Self::with_base_url(GEMINI_API_BASE_URL.to_string())
    }

    /// Create a new GeminiClient with a custom base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(base_url: String) -> Result<Self, GeminiError> {
        Self::with_timeouts(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new GeminiClient with custom timeouts.
    pub fn with_timeouts(
        base_url: String,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, GeminiError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the models this API key can invoke.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Api` for non-success HTTP responses and
    /// `GeminiError::Http` for transport failures.
    pub async fn list_models(&self, api_key: &str) -> Result<Vec<ModelInfo>, GeminiError> {
        let url = format!("{}/{}/models", self.base_url, API_VERSION);

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let listing: ModelListResponse = response.json().await?;
        Ok(listing.models)
    }

    /// Issue one generation call and return the response text.
    ///
    /// All safety categories are sent as `BLOCK_NONE`; an empty or blocked
    /// response surfaces as `GeminiError::EmptyResponse`.
    pub async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, GeminiError> {
        validate_prompt(prompt)?;
        let response = self.generate_raw(api_key, model, prompt, None).await?;

        let text = Self::response_text(response);
        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }
        Ok(text)
    }

    /// Issue a minimal probe call to confirm the key is actually usable.
    ///
    /// Sends a one-token request; only the HTTP outcome matters, the
    /// (possibly empty) response text is discarded.
    pub async fn probe(&self, api_key: &str, model: &str) -> Result<(), GeminiError> {
        self.generate_raw(api_key, model, "Hi", Some(1)).await?;
        Ok(())
    }

    async fn generate_raw(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        max_output_tokens: Option<u32>,
    ) -> Result<GenerateResponse, GeminiError> {
        let url = format!(
            "{}/{}/{}:generateContent",
            self.base_url,
            API_VERSION,
            model_path(model)
        );

        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            safety_settings: SAFETY_OFF
                .iter()
                .map(|&(category, threshold)| SafetySetting {
                    category,
                    threshold,
                })
                .collect(),
            generation_config: max_output_tokens
                .map(|max| GenerationConfig {
                    max_output_tokens: max,
                }),
        };

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Concatenate the text parts of the first candidate, if any.
    fn response_text(response: GenerateResponse) -> String {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    async fn api_error(response: reqwest::Response) -> GeminiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        GeminiError::Api { status, message }
    }
}

/// Qualify a bare model name with the `models/` prefix the URL path expects.
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Errors surfaced by the Gemini client.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty or blocked response")]
    EmptyResponse,

    #[error("Empty prompt")]
    EmptyPrompt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prompt_rejects_empty() {
        assert!(matches!(validate_prompt(""), Err(GeminiError::EmptyPrompt)));
        assert!(matches!(
            validate_prompt("   \n"),
            Err(GeminiError::EmptyPrompt)
        ));
    }

    #[test]
    fn test_validate_prompt_accepts_text() {
        assert!(validate_prompt("a samurai in neon rain").is_ok());
    }

    #[test]
    fn test_model_path_qualifies_bare_names() {
        assert_eq!(model_path("gemini-1.5-flash"), "models/gemini-1.5-flash");
        assert_eq!(model_path("models/gemini-1.5-pro"), "models/gemini-1.5-pro");
    }

    #[test]
    fn test_model_info_supports_generation() {
        let model = ModelInfo {
            name: "models/gemini-1.5-flash".to_string(),
            supported_generation_methods: vec![
                "countTokens".to_string(),
                "generateContent".to_string(),
            ],
        };
        assert!(model.supports_generation());

        let embed = ModelInfo {
            name: "models/embedding-001".to_string(),
            supported_generation_methods: vec!["embedContent".to_string()],
        };
        assert!(!embed.supports_generation());
    }

    #[test]
    fn test_generate_request_serializes_safety_off() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Hi".to_string(),
                }],
            }],
            safety_settings: SAFETY_OFF
                .iter()
                .map(|&(category, threshold)| SafetySetting {
                    category,
                    threshold,
                })
                .collect(),
            generation_config: Some(GenerationConfig {
                max_output_tokens: 1,
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        let settings = json["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), 4);
        for setting in settings {
            assert_eq!(setting["threshold"], "BLOCK_NONE");
        }
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1);
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "a "}, {"text": "b"}]}}]
        }))
        .unwrap();
        assert_eq!(GeminiClient::response_text(response), "a b");
    }

    #[test]
    fn test_response_text_empty_when_blocked() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert_eq!(GeminiClient::response_text(response), "");
    }
}
