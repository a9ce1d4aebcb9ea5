use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use nb_core::{Error, InferenceModel, Result};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// Google Gemini through the `generateContent` REST endpoint.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl GeminiModel {
    pub fn new(api_key: String, model_name: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::InvalidInput("Gemini API key is required".to_string()));
        }
        let client = Client::builder().timeout(GENERATION_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            model_name: model_name.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name
        )
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn response_text(response: GenerateResponse) -> Result<String> {
    if let Some(error) = response.error {
        return Err(Error::Generation(error.message));
    }
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::Generation("model returned no candidates".to_string()))?;
    let text: String = candidate
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect();
    if text.trim().is_empty() {
        return Err(Error::Generation("model returned an empty response".to_string()));
    }
    Ok(text)
}

#[async_trait]
impl InferenceModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("Sending {} character prompt to {}", prompt.len(), self.model_name);
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?
            .json::<GenerateResponse>()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        response_text(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<String> {
        response_text(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_model_requires_api_key() {
        let result = GeminiModel::new(String::new(), "gemini-1.5-flash");
        assert!(result.is_err());
        assert!(GeminiModel::new("test-key".to_string(), "gemini-1.5-flash").is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let model = GeminiModel::new("super-secret".to_string(), "gemini-1.5-flash").unwrap();
        let debug = format!("{:?}", model);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("gemini-1.5-flash"));
    }

    #[test]
    fn test_endpoint() {
        let model = GeminiModel::new("k".to_string(), "gemini-1.5-flash")
            .unwrap()
            .with_base_url("http://localhost:9000/v1beta/");
        assert_eq!(
            model.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let text = parse(
            r#"{"candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn test_response_errors() {
        assert!(matches!(
            parse(r#"{"error": {"message": "API key not valid"}}"#),
            Err(Error::Generation(msg)) if msg == "API key not valid"
        ));
        assert!(parse(r#"{"candidates": []}"#).is_err());
        assert!(parse(r#"{"candidates": [{"content": {"parts": []}}]}"#).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_generation_error() {
        let model = GeminiModel::new("k".to_string(), "gemini-1.5-flash")
            .unwrap()
            .with_base_url("http://127.0.0.1:1");
        let result = model.generate("hello").await;
        assert!(matches!(result, Err(Error::Generation(_))));
    }
}
