use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationOptions, ModelProvider, clean_reply};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for an Ollama-style `/api/generate` endpoint. One POST per turn,
/// no retries; a timeout counts as a transport failure.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    endpoint: String,
    model: String,
    options: GenerationOptions,
}

impl OllamaProvider {
    pub fn new(
        endpoint: String,
        model: String,
        options: GenerationOptions,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            model,
            options,
        })
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerationOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: &self.options,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        Ok(clean_reply(&response.response))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::model::GenerationOptions;

    use super::{GenerateRequest, GenerateResponse};

    #[test]
    fn request_matches_generate_wire_format() {
        let options = GenerationOptions::default();
        let payload = GenerateRequest {
            model: "mistral",
            prompt: "hello",
            stream: false,
            options: &options,
        };

        let value = serde_json::to_value(&payload).expect("request serializes");
        assert_eq!(value["model"], "mistral");
        assert_eq!(value["stream"], Value::Bool(false));
        assert_eq!(value["options"]["max_tokens"], 150);
        assert_eq!(value["options"]["stop"], json!(["USER:", "ASSISTANT:"]));
    }

    #[test]
    fn response_requires_the_text_field() {
        let ok: GenerateResponse =
            serde_json::from_value(json!({"response": "hello"})).expect("valid shape");
        assert_eq!(ok.response, "hello");

        let malformed = serde_json::from_value::<GenerateResponse>(json!({"text": "hello"}));
        assert!(malformed.is_err());
    }
}
