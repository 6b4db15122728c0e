use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::{check_status, TextGenerator};
use crate::config::{require, Config, GEMINI_API_KEY};
use crate::error::ClientError;

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Fails when `GEMINI_API_KEY` is not configured.
    pub fn new(client: Client, config: &Config) -> Result<Self, ClientError> {
        let api_key = require(&config.gemini_api_key, GEMINI_API_KEY)?.to_string();
        Ok(GeminiClient {
            client,
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            api_key,
        })
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        debug!(model = %self.model, prompt_len = prompt.len(), "gemini request");

        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let res = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()?;
        let data: Value = check_status("Gemini", res)?.json()?;
        Ok(extract_text(&data))
    }
}

/// First candidate's first text part, or empty.
fn extract_text(data: &Value) -> String {
    data.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let data = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Looks clean." }, { "text": "ignored" }] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ]
        });
        assert_eq!(extract_text(&data), "Looks clean.");
    }

    #[test]
    fn missing_fields_yield_empty_text() {
        assert_eq!(extract_text(&json!({})), "");
        assert_eq!(extract_text(&json!({ "candidates": [] })), "");
        assert_eq!(extract_text(&json!({ "candidates": [{ "content": { "parts": [] } }] })), "");
    }

    #[test]
    fn construction_requires_key() {
        let client = Client::new();
        let err = GeminiClient::new(client.clone(), &Config::default()).err().unwrap();
        assert_eq!(err.to_string(), "GEMINI_API_KEY not configured");

        let config = Config::from_lookup(|k| (k == GEMINI_API_KEY).then(|| "k".to_string()));
        assert!(GeminiClient::new(client, &config).is_ok());
    }

    #[test]
    fn network_error_does_not_reveal_key() {
        let config = Config::from_lookup(|k| match k {
            GEMINI_API_KEY => Some("SECRET-KEY-123".to_string()),
            "GEMINI_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
            _ => None,
        });
        let gemini = GeminiClient::new(Client::new(), &config).unwrap();
        let err = gemini.generate("hi").unwrap_err();

        assert!(matches!(err, ClientError::Http(_)));
        assert!(!err.to_string().contains("SECRET-KEY-123"), "{err}");
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
    }
}
