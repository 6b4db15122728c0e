use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{check_status, ImageGenerator, ImageSize, TextGenerator};
use crate::config::{require, Config, OPENAI_API_KEY};
use crate::error::ClientError;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;

/// OpenAI client covering chat completions and image generation.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    chat_model: String,
    image_model: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: ImageSize,
    quality: &'a str,
}

impl OpenAiClient {
    /// Fails when `OPENAI_API_KEY` is not configured.
    pub fn new(client: Client, config: &Config) -> Result<Self, ClientError> {
        let api_key = require(&config.openai_api_key, OPENAI_API_KEY)?.to_string();
        Ok(OpenAiClient {
            client,
            base_url: config.openai_base_url.clone(),
            chat_model: config.openai_chat_model.clone(),
            image_model: config.openai_image_model.clone(),
            api_key,
        })
    }

    fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?;
        Ok(check_status("OpenAI", res)?.json()?)
    }
}

impl TextGenerator for OpenAiClient {
    fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        debug!(model = %self.chat_model, prompt_len = prompt.len(), "chat completion request");
        let req = ChatRequest {
            model: &self.chat_model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let data = self.post_json("/chat/completions", &req)?;
        Ok(string_at(&data, "/choices/0/message/content"))
    }
}

impl ImageGenerator for OpenAiClient {
    fn generate_image(&self, prompt: &str, size: ImageSize) -> Result<String, ClientError> {
        debug!(model = %self.image_model, %size, "image generation request");
        let req = ImageRequest {
            model: &self.image_model,
            prompt,
            n: 1,
            size,
            quality: "standard",
        };
        let data = self.post_json("/images/generations", &req)?;
        Ok(string_at(&data, "/data/0/url"))
    }
}

fn string_at(data: &Value, pointer: &str) -> String {
    data.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_content_or_empty() {
        let data = json!({ "choices": [{ "message": { "role": "assistant", "content": "Summary" } }] });
        assert_eq!(string_at(&data, "/choices/0/message/content"), "Summary");

        let refusal = json!({ "choices": [{ "message": { "content": null } }] });
        assert_eq!(string_at(&refusal, "/choices/0/message/content"), "");
    }

    #[test]
    fn image_url_or_empty() {
        let data = json!({ "data": [{ "url": "https://img.example/1.png" }] });
        assert_eq!(string_at(&data, "/data/0/url"), "https://img.example/1.png");
        assert_eq!(string_at(&json!({ "data": [] }), "/data/0/url"), "");
    }

    #[test]
    fn image_request_body_shape() {
        let req = ImageRequest {
            model: "dall-e-3",
            prompt: "a lighthouse",
            n: 1,
            size: ImageSize::Landscape,
            quality: "standard",
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "model": "dall-e-3",
                "prompt": "a lighthouse",
                "n": 1,
                "size": "1792x1024",
                "quality": "standard"
            })
        );
    }

    #[test]
    fn construction_requires_key() {
        let err = OpenAiClient::new(Client::new(), &Config::default()).err().unwrap();
        assert_eq!(err.to_string(), "OPENAI_API_KEY not configured");
    }
}
