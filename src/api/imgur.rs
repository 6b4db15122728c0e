use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::{multipart, Client};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::debug;

use super::{check_status, ImageHost};
use crate::config::{require, Config, IMGUR_CLIENT_ID};
use crate::error::ClientError;

/// Anonymous Imgur uploads authorised by client id.
#[derive(Clone)]
pub struct ImgurClient {
    client: Client,
    base_url: String,
    client_id: String,
}

impl ImgurClient {
    /// Fails when `IMGUR_CLIENT_ID` is not configured.
    pub fn new(client: Client, config: &Config) -> Result<Self, ClientError> {
        let client_id = require(&config.imgur_client_id, IMGUR_CLIENT_ID)?.to_string();
        Ok(ImgurClient {
            client,
            base_url: config.imgur_base_url.clone(),
            client_id,
        })
    }
}

impl ImageHost for ImgurClient {
    /// Send the image as a base64 `image` form field and return its link.
    fn upload(&self, bytes: &[u8]) -> Result<String, ClientError> {
        let url = format!("{}/3/image", self.base_url);
        debug!(bytes = bytes.len(), "imgur upload");

        let form = multipart::Form::new().text("image", STANDARD.encode(bytes));
        let res = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Client-ID {}", self.client_id))
            .multipart(form)
            .send()?;
        let data: Value = check_status("Imgur", res)?.json()?;
        extract_link(&data)
    }
}

fn extract_link(data: &Value) -> Result<String, ClientError> {
    data.pointer("/data/link")
        .and_then(Value::as_str)
        .filter(|link| !link.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ClientError::InvalidResponse("Imgur upload failed".into()))
}
