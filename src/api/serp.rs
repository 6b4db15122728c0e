use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use super::{check_status, SearchProvider, SearchResult};
use crate::config::{require, Config, SERPAPI_API_KEY};
use crate::error::ClientError;

/// SerpAPI search client.
#[derive(Clone)]
pub struct SerpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SerpClient {
    /// Fails when `SERPAPI_API_KEY` is not configured.
    pub fn new(client: Client, config: &Config) -> Result<Self, ClientError> {
        let api_key = require(&config.serpapi_api_key, SERPAPI_API_KEY)?.to_string();
        Ok(SerpClient {
            client,
            base_url: config.serpapi_base_url.clone(),
            api_key,
        })
    }
}

impl SearchProvider for SerpClient {
    fn search(&self, query: &str, num: usize) -> Result<Vec<SearchResult>, ClientError> {
        let url = format!("{}/search.json", self.base_url);
        debug!(query, num, "serp search");

        let num_param = num.to_string();
        let res = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("num", num_param.as_str()),
            ])
            .send()?;
        let data: Value = check_status("SerpAPI", res)?.json()?;
        Ok(organic_results(&data, num))
    }
}

/// Map up to `num` entries of `organic_results`, tolerating missing fields.
fn organic_results(data: &Value, num: usize) -> Vec<SearchResult> {
    let Some(organic) = data.get("organic_results").and_then(Value::as_array) else {
        return Vec::new();
    };

    organic
        .iter()
        .take(num)
        .map(|r| SearchResult {
            title: text(r, "title")
                .or_else(|| r.get("position").filter(|p| !p.is_null()).map(scalar_text))
                .unwrap_or_default(),
            snippet: text(r, "snippet").or_else(|| text(r, "excerpt")).unwrap_or_default(),
            link: text(r, "link").or_else(|| text(r, "url")).unwrap_or_default(),
        })
        .collect()
}

/// Non-empty string field.
fn text(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
