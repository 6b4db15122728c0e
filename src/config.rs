// Process configuration, read once at start-up and handed to each remote
// client constructor. Credentials are optional here; a client fails when it
// is built without the one it needs.

use std::path::PathBuf;
use tracing::debug;

use crate::error::ClientError;

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const SERPAPI_API_KEY: &str = "SERPAPI_API_KEY";
pub const IMGUR_CLIENT_ID: &str = "IMGUR_CLIENT_ID";

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_CHAT_MODEL: &str = "gpt-4o";
const DEFAULT_OPENAI_IMAGE_MODEL: &str = "dall-e-3";
const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";
const DEFAULT_IMGUR_BASE_URL: &str = "https://api.imgur.com";

/// Directory under the user config dir holding an optional `.env`.
const APP_CONFIG_DIR: &str = "ai-toolkit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_chat_model: String,
    pub openai_image_model: String,
    pub serpapi_api_key: Option<String>,
    pub serpapi_base_url: String,
    pub imgur_client_id: Option<String>,
    pub imgur_base_url: String,
    /// Headless browser executable; searched on PATH when unset.
    pub chrome_bin: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config::from_lookup(|_| None)
    }
}

impl Config {
    /// Load `.env` files, then read the process environment.
    pub fn from_env() -> Self {
        load_dotenv();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Config {
            gemini_api_key: get(GEMINI_API_KEY),
            gemini_base_url: trim_base(or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)),
            gemini_model: or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            openai_api_key: get(OPENAI_API_KEY),
            openai_base_url: trim_base(or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)),
            openai_chat_model: or("OPENAI_CHAT_MODEL", DEFAULT_OPENAI_CHAT_MODEL),
            openai_image_model: or("OPENAI_IMAGE_MODEL", DEFAULT_OPENAI_IMAGE_MODEL),
            serpapi_api_key: get(SERPAPI_API_KEY),
            serpapi_base_url: trim_base(or("SERPAPI_BASE_URL", DEFAULT_SERPAPI_BASE_URL)),
            imgur_client_id: get(IMGUR_CLIENT_ID),
            imgur_base_url: trim_base(or("IMGUR_BASE_URL", DEFAULT_IMGUR_BASE_URL)),
            chrome_bin: get("CHROME_BIN").map(PathBuf::from),
        }
    }
}

/// Return the credential in `value` or a `MissingCredential` error naming `var`.
pub fn require<'a>(value: &'a Option<String>, var: &'static str) -> Result<&'a str, ClientError> {
    value.as_deref().ok_or(ClientError::MissingCredential(var))
}

/// `.env` in the working directory first, then the per-user one. Variables
/// that are already set are left alone.
fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "loaded .env");
    }
    if let Some(path) = dirs::config_dir().map(|d| d.join(APP_CONFIG_DIR).join(".env")) {
        if path.is_file() && dotenvy::from_path(&path).is_ok() {
            debug!(path = %path.display(), "loaded user .env");
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::default();
        assert_eq!(cfg.gemini_api_key, None);
        assert_eq!(cfg.gemini_model, "gemini-1.5-pro");
        assert_eq!(cfg.openai_chat_model, "gpt-4o");
        assert_eq!(cfg.openai_image_model, "dall-e-3");
        assert_eq!(cfg.serpapi_base_url, "https://serpapi.com");
        assert_eq!(cfg.chrome_bin, None);
    }

    #[test]
    fn reads_credentials_and_overrides() {
        let cfg = config(&[
            (GEMINI_API_KEY, "g-key"),
            (IMGUR_CLIENT_ID, "client"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1/"),
            ("CHROME_BIN", "/usr/bin/chromium"),
        ]);
        assert_eq!(cfg.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(cfg.imgur_client_id.as_deref(), Some("client"));
        assert_eq!(cfg.openai_base_url, "http://localhost:9000/v1");
        assert_eq!(cfg.chrome_bin, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn blank_values_are_unset() {
        let cfg = config(&[(SERPAPI_API_KEY, "  "), ("GEMINI_MODEL", "")]);
        assert_eq!(cfg.serpapi_api_key, None);
        assert_eq!(cfg.gemini_model, "gemini-1.5-pro");
    }

    #[test]
    fn require_names_missing_variable() {
        let cfg = Config::default();
        let err = require(&cfg.serpapi_api_key, SERPAPI_API_KEY).unwrap_err();
        assert_eq!(err.to_string(), "SERPAPI_API_KEY not configured");

        let cfg = config(&[(SERPAPI_API_KEY, "s")]);
        assert_eq!(require(&cfg.serpapi_api_key, SERPAPI_API_KEY).unwrap(), "s");
    }
}
