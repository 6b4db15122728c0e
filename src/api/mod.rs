// API client module: thin blocking wrappers over the third-party services the
// commands talk to. Each kind of call sits behind a small trait so commands
// can be exercised against fakes; the live implementations live in the
// submodules and share the helpers below.

use reqwest::blocking::{Client, Response};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::error::ClientError;

pub mod browser;
pub mod gemini;
pub mod imgur;
pub mod openai;
pub mod serp;

pub use browser::ChromiumScreenshotter;
pub use gemini::GeminiClient;
pub use imgur::ImgurClient;
pub use openai::OpenAiClient;
pub use serp::SerpClient;

/// Turns a prompt into text.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, ClientError>;
}

/// Turns a prompt into the URL of a generated image.
pub trait ImageGenerator {
    fn generate_image(&self, prompt: &str, size: ImageSize) -> Result<String, ClientError>;
}

/// Web search returning at most `num` organic results.
pub trait SearchProvider {
    fn search(&self, query: &str, num: usize) -> Result<Vec<SearchResult>, ClientError>;
}

/// Uploads image bytes and returns the public URL.
pub trait ImageHost {
    fn upload(&self, bytes: &[u8]) -> Result<String, ClientError>;
}

/// Captures a page as PNG bytes.
pub trait Screenshotter {
    fn capture(&self, url: &str, options: &CaptureOptions) -> Result<Vec<u8>, ClientError>;
}

/// One organic search hit. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Sizes accepted by the image generation endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1792x1024")]
    Landscape,
    #[serde(rename = "1024x1792")]
    Portrait,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::Square, ImageSize::Landscape, ImageSize::Portrait];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Landscape => "1792x1024",
            ImageSize::Portrait => "1024x1792",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| format!("unsupported image size: {s}"))
    }
}

/// Browser capture settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    pub width: u32,
    pub height: u32,
    /// Extra time given to the page before capture.
    pub wait: Option<Duration>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptions {
            width: 1280,
            height: 800,
            wait: None,
        }
    }
}

/// Build the shared blocking HTTP client.
pub fn build_http_client() -> Result<Client, ClientError> {
    let client = Client::builder()
        .user_agent(concat!("ai-toolkit/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Pass through a 2xx response; otherwise turn status and body into an error.
pub(crate) fn check_status(service: &'static str, res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    Err(ClientError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}

/// GET `url` and return the response body bytes.
pub fn download(client: &Client, url: &str) -> Result<Vec<u8>, ClientError> {
    debug!(url, "downloading");
    let res = client.get(url).send()?;
    let res = check_status("Download", res)?;
    Ok(res.bytes()?.to_vec())
}
