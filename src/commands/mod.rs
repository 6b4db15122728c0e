// Concrete commands. Each one validates its arguments, calls one or more
// remote clients in sequence and writes its artifacts through the
// `ReferenceStore`. Clients are obtained from a `Services` factory at run
// time, so a missing credential only affects the commands that need it.

use reqwest::blocking::Client;
use std::rc::Rc;

use crate::api::{
    self, ChromiumScreenshotter, GeminiClient, ImageGenerator, ImageHost, ImgurClient,
    OpenAiClient, Screenshotter, SearchProvider, SerpClient, TextGenerator,
};
use crate::config::Config;
use crate::error::ClientError;
use crate::registry::CommandRegistry;
use crate::store::ReferenceStore;

mod gemini;
mod image_generate;
mod screenshot;
mod web_search;

pub use gemini::GeminiCommand;
pub use image_generate::ImageGenerateCommand;
pub use screenshot::ScreenshotCommand;
pub use web_search::WebSearchCommand;

/// Factory for the remote clients commands depend on.
pub trait Services {
    /// Gemini text generation.
    fn gemini(&self) -> Result<Box<dyn TextGenerator>, ClientError>;

    /// OpenAI chat completion.
    fn chat(&self) -> Result<Box<dyn TextGenerator>, ClientError>;

    fn image_generator(&self) -> Result<Box<dyn ImageGenerator>, ClientError>;

    fn search(&self) -> Result<Box<dyn SearchProvider>, ClientError>;

    fn image_host(&self) -> Result<Box<dyn ImageHost>, ClientError>;

    fn screenshotter(&self) -> Result<Box<dyn Screenshotter>, ClientError>;

    /// Fetch the bytes behind `url`.
    fn download(&self, url: &str) -> Result<Vec<u8>, ClientError>;
}

/// Builds the real HTTP-backed clients from a shared config and client.
pub struct LiveServices {
    config: Config,
    http: Client,
}

impl LiveServices {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        Ok(LiveServices {
            config,
            http: api::build_http_client()?,
        })
    }
}

impl Services for LiveServices {
    fn gemini(&self) -> Result<Box<dyn TextGenerator>, ClientError> {
        Ok(Box::new(GeminiClient::new(self.http.clone(), &self.config)?))
    }

    fn chat(&self) -> Result<Box<dyn TextGenerator>, ClientError> {
        Ok(Box::new(OpenAiClient::new(self.http.clone(), &self.config)?))
    }

    fn image_generator(&self) -> Result<Box<dyn ImageGenerator>, ClientError> {
        Ok(Box::new(OpenAiClient::new(self.http.clone(), &self.config)?))
    }

    fn search(&self) -> Result<Box<dyn SearchProvider>, ClientError> {
        Ok(Box::new(SerpClient::new(self.http.clone(), &self.config)?))
    }

    fn image_host(&self) -> Result<Box<dyn ImageHost>, ClientError> {
        Ok(Box::new(ImgurClient::new(self.http.clone(), &self.config)?))
    }

    fn screenshotter(&self) -> Result<Box<dyn Screenshotter>, ClientError> {
        Ok(Box::new(ChromiumScreenshotter::new(&self.config)?))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        api::download(&self.http, url)
    }
}

/// Registry with every built-in command, in listing order.
pub fn default_registry(services: Rc<dyn Services>, store: ReferenceStore) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(Box::new(WebSearchCommand::new(Rc::clone(&services), store.clone())));
    registry.register(Box::new(GeminiCommand::new(Rc::clone(&services), store.clone())));
    registry.register(Box::new(ImageGenerateCommand::new(Rc::clone(&services), store.clone())));
    registry.register(Box::new(ScreenshotCommand::new(services, store)));
    registry
}
