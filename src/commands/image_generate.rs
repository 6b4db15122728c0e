use serde::Serialize;
use std::rc::Rc;
use tracing::warn;

use super::Services;
use crate::api::ImageSize;
use crate::args::parse_args;
use crate::error::CommandError;
use crate::registry::Command;
use crate::store::{sanitize_filename, timestamp, ReferenceStore};
use crate::ui;

const USAGE: &str = "Usage: image-generate <prompt> [--size 1024x1024|1792x1024|1024x1792]\n\
                     Example: image-generate \"A cinematic lighthouse in a storm\" --size 1024x1024";

/// Generate an image, download it and save it under `images/`.
pub struct ImageGenerateCommand {
    services: Rc<dyn Services>,
    store: ReferenceStore,
}

/// Printed once the image is on disk.
#[derive(Debug, Serialize)]
struct ImageMetadata<'a> {
    prompt: &'a str,
    size: ImageSize,
    timestamp: &'a str,
    url: &'a str,
    filename: &'a str,
}

impl ImageGenerateCommand {
    pub fn new(services: Rc<dyn Services>, store: ReferenceStore) -> Self {
        ImageGenerateCommand { services, store }
    }
}

impl Command for ImageGenerateCommand {
    fn name(&self) -> &str {
        "image-generate"
    }

    fn description(&self) -> &str {
        "Generate images with DALL-E (supports --size flag)"
    }

    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage(USAGE.into()));
        }

        let parsed = parse_args(args);
        if parsed.params.is_empty() {
            return Err(CommandError::Usage("Prompt is required".into()));
        }

        let prompt = parsed.params.join(" ");
        let size = resolve_size(parsed.flag("size", None));

        ui::info(&format!("🎨 Generating image ({size})..."));
        ui::info(&format!("📝 Prompt: {prompt}"));

        let generator = self.services.image_generator()?;
        let url = ui::with_spinner("Generating...", || generator.generate_image(&prompt, size))?;
        ui::info(&format!("\n✨ Image URL: {url}"));

        let bytes = ui::with_spinner("Downloading...", || self.services.download(&url))?;

        let timestamp = timestamp();
        let filename = format!("{}-{}-{}.png", sanitize_filename(&prompt), size, timestamp);
        self.store.save_image(&filename, &bytes)?;

        let metadata = ImageMetadata {
            prompt: &prompt,
            size,
            timestamp: &timestamp,
            url: &url,
            filename: &filename,
        };
        ui::heading("📊 Metadata:");
        ui::info(&serde_json::to_string_pretty(&metadata)?);
        Ok(())
    }
}

/// Parse the `--size` flag. Unsupported values warn and fall back to the
/// default square size.
fn resolve_size(flag: Option<&str>) -> ImageSize {
    let Some(raw) = flag else {
        return ImageSize::default();
    };
    raw.parse().unwrap_or_else(|_| {
        let fallback = ImageSize::default();
        ui::warn(&format!("Invalid size \"{raw}\". Using default: {fallback}"));
        warn!(size = raw, "invalid size, using default");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_defaults_and_fallbacks() {
        assert_eq!(resolve_size(None), ImageSize::Square);
        assert_eq!(resolve_size(Some("1792x1024")), ImageSize::Landscape);
        assert_eq!(resolve_size(Some("999x999")), ImageSize::Square);
        // bare `--size` with no value
        assert_eq!(resolve_size(Some("true")), ImageSize::Square);
    }

    #[test]
    fn metadata_json_fields() {
        let metadata = ImageMetadata {
            prompt: "a cat",
            size: ImageSize::Portrait,
            timestamp: "2024-01-01T00-00-00",
            url: "https://img.example/cat.png",
            filename: "a-cat-1024x1792-2024-01-01T00-00-00.png",
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["size"], "1024x1792");
        assert_eq!(value["filename"], "a-cat-1024x1792-2024-01-01T00-00-00.png");
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
