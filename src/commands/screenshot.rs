use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use super::Services;
use crate::api::CaptureOptions;
use crate::args::parse_args;
use crate::error::CommandError;
use crate::registry::Command;
use crate::store::{sanitize_filename, timestamp, ReferenceStore};
use crate::ui;

const USAGE: &str = "Usage: screenshot <url> [--wait 1000]";

/// Capture a page, host the image and ask Gemini for design feedback.
pub struct ScreenshotCommand {
    services: Rc<dyn Services>,
    store: ReferenceStore,
}

impl ScreenshotCommand {
    pub fn new(services: Rc<dyn Services>, store: ReferenceStore) -> Self {
        ScreenshotCommand { services, store }
    }
}

impl Command for ScreenshotCommand {
    fn name(&self) -> &str {
        "screenshot"
    }

    fn description(&self) -> &str {
        "Take a screenshot of a URL and send to Gemini for design feedback"
    }

    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        let parsed = parse_args(args);
        let Some(url) = parsed.params.first() else {
            return Err(CommandError::Usage(USAGE.into()));
        };

        let options = CaptureOptions {
            wait: parse_wait(parsed.flag("wait", None)),
            ..CaptureOptions::default()
        };
        let base = format!("{}-{}", sanitize_filename(url), timestamp());

        ui::info(&format!("📷 Launching browser to capture: {url}"));
        let browser = self.services.screenshotter()?;
        let bytes = ui::with_spinner("Capturing...", || browser.capture(url, &options))?;
        self.store.save_image(&format!("{base}.png"), &bytes)?;

        ui::info("☁️ Uploading screenshot to Imgur...");
        let host = self.services.image_host()?;
        let image_url = ui::with_spinner("Uploading...", || host.upload(&bytes))?;
        ui::info(&format!("🔗 Image URL: {image_url}"));

        let gemini = self.services.gemini()?;
        let prompt = feedback_prompt(&image_url);
        ui::info("🤖 Sending image + prompt to Gemini for feedback...");
        let feedback = ui::with_spinner("Waiting for Gemini...", || gemini.generate(&prompt))?;

        ui::heading("📝 Gemini feedback:\n");
        ui::info(&feedback);

        let content = format!(
            "# Gemini Screenshot Feedback\n\n**URL:** {url}\n**Image:** {image_url}\n\n## Feedback\n\n{feedback}"
        );
        self.store.save_reference(&format!("{base}-feedback.md"), &content, None)?;
        Ok(())
    }
}

fn feedback_prompt(image_url: &str) -> String {
    format!(
        "Please provide design feedback for the following webpage. Focus on layout, visual hierarchy, \
         accessibility, color contrast, and suggested improvements. Image: {image_url}"
    )
}

/// `--wait` in milliseconds; anything unparsable is ignored with a warning.
fn parse_wait(flag: Option<&str>) -> Option<Duration> {
    let raw = flag?;
    match raw.parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            ui::warn(&format!("Invalid wait \"{raw}\". Ignoring."));
            warn!(wait = raw, "invalid wait, ignoring");
            None
        }
    }
}
