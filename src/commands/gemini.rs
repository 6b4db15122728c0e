use std::rc::Rc;

use super::Services;
use crate::error::CommandError;
use crate::registry::Command;
use crate::store::{sanitize_filename, timestamp, ReferenceStore};
use crate::ui;

const SUBDIR: &str = "ai_feedback";

/// Send a prompt to Gemini and keep the answer under `references/ai_feedback`.
pub struct GeminiCommand {
    services: Rc<dyn Services>,
    store: ReferenceStore,
}

impl GeminiCommand {
    pub fn new(services: Rc<dyn Services>, store: ReferenceStore) -> Self {
        GeminiCommand { services, store }
    }
}

impl Command for GeminiCommand {
    fn name(&self) -> &str {
        "gemini"
    }

    fn description(&self) -> &str {
        "Get feedback from Google Gemini"
    }

    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage("Usage: gemini <prompt>".into()));
        }

        let prompt = args.join(" ");
        ui::info(&format!("🤖 Sending to Gemini: {prompt}"));

        let gemini = self.services.gemini()?;
        let response = ui::with_spinner("Waiting for Gemini...", || gemini.generate(&prompt))?;

        ui::heading("📝 Gemini Response:");
        ui::info(&response);

        let filename = format!("{}-{}.md", sanitize_filename(&prompt), timestamp());
        let content = format!("# Gemini Response\n\n**Prompt:** {prompt}\n\n## Response\n\n{response}");
        self.store.save_reference(&filename, &content, Some(SUBDIR))?;
        Ok(())
    }
}
