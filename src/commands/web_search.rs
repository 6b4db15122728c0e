use std::rc::Rc;

use super::Services;
use crate::api::SearchResult;
use crate::error::CommandError;
use crate::registry::Command;
use crate::store::{sanitize_filename, timestamp, ReferenceStore};
use crate::ui;

const RESULT_COUNT: usize = 5;

/// Search the web, then have the chat model synthesise the hits.
pub struct WebSearchCommand {
    services: Rc<dyn Services>,
    store: ReferenceStore,
}

impl WebSearchCommand {
    pub fn new(services: Rc<dyn Services>, store: ReferenceStore) -> Self {
        WebSearchCommand { services, store }
    }
}

impl Command for WebSearchCommand {
    fn name(&self) -> &str {
        "web-search"
    }

    fn description(&self) -> &str {
        "Search and analyze with OpenAI"
    }

    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage("Usage: web-search <query>".into()));
        }

        let query = args.join(" ");
        ui::info(&format!("🔍 Searching for: {query}"));

        let search = self.services.search()?;
        let results = ui::with_spinner("Searching...", || search.search(&query, RESULT_COUNT))?;
        let results_text = format_results(&results);

        ui::heading("📄 Top search results:");
        for (i, r) in results.iter().enumerate() {
            ui::info(&format!("{}. {} - {}", i + 1, r.title, r.link));
        }

        let chat = self.services.chat()?;
        let prompt = format!(
            "You are a research assistant. Summarize and synthesize findings for the query \"{query}\". \
             Provide key points, concise summary, and list sources.\n\nSearch Results:\n{results_text}"
        );
        let response = ui::with_spinner("Synthesizing...", || chat.generate(&prompt))?;

        ui::heading("📋 Response:");
        ui::info(&response);

        let filename = format!("{}-{}.md", sanitize_filename(&query), timestamp());
        let content = format!(
            "# Search Results\n\n**Query:** {query}\n\n## Top Results\n\n{results_text}\n\n## Summary\n\n{response}"
        );
        self.store.save_reference(&filename, &content, None)?;
        Ok(())
    }
}

/// Numbered blocks of title, snippet and link separated by blank lines.
fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("Result {}: {}\n{}\n{}", i + 1, r.title, r.snippet, r.link))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numbered_blocks() {
        let results = vec![
            SearchResult {
                title: "Rust".into(),
                snippet: "Fast".into(),
                link: "https://rust-lang.org".into(),
            },
            SearchResult::default(),
        ];
        assert_eq!(
            format_results(&results),
            "Result 1: Rust\nFast\nhttps://rust-lang.org\n\nResult 2: \n\n"
        );
        assert_eq!(format_results(&[]), "");
    }
}
