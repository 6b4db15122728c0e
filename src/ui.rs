// UI layer: the user-facing console channel. Commands print progress and
// results through these helpers so styling stays in one place. Results go to
// stdout; warnings, errors and spinners go to stderr.

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a spinner with `msg`. Call `finish_and_clear` once the remote call
/// returns. indicatif hides it when stderr is not a terminal.
pub fn spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Run `f` behind a spinner showing `msg`.
pub fn with_spinner<T>(msg: &str, f: impl FnOnce() -> T) -> T {
    let pb = spinner(msg);
    let out = f();
    pb.finish_and_clear();
    out
}

pub fn banner(text: &str) {
    println!("{}", text.bold());
}

/// Section heading, preceded by a blank line.
pub fn heading(text: &str) {
    println!("\n{}", text.bold());
}

pub fn info(text: &str) {
    println!("{text}");
}

pub fn success(text: &str) {
    println!("{} {}", "✓".green(), text);
}

pub fn warn(text: &str) {
    eprintln!("{}", format!("⚠️  {text}").yellow());
}

pub fn error(text: &str) {
    eprintln!("{}", format!("❌ {text}").red());
}
