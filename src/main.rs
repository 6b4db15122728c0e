// Entrypoint for the CLI.
// - Keeps `main` small: load config, build the registry, dispatch one command.
// - Start-up failures bubble out as `anyhow` errors; command failures map to
//   their exit code.

use anyhow::Context;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

use ai_toolkit_cli::commands::{default_registry, LiveServices};
use ai_toolkit_cli::config::Config;
use ai_toolkit_cli::store::ReferenceStore;
use ai_toolkit_cli::{ui, CommandError};

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env();
    let services = LiveServices::new(config).context("Failed to build HTTP client")?;
    let store = ReferenceStore::current_dir().context("Failed to resolve working directory")?;
    let registry = default_registry(Rc::new(services), store);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((name, rest)) = args.split_first() else {
        ui::banner("🚀 CLI AI Toolkit");
        registry.list_commands();
        return Ok(());
    };

    if let Err(err) = registry.execute(name, rest) {
        if let CommandError::Usage(usage) = &err {
            ui::error(usage);
        }
        std::process::exit(err.exit_code());
    }
    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
