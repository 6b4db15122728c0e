// Library root
// -----------
// This crate exposes the library surface for the `ai-toolkit` binary, which
// only wires configuration and logging before handing over to the registry.
//
// Module responsibilities:
// - `args`: splits command arguments into positionals and `--flag value` pairs.
// - `registry`: the `Command` trait and the name-keyed dispatcher.
// - `commands`: the built-in commands and the `Services` client factory.
// - `api`: blocking clients for the third-party services.
// - `store`: writes references and images below the working directory.
// - `config`: credentials and endpoints read once from the environment.
// - `ui`: console output and spinners.
pub mod api;
pub mod args;
pub mod commands;
pub mod config;
pub mod error;
pub mod registry;
pub mod store;
pub mod ui;

pub use error::{ClientError, CommandError};
pub use registry::{Command, CommandRegistry};
