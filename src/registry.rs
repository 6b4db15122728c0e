// Command registry: named commands held in registration order, dispatched by
// name from the entry point.

use std::io::{self, Write};
use tracing::debug;

use crate::error::CommandError;
use crate::ui;

/// A single user-facing operation.
pub trait Command {
    /// Unique name used on the command line.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Run the command with the arguments that followed its name.
    fn execute(&self, args: &[String]) -> Result<(), CommandError>;
}

/// Lookup table of commands keyed by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `command`. A command with the same name is replaced in place, so
    /// the listing keeps the position of the first registration.
    pub fn register(&mut self, command: Box<dyn Command>) {
        match self.position(command.name()) {
            Some(idx) => self.commands[idx] = command,
            None => self.commands.push(command),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.position(name).map(|idx| self.commands[idx].as_ref())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.commands.len()
    }

    /// Run the command called `name`.
    ///
    /// An unknown name is reported together with the command listing and is
    /// not an error. A failing command is reported here and its error handed
    /// back so the caller can exit non-zero. Usage errors are passed back
    /// untouched for the caller to print.
    pub fn execute(&self, name: &str, args: &[String]) -> Result<(), CommandError> {
        let Some(command) = self.get(name) else {
            ui::error(&format!("Command not found: {name}"));
            self.list_commands();
            return Ok(());
        };

        debug!(command = name, ?args, "dispatching");
        match command.execute(args) {
            Ok(()) => Ok(()),
            Err(err) if err.is_usage() => Err(err),
            Err(err) => {
                ui::error(&format!("Command failed: {err}"));
                Err(err)
            }
        }
    }

    /// Print every command's name and description to stdout.
    pub fn list_commands(&self) {
        let stdout = io::stdout();
        // stdout closed: nothing left to show the listing on
        let _ = self.write_listing(&mut stdout.lock());
    }

    /// Write the command listing to `out` in registration order.
    pub fn write_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n📚 Available Commands:")?;
        for command in &self.commands {
            writeln!(out, "  {}: {}", command.name(), command.description())?;
        }
        writeln!(out)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|c| c.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        name: &'static str,
        description: &'static str,
        calls: Rc<RefCell<Vec<Vec<String>>>>,
        fail: Option<fn() -> CommandError>,
    }

    impl Probe {
        fn new(name: &'static str, description: &'static str) -> Self {
            Probe {
                name,
                description,
                calls: Rc::default(),
                fail: None,
            }
        }
    }

    impl Command for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn execute(&self, args: &[String]) -> Result<(), CommandError> {
            self.calls.borrow_mut().push(args.to_vec());
            match self.fail {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }
    }

    fn missing_credential() -> CommandError {
        ClientError::MissingCredential("IMGUR_CLIENT_ID").into()
    }

    fn usage() -> CommandError {
        CommandError::Usage("Usage: gemini <prompt>".into())
    }

    fn listing(registry: &CommandRegistry) -> String {
        let mut buf = Vec::new();
        registry.write_listing(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn duplicate_name_keeps_second_registration() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(Probe::new("gemini", "first")));
        registry.register(Box::new(Probe::new("other", "x")));
        registry.register(Box::new(Probe::new("gemini", "second")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("gemini").unwrap().description(), "second");
        assert_eq!(listing(&registry), "\n📚 Available Commands:\n  gemini: second\n  other: x\n\n");
    }

    #[test]
    fn dispatches_args_to_named_command() {
        let probe = Probe::new("web-search", "search");
        let calls = Rc::clone(&probe.calls);
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(probe));

        let args = vec!["rust".to_string(), "lang".to_string()];
        registry.execute("web-search", &args).unwrap();
        assert_eq!(*calls.borrow(), vec![args]);
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let probe = Probe::new("gemini", "g");
        let calls = Rc::clone(&probe.calls);
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(probe));

        assert!(registry.execute("nope", &[]).is_ok());
        assert!(calls.borrow().is_empty());
        assert!(CommandRegistry::new().execute("nope", &[]).is_ok());
    }

    #[test]
    fn failing_command_returns_error_with_nonzero_exit() {
        let mut probe = Probe::new("screenshot", "s");
        probe.fail = Some(missing_credential);
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(probe));

        let err = registry.execute("screenshot", &["https://example.com".into()]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "IMGUR_CLIENT_ID not configured");
    }

    #[test]
    fn usage_error_passes_through() {
        let mut probe = Probe::new("gemini", "g");
        probe.fail = Some(usage);
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(probe));

        let err = registry.execute("gemini", &[]).unwrap_err();
        assert!(err.is_usage());
    }
}
