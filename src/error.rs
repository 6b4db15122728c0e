//! Error types shared by the remote clients and the commands.

use thiserror::Error;

/// Failures raised by a Remote Service Client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A credential needed to build the client is not set.
    #[error("{0} not configured")]
    MissingCredential(&'static str),

    /// Transport or decode failure. The request URL is stripped since it can
    /// carry an API key in its query string.
    #[error("Network error: {0}")]
    Http(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("{service} request failed: {status} - {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The headless browser could not be started or produced no image.
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err.without_url())
    }
}

/// Failures raised while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Missing or unusable arguments; carries the usage text.
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CommandError {
    /// Process exit code for this error. Every failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Usage(_)
            | CommandError::Client(_)
            | CommandError::Io(_)
            | CommandError::Serialize(_) => 1,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, CommandError::Usage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_message_names_the_variable() {
        let err = ClientError::MissingCredential("GEMINI_API_KEY");
        assert_eq!(err.to_string(), "GEMINI_API_KEY not configured");
    }

    #[test]
    fn client_errors_surface_unchanged_through_commands() {
        let err: CommandError = ClientError::InvalidResponse("Imgur upload failed".into()).into();
        assert_eq!(err.to_string(), "Invalid response: Imgur upload failed");
        assert_eq!(err.exit_code(), 1);
        assert!(!err.is_usage());
    }

    #[test]
    fn usage_errors_exit_one() {
        let err = CommandError::Usage("Usage: gemini <prompt>".into());
        assert!(err.is_usage());
        assert_eq!(err.exit_code(), 1);
    }
}
