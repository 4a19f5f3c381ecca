use std::io;

/// Errors that can occur while configuring or reporting a lint run.
///
/// Absence of a value is never one of these; lookups report it with an
/// empty [`Optional`](crate::Optional).
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// The configuration file could not be read
    #[error("failed to read lint configuration: {0}")]
    Io(#[from] io::Error),
    /// The configuration is not valid TOML
    #[error("invalid lint configuration: {0}")]
    Parse(#[from] toml_edit::TomlError),
    /// A policy key that no build policy answers to
    #[error("unknown build policy `{0}`")]
    UnknownPolicy(String),
    /// A key holding a value of the wrong kind
    #[error("expected {expected} for `{key}`")]
    InvalidValue { key: String, expected: &'static str },
    /// The console owner has stopped accepting messages
    #[error("console output has shut down")]
    ConsoleClosed,
    /// The console owner thread panicked
    #[error("console writer panicked")]
    ConsoleWorkerPanicked,
}
