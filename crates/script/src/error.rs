//! Error types for the script host.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. Display text is what the original caller sees in its
//! error reply, so several variants carry fixed, user-facing strings.

use thiserror::Error;

/// Result type alias for script host operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Script host errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The command arrived with fewer arguments than its shape requires.
    #[error("wrong number of arguments for '{command}' command")]
    WrongArity {
        /// The command name, lowercase.
        command: String,
    },

    /// The declared key count is not an integer.
    #[error("value is not an integer or out of range")]
    InvalidKeyCount,

    /// The declared key count exceeds the arguments that follow it.
    #[error("Number of keys can't be greater than number of args")]
    TooManyKeys,

    /// The declared key count is negative.
    #[error("Number of keys can't be negative")]
    NegativeKeys,

    /// The script payload is not valid UTF-8.
    #[error("script is not valid UTF-8")]
    ScriptNotUtf8,

    /// Script evaluation failed; the message is the engine's rendering of
    /// the parse error or uncaught exception.
    #[error("{message}")]
    Eval {
        /// The engine's error text.
        message: String,
    },

    /// The engine could not be initialized or a capability registered.
    /// Fatal to host construction. The message already carries context.
    #[error("{message}")]
    EngineInit {
        /// The engine's error text.
        message: String,
    },

    /// Invalid configuration value or unreadable configuration file.
    #[error("invalid configuration: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },
}
