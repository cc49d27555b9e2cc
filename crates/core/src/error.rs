//! Error types for the store-side seams.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. Display text is load-bearing: `CommandError` text is
//! exactly what script code observes in a thrown error, and `RespError`
//! text ends up in protocol-error throws.

use thiserror::Error;

/// Failure of a nested command dispatch.
///
/// Produced by [`CommandStore`](crate::CommandStore) implementations when a
/// command cannot run at all (unknown name, wrong arity, store-level type
/// errors). The display text crosses the bridge unchanged and becomes the
/// script-visible error message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CommandError {
    message: String,
}

impl CommandError {
    /// A command error with the given user-visible text.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The store has no command with this name.
    pub fn unknown_command(name: &str) -> Self {
        Self::new(format!("unknown command '{name}'"))
    }

    /// The command exists but was invoked with the wrong argument count.
    pub fn wrong_arity(name: &str) -> Self {
        Self::new(format!("wrong number of arguments for '{name}' command"))
    }

    /// The user-visible error text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Reply wire-format decode failure.
///
/// Decoding only sees bytes the store itself wrote, so any of these
/// indicates a store-side bug rather than user error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RespError {
    /// The reply ended before a complete frame was read.
    #[error("unexpected end of reply")]
    UnexpectedEof,

    /// The frame starts with a byte that is not a known reply type.
    #[error("unknown reply type byte 0x{byte:02x}")]
    UnknownType {
        /// The offending first byte.
        byte: u8,
    },

    /// An integer frame did not contain a valid signed 64-bit integer.
    #[error("invalid integer in reply: {text:?}")]
    BadInteger {
        /// The unparsable frame body.
        text: String,
    },

    /// A bulk or array header declared an invalid length.
    #[error("invalid length header in reply: {text:?}")]
    BadLength {
        /// The unparsable or out-of-range header body.
        text: String,
    },

    /// A bulk payload was not terminated with CRLF.
    #[error("bulk payload is not CRLF-terminated")]
    MissingCrlf,

    /// Array nesting exceeded the decoder's depth budget.
    #[error("reply nesting too deep")]
    TooDeep,

    /// Bytes remained after one complete top-level reply.
    #[error("{trailing} trailing bytes after reply")]
    TrailingData {
        /// Number of undecoded bytes.
        trailing: usize,
    },
}
