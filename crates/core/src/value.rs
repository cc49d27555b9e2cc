//! Store argument objects.
//!
//! This module defines:
//! - StoreArg: immutable, reference-counted byte string used as a command
//!   argument or reply element
//!
//! Arguments are binary-safe. Cloning a `StoreArg` bumps a reference count;
//! the bytes themselves are shared and never mutated after construction.

use std::fmt;
use std::sync::Arc;

/// Immutable, reference-counted byte string passed to store commands.
///
/// Created fresh per nested call by the value converter, installed on the
/// script client for dispatch, and dropped when the client is reset. A
/// clone shares the underlying allocation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StoreArg {
    bytes: Arc<[u8]>,
}

impl StoreArg {
    /// Create an argument by copying `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self { bytes: Arc::from(bytes) }
    }

    /// The raw argument bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte length of the argument.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the argument is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// UTF-8 view of the argument, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Parse the argument as a signed 64-bit integer.
    ///
    /// This is the parse used for count arguments like `numkeys`, so the
    /// grammar is strict: `0`, or an optional minus followed by digits with
    /// no leading zero. Whitespace, an explicit plus sign, and out-of-range
    /// values are rejected.
    pub fn to_i64(&self) -> Option<i64> {
        let text = self.as_str()?;
        if text == "0" {
            return Some(0);
        }
        let digits = text.strip_prefix('-').unwrap_or(text);
        if !matches!(digits.bytes().next(), Some(b'1'..=b'9')) {
            return None;
        }
        text.parse().ok()
    }
}

impl fmt::Debug for StoreArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.bytes) {
            Ok(text) => f.debug_tuple("StoreArg").field(&text).finish(),
            Err(_) => f.debug_tuple("StoreArg").field(&&self.bytes[..]).finish(),
        }
    }
}

impl From<&str> for StoreArg {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl From<String> for StoreArg {
    fn from(text: String) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl From<&[u8]> for StoreArg {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for StoreArg {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes: Arc::from(bytes) }
    }
}

impl AsRef<[u8]> for StoreArg {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
