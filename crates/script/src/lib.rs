//! Script-to-store bridge for Maris
//!
//! This crate runs user-supplied scripts against an embedded engine and
//! lets them dispatch store commands synchronously mid-evaluation:
//! - ScriptEngine / HostBindings: the seam to an embedded engine
//! - CallBridge: argument marshalling, nested dispatch, reply conversion
//! - ScriptHost: one engine, one pseudo-client, one evaluation at a time
//! - parse_eval / render_reply: the `EVALJS` entry point
//!
//! The engine side is trait-shaped; [`testing::ScriptedEngine`] drives the
//! whole stack without a real interpreter.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
mod argbuf;
mod bridge;
mod command;
mod config;
mod convert;
mod engine;
mod error;
mod host;
pub mod testing;

#[cfg(test)]
mod tests;

// Re-export the public surface
pub use argbuf::ArgBuffer;
pub use bridge::CallBridge;
pub use command::{parse_eval, render_reply, EvalRequest};
pub use config::{ScriptConfig, CONFIG_FILE_NAME};
pub use convert::{format_number, push_store_args, reply_to_value, ConversionError};
pub use engine::{
    Binding, EngineError, ExportedStr, HostBindings, ScriptEngine, ScriptThrow, StringExport,
    ValueKind,
};
pub use error::{Error, Result};
pub use host::ScriptHost;
