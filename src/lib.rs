//! Maris - script-to-store bridge for embedded data stores
//!
//! Maris runs user-supplied scripts against an embedded engine and lets
//! them dispatch store commands synchronously mid-evaluation, with the
//! replies marshalled back into script values.
//!
//! # Quick Start
//!
//! ```ignore
//! use marisdb::testing::{MemoryStore, ScriptedEngine, TestValue};
//! use marisdb::{ClientId, HostBindings, ScriptConfig, ScriptHost, StoreArg};
//!
//! // The bundled engine runs queued closures in place of compiled scripts;
//! // a real interpreter implements `ScriptEngine` the same way.
//! let mut engine = ScriptedEngine::new();
//! engine.enqueue(|engine, bindings| {
//!     bindings.call(
//!         engine,
//!         &[
//!             TestValue::str("SET"),
//!             TestValue::str("user:123"),
//!             TestValue::str("Alice"),
//!         ],
//!     )
//! });
//!
//! // One host owns one engine and one pseudo-client
//! let mut host = ScriptHost::new(engine, MemoryStore::new(), ScriptConfig::default())?;
//!
//! // EVALJS <script-text> <numkeys> [key ...] [arg ...]
//! let argv = [
//!     StoreArg::from("EVALJS"),
//!     StoreArg::from("maris.call('SET', 'user:123', 'Alice')"),
//!     StoreArg::from("0"),
//! ];
//! host.eval_command(ClientId(1), &argv)?;
//! assert_eq!(host.store().value(b"user:123"), Some(&b"Alice"[..]));
//! ```
//!
//! # Architecture
//!
//! Scripts reach the store through the [`CallBridge`], which owns the
//! reusable [`ScriptClient`]: arguments are marshalled to store bytes,
//! the command runs synchronously, and the buffered reply is decoded and
//! converted back into an engine value. The engine side is trait-shaped
//! ([`ScriptEngine`]); any embedded interpreter that can satisfy it plugs
//! into the same host.

// Re-export the public API from the core and script crates
pub use maris_core::*;
pub use maris_script::*;
