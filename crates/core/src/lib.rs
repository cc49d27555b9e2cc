//! Core types for the Maris script host
//!
//! This crate defines the store-side half of the scripting bridge:
//! - StoreArg: immutable, reference-counted command argument bytes
//! - ScriptClient: the reusable pseudo-client nested commands run on
//! - ReplyBuffer: inline-plus-overflow-blocks reply accumulation
//! - resp: the RESP2 reply wire format and its decoder
//! - CommandStore: the seam to the store's command processor
//! - CommandError / RespError: errors crossing those seams

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod client;
pub mod error;
pub mod reply;
pub mod resp;
pub mod traits;
pub mod value;

// Re-export commonly used types and traits
pub use client::{ClientFlags, ClientId, RunContext, RunFlags, ScriptClient};
pub use error::{CommandError, RespError};
pub use reply::{ReplyBuffer, DEFAULT_INLINE_CAPACITY};
pub use resp::Reply;
pub use traits::CommandStore;
pub use value::StoreArg;
