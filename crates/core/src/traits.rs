//! The store collaborator seam.
//!
//! This trait is how the script host drives the data store's command
//! processor without knowing anything about dispatch tables, networking,
//! or storage. Implementations can be the real store or an in-memory
//! double.

use crate::client::ScriptClient;
use crate::error::CommandError;

/// Runs one already-installed command for a client.
///
/// The implementation reads the command name and arguments from
/// [`ScriptClient::argv`], writes its reply through
/// [`ScriptClient::reply_mut`], and returns a [`CommandError`] when
/// dispatch itself fails (unknown command, wrong arity, store-level type
/// errors). A command that runs but wants to report failure may instead
/// write an error reply; the bridge treats both the same way.
///
/// Execution is synchronous: the command completes, and its whole reply is
/// buffered, before this returns. Implementations must not retain the
/// client reference.
pub trait CommandStore {
    /// Execute the client's pending command.
    fn run_command(&mut self, client: &mut ScriptClient) -> Result<(), CommandError>;
}
