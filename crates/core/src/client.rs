//! The script-sourced internal client.
//!
//! One [`ScriptClient`] is created per script host and reused for every
//! nested command a script dispatches. Between calls it must hold zero
//! pending arguments, zero buffered reply bytes, and no run binding;
//! [`ScriptClient::reset`] restores that state on every outcome.

use bitflags::bitflags;

use crate::reply::ReplyBuffer;
use crate::value::StoreArg;

/// Identifier of a store client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

bitflags! {
    /// Capability flags carried by a client into command dispatch.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClientFlags: u32 {
        /// The client executes on behalf of a script.
        const SCRIPT = 1 << 0;
        /// Blocking commands must fail instead of blocking.
        const DENY_BLOCKING = 1 << 1;
        /// Write commands must be rejected.
        const NO_WRITES = 1 << 2;
    }
}

bitflags! {
    /// Flags describing one script run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RunFlags: u32 {
        /// The run must not issue write commands.
        const NO_WRITES = 1 << 0;
    }
}

/// Transient record binding one script evaluation to its originating caller.
///
/// Created when evaluation starts, dropped before the caller gets its
/// reply. While a nested call is in flight a copy rides on the
/// [`ScriptClient`] so the store can see which run issued the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    /// The caller that submitted the script.
    pub caller: ClientId,
    /// Run flags forwarded to the client during nested calls.
    pub flags: RunFlags,
}

impl RunContext {
    /// A run context for `caller` with the given flags.
    pub fn new(caller: ClientId, flags: RunFlags) -> Self {
        Self { caller, flags }
    }
}

/// Long-lived pseudo-client driving script-originated command execution.
///
/// Always flagged `SCRIPT | DENY_BLOCKING`. Arguments are installed with
/// [`begin_call`](Self::begin_call), the store writes its reply through
/// [`reply_mut`](Self::reply_mut), and [`reset`](Self::reset) returns the
/// client to its idle state whatever happened in between.
#[derive(Debug)]
pub struct ScriptClient {
    id: ClientId,
    flags: ClientFlags,
    argv: Vec<StoreArg>,
    reply: ReplyBuffer,
    run: Option<RunContext>,
}

impl ScriptClient {
    /// A fresh idle client with the given inline reply capacity.
    pub fn new(id: ClientId, reply_inline_bytes: usize) -> Self {
        Self {
            id,
            flags: ClientFlags::SCRIPT | ClientFlags::DENY_BLOCKING,
            argv: Vec::new(),
            reply: ReplyBuffer::new(reply_inline_bytes),
            run: None,
        }
    }

    /// The client's identifier.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Current capability flags.
    pub fn flags(&self) -> ClientFlags {
        self.flags
    }

    /// Arguments of the in-flight command.
    pub fn argv(&self) -> &[StoreArg] {
        &self.argv
    }

    /// Argument count of the in-flight command.
    pub fn argc(&self) -> usize {
        self.argv.len()
    }

    /// The run binding of the in-flight command, if any.
    pub fn run(&self) -> Option<RunContext> {
        self.run
    }

    /// The accumulated reply.
    pub fn reply(&self) -> &ReplyBuffer {
        &self.reply
    }

    /// Writable access to the reply accumulator, for the store.
    pub fn reply_mut(&mut self) -> &mut ReplyBuffer {
        &mut self.reply
    }

    /// Install the arguments and run binding for one nested dispatch.
    pub fn begin_call(&mut self, argv: Vec<StoreArg>, run: RunContext) {
        self.argv = argv;
        self.run = Some(run);
        if run.flags.contains(RunFlags::NO_WRITES) {
            self.flags |= ClientFlags::NO_WRITES;
        }
    }

    /// Drain the accumulated reply, preserving block order.
    pub fn collect_reply(&mut self) -> Vec<u8> {
        self.reply.collect()
    }

    /// Return the client to its idle state: no arguments, no buffered
    /// reply, no run binding, base flags.
    ///
    /// Returns the argument storage (cleared, capacity intact) so the
    /// caller can reuse the allocation.
    pub fn reset(&mut self) -> Vec<StoreArg> {
        self.run = None;
        self.flags = ClientFlags::SCRIPT | ClientFlags::DENY_BLOCKING;
        self.reply.clear();
        let mut argv = std::mem::take(&mut self.argv);
        argv.clear();
        argv
    }
}
