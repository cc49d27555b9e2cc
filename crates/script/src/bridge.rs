//! The call bridge: nested command dispatch from script code.
//!
//! [`CallBridge`] is the host-bindings object an evaluation runs against.
//! Its `call` drives one store command end to end: convert arguments,
//! install them on the script client, dispatch, collect the reply, decode
//! it, and throw or return. Whatever the outcome, the client is reset
//! before control returns to the script; a later call must never observe
//! stale arguments or reply bytes.

use maris_core::{resp, CommandError, CommandStore, Reply, RunContext, ScriptClient};
use thiserror::Error;
use tracing::{info, trace, warn};

use crate::argbuf::ArgBuffer;
use crate::convert::{self, format_number, ConversionError};
use crate::engine::{ExportedStr, HostBindings, ScriptEngine, ScriptThrow, ValueKind};

/// What one nested dispatch can fail with before reaching the script.
#[derive(Debug, Error)]
enum CallError {
    #[error("{0}")]
    Conversion(#[from] ConversionError),
    #[error("{0}")]
    Command(#[from] CommandError),
}

/// The per-host dispatch state: the store collaborator, the reusable
/// script client, the argument buffer, and the run binding of the
/// evaluation currently in flight.
pub struct CallBridge<S> {
    store: S,
    client: ScriptClient,
    argv: ArgBuffer,
    run: Option<RunContext>,
}

impl<S: CommandStore> CallBridge<S> {
    pub(crate) fn new(store: S, client: ScriptClient) -> Self {
        Self {
            store,
            client,
            argv: ArgBuffer::new(),
            run: None,
        }
    }

    /// The script client, for state introspection.
    pub fn client(&self) -> &ScriptClient {
        &self.client
    }

    /// The store collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store collaborator.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The run binding of the evaluation in flight, if any.
    pub fn run(&self) -> Option<RunContext> {
        self.run
    }

    pub(crate) fn begin_run(&mut self, run: RunContext) {
        self.run = Some(run);
    }

    pub(crate) fn end_run(&mut self) {
        self.run = None;
    }

    /// Convert, install, dispatch, and collect the raw reply bytes.
    ///
    /// On `Err` the client may hold arguments or partial reply; the caller
    /// resets it unconditionally.
    fn dispatch<E: ScriptEngine>(
        &mut self,
        engine: &mut E,
        run: RunContext,
        args: &[E::Value],
    ) -> Result<Vec<u8>, CallError> {
        let slots = self.argv.acquire(args.len());
        convert::push_store_args(engine, args, slots)?;
        let argv = self.argv.take_slots();
        trace!(
            target: "maris::script::bridge",
            argc = argv.len(),
            "dispatching nested command"
        );
        self.client.begin_call(argv, run);
        self.store.run_command(&mut self.client)?;
        Ok(self.client.collect_reply())
    }
}

impl<E: ScriptEngine, S: CommandStore> HostBindings<E> for CallBridge<S> {
    fn call(&mut self, engine: &mut E, args: &[E::Value]) -> Result<E::Value, ScriptThrow> {
        let Some(run) = self.run else {
            return Err(ScriptThrow::new("no script evaluation in progress"));
        };

        let outcome = self.dispatch(engine, run, args);
        // Hard invariant: the client is clean after every call, error
        // paths included.
        self.argv.reclaim(self.client.reset());

        let raw = outcome.map_err(|err| ScriptThrow::new(err.to_string()))?;
        let reply = match resp::decode(&raw) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(
                    target: "maris::script::bridge",
                    error = %err,
                    "discarding malformed command reply"
                );
                return Err(ScriptThrow::new(format!("protocol error: {err}")));
            }
        };
        if let Reply::Error(text) = reply {
            return Err(ScriptThrow::new(text));
        }
        convert::reply_to_value(engine, &reply).map_err(|err| ScriptThrow::new(err.to_string()))
    }

    fn log(&mut self, engine: &mut E, args: &[E::Value]) {
        let mut line = String::new();
        for (index, value) in args.iter().enumerate() {
            if index > 0 {
                line.push(' ');
            }
            match engine.kind(value) {
                ValueKind::Number => line.push_str(&format_number(engine.to_number(value))),
                ValueKind::String => match ExportedStr::new(engine, value) {
                    Ok(exported) => line.push_str(&String::from_utf8_lossy(exported.bytes())),
                    Err(err) => {
                        warn!(
                            target: "maris::script::bridge",
                            error = %err,
                            "could not render log argument"
                        );
                    }
                },
                ValueKind::Undefined => line.push_str("undefined"),
                ValueKind::Object => line.push_str("[object]"),
            }
        }
        // Script text is data, never a format string.
        info!(target: "maris::script::log", text = %line, "script log");
    }
}
