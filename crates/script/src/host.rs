//! The engine context: one engine, one bridge, one configuration.
//!
//! This module defines:
//! - [`ScriptHost`]: owns the engine and the [`CallBridge`], registers the
//!   script-visible capabilities, and serves `EVALJS` invocations
//!
//! One host serves one evaluation at a time. `eval_command` takes
//! `&mut self`, so overlapping evaluations are ruled out at compile time.

use maris_core::{ClientId, CommandStore, RunContext, RunFlags, ScriptClient, StoreArg};
use tracing::{debug, info};

use crate::bridge::CallBridge;
use crate::command::parse_eval;
use crate::config::ScriptConfig;
use crate::engine::{Binding, ScriptEngine};
use crate::error::{Error, Result};

/// Owns one script engine and the bridge it calls back into.
///
/// Construction registers `maris.call` and `console.log` in the engine's
/// global scope; afterwards the host serves one `EVALJS` at a time against
/// the store it was built over.
pub struct ScriptHost<E, S> {
    engine: E,
    bridge: CallBridge<S>,
    config: ScriptConfig,
}

impl<E: ScriptEngine, S: CommandStore> ScriptHost<E, S> {
    /// Build a host over `engine` and `store`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid configuration and
    /// [`Error::EngineInit`] when capability registration is rejected.
    /// Both are fatal to startup; there is no degraded mode.
    pub fn new(mut engine: E, store: S, config: ScriptConfig) -> Result<Self> {
        config.validate()?;
        engine
            .register("maris", "call", Binding::Call)
            .map_err(|e| Error::EngineInit {
                message: e.to_string(),
            })?;
        engine
            .register("console", "log", Binding::Log)
            .map_err(|e| Error::EngineInit {
                message: e.to_string(),
            })?;
        let client = ScriptClient::new(ClientId(0), config.reply_inline_bytes);
        debug!(target: "maris::script::host", "script host initialized");
        Ok(Self {
            engine,
            bridge: CallBridge::new(store, client),
            config,
        })
    }

    /// Handle one `EVALJS <script-text> <numkeys> [key ...] [arg ...]`
    /// invocation from `caller`.
    ///
    /// Validation failures abort before any script runs. An evaluation
    /// failure surfaces as [`Error::Eval`] carrying the engine's error
    /// text. The host stays usable for the next invocation either way.
    pub fn eval_command(&mut self, caller: ClientId, argv: &[StoreArg]) -> Result<()> {
        let request = parse_eval(argv)?;
        self.eval(caller, request.script)
    }

    fn eval(&mut self, caller: ClientId, source: &str) -> Result<()> {
        self.bridge
            .begin_run(RunContext::new(caller, RunFlags::empty()));
        let outcome = self
            .engine
            .eval(source, &self.config.source_name, &mut self.bridge);
        // The run closes whether or not evaluation succeeded.
        self.bridge.end_run();
        outcome.map_err(|err| {
            info!(
                target: "maris::script::host",
                caller = caller.0,
                error = %err,
                "script evaluation failed"
            );
            Error::Eval {
                message: err.to_string(),
            }
        })
    }

    /// The pseudo-client nested commands execute on.
    pub fn client(&self) -> &ScriptClient {
        self.bridge.client()
    }

    /// The engine this host owns.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The store commands dispatch against.
    pub fn store(&self) -> &S {
        self.bridge.store()
    }

    /// Mutable access to the store.
    pub fn store_mut(&mut self) -> &mut S {
        self.bridge.store_mut()
    }

    /// The active configuration.
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }
}
