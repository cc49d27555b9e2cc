//! Test doubles for the script host.
//!
//! This module defines:
//! - [`ScriptedEngine`]: an engine whose "programs" are queued Rust
//!   closures driving the host bindings the way script code would
//! - [`TestValue`]: the scripted engine's value representation
//! - [`MemoryStore`]: a hash-map command store with knobs for forcing
//!   error and malformed replies
//!
//! These types back the unit and integration tests of this crate and are
//! exported so downstream crates can test against the host without a real
//! embedded engine.

use std::collections::{HashMap, VecDeque};

use maris_core::{CommandError, CommandStore, ScriptClient, StoreArg};

use crate::convert::format_number;
use crate::engine::{
    Binding, EngineError, HostBindings, ScriptEngine, ScriptThrow, StringExport, ValueKind,
};

// ============================================================================
// Scripted engine
// ============================================================================

/// Value representation of the [`ScriptedEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum TestValue {
    /// A number.
    Num(f64),
    /// A string, stored as its byte encoding.
    Str(Vec<u8>),
    /// The undefined value.
    Undefined,
    /// An array of values. Reported as [`ValueKind::Object`], the way a
    /// real engine tags arrays.
    Array(Vec<TestValue>),
}

impl TestValue {
    /// String value from text.
    pub fn str(text: &str) -> Self {
        TestValue::Str(text.as_bytes().to_vec())
    }
}

/// Stand-in for one compiled program: runs against the engine and the
/// host bindings, finishing with a completion value or a thrown error.
type ScriptProgram = Box<
    dyn FnMut(
        &mut ScriptedEngine,
        &mut dyn HostBindings<ScriptedEngine>,
    ) -> Result<TestValue, ScriptThrow>,
>;

enum QueuedProgram {
    Run(ScriptProgram),
    ParseError(String),
}

/// A [`ScriptEngine`] whose programs are queued closures.
///
/// Each call to [`ScriptEngine::eval`] pops and runs the oldest queued
/// program. String exports are tracked so tests can assert that every
/// export was released.
#[derive(Default)]
pub struct ScriptedEngine {
    programs: VecDeque<QueuedProgram>,
    bindings: Vec<(String, String, Binding)>,
    live_exports: HashMap<u64, Vec<u8>>,
    next_export: u64,
    exports_taken: u64,
    fail_register: bool,
}

impl ScriptedEngine {
    /// An engine with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a program for the next evaluation.
    pub fn enqueue<F>(&mut self, program: F)
    where
        F: FnMut(
                &mut ScriptedEngine,
                &mut dyn HostBindings<ScriptedEngine>,
            ) -> Result<TestValue, ScriptThrow>
            + 'static,
    {
        self.programs.push_back(QueuedProgram::Run(Box::new(program)));
    }

    /// Queue a compile failure: the next evaluation fails with `message`
    /// before any program code runs.
    pub fn enqueue_parse_error(&mut self, message: impl Into<String>) {
        self.programs.push_back(QueuedProgram::ParseError(message.into()));
    }

    /// Make every subsequent [`ScriptEngine::register`] call fail.
    pub fn fail_registration(&mut self) {
        self.fail_register = true;
    }

    /// Registered capabilities, in registration order.
    pub fn bindings(&self) -> &[(String, String, Binding)] {
        &self.bindings
    }

    /// Number of string exports handed out and not yet released.
    pub fn live_exports(&self) -> usize {
        self.live_exports.len()
    }

    /// Total number of string exports handed out.
    pub fn exports_taken(&self) -> u64 {
        self.exports_taken
    }
}

impl ScriptEngine for ScriptedEngine {
    type Value = TestValue;

    fn register(
        &mut self,
        namespace: &str,
        name: &str,
        binding: Binding,
    ) -> Result<(), EngineError> {
        if self.fail_register {
            return Err(EngineError::Init {
                message: "registration rejected".to_string(),
            });
        }
        self.bindings.push((namespace.to_string(), name.to_string(), binding));
        Ok(())
    }

    fn eval<H: HostBindings<Self>>(
        &mut self,
        source: &str,
        _origin: &str,
        host: &mut H,
    ) -> Result<(), EngineError> {
        // Move the program out before running it; it may re-enter the
        // engine through `host`.
        let program = self.programs.pop_front().ok_or_else(|| EngineError::Eval {
            message: format!("no scripted program for source {:?}", source),
        })?;
        match program {
            QueuedProgram::ParseError(message) => Err(EngineError::Eval { message }),
            QueuedProgram::Run(mut run) => match run(self, host) {
                Ok(_) => Ok(()),
                Err(thrown) => Err(EngineError::Eval {
                    message: thrown.message().to_string(),
                }),
            },
        }
    }

    fn kind(&self, value: &TestValue) -> ValueKind {
        match value {
            TestValue::Num(_) => ValueKind::Number,
            TestValue::Str(_) => ValueKind::String,
            TestValue::Undefined => ValueKind::Undefined,
            TestValue::Array(_) => ValueKind::Object,
        }
    }

    fn to_number(&mut self, value: &TestValue) -> f64 {
        match value {
            TestValue::Num(n) => *n,
            _ => f64::NAN,
        }
    }

    fn export_string(&mut self, value: &TestValue) -> Result<StringExport, EngineError> {
        let bytes = match value {
            TestValue::Str(bytes) => bytes.clone(),
            TestValue::Num(n) => format_number(*n).into_bytes(),
            TestValue::Undefined => b"undefined".to_vec(),
            TestValue::Array(_) => b"[object]".to_vec(),
        };
        let id = self.next_export;
        self.next_export += 1;
        self.exports_taken += 1;
        self.live_exports.insert(id, bytes.clone());
        Ok(StringExport::new(id, bytes))
    }

    fn release_string(&mut self, export: StringExport) {
        self.live_exports.remove(&export.id());
    }

    fn new_string(&mut self, bytes: &[u8]) -> Result<TestValue, EngineError> {
        Ok(TestValue::Str(bytes.to_vec()))
    }

    fn new_number(&mut self, value: f64) -> TestValue {
        TestValue::Num(value)
    }

    fn undefined(&mut self) -> TestValue {
        TestValue::Undefined
    }

    fn new_array(&mut self, items: Vec<TestValue>) -> Result<TestValue, EngineError> {
        Ok(TestValue::Array(items))
    }
}

// ============================================================================
// Memory store
// ============================================================================

/// A [`CommandStore`] over a hash map.
///
/// Understands `PING`, `ECHO`, `SET`, `GET`, `DEL` and `MGET`, records
/// every argv it executes, and can be forced to produce error or raw
/// replies for exercising the failure paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: HashMap<Vec<u8>, Vec<u8>>,
    calls: Vec<Vec<StoreArg>>,
    force_error_reply: Option<String>,
    force_raw_reply: Option<Vec<u8>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key without going through a command.
    pub fn insert(&mut self, key: &[u8], value: &[u8]) {
        self.data.insert(key.to_vec(), value.to_vec());
    }

    /// Current value under `key`.
    pub fn value(&self, key: &[u8]) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    /// Every argv this store has executed, oldest first.
    pub fn calls(&self) -> &[Vec<StoreArg>] {
        &self.calls
    }

    /// The most recently executed argv.
    pub fn last_call(&self) -> Option<&[StoreArg]> {
        self.calls.last().map(Vec::as_slice)
    }

    /// Make the next command write `text` as an error reply instead of
    /// running.
    pub fn force_error_reply(&mut self, text: &str) {
        self.force_error_reply = Some(text.to_string());
    }

    /// Make the next command write `bytes` verbatim as its reply instead
    /// of running.
    pub fn force_raw_reply(&mut self, bytes: &[u8]) {
        self.force_raw_reply = Some(bytes.to_vec());
    }
}

impl CommandStore for MemoryStore {
    fn run_command(&mut self, client: &mut ScriptClient) -> Result<(), CommandError> {
        let argv: Vec<StoreArg> = client.argv().to_vec();
        self.calls.push(argv.clone());

        if let Some(raw) = self.force_raw_reply.take() {
            client.reply_mut().push_bytes(&raw);
            return Ok(());
        }
        if let Some(text) = self.force_error_reply.take() {
            client.reply_mut().write_error(&text);
            return Ok(());
        }

        if argv.is_empty() {
            return Err(CommandError::new("empty command"));
        }
        let name = String::from_utf8_lossy(argv[0].as_bytes()).to_ascii_uppercase();
        match name.as_str() {
            "PING" => {
                client.reply_mut().write_simple("PONG");
                Ok(())
            }
            "ECHO" => {
                if argv.len() != 2 {
                    return Err(CommandError::wrong_arity("echo"));
                }
                client.reply_mut().write_bulk(argv[1].as_bytes());
                Ok(())
            }
            "SET" => {
                if argv.len() != 3 {
                    return Err(CommandError::wrong_arity("set"));
                }
                self.data
                    .insert(argv[1].as_bytes().to_vec(), argv[2].as_bytes().to_vec());
                client.reply_mut().write_simple("OK");
                Ok(())
            }
            "GET" => {
                if argv.len() != 2 {
                    return Err(CommandError::wrong_arity("get"));
                }
                match self.data.get(argv[1].as_bytes()) {
                    Some(value) => client.reply_mut().write_bulk(value),
                    None => client.reply_mut().write_null(),
                }
                Ok(())
            }
            "DEL" => {
                if argv.len() < 2 {
                    return Err(CommandError::wrong_arity("del"));
                }
                let mut removed = 0;
                for key in &argv[1..] {
                    if self.data.remove(key.as_bytes()).is_some() {
                        removed += 1;
                    }
                }
                client.reply_mut().write_integer(removed);
                Ok(())
            }
            "MGET" => {
                if argv.len() < 2 {
                    return Err(CommandError::wrong_arity("mget"));
                }
                client.reply_mut().write_array_header(argv.len() - 1);
                for key in &argv[1..] {
                    match self.data.get(key.as_bytes()) {
                        Some(value) => client.reply_mut().write_bulk(value),
                        None => client.reply_mut().write_null(),
                    }
                }
                Ok(())
            }
            _ => Err(CommandError::unknown_command(&String::from_utf8_lossy(
                argv[0].as_bytes(),
            ))),
        }
    }
}
