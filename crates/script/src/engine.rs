//! The script engine seam.
//!
//! The host consumes the embedded engine exclusively through
//! [`ScriptEngine`]: evaluation, capability registration, value
//! construction, kind inspection, numeric coercion, and native string
//! export/release. [`HostBindings`] is the seam in the other direction:
//! the object the host hands to one evaluation, which the engine calls
//! back into when script code invokes a registered capability.
//!
//! Engine values are opaque handles (`ScriptEngine::Value`). The one
//! resource the host borrows from the engine is an exported native string;
//! [`ExportedStr`] scopes that borrow so every export is released exactly
//! once, on error paths included.

use thiserror::Error;

/// Kind tag of a script value as observed through the seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A number.
    Number,
    /// A string.
    String,
    /// The undefined value.
    Undefined,
    /// Anything else (objects, arrays, functions).
    Object,
}

/// Host capabilities registerable into the script global namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Nested store command dispatch (`maris.call`).
    Call,
    /// Host logging (`console.log`).
    Log,
}

/// A native string exported from the engine.
///
/// The engine may pin the underlying value for the lifetime of the export,
/// so every export must come back through
/// [`ScriptEngine::release_string`]. Use [`ExportedStr`] rather than
/// releasing by hand.
#[derive(Debug)]
pub struct StringExport {
    id: u64,
    bytes: Vec<u8>,
}

impl StringExport {
    /// Package an export. Called by engine implementations.
    pub fn new(id: u64, bytes: Vec<u8>) -> Self {
        Self { id, bytes }
    }

    /// Engine-assigned identifier of this export.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The exported bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// An error thrown into script code by a host capability.
///
/// Returned by [`HostBindings::call`]; the engine surfaces it to the
/// running script as a native exception.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ScriptThrow {
    message: String,
}

impl ScriptThrow {
    /// A throw carrying the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The thrown message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Engine-side failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The engine instance, global scope, or a capability registration
    /// could not be created.
    #[error("engine initialization failed: {message}")]
    Init {
        /// Engine-provided detail.
        message: String,
    },

    /// Evaluation failed: parse error or an exception escaped the script.
    /// The message is the engine's rendering of the error.
    #[error("{message}")]
    Eval {
        /// The engine's error text.
        message: String,
    },

    /// A value operation failed (allocation, export of an unconvertible
    /// value).
    #[error("engine value operation failed: {message}")]
    Value {
        /// Engine-provided detail.
        message: String,
    },
}

/// The host object one evaluation runs against.
///
/// The engine does not carry caller-defined state in its call signatures;
/// whatever context a capability needs lives in the bindings object passed
/// to [`ScriptEngine::eval`] for the duration of that evaluation.
pub trait HostBindings<E: ScriptEngine + ?Sized> {
    /// Dispatch one nested store command. The returned value becomes the
    /// capability call's result; an `Err` is thrown into the script.
    fn call(&mut self, engine: &mut E, args: &[E::Value]) -> Result<E::Value, ScriptThrow>;

    /// Render and emit one log line.
    fn log(&mut self, engine: &mut E, args: &[E::Value]);
}

/// An embedded script engine. One instance owns one global execution
/// scope; the host never creates a second scope behind it.
pub trait ScriptEngine {
    /// Opaque handle into the engine's value space.
    type Value;

    /// Register a host capability as `namespace.name` in the global scope.
    fn register(&mut self, namespace: &str, name: &str, binding: Binding)
        -> Result<(), EngineError>;

    /// Evaluate `source` as a top-level program.
    ///
    /// `origin` names the source in engine diagnostics. `host` receives
    /// every capability invocation the script makes during this
    /// evaluation.
    fn eval<H: HostBindings<Self>>(
        &mut self,
        source: &str,
        origin: &str,
        host: &mut H,
    ) -> Result<(), EngineError>
    where
        Self: Sized;

    /// Kind tag of `value`.
    fn kind(&self, value: &Self::Value) -> ValueKind;

    /// Coerce `value` to a number, by the engine's own rules.
    fn to_number(&mut self, value: &Self::Value) -> f64;

    /// Export the value's text as engine-owned bytes.
    ///
    /// Every successful export must be paired with exactly one
    /// [`release_string`](Self::release_string); prefer [`ExportedStr`].
    fn export_string(&mut self, value: &Self::Value) -> Result<StringExport, EngineError>;

    /// Return an export to the engine.
    fn release_string(&mut self, export: StringExport);

    /// A fresh string value holding `bytes`.
    fn new_string(&mut self, bytes: &[u8]) -> Result<Self::Value, EngineError>;

    /// A fresh number value.
    fn new_number(&mut self, value: f64) -> Self::Value;

    /// The undefined value.
    fn undefined(&mut self) -> Self::Value;

    /// A fresh array of already-built values.
    fn new_array(&mut self, items: Vec<Self::Value>) -> Result<Self::Value, EngineError>;
}

/// Scoped native-string export: releases the export on drop.
pub struct ExportedStr<'e, E: ScriptEngine> {
    engine: &'e mut E,
    export: Option<StringExport>,
}

impl<'e, E: ScriptEngine> ExportedStr<'e, E> {
    /// Export `value`'s text, scoped to the guard's lifetime.
    pub fn new(engine: &'e mut E, value: &E::Value) -> Result<Self, EngineError> {
        let export = engine.export_string(value)?;
        Ok(Self { engine, export: Some(export) })
    }

    /// The exported bytes.
    pub fn bytes(&self) -> &[u8] {
        match &self.export {
            Some(export) => export.bytes(),
            None => &[],
        }
    }
}

impl<E: ScriptEngine> Drop for ExportedStr<'_, E> {
    fn drop(&mut self) {
        if let Some(export) = self.export.take() {
            self.engine.release_string(export);
        }
    }
}
