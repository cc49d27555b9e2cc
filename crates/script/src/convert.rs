//! Value conversion between engine values and store arguments/replies.
//!
//! Arguments flow one way (script values into [`StoreArg`] byte strings),
//! replies flow the other (decoded [`Reply`] frames into engine values).
//! Only numbers and strings are valid call arguments; numbers format
//! through an exact-integer fast path so `call("SET", "k", 2)` sends the
//! bytes `2`, not `2.0`.

use maris_core::{Reply, StoreArg};
use thiserror::Error;

use crate::engine::{EngineError, ExportedStr, ScriptEngine, ValueKind};

/// Conversion failure for nested-call arguments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The argument was neither a number nor a string.
    #[error("argv must be string or number")]
    UnsupportedArgumentType,

    /// The engine failed to export a string argument.
    #[error("{0}")]
    Engine(EngineError),
}

// End of the exactly-representable i64 range: 2^63. Values at or above it
// (and below i64::MIN) must take the float path.
const I64_RANGE_END: f64 = 9_223_372_036_854_775_808.0;

/// Format a script number as store argument text.
///
/// Integer-representable values render as exact decimal integers;
/// everything else renders with the shortest representation that parses
/// back to the same value. Non-finite values spell out as `nan`, `inf`,
/// `-inf`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < I64_RANGE_END {
        let mut digits = itoa::Buffer::new();
        return digits.format(value as i64).to_owned();
    }
    let mut digits = ryu::Buffer::new();
    digits.format_finite(value).to_owned()
}

/// Convert call arguments into store arguments, appending to `out`.
///
/// Fails on the first unconvertible value; arguments already appended stay
/// in the abandoned buffer and are cleared by its next acquire, never
/// dispatched. Each string export is released as soon as its bytes are
/// copied.
pub fn push_store_args<E: ScriptEngine>(
    engine: &mut E,
    values: &[E::Value],
    out: &mut Vec<StoreArg>,
) -> Result<(), ConversionError> {
    for value in values {
        match engine.kind(value) {
            ValueKind::Number => {
                let text = format_number(engine.to_number(value));
                out.push(StoreArg::from(text));
            }
            ValueKind::String => {
                let exported =
                    ExportedStr::new(engine, value).map_err(ConversionError::Engine)?;
                out.push(StoreArg::from_bytes(exported.bytes()));
            }
            ValueKind::Undefined | ValueKind::Object => {
                return Err(ConversionError::UnsupportedArgumentType);
            }
        }
    }
    Ok(())
}

/// Build the script value for a decoded command reply.
///
/// Status and bulk strings become string values, integers become numbers,
/// null becomes undefined, arrays convert element-wise. No engine string
/// handle outlives this call.
pub fn reply_to_value<E: ScriptEngine>(
    engine: &mut E,
    reply: &Reply,
) -> Result<E::Value, EngineError> {
    match reply {
        Reply::Simple(text) => engine.new_string(text.as_bytes()),
        Reply::Bulk(bytes) => engine.new_string(bytes),
        Reply::Integer(value) => Ok(engine.new_number(*value as f64)),
        Reply::Null => Ok(engine.undefined()),
        Reply::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(reply_to_value(engine, item)?);
            }
            engine.new_array(values)
        }
        // The bridge throws on error replies before conversion; a stray
        // one still renders as its text.
        Reply::Error(text) => engine.new_string(text.as_bytes()),
    }
}
