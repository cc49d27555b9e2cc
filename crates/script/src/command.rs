//! The `EVALJS` entry point: argument validation and reply rendering.
//!
//! Inbound shape: `EVALJS <script-text> <numkeys> [key ...] [arg ...]`.
//! Validation happens before any script runs; the declared keys exist for
//! the store's benefit (routing, access control) and are not exposed to
//! the script itself.

use maris_core::StoreArg;

use crate::error::{Error, Result};

/// A validated `EVALJS` invocation.
#[derive(Debug, Clone, Copy)]
pub struct EvalRequest<'a> {
    /// The script source text.
    pub script: &'a str,
    /// The declared key arguments.
    pub keys: &'a [StoreArg],
    /// The remaining arguments after the keys.
    pub args: &'a [StoreArg],
}

/// Validate `EVALJS <script> <numkeys> [key ...] [arg ...]`.
///
/// `numkeys` must be an integer with `0 <= numkeys <= argc - 3`; the
/// script payload must be UTF-8. Violations abort before evaluation.
pub fn parse_eval(argv: &[StoreArg]) -> Result<EvalRequest<'_>> {
    if argv.len() < 3 {
        return Err(Error::WrongArity { command: "evaljs".to_owned() });
    }
    let numkeys = argv[2].to_i64().ok_or(Error::InvalidKeyCount)?;
    if numkeys > argv.len() as i64 - 3 {
        return Err(Error::TooManyKeys);
    }
    if numkeys < 0 {
        return Err(Error::NegativeKeys);
    }
    let script = argv[1].as_str().ok_or(Error::ScriptNotUtf8)?;
    let keys_end = 3 + numkeys as usize;
    Ok(EvalRequest {
        script,
        keys: &argv[3..keys_end],
        args: &argv[keys_end..],
    })
}

/// Wire rendering of an entry-point outcome: the fixed `+OK`
/// acknowledgement, or an error line carrying the error's display text.
pub fn render_reply(outcome: &Result<()>) -> Vec<u8> {
    match outcome {
        Ok(()) => b"+OK\r\n".to_vec(),
        Err(err) => {
            // Error text may quote script output; newlines would break
            // the line framing.
            let text = err.to_string().replace(['\r', '\n'], " ");
            let mut line = Vec::with_capacity(text.len() + 3);
            line.push(b'-');
            line.extend_from_slice(text.as_bytes());
            line.extend_from_slice(b"\r\n");
            line
        }
    }
}
