//! Reply wire format.
//!
//! Store commands write their replies as RESP2 frames: a one-byte type
//! prefix, a CRLF-terminated header line, and for bulk/array types a
//! length-prefixed body. [`decode`] parses exactly one top-level reply and
//! rejects trailing bytes, because one nested call produces exactly one
//! reply.

use crate::error::RespError;

/// One decoded command reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// `+text` status line.
    Simple(String),
    /// `-text` error line.
    Error(String),
    /// `:n` integer.
    Integer(i64),
    /// `$len` binary-safe string.
    Bulk(Vec<u8>),
    /// `$-1` or `*-1` null.
    Null,
    /// `*len` array of replies.
    Array(Vec<Reply>),
}

/// Nesting budget for arrays; replies nested deeper fail with
/// [`RespError::TooDeep`] instead of exhausting the stack.
const MAX_REPLY_DEPTH: usize = 64;

/// Decode one complete reply from `buf`.
///
/// Strict on framing: every header must be CRLF-terminated, declared
/// lengths must match the payload, nothing may follow the reply, and
/// array nesting is depth-bounded.
pub fn decode(buf: &[u8]) -> Result<Reply, RespError> {
    let mut pos = 0;
    let reply = parse_one(buf, &mut pos, MAX_REPLY_DEPTH)?;
    if pos != buf.len() {
        return Err(RespError::TrailingData { trailing: buf.len() - pos });
    }
    Ok(reply)
}

fn parse_one(buf: &[u8], pos: &mut usize, depth: usize) -> Result<Reply, RespError> {
    if depth == 0 {
        return Err(RespError::TooDeep);
    }
    let line = read_line(buf, pos)?;
    let (prefix, body) = line.split_first().ok_or(RespError::UnexpectedEof)?;
    match prefix {
        b'+' => Ok(Reply::Simple(lossy(body))),
        b'-' => Ok(Reply::Error(lossy(body))),
        b':' => parse_i64(body)
            .map(Reply::Integer)
            .ok_or_else(|| RespError::BadInteger { text: lossy(body) }),
        b'$' => parse_bulk(buf, pos, body),
        b'*' => parse_array(buf, pos, body, depth),
        other => Err(RespError::UnknownType { byte: *other }),
    }
}

fn parse_bulk(buf: &[u8], pos: &mut usize, header: &[u8]) -> Result<Reply, RespError> {
    let len = match parse_length(header)? {
        None => return Ok(Reply::Null),
        Some(len) => len,
    };
    let end = pos.checked_add(len).ok_or(RespError::UnexpectedEof)?;
    let terminated = end.checked_add(2).ok_or(RespError::UnexpectedEof)?;
    if terminated > buf.len() {
        return Err(RespError::UnexpectedEof);
    }
    let payload = buf[*pos..end].to_vec();
    if &buf[end..end + 2] != b"\r\n" {
        return Err(RespError::MissingCrlf);
    }
    *pos = end + 2;
    Ok(Reply::Bulk(payload))
}

fn parse_array(
    buf: &[u8],
    pos: &mut usize,
    header: &[u8],
    depth: usize,
) -> Result<Reply, RespError> {
    let len = match parse_length(header)? {
        None => return Ok(Reply::Null),
        Some(len) => len,
    };
    let mut items = Vec::new();
    for _ in 0..len {
        items.push(parse_one(buf, pos, depth - 1)?);
    }
    Ok(Reply::Array(items))
}

/// Length header: non-negative count, or `None` for the -1 null marker.
fn parse_length(body: &[u8]) -> Result<Option<usize>, RespError> {
    let value = parse_i64(body).ok_or_else(|| RespError::BadLength { text: lossy(body) })?;
    match value {
        -1 => Ok(None),
        n if n >= 0 => Ok(Some(n as usize)),
        _ => Err(RespError::BadLength { text: lossy(body) }),
    }
}

fn parse_i64(body: &[u8]) -> Option<i64> {
    std::str::from_utf8(body).ok()?.parse().ok()
}

/// Header content up to the next CRLF; advances past the terminator.
fn read_line<'a>(buf: &'a [u8], pos: &mut usize) -> Result<&'a [u8], RespError> {
    let rest = &buf[*pos..];
    let end = rest
        .windows(2)
        .position(|pair| pair == b"\r\n")
        .ok_or(RespError::UnexpectedEof)?;
    *pos += end + 2;
    Ok(&rest[..end])
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
