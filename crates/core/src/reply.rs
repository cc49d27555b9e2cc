//! Client reply accumulation.
//!
//! A command's reply streams into a fixed-capacity inline buffer; once the
//! inline buffer is full (or once any overflow block exists) further bytes
//! append to an ordered block list. Block order defines the reply's byte
//! order: [`ReplyBuffer::collect`] drains inline bytes first, then every
//! block front to back.
//!
//! The typed `write_*` helpers produce the RESP2 frames stores reply with;
//! payloads are binary-safe.

use std::collections::VecDeque;

/// Default inline reply capacity in bytes.
pub const DEFAULT_INLINE_CAPACITY: usize = 16 * 1024;

/// Reply accumulator: inline buffer plus ordered overflow blocks.
#[derive(Debug)]
pub struct ReplyBuffer {
    inline: Vec<u8>,
    inline_capacity: usize,
    blocks: VecDeque<Vec<u8>>,
}

impl ReplyBuffer {
    /// An empty buffer whose inline portion holds up to `inline_capacity`
    /// bytes before overflowing into blocks.
    pub fn new(inline_capacity: usize) -> Self {
        Self {
            inline: Vec::new(),
            inline_capacity,
            blocks: VecDeque::new(),
        }
    }

    /// Append raw reply bytes.
    ///
    /// Bytes fill the inline buffer up to its capacity; the remainder of
    /// this write becomes one overflow block. Once any block exists, later
    /// writes bypass the inline buffer so byte order is preserved.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let mut rest = bytes;
        if self.blocks.is_empty() && self.inline.len() < self.inline_capacity {
            let room = self.inline_capacity - self.inline.len();
            let take = room.min(rest.len());
            self.inline.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
        }
        if !rest.is_empty() {
            self.blocks.push_back(rest.to_vec());
        }
    }

    /// Whether the whole reply so far fits in the inline buffer.
    pub fn is_inline_only(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whether nothing has been written since the last clear.
    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.blocks.is_empty()
    }

    /// Total buffered reply bytes.
    pub fn len(&self) -> usize {
        self.inline.len() + self.blocks.iter().map(Vec::len).sum::<usize>()
    }

    /// Number of overflow blocks currently queued.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Drain the accumulated reply in write order.
    pub fn collect(&mut self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.inline);
        self.inline.clear();
        while let Some(block) = self.blocks.pop_front() {
            out.extend_from_slice(&block);
        }
        out
    }

    /// Discard everything buffered.
    pub fn clear(&mut self) {
        self.inline.clear();
        self.blocks.clear();
    }

    // =========================================================================
    // RESP2 writers
    // =========================================================================

    /// `+text` status line.
    pub fn write_simple(&mut self, text: &str) {
        self.push_bytes(b"+");
        self.push_bytes(text.as_bytes());
        self.push_bytes(b"\r\n");
    }

    /// `-text` error line.
    pub fn write_error(&mut self, text: &str) {
        self.push_bytes(b"-");
        self.push_bytes(text.as_bytes());
        self.push_bytes(b"\r\n");
    }

    /// `:n` integer.
    pub fn write_integer(&mut self, value: i64) {
        let mut digits = itoa::Buffer::new();
        self.push_bytes(b":");
        self.push_bytes(digits.format(value).as_bytes());
        self.push_bytes(b"\r\n");
    }

    /// `$len` binary-safe string.
    pub fn write_bulk(&mut self, payload: &[u8]) {
        let mut digits = itoa::Buffer::new();
        self.push_bytes(b"$");
        self.push_bytes(digits.format(payload.len()).as_bytes());
        self.push_bytes(b"\r\n");
        self.push_bytes(payload);
        self.push_bytes(b"\r\n");
    }

    /// `$-1` null.
    pub fn write_null(&mut self) {
        self.push_bytes(b"$-1\r\n");
    }

    /// `*len` array header; the caller writes `len` elements after it.
    pub fn write_array_header(&mut self, len: usize) {
        let mut digits = itoa::Buffer::new();
        self.push_bytes(b"*");
        self.push_bytes(digits.format(len).as_bytes());
        self.push_bytes(b"\r\n");
    }
}

impl Default for ReplyBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_INLINE_CAPACITY)
    }
}
