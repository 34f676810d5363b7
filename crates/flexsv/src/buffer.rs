//! Column accumulation buffer and the diagnostic context window

use crate::config::OverflowPolicy;
use crate::error::{Error, Result};

/// How many raw characters of history are kept for error messages
pub const CONTEXT_CAPACITY: usize = 10;

/// Accumulates the characters of the column currently being read
///
/// `seen` counts every character offered, independent of how many were kept,
/// so a truncated column still reports an accurate truncation point.
#[derive(Debug, Clone, Default)]
pub struct ColumnBuffer {
    stored: String,
    kept: usize,
    seen: usize,
}

impl ColumnBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one character to the current column
    ///
    /// With a maximum length configured, characters beyond the limit are
    /// dropped under [`OverflowPolicy::Truncate`] or fail the parse under
    /// [`OverflowPolicy::Reject`]. A limit of zero with `Reject` fails on the
    /// very first character offered.
    pub fn offer(
        &mut self,
        c: char,
        max_length: Option<usize>,
        policy: OverflowPolicy,
        context: &ContextWindow,
    ) -> Result<()> {
        self.seen += 1;
        if let Some(limit) = max_length
            && self.kept >= limit
        {
            return match policy {
                OverflowPolicy::Truncate => Ok(()),
                OverflowPolicy::Reject => Err(Error::ColumnTooLong {
                    limit,
                    context: context.snapshot(),
                }),
            };
        }
        self.stored.push(c);
        self.kept += 1;
        Ok(())
    }

    /// Take the stored column text, clearing the buffer for the next column
    pub fn finalize(&mut self) -> String {
        self.kept = 0;
        self.seen = 0;
        std::mem::take(&mut self.stored)
    }

    /// Number of characters offered to the current column so far
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Whether nothing is pending in the buffer
    pub fn is_empty(&self) -> bool {
        self.stored.is_empty() && self.seen == 0
    }
}

/// Fixed-capacity sliding window of the last raw characters processed
///
/// Independent of column and row boundaries; lives for the whole parse and
/// is rendered into every grammar/validation error.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    chars: Vec<char>,
    start: usize,
    capacity: usize,
}

impl ContextWindow {
    /// Create a window with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(CONTEXT_CAPACITY)
    }

    /// Create a window keeping the last `capacity` characters
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
            start: 0,
            capacity,
        }
    }

    /// Record one raw character
    pub fn record(&mut self, c: char) {
        if self.capacity == 0 {
            return;
        }
        if self.chars.len() < self.capacity {
            self.chars.push(c);
        } else {
            self.chars[self.start] = c;
            self.start = (self.start + 1) % self.capacity;
        }
    }

    /// Render the window contents, oldest first
    pub fn snapshot(&self) -> String {
        let mut out = String::with_capacity(self.chars.len());
        for i in 0..self.chars.len() {
            out.push(self.chars[(self.start + i) % self.chars.len().max(1)]);
        }
        out
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new()
    }
}
