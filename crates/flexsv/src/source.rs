//! Character sources feeding the parser

use std::io::Read;
use std::str::Chars;

use crate::error::{Error, Result};

/// A pull-based source of characters
///
/// The parser driver requests one character at a time; `Ok(None)` signals
/// end of input. Failures from an underlying transport surface as
/// [`Error::Io`].
pub trait CharSource {
    /// Read the next character, or `None` at end of input
    fn next_char(&mut self) -> Result<Option<char>>;
}

/// Character source over an in-memory string slice
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Create a source over `input`
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> Result<Option<char>> {
        Ok(self.chars.next())
    }
}

impl<'a> From<&'a str> for StrSource<'a> {
    fn from(input: &'a str) -> Self {
        Self::new(input)
    }
}

/// Character source decoding UTF-8 from any [`std::io::Read`]
///
/// Bytes are read one at a time and assembled into code points; invalid or
/// truncated sequences and underlying read errors surface as [`Error::Io`].
#[derive(Debug)]
pub struct ReadSource<R: Read> {
    reader: R,
}

impl<R: Read> ReadSource<R> {
    /// Create a source over `reader`
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Consume the source, returning the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> CharSource for ReadSource<R> {
    fn next_char(&mut self) -> Result<Option<char>> {
        let Some(first) = self.next_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(first).ok_or_else(invalid_utf8)?;

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            let byte = self.next_byte()?.ok_or_else(invalid_utf8)?;
            if byte & 0b1100_0000 != 0b1000_0000 {
                return Err(invalid_utf8());
            }
            *slot = byte;
        }

        let decoded = std::str::from_utf8(&bytes[..width]).map_err(|_| invalid_utf8())?;
        Ok(decoded.chars().next())
    }
}

fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7f => Some(1),
        0xc0..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf7 => Some(4),
        _ => None,
    }
}

fn invalid_utf8() -> Error {
    Error::Io("invalid UTF-8 in input stream".to_string())
}
