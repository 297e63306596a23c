//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser], a cursor over an in-memory buffer with
//! peeking, conditional consumption, comment skipping and quote-aware label
//! parsing. The Newick parser is built on top of it.

use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text held in memory.
///
/// # Features
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (single quotes, `''` as escaped quote)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use dtlrec::parser::ByteParser;
///
/// let mut parser = ByteParser::from_str("  [comment] (A,B);");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert_eq!(parser.peek(), Some(b'('));
/// assert!(parser.consume_if(b'('));
/// assert_eq!(parser.parse_label(b",);").unwrap(), "A");
/// ```
#[derive(Debug, Clone)]
pub struct ByteParser {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the input
    pos: usize,
}

impl ByteParser {
    /// Creates a new `ByteParser` taking ownership of the given bytes.
    pub fn new(input: Vec<u8>) -> Self {
        Self { input, pos: 0 }
    }

    /// Creates a new `ByteParser` from a string by copying it.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Self {
        Self::new(input.as_bytes().to_vec())
    }

    /// Peeks at the current byte without consuming it; `None` at end of data.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position; `None` at end of data.
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips (consumes) all consecutive whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a comment `[...]` if present.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if !self.consume_if(b'[') {
            return Ok(false);
        }

        while let Some(b) = self.next_byte() {
            if b == b']' {
                return Ok(true);
            }
        }
        Err(ParsingError::unclosed_comment(self))
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();
        while self.skip_comment()? {
            self.skip_whitespace();
        }
        Ok(())
    }

    /// Consumes the current byte if it equals `ch`.
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes bytes while `accept` holds and returns them as a string.
    pub fn consume_while<F: Fn(u8) -> bool>(&mut self, accept: F) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&accept) {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    /// Returns whether the end of data has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn context(&self, k: usize) -> String {
        let end = (self.pos + k).min(self.input.len());
        let start = self.pos.min(end);
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    /// Parses a label (quoted or unquoted).
    ///
    /// # Arguments
    /// * `delimiters` - Bytes that end an unquoted label
    ///
    /// # Errors
    /// Returns an error if a quoted label is not closed.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek() == Some(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.consume_while(|b| !delimiters.contains(&b)))
        }
    }

    /// Parses a label enclosed in single quotes; `''` inside stands for one quote.
    fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.pos += 1; // opening '

        let mut label = Vec::new();
        while let Some(b) = self.next_byte() {
            if b != b'\'' {
                label.push(b);
            } else if self.consume_if(b'\'') {
                label.push(b'\'');
            } else {
                return Ok(String::from_utf8_lossy(&label).into_owned());
            }
        }

        Err(ParsingError::unclosed_quote(self))
    }
}
