//! Error types for the Newick parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while reading gene and species trees.

use crate::parser::byte_parser::ByteParser;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur during Newick parsing.
#[derive(PartialEq, Debug, Clone, Error)]
pub enum ParsingErrorType {
    #[error("IO error - {0}")]
    IoError(String),
    #[error("Unexpected end of input")]
    UnexpectedEOF,
    #[error("Unclosed comment")]
    UnclosedComment,
    #[error("Unclosed quoted label")]
    UnclosedQuote,
    #[error("Invalid newick string: {0}")]
    InvalidNewickString(String),
    #[error("Invalid branch length: {0}")]
    InvalidBranchLength(String),
    #[error("Empty leaf label")]
    EmptyLabel,
    #[error("Nesting deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("Expected {expected} trees, found {found}")]
    WrongTreeCount { expected: usize, found: usize },
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and following bytes).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at position {position}{}", format_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

fn format_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser(kind: ParsingErrorType, parser: &ByteParser) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.context(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Create a ParsingError without parser context
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            position: 0,
            context: String::new(),
        }
    }

    pub fn unexpected_eof(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    pub fn unclosed_comment(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    pub fn unclosed_quote(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedQuote, parser)
    }

    pub fn invalid_newick_string(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNewickString(msg), parser)
    }

    pub fn invalid_branch_length(parser: &ByteParser, value: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidBranchLength(value), parser)
    }

    pub fn empty_label(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::EmptyLabel, parser)
    }

    pub fn nesting_too_deep(parser: &ByteParser, max_depth: usize) -> Self {
        Self::from_parser(ParsingErrorType::NestingTooDeep(max_depth), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        Self::without_context(ParsingErrorType::IoError(err.to_string()))
    }
}
