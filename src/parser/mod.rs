//! Low-level parsing infrastructure.
//!
//! Provides the [ByteParser] cursor the Newick parser is built on and the
//! [ParsingError] type reported for malformed input.

pub mod byte_parser;
pub mod parsing_error;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
