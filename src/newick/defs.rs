//! Constants for Newick parsing and writing.

/// Newick label delimiters: parentheses, comma, colon, semicolon, whitespace, comment start
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"()[],:; \n\t\r";

/// Default guess for number of leaves, when unknown
pub(crate) const DEFAULT_NUM_LEAVES_GUESS: usize = 10;

/// Default limit on nested parentheses, which bounds parser recursion
pub(crate) const DEFAULT_MAX_DEPTH: usize = 1024;
