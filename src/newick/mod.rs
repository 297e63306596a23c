//! Newick format parser and writer for gene and species trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into tree structures. The parser uses a [`TreeBuilder`](crate::model::TreeBuilder)
//! internally, which also resolves labels.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single string, returns a [`SimpleTree`]
//! * [`parse_trees_str`] - parses several trees, returns [`CompactTree`]s + [`LeafLabelMap`]
//! * [`parse_pair_str`] - parses exactly a species tree and a gene tree
//! * [`parse_file`] - like [`parse_trees_str`], reading from a file
//! * [`to_newick`] / [`compact_to_newick`] - write a tree back to Newick
//!
//! # Full API
//! For more control, configure a [`NewickParser`] and provide a [`ByteParser`]:
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= internal_vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex ',' vertex ')' [name] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels with delimiters are single-quoted, `''` escapes a quote
//! * Comments are square brackets and can occur anywhere where whitespace is allowed
//! * Branch lengths must be non-negative numbers; they are checked and dropped
//! * Every internal vertex has exactly two children

mod defs;
mod parser;
pub mod writer;

pub use self::parser::NewickParser;
pub use self::writer::{compact_to_newick, to_newick};

use crate::model::{CompactTree, LeafLabelMap, SimpleTree};
use crate::parser::byte_parser::ByteParser;
use crate::parser::{ParsingError, ParsingErrorType};
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file eagerly and returns all trees (as [`CompactTree`])
/// together with their shared [label mapping](LeafLabelMap).
///
/// # Arguments
/// * `path` - Path to the file with semicolon-separated list of Newick strings
///
/// # Returns
/// * `(Vec<CompactTree>, LeafLabelMap)` - All parsed trees and their shared label mapping
/// * [`ParsingError`] - If file reading fails or Newick format is invalid
///
/// # Example
/// ```ignore
/// use dtlrec::newick::parse_file;
///
/// let (trees, label_map) = parse_file("species_and_genes.nwk")?;
/// println!("Parsed {} trees with {} taxa", trees.len(), label_map.num_labels());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<(Vec<CompactTree>, LeafLabelMap), ParsingError> {
    let mut contents = Vec::new();
    let mut file = File::open(path)?;
    file.read_to_end(&mut contents)?;
    parse_trees(ByteParser::new(contents))
}

/// Parses a semicolon-separated list of Newick strings into [`CompactTree`]s
/// sharing one [`LeafLabelMap`].
///
/// # Example
/// ```
/// use dtlrec::newick::parse_trees_str;
///
/// let (trees, labels) = parse_trees_str("((A,B),C); ((A,C),B);").unwrap();
/// assert_eq!(trees.len(), 2);
/// assert_eq!(labels.num_labels(), 3);
/// ```
pub fn parse_trees_str<S: AsRef<str>>(newick: S) -> Result<(Vec<CompactTree>, LeafLabelMap), ParsingError> {
    parse_trees(ByteParser::from_str(newick.as_ref()))
}

/// Parses exactly two Newick trees, a species tree followed by a gene tree,
/// with shared labels.
///
/// # Errors
/// [`ParsingErrorType::WrongTreeCount`] if the input holds any other number of trees.
///
/// # Example
/// ```
/// use dtlrec::newick::parse_pair_str;
///
/// let (species, gene, labels) = parse_pair_str("((A,B),C);\n((A,C),B);").unwrap();
/// assert_eq!(species.num_leaves(), 3);
/// assert_eq!(gene.num_leaves(), 3);
/// assert_eq!(labels.num_labels(), 3);
/// ```
pub fn parse_pair_str<S: AsRef<str>>(newick: S) -> Result<(CompactTree, CompactTree, LeafLabelMap), ParsingError> {
    let (trees, labels) = parse_trees_str(newick)?;
    let found = trees.len();
    let mut trees = trees.into_iter();
    match (trees.next(), trees.next(), trees.next()) {
        (Some(species), Some(gene), None) => Ok((species, gene, labels)),
        _ => Err(ParsingError::without_context(ParsingErrorType::WrongTreeCount { expected: 2, found })),
    }
}

/// Parses a single Newick string to obtain a [`SimpleTree`].
///
/// # Example
/// ```
/// use dtlrec::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<SimpleTree, ParsingError> {
    let mut newick_parser = NewickParser::new_simple_defaults();
    let mut byte_parser = ByteParser::from_str(newick.as_ref());
    newick_parser.parse_str(&mut byte_parser)
}

fn parse_trees(byte_parser: ByteParser) -> Result<(Vec<CompactTree>, LeafLabelMap), ParsingError> {
    let mut newick_parser = NewickParser::new_compact_defaults();
    let trees = newick_parser.parse_all(byte_parser)?;
    let label_map = newick_parser.into_builder().into_label_map();
    Ok((trees, label_map))
}
