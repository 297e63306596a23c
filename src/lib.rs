//! Dtlrec computes most parsimonious reconciliations of gene trees with a
//! species tree under the Duplication-Transfer-Loss (DTL) model.
//!
//! For every internal vertex of a gene tree, the engine considers every
//! placement on the species tree and finds the cheapest combination of
//! speciation, duplication, horizontal transfer and loss events explaining
//! the gene tree topology. It reports the optimal total cost and, per gene
//! vertex, the event at its cheapest placement.
//!
//! Core functionality provided:
//! - Tree models (see [crate::model]):
//!   - [CompactTree] + [LeafLabelMap]: trees share an index-to-label mapping,
//!     so gene and species leaves are matched by index.
//!   - [SimpleTree]: each leaf stores its label directly.
//!   - Both use the arena pattern; vertices refer to each other by index.
//! - Newick: parse single trees or a species tree followed by gene trees,
//!   write (event-annotated) trees back (see [crate::newick]).
//! - Reconciliation: the DTL dynamic program with its seven cost tables
//!   (see [crate::reconcile]).
//!
//! Limitations:
//! - Only rooted binary trees
//! - Leaves are matched by exact label equality
//! - Reports costs and events, no explicit reconciled embedding
//!
//! # Example
//! ```
//! use dtlrec::{parse_newick_pair, reconcile, DtlCosts, OptimalCost};
//!
//! let (species, gene, _labels) = parse_newick_pair("((A,B),C); ((A,B),C);").unwrap();
//! let result = reconcile(&species, &gene, &DtlCosts::default()).unwrap();
//! assert_eq!(result.optimal_cost(), OptimalCost::Finite(0.0));
//! ```

pub mod error;
pub mod model;
pub mod newick;
pub mod parser;
pub mod reconcile;

pub use error::Error;
pub use reconcile::{reconcile, reconcile_batch, DtlCosts, Event, OptimalCost, Reconciliation};

use crate::model::CompactTree;
use crate::model::SimpleTree;
use crate::model::leaf_label_map::LeafLabelMap;
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings,
/// returning a [SimpleTree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<SimpleTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse a species tree followed by a gene tree, returning both as
/// [CompactTree] together with their shared [LeafLabelMap].
///
/// See [`newick::parse_pair_str`] for full documentation of this convenience function.
pub fn parse_newick_pair<S: AsRef<str>>(
    newick: S,
) -> Result<(CompactTree, CompactTree, LeafLabelMap), ParsingError> {
    newick::parse_pair_str(newick)
}

/// Parse a file containing a semicolon-separated list of Newick strings
/// using default settings, returning a vector of [CompactTree] together
/// with their shared [LeafLabelMap].
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<CompactTree>, LeafLabelMap), ParsingError> {
    newick::parse_file(path)
}
