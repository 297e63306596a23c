//! Crate-level error type.

use crate::model::TreeError;
use crate::parser::ParsingError;
use crate::reconcile::CostError;
use thiserror::Error;

/// Errors surfaced by parsing input trees and by the preconditions of
/// [reconcile](crate::reconcile::reconcile).
///
/// An infeasible reconciliation is not an error, see
/// [OptimalCost::Unreconcilable](crate::reconcile::OptimalCost::Unreconcilable).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    #[error("invalid species tree: {0}")]
    SpeciesTree(#[source] TreeError),
    /// `index` is the position of the gene tree in a batch (0 for a single gene tree)
    #[error("invalid gene tree {index}: {source}")]
    GeneTree {
        index: usize,
        #[source]
        source: TreeError,
    },
    #[error(transparent)]
    Costs(#[from] CostError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON output: {0}")]
    Json(#[from] serde_json::Error),
}
