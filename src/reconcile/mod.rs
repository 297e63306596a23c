//! Most parsimonious DTL reconciliation of a gene tree with a species tree.
//!
//! The dynamic program fills, for every pair of gene vertex `g` and species
//! vertex `s`, seven cost tables (see [CostTables]) and records the cheapest
//! event. Gene vertices are processed in post-order; for each internal one
//! the species tree is swept twice:
//! 1. post-order: `speciation`, `duplication`, `transfer`, `cost`, `in`, `inAlt`
//! 2. pre-order: `out`, from the `inAlt` values of the first sweep
//!
//! The optimal cost is the minimum of the gene root's `cost` row.
//!
//! Gene leaves map to species leaves by label equality ([LeafMapping]). A gene
//! leaf without a matching species leaf makes the reconciliation infeasible,
//! which is reported as [`OptimalCost::Unreconcilable`] rather than an error.
//!
//! # Example
//! ```
//! use dtlrec::newick::parse_pair_str;
//! use dtlrec::reconcile::{reconcile, DtlCosts, Event, OptimalCost};
//!
//! let (species, gene, _labels) = parse_pair_str("(((A,B),C),D); (((A,C),B),D);").unwrap();
//! let result = reconcile(&species, &gene, &DtlCosts::new(2.0, 1.0, 3.0)).unwrap();
//!
//! assert_eq!(result.optimal_cost(), OptimalCost::Finite(2.0));
//! assert_eq!(result.root_event(), Some(Event::Transfer));
//! ```

mod costs;
mod event;
mod leaf_mapping;
mod min;
mod species_pass;
mod tables;

pub use costs::{CostError, DtlCosts};
pub use event::Event;
pub use leaf_mapping::LeafMapping;
pub use tables::CostTables;

use crate::error::Error;
use crate::model::{GenTree, VertexIndex};
use serde::{Deserialize, Serialize};
use species_pass::SpeciesLayout;
use std::fmt;
use tracing::{debug, trace, warn};

// =#========================================================================#=
// RECONCILE (pub)
// =#========================================================================#=
/// Reconciles `gene` with `species` under the given event costs.
///
/// Both trees must be valid rooted binary trees with at least two leaves and
/// the costs finite and non-negative; otherwise an [Error] is returned before
/// any table is built. The dynamic program itself cannot fail.
///
/// # Errors
/// * [`Error::SpeciesTree`] / [`Error::GeneTree`] (with `index` 0) - malformed tree
/// * [`Error::Costs`] - negative or non-finite cost weight
pub fn reconcile<L: PartialEq>(species: &GenTree<L>, gene: &GenTree<L>, costs: &DtlCosts) -> Result<Reconciliation, Error> {
    species.validate().map_err(Error::SpeciesTree)?;
    gene.validate().map_err(|source| Error::GeneTree { index: 0, source })?;
    costs.validate()?;

    let layout = SpeciesLayout::new(species);
    Ok(run(species, &layout, gene, costs))
}

/// Reconciles several gene trees against one species tree.
///
/// Every gene tree is reconciled independently with the same costs; results
/// are in input order. Input is validated up front, so either all trees are
/// reconciled or none.
///
/// # Errors
/// As [reconcile]; [`Error::GeneTree`] names the position of the first malformed gene tree.
pub fn reconcile_batch<L: PartialEq>(
    species: &GenTree<L>,
    genes: &[GenTree<L>],
    costs: &DtlCosts,
) -> Result<Vec<Reconciliation>, Error> {
    species.validate().map_err(Error::SpeciesTree)?;
    for (index, gene) in genes.iter().enumerate() {
        gene.validate().map_err(|source| Error::GeneTree { index, source })?;
    }
    costs.validate()?;

    let layout = SpeciesLayout::new(species);
    Ok(genes.iter().map(|gene| run(species, &layout, gene, costs)).collect())
}

/// Runs the dynamic program on validated input.
fn run<L: PartialEq>(species: &GenTree<L>, layout: &SpeciesLayout, gene: &GenTree<L>, costs: &DtlCosts) -> Reconciliation {
    debug!(
        species_vertices = species.num_vertices(),
        gene_vertices = gene.num_vertices(),
        ?costs,
        "starting reconciliation"
    );

    let mapping = LeafMapping::new(species, gene);
    for g in mapping.unmapped_leaves() {
        warn!(gene_leaf = g, "gene leaf matches no species leaf, reconciliation is infeasible");
    }

    let mut tables = CostTables::new(gene.num_vertices(), species.num_vertices());
    mapping.seed(&mut tables, species, costs.loss);

    // Children rows are final before their parent is processed
    for g in gene.post_order_indices() {
        let Some(children) = gene[g].children() else {
            continue;
        };
        species_pass::cost_pass(&mut tables, layout, costs, g, children);
        species_pass::out_pass(&mut tables, layout, g);
        trace!(gene_vertex = g, best = min::min_row(tables.cost_row(g)), "gene vertex reconciled");
    }

    let result = Reconciliation {
        tables,
        gene_root: gene.root_index(),
        gene_leaf: (0..gene.num_vertices()).map(|g| gene[g].is_leaf()).collect(),
        species_post_order: layout.post_order().to_vec(),
        costs: *costs,
    };
    debug!(optimal_cost = %result.optimal_cost(), "finished reconciliation");
    result
}

// =#========================================================================#=
// OPTIMAL COST
// =#========================================================================#=
/// Minimum total event cost of a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimalCost {
    /// A reconciliation exists with this total cost
    Finite(f64),
    /// Some gene leaf maps to no species leaf, so no reconciliation exists
    Unreconcilable,
}

impl OptimalCost {
    /// Returns the cost, or `None` if unreconcilable.
    pub fn value(&self) -> Option<f64> {
        match self {
            OptimalCost::Finite(cost) => Some(*cost),
            OptimalCost::Unreconcilable => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, OptimalCost::Finite(_))
    }
}

impl fmt::Display for OptimalCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimalCost::Finite(cost) => write!(f, "{cost}"),
            OptimalCost::Unreconcilable => f.write_str("unreconcilable"),
        }
    }
}

// =#========================================================================#=
// RECONCILIATION
// =#========================================================================#=
/// Filled cost tables of one gene tree against one species tree.
///
/// Vertex indices refer to the arenas of the trees passed to [reconcile].
#[derive(Debug, Clone)]
pub struct Reconciliation {
    tables: CostTables,
    gene_root: VertexIndex,
    gene_leaf: Vec<bool>,
    species_post_order: Vec<VertexIndex>,
    costs: DtlCosts,
}

/// Serializable outcome of a [Reconciliation].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub optimal_cost: OptimalCost,
    pub optimal_species: Option<VertexIndex>,
    pub root_event: Option<Event>,
    pub costs: DtlCosts,
}

impl Reconciliation {
    /// Minimum over all species vertices of the gene root's cost.
    pub fn optimal_cost(&self) -> OptimalCost {
        match self.argmin(self.gene_root) {
            Some((_, cost)) => OptimalCost::Finite(cost),
            None => OptimalCost::Unreconcilable,
        }
    }

    /// Species vertex attaining the optimal cost, `None` if unreconcilable.
    ///
    /// On equal cost the vertex whose root event comes first in [`Event`]
    /// order wins, then the first one in species post-order.
    pub fn optimal_species(&self) -> Option<VertexIndex> {
        self.argmin(self.gene_root).map(|(s, _)| s)
    }

    /// Event at the gene root for the optimal species vertex.
    pub fn root_event(&self) -> Option<Event> {
        self.event_of(self.gene_root)
    }

    /// Event of internal gene vertex `g` at its own cheapest species vertex.
    ///
    /// `None` for gene leaves and for vertices with no finite cost.
    pub fn event_of(&self, g: VertexIndex) -> Option<Event> {
        if self.gene_leaf.get(g).copied().unwrap_or(true) {
            return None;
        }
        let (s, _) = self.argmin(g)?;
        self.tables.event(g, s)
    }

    /// Event recorded for gene vertex `g` placed at species vertex `s`.
    pub fn event_at(&self, g: VertexIndex, s: VertexIndex) -> Option<Event> {
        self.tables.event(g, s)
    }

    /// [`event_of`](Self::event_of) for every gene vertex, indexed by gene vertex.
    pub fn events(&self) -> Vec<Option<Event>> {
        (0..self.gene_leaf.len()).map(|g| self.event_of(g)).collect()
    }

    /// Read-only access to all cost tables.
    pub fn tables(&self) -> &CostTables {
        &self.tables
    }

    /// Cost weights this reconciliation was computed with.
    pub fn costs(&self) -> &DtlCosts {
        &self.costs
    }

    pub fn summary(&self) -> ReconciliationSummary {
        ReconciliationSummary {
            optimal_cost: self.optimal_cost(),
            optimal_species: self.optimal_species(),
            root_event: self.root_event(),
            costs: self.costs,
        }
    }

    /// Species vertex with minimal finite cost for `g`.
    ///
    /// Equal costs are resolved by the recorded event in [`Event`] order,
    /// then by species post-order.
    fn argmin(&self, g: VertexIndex) -> Option<(VertexIndex, f64)> {
        let mut best: Option<(VertexIndex, f64, Option<Event>)> = None;
        for &s in &self.species_post_order {
            let cost = self.tables.cost(g, s);
            if !cost.is_finite() {
                continue;
            }
            let event = self.tables.event(g, s);
            let better = match best {
                None => true,
                Some((_, b, e)) => cost < b || (cost == b && event_precedes(event, e)),
            };
            if better {
                best = Some((s, cost, event));
            }
        }
        best.map(|(s, cost, _)| (s, cost))
    }
}

/// Whether `a` wins a cost tie against `b`; cells without an event lose.
fn event_precedes(a: Option<Event>, b: Option<Event>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a < b,
        (Some(_), None) => true,
        _ => false,
    }
}
