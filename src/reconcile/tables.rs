//! Dense (gene vertex × species vertex) cost tables.

use crate::model::VertexIndex;
use crate::reconcile::event::Event;

/// The seven cost tables and the event table of one reconciliation.
///
/// Every table is a flat row-major `Vec` with one row per gene vertex and
/// one column per species vertex, so cell `(g, s)` lives at `g * num_species + s`.
/// All costs start at `+∞` and only ever decrease toward finite values.
///
/// | Table | Meaning of `(g, s)` |
/// |-------|---------------------|
/// | `cost` | cheapest explanation of gene subtree `g` with `g` at `s` |
/// | `speciation` | same, restricted to a speciation at `s` |
/// | `duplication` | same, restricted to a duplication at `s` |
/// | `transfer` | same, restricted to a transfer out of `s` |
/// | `in` | `g` placed at `s` or below, paying a loss per skipped level |
/// | `inAlt` | `g` placed at `s` or below, losses not charged |
/// | `out` | `g` placed outside the species subtree rooted at `s` |
#[derive(Debug, Clone, PartialEq)]
pub struct CostTables {
    num_gene: usize,
    num_species: usize,
    cost: Vec<f64>,
    speciation: Vec<f64>,
    duplication: Vec<f64>,
    transfer: Vec<f64>,
    in_cost: Vec<f64>,
    in_alt: Vec<f64>,
    out: Vec<f64>,
    events: Vec<Option<Event>>,
}

/// Selects one of the seven cost tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Cost,
    Speciation,
    Duplication,
    Transfer,
    In,
    InAlt,
    Out,
}

impl CostTables {
    /// Creates tables for `num_gene × num_species` cells, all at `+∞` and without events.
    pub fn new(num_gene: usize, num_species: usize) -> Self {
        let cells = num_gene * num_species;
        let infinite = || vec![f64::INFINITY; cells];
        Self {
            num_gene,
            num_species,
            cost: infinite(),
            speciation: infinite(),
            duplication: infinite(),
            transfer: infinite(),
            in_cost: infinite(),
            in_alt: infinite(),
            out: infinite(),
            events: vec![None; cells],
        }
    }

    /// Returns the number of gene vertices (rows).
    pub fn num_gene(&self) -> usize {
        self.num_gene
    }

    /// Returns the number of species vertices (columns).
    pub fn num_species(&self) -> usize {
        self.num_species
    }

    #[inline(always)]
    fn idx(&self, g: VertexIndex, s: VertexIndex) -> usize {
        debug_assert!(g < self.num_gene && s < self.num_species);
        g * self.num_species + s
    }

    pub fn cost(&self, g: VertexIndex, s: VertexIndex) -> f64 {
        self.cost[self.idx(g, s)]
    }

    pub fn speciation(&self, g: VertexIndex, s: VertexIndex) -> f64 {
        self.speciation[self.idx(g, s)]
    }

    pub fn duplication(&self, g: VertexIndex, s: VertexIndex) -> f64 {
        self.duplication[self.idx(g, s)]
    }

    pub fn transfer(&self, g: VertexIndex, s: VertexIndex) -> f64 {
        self.transfer[self.idx(g, s)]
    }

    pub fn in_cost(&self, g: VertexIndex, s: VertexIndex) -> f64 {
        self.in_cost[self.idx(g, s)]
    }

    pub fn in_alt(&self, g: VertexIndex, s: VertexIndex) -> f64 {
        self.in_alt[self.idx(g, s)]
    }

    pub fn out(&self, g: VertexIndex, s: VertexIndex) -> f64 {
        self.out[self.idx(g, s)]
    }

    /// Event chosen at `(g, s)`; `None` for gene leaves and infinite cells.
    pub fn event(&self, g: VertexIndex, s: VertexIndex) -> Option<Event> {
        self.events[self.idx(g, s)]
    }

    /// Returns the `cost` row of gene vertex `g`, indexed by species vertex.
    pub fn cost_row(&self, g: VertexIndex) -> &[f64] {
        let start = g * self.num_species;
        &self.cost[start..start + self.num_species]
    }
}

// ============================================================================
// Writing (crate)
// ============================================================================
impl CostTables {
    #[inline(always)]
    pub(crate) fn get(&self, table: Table, g: VertexIndex, s: VertexIndex) -> f64 {
        let i = self.idx(g, s);
        self.table(table)[i]
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, table: Table, g: VertexIndex, s: VertexIndex, value: f64) {
        let i = self.idx(g, s);
        self.table_mut(table)[i] = value;
    }

    /// Lowers cell `(g, s)` of `table` to `value` if that is smaller.
    #[inline(always)]
    pub(crate) fn lower(&mut self, table: Table, g: VertexIndex, s: VertexIndex, value: f64) {
        let i = self.idx(g, s);
        let cell = &mut self.table_mut(table)[i];
        *cell = cell.min(value);
    }

    #[inline(always)]
    pub(crate) fn set_event(&mut self, g: VertexIndex, s: VertexIndex, event: Option<Event>) {
        let i = self.idx(g, s);
        self.events[i] = event;
    }

    fn table(&self, table: Table) -> &[f64] {
        match table {
            Table::Cost => &self.cost,
            Table::Speciation => &self.speciation,
            Table::Duplication => &self.duplication,
            Table::Transfer => &self.transfer,
            Table::In => &self.in_cost,
            Table::InAlt => &self.in_alt,
            Table::Out => &self.out,
        }
    }

    fn table_mut(&mut self, table: Table) -> &mut [f64] {
        match table {
            Table::Cost => &mut self.cost,
            Table::Speciation => &mut self.speciation,
            Table::Duplication => &mut self.duplication,
            Table::Transfer => &mut self.transfer,
            Table::In => &mut self.in_cost,
            Table::InAlt => &mut self.in_alt,
            Table::Out => &mut self.out,
        }
    }
}
