//! Inner passes over the species tree for one fixed internal gene vertex.
//!
//! [`cost_pass`] fills `speciation`, `duplication`, `transfer`, `cost`,
//! `in`, `inAlt` and the event table bottom-up; [`out_pass`] then fills
//! `out` top-down from the `inAlt` values just computed.

use crate::model::{GenTree, VertexIndex};
use crate::reconcile::costs::DtlCosts;
use crate::reconcile::min::{min_of, select_event};
use crate::reconcile::tables::{CostTables, Table};

/// Species tree traversal orders and child relations, computed once per reconciliation.
#[derive(Debug, Clone)]
pub(crate) struct SpeciesLayout {
    root: VertexIndex,
    post_order: Vec<VertexIndex>,
    pre_order: Vec<VertexIndex>,
    children: Vec<Option<(VertexIndex, VertexIndex)>>,
}

impl SpeciesLayout {
    pub(crate) fn new<L>(species: &GenTree<L>) -> Self {
        Self {
            root: species.root_index(),
            post_order: species.post_order_indices(),
            pre_order: species.pre_order_indices(),
            children: (0..species.num_vertices()).map(|s| species[s].children()).collect(),
        }
    }

    pub(crate) fn post_order(&self) -> &[VertexIndex] {
        &self.post_order
    }
}

/// Post-order pass over the species tree for internal gene vertex `g`
/// with children `(g1, g2)`, whose rows must already be final.
pub(crate) fn cost_pass(
    tables: &mut CostTables,
    layout: &SpeciesLayout,
    costs: &DtlCosts,
    g: VertexIndex,
    (g1, g2): (VertexIndex, VertexIndex),
) {
    for &s in &layout.post_order {
        let children = layout.children[s];

        let speciation = match children {
            // Speciation needs the species to diverge below `s`
            None => f64::INFINITY,
            Some((s1, s2)) => min_of([
                tables.get(Table::In, g1, s1) + tables.get(Table::In, g2, s2),
                tables.get(Table::In, g2, s1) + tables.get(Table::In, g1, s2),
            ]),
        };

        let duplication = costs.duplication
            + match children {
                None => tables.get(Table::Cost, g1, s) + tables.get(Table::Cost, g2, s),
                Some((s1, s2)) => min_duplication(tables, costs.loss, (g1, g2), s, (s1, s2)),
            };

        // No lineage outside the species root to transfer to
        let transfer = if s == layout.root {
            f64::INFINITY
        } else {
            costs.transfer
                + min_of([
                    tables.get(Table::In, g1, s) + tables.get(Table::Out, g2, s),
                    tables.get(Table::In, g2, s) + tables.get(Table::Out, g1, s),
                ])
        };

        let (cost, event) = select_event(speciation, duplication, transfer);
        tables.set(Table::Speciation, g, s, speciation);
        tables.set(Table::Duplication, g, s, duplication);
        tables.set(Table::Transfer, g, s, transfer);
        tables.set(Table::Cost, g, s, cost);
        tables.set_event(g, s, event);

        let (in_cost, in_alt) = match children {
            None => (cost, cost),
            Some((s1, s2)) => (
                min_of([
                    cost,
                    tables.get(Table::In, g, s1) + costs.loss,
                    tables.get(Table::In, g, s2) + costs.loss,
                ]),
                min_of([cost, tables.get(Table::InAlt, g, s1), tables.get(Table::InAlt, g, s2)]),
            ),
        };
        tables.set(Table::In, g, s, in_cost);
        tables.set(Table::InAlt, g, s, in_alt);
    }
}

/// Cheapest way for both gene children to descend from a duplication at
/// internal species vertex `s`, with zero, one or two losses.
fn min_duplication(
    tables: &CostTables,
    loss: f64,
    (g1, g2): (VertexIndex, VertexIndex),
    s: VertexIndex,
    (s1, s2): (VertexIndex, VertexIndex),
) -> f64 {
    let cost1 = tables.get(Table::Cost, g1, s);
    let cost2 = tables.get(Table::Cost, g2, s);
    let in1 = |x| tables.get(Table::In, g1, x);
    let in2 = |x| tables.get(Table::In, g2, x);

    min_of([
        cost1 + in2(s2) + loss,
        cost1 + in2(s1) + loss,
        cost2 + in1(s2) + loss,
        cost2 + in1(s1) + loss,
        cost1 + cost2,
        in1(s1) + in2(s2) + 2.0 * loss,
        in1(s2) + in2(s1) + 2.0 * loss,
        in1(s1) + in2(s1) + 2.0 * loss,
        in1(s2) + in2(s2) + 2.0 * loss,
    ])
}

/// Pre-order pass over the internal species vertices for gene vertex `g`:
/// a child's `out` is the cheaper of its parent's `out` and its sibling's `inAlt`.
///
/// The species root's `out` stays `+∞`; species leaves only receive values from their parent.
pub(crate) fn out_pass(tables: &mut CostTables, layout: &SpeciesLayout, g: VertexIndex) {
    for &s in &layout.pre_order {
        let Some((s1, s2)) = layout.children[s] else {
            continue;
        };
        let out = tables.get(Table::Out, g, s);
        let out1 = min_of([out, tables.get(Table::InAlt, g, s2)]);
        let out2 = min_of([out, tables.get(Table::InAlt, g, s1)]);
        tables.set(Table::Out, g, s1, out1);
        tables.set(Table::Out, g, s2, out2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimpleTree;

    /// (A,B) with A=0, B=1, root=2
    fn cherry() -> SimpleTree {
        let mut tree = SimpleTree::new(2);
        let a = tree.add_leaf("A".to_string());
        let b = tree.add_leaf("B".to_string());
        tree.add_root((a, b), None);
        tree
    }

    #[test]
    fn test_layout_orders() {
        let layout = SpeciesLayout::new(&cherry());
        assert_eq!(layout.post_order(), &[0, 1, 2]);
        assert_eq!(layout.pre_order, vec![2, 0, 1]);
        assert_eq!(layout.children[2], Some((0, 1)));
        assert_eq!(layout.children[0], None);
    }

    #[test]
    fn test_out_pass_from_sibling_in_alt() {
        let layout = SpeciesLayout::new(&cherry());
        let mut tables = CostTables::new(1, 3);
        tables.set(Table::InAlt, 0, 0, 4.0);
        tables.set(Table::InAlt, 0, 1, 7.0);

        out_pass(&mut tables, &layout, 0);

        assert_eq!(tables.out(0, 2), f64::INFINITY);
        assert_eq!(tables.out(0, 0), 7.0);
        assert_eq!(tables.out(0, 1), 4.0);
    }

    #[test]
    fn test_cost_pass_on_cherry() {
        // Species (A,B), gene (A,B) with gene leaves 0, 1 and gene root 2
        let layout = SpeciesLayout::new(&cherry());
        let mut tables = CostTables::new(3, 3);
        // Gene leaf A at species A, gene leaf B at species B, loss = 1
        for (g, s0) in [(0, 0), (1, 1)] {
            tables.set(Table::Cost, g, s0, 0.0);
            tables.set(Table::In, g, s0, 0.0);
            tables.set(Table::In, g, 2, 1.0);
            tables.set(Table::InAlt, g, s0, 0.0);
            tables.set(Table::InAlt, g, 2, 0.0);
            tables.set(Table::Out, g, 1 - s0, 0.0);
        }
        let costs = DtlCosts::new(2.0, 1.0, 1.0);

        cost_pass(&mut tables, &layout, &costs, 2, (0, 1));

        // At species root: speciation is free, transfer excluded
        assert_eq!(tables.speciation(2, 2), 0.0);
        assert_eq!(tables.transfer(2, 2), f64::INFINITY);
        assert_eq!(tables.cost(2, 2), 0.0);
        assert_eq!(tables.event(2, 2), Some(crate::reconcile::Event::Speciation));
        // At species leaf A: B must be transferred in
        assert_eq!(tables.speciation(2, 0), f64::INFINITY);
        assert_eq!(tables.duplication(2, 0), f64::INFINITY);
        assert_eq!(tables.transfer(2, 0), 1.0);
        assert_eq!(tables.event(2, 0), Some(crate::reconcile::Event::Transfer));
        assert_eq!(tables.in_cost(2, 2), 0.0);
        assert_eq!(tables.in_alt(2, 2), 0.0);
    }
}
