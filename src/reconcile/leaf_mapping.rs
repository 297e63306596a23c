//! Association of gene leaves with species leaves, and the boundary
//! values it induces in the cost tables.

use crate::model::{GenTree, VertexIndex};
use crate::reconcile::tables::{CostTables, Table};

/// For every gene leaf, the species leaves carrying an identical label.
///
/// A gene leaf may map to several species leaves (duplicate species labels)
/// or to none (the label is missing from the species tree).
///
/// # Example
/// ```
/// use dtlrec::newick::parse_trees_str;
/// use dtlrec::reconcile::LeafMapping;
///
/// let (trees, _labels) = parse_trees_str("((A,B),C); (A,E);").unwrap();
/// let mapping = LeafMapping::new(&trees[0], &trees[1]);
///
/// let unmapped = mapping.unmapped_leaves();
/// assert_eq!(unmapped.len(), 1);
/// assert!(mapping.species_leaves(unmapped[0]).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct LeafMapping {
    /// Gene leaves in arena order
    gene_leaves: Vec<VertexIndex>,
    /// Indexed by gene vertex; empty for internal gene vertices
    species_leaves: Vec<Vec<VertexIndex>>,
}

impl LeafMapping {
    /// Matches every gene leaf against every species leaf by label equality.
    ///
    /// Only leaf labels are read, so neither tree needs to be valid.
    pub fn new<L: PartialEq>(species: &GenTree<L>, gene: &GenTree<L>) -> Self {
        let species_labeled: Vec<(VertexIndex, &L)> = species
            .leaf_indices()
            .into_iter()
            .filter_map(|s| species[s].label().map(|label| (s, label)))
            .collect();

        let gene_leaves = gene.leaf_indices();
        let mut species_leaves = vec![Vec::new(); gene.num_vertices()];
        for &g in &gene_leaves {
            if let Some(label) = gene[g].label() {
                species_leaves[g] = species_labeled
                    .iter()
                    .filter(|(_, species_label)| *species_label == label)
                    .map(|&(s, _)| s)
                    .collect();
            }
        }

        Self {
            gene_leaves,
            species_leaves,
        }
    }

    /// Returns the species leaves gene vertex `g` maps to (empty unless `g` is a mapped leaf).
    pub fn species_leaves(&self, g: VertexIndex) -> &[VertexIndex] {
        self.species_leaves.get(g).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if gene vertex `g` is a leaf with at least one species leaf.
    pub fn is_mapped(&self, g: VertexIndex) -> bool {
        !self.species_leaves(g).is_empty()
    }

    /// Returns the gene leaves whose label matches no species leaf.
    pub fn unmapped_leaves(&self) -> Vec<VertexIndex> {
        self.gene_leaves.iter().copied().filter(|&g| !self.is_mapped(g)).collect()
    }

    /// Writes the boundary values of every gene leaf into `tables`.
    ///
    /// For a gene leaf `g` mapped to species leaves `M`:
    /// - `cost[g][s0] = 0` for each `s0` in `M`
    /// - along the path from `s0` to the species root, at distance `d`:
    ///   `in[g][a] = min(in[g][a], loss · d)` and `inAlt[g][a] = 0`
    /// - `out[g][i] = 0` for every species leaf `i` not in `M`
    ///
    /// Unmapped gene leaves keep all cells at `+∞`.
    ///
    /// `species` must have passed [`GenTree::validate`]; the ancestor walk
    /// does not terminate on a parent cycle.
    pub(crate) fn seed<L>(&self, tables: &mut CostTables, species: &GenTree<L>, loss: f64) {
        let all_species_leaves = species.leaf_indices();

        for &g in &self.gene_leaves {
            let mapped = self.species_leaves(g);
            if mapped.is_empty() {
                continue;
            }

            for &s0 in mapped {
                tables.set(Table::Cost, g, s0, 0.0);
                for (distance, ancestor) in species.ancestors(s0).enumerate() {
                    tables.lower(Table::In, g, ancestor, loss * distance as f64);
                    tables.set(Table::InAlt, g, ancestor, 0.0);
                }
            }

            for &i in &all_species_leaves {
                if !mapped.contains(&i) {
                    tables.set(Table::Out, g, i, 0.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimpleTree;

    /// ((A,B),C) with A=0, B=1, AB=2, C=3, root=4
    fn species() -> SimpleTree {
        let mut tree = SimpleTree::new(3);
        let a = tree.add_leaf("A".to_string());
        let b = tree.add_leaf("B".to_string());
        let ab = tree.add_internal_vertex((a, b), None);
        let c = tree.add_leaf("C".to_string());
        tree.add_root((ab, c), None);
        tree
    }

    fn gene(left: &str, right: &str) -> SimpleTree {
        let mut tree = SimpleTree::new(2);
        let l = tree.add_leaf(left.to_string());
        let r = tree.add_leaf(right.to_string());
        tree.add_root((l, r), None);
        tree
    }

    #[test]
    fn test_seeds_path_with_losses() {
        let species = species();
        let gene = gene("A", "C");
        let mapping = LeafMapping::new(&species, &gene);
        let mut tables = CostTables::new(gene.num_vertices(), species.num_vertices());
        mapping.seed(&mut tables, &species, 3.0);

        // Gene leaf 0 is A
        assert_eq!(tables.cost(0, 0), 0.0);
        assert_eq!(tables.cost(0, 2), f64::INFINITY);
        assert_eq!(tables.in_cost(0, 0), 0.0);
        assert_eq!(tables.in_cost(0, 2), 3.0);
        assert_eq!(tables.in_cost(0, 4), 6.0);
        assert_eq!(tables.in_cost(0, 3), f64::INFINITY);
        assert_eq!(tables.in_alt(0, 4), 0.0);
        assert_eq!(tables.in_alt(0, 1), f64::INFINITY);
        assert_eq!(tables.out(0, 0), f64::INFINITY);
        assert_eq!(tables.out(0, 1), 0.0);
        assert_eq!(tables.out(0, 3), 0.0);
        assert_eq!(tables.out(0, 2), f64::INFINITY);
    }

    #[test]
    fn test_multi_mapped_takes_minimum_over_paths() {
        // ((A,B),A): gene leaf A maps to species vertices 0 and 3
        let mut species = SimpleTree::new(3);
        let a = species.add_leaf("A".to_string());
        let b = species.add_leaf("B".to_string());
        let ab = species.add_internal_vertex((a, b), None);
        let a2 = species.add_leaf("A".to_string());
        let root = species.add_root((ab, a2), None);

        let gene = gene("A", "B");
        let mapping = LeafMapping::new(&species, &gene);
        assert_eq!(mapping.species_leaves(0), &[a, a2]);

        let mut tables = CostTables::new(gene.num_vertices(), species.num_vertices());
        mapping.seed(&mut tables, &species, 3.0);

        assert_eq!(tables.cost(0, a), 0.0);
        assert_eq!(tables.cost(0, a2), 0.0);
        // Root is 2 levels above `a` but only 1 above `a2`
        assert_eq!(tables.in_cost(0, root), 3.0);
        assert_eq!(tables.out(0, b), 0.0);
        assert_eq!(tables.out(0, a2), f64::INFINITY);
    }

    #[test]
    fn test_unmapped_leaf_is_not_seeded() {
        let species = species();
        let gene = gene("A", "E");
        let mapping = LeafMapping::new(&species, &gene);
        assert_eq!(mapping.unmapped_leaves(), vec![1]);

        let mut tables = CostTables::new(gene.num_vertices(), species.num_vertices());
        mapping.seed(&mut tables, &species, 1.0);
        for s in 0..species.num_vertices() {
            assert_eq!(tables.cost(1, s), f64::INFINITY);
            assert_eq!(tables.in_cost(1, s), f64::INFINITY);
            assert_eq!(tables.in_alt(1, s), f64::INFINITY);
            assert_eq!(tables.out(1, s), f64::INFINITY);
        }
    }
}
