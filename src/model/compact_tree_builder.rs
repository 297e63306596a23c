//! [TreeBuilder] producing [CompactTree]s over one shared [LeafLabelMap].

use crate::model::tree_builder::TreeBuilder;
use crate::model::{CompactTree, LeafLabelMap, VertexIndex};

/// Default guess for number of distinct labels when unknown
const DEFAULT_NUM_LABELS_GUESS: usize = 10;

/// Builds [CompactTree]s whose leaves index into a [LeafLabelMap] owned by
/// the builder and shared by every tree it produces.
///
/// Retrieve the map with [`into_label_map`](Self::into_label_map) once all
/// trees are built.
#[derive(Debug)]
pub struct CompactTreeBuilder {
    current_tree: Option<CompactTree>,
    labels: LeafLabelMap,
}

impl CompactTreeBuilder {
    pub fn new() -> Self {
        Self::with_label_map(LeafLabelMap::new(DEFAULT_NUM_LABELS_GUESS))
    }

    /// Creates a builder that continues filling an existing label map.
    pub fn with_label_map(labels: LeafLabelMap) -> Self {
        Self {
            current_tree: None,
            labels,
        }
    }

    /// Returns the labels seen so far.
    pub fn label_map(&self) -> &LeafLabelMap {
        &self.labels
    }

    /// Consumes the builder and returns the shared label map.
    pub fn into_label_map(self) -> LeafLabelMap {
        self.labels
    }

    fn tree_mut(&mut self) -> &mut CompactTree {
        self.current_tree.get_or_insert_with(|| CompactTree::new(2))
    }
}

impl Default for CompactTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder for CompactTreeBuilder {
    type Tree = CompactTree;

    fn init_next(&mut self, num_leaves: usize) {
        self.current_tree = Some(CompactTree::new(num_leaves));
    }

    fn add_leaf(&mut self, label: &str) -> VertexIndex {
        let label_index = self.labels.get_or_insert(label);
        self.tree_mut().add_leaf(label_index)
    }

    fn add_internal(&mut self, children: (VertexIndex, VertexIndex), name: Option<String>) -> VertexIndex {
        self.tree_mut().add_internal_vertex(children, name)
    }

    fn add_root(&mut self, children: (VertexIndex, VertexIndex), name: Option<String>) -> VertexIndex {
        self.tree_mut().add_root(children, name)
    }

    fn finish_tree(&mut self) -> Option<Self::Tree> {
        self.current_tree.take()
    }
}
