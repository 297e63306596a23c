//! [TreeBuilder] producing [SimpleTree]s with owned leaf labels.

use crate::model::tree_builder::TreeBuilder;
use crate::model::{SimpleTree, VertexIndex};

/// Builds [SimpleTree]s, storing a copy of each label in its leaf.
#[derive(Debug, Default)]
pub struct SimpleTreeBuilder {
    current_tree: Option<SimpleTree>,
}

impl SimpleTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn tree_mut(&mut self) -> &mut SimpleTree {
        self.current_tree.get_or_insert_with(|| SimpleTree::new(2))
    }
}

impl TreeBuilder for SimpleTreeBuilder {
    type Tree = SimpleTree;

    fn init_next(&mut self, num_leaves: usize) {
        self.current_tree = Some(SimpleTree::new(num_leaves));
    }

    fn add_leaf(&mut self, label: &str) -> VertexIndex {
        self.tree_mut().add_leaf(label.to_string())
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
