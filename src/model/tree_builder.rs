//! Trait for constructing trees during parsing.
//!
//! The [`TreeBuilder`] trait decouples the Newick parser from concrete tree
//! representations. The parser calls builder methods as it reads Newick
//! syntax, and the builder assembles whatever tree structure it wants.
//!
//! # Built-in implementations
//! * [`CompactTreeBuilder`] - Builds [`CompactTree`]s whose labels live in one
//!   shared [`LeafLabelMap`], so a species tree and its gene trees can be
//!   matched leaf by leaf through label indices
//! * [`SimpleTreeBuilder`] - Builds [`SimpleTree`]s with labels stored directly in leaves
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_* ──→ finish_tree() ──→ Empty
//!   ↑                                                                  │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
// Imports for doc links
#[allow(unused_imports)]
use crate::model::{CompactTree, CompactTreeBuilder, LeafLabelMap, SimpleTree, SimpleTreeBuilder};

use crate::model::tree::VertexIndex;

// =#========================================================================#=
// TREE BUILDER (trait)
// =#========================================================================T=
/// Abstraction for constructing trees during parsing.
///
/// The parser drives the lifecycle:
///
/// 1. [`init_next`](Self::init_next) -> prepare for a new tree
/// 2. [`add_leaf`](Self::add_leaf), [`add_internal`](Self::add_internal),
///    [`add_root`](Self::add_root) -> build structure bottom-up
/// 3. [`finish_tree`](Self::finish_tree) -> finalize and return the tree
pub trait TreeBuilder {
    /// The tree type produced by this builder.
    type Tree;

    /// Prepares the builder for constructing a new tree.
    ///
    /// # Arguments
    /// * `num_leaves` - Expected number of leaves (hint for allocation)
    fn init_next(&mut self, num_leaves: usize);

    /// Adds a leaf with the given label and returns its vertex index.
    fn add_leaf(&mut self, label: &str) -> VertexIndex;

    /// Adds an internal (non-root) vertex with two children and an optional name.
    fn add_internal(&mut self, children: (VertexIndex, VertexIndex), name: Option<String>) -> VertexIndex;

    /// Adds the root vertex, completing the tree structure.
    fn add_root(&mut self, children: (VertexIndex, VertexIndex), name: Option<String>) -> VertexIndex;

    /// Finalizes the building process and returns the resulting tree,
    /// or `None` if no tree was under construction.
    fn finish_tree(&mut self) -> Option<Self::Tree>;
}
