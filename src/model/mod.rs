//! Data model for rooted binary gene and species trees.
//!
//! # Tree representation
//! Trees are represented by [GenTree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex]. The same type serves gene trees and species
//! trees.
//!
//! Two concrete tree types are provided:
//!
//! | Type | Label storage | Use case |
//! |------|---------------|----------|
//! | [CompactTree] | [LabelIndex] into shared [LeafLabelMap] | Species tree plus gene trees parsed together |
//! | [SimpleTree] | Owned [String] per leaf | Trees built or parsed one at a time |
//!
//! # Building trees
//! Trees are built bottom-up directly on [GenTree] or during parsing via the
//! [TreeBuilder] trait:
//!
//! - [CompactTreeBuilder] → [CompactTree]
//! - [SimpleTreeBuilder] → [SimpleTree]
//!
//! Before reconciliation every tree is checked with [`GenTree::validate`].

pub mod compact_tree_builder;
pub mod leaf_label_map;
pub mod simple_tree_builder;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

// Tree (generic)
pub use tree::GenTree;
pub use tree::TreeError;
pub use tree::VertexIndex;
pub use tree_builder::TreeBuilder;
pub use vertex::Vertex;
// Compact tree
pub use compact_tree_builder::CompactTreeBuilder;
pub use leaf_label_map::LabelIndex;
pub use leaf_label_map::LeafLabelMap;
pub use tree::CompactTree;
// Simple Tree
pub use simple_tree_builder::SimpleTreeBuilder;
pub use tree::SimpleTree;
