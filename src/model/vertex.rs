//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;

/// During construction, Internal and Leaf vertex might not have parent set yet.
const NO_PARENT_SET: VertexIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a gene or species tree.
///
/// A vertex can be either:
/// - **Root**: Has two children, no parent, might have a name
/// - **Internal**: Has parent and two children, might have a name
/// - **Leaf**: Has parent and a label, no children
///
/// Generic over `L`, the way a leaf refers to its label
/// (e.g. an owned [String] or an index into a shared label map).
///
/// # Invariants
/// - `index` is the position of the vertex in the arena
/// - Internal vertices and leaves have `parent` set once the tree is built;
///   `NO_PARENT_SET = usize::MAX` only during construction
/// - Root and internal vertices always have exactly two children, so unary
///   vertices cannot be represented
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex<L> {
    /// Root vertex of the tree (has no parent, has two children)
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Indices of the two child vertices
        children: (VertexIndex, VertexIndex),
        /// Optional name, e.g. an internal Newick label
        name: Option<String>,
    },
    /// Internal vertex (has parent and two children)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Indices of the two child vertices
        children: (VertexIndex, VertexIndex),
        /// Optional name, e.g. an internal Newick label
        name: Option<String>,
    },
    /// Leaf vertex (has parent and label, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Label (reference) of this leaf
        label: L,
    },
}

impl<L> Vertex<L> {
    /// Creates a new root vertex.
    pub fn new_root(index: VertexIndex, children: (VertexIndex, VertexIndex), name: Option<String>) -> Self {
        Vertex::Root { index, children, name }
    }

    /// Creates a new internal (non-leaf, non-root) vertex, parent not yet set.
    pub fn new_internal(index: VertexIndex, children: (VertexIndex, VertexIndex), name: Option<String>) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            children,
            name,
        }
    }

    /// Creates a new leaf vertex, parent not yet set.
    pub fn new_leaf(index: VertexIndex, label: L) -> Self {
        Vertex::Leaf {
            index,
            parent: NO_PARENT_SET,
            label,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. } | Vertex::Internal { index, .. } | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the label if this is a leaf, else `None`.
    pub fn label(&self) -> Option<&L> {
        match self {
            Vertex::Leaf { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Returns the name of a root or internal vertex, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Vertex::Root { name, .. } | Vertex::Internal { name, .. } => name.as_deref(),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal (non-root) vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is the root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Returns the children if this is the root or an internal vertex, else `None`.
    pub fn children(&self) -> Option<(VertexIndex, VertexIndex)> {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => Some(*children),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Sets new parent for non-root vertex.
    ///
    /// # Panics
    /// Panics if called on root.
    pub fn set_parent(&mut self, parent: VertexIndex) {
        match self {
            Vertex::Root { .. } => panic!("Cannot set parent on root vertex"),
            Vertex::Internal { parent: p, .. } | Vertex::Leaf { parent: p, .. } => *p = parent,
        }
    }

    /// Returns the index of the parent if this a non-root vertex with parent set, else `None`.
    pub fn parent(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                (*parent != NO_PARENT_SET).then_some(*parent)
            }
            Vertex::Root { .. } => None,
        }
    }
}
