//! Provides generic tree representations.
//!
//! Provides core data structures for representing gene and species trees:
//! * [`GenTree<L>`] - Main tree structure using the arena pattern,
//!   generic over the way leaves refer to their labels.
//! * [CompactTree] as realization with [LabelIndex]
//! * [SimpleTree] as realization with [String]
//! * [VertexIndex] as type used to index vertices in tree
//! * [TreeError] describing why a tree is not a valid rooted binary tree

use crate::model::leaf_label_map::LabelIndex;
use crate::model::vertex::Vertex;
use thiserror::Error;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted binary tree represented using the arena pattern on [Vertex].
///
/// Used identically for gene trees and species trees. Vertices are stored
/// in a contiguous vector and referenced by [VertexIndex]; parent and child
/// relations are index fields, so there are no owning cycles.
///
/// Generic over `L`, representing how leaves handle labels
/// (e.g. as index into a [LeafLabelMap](crate::model::LeafLabelMap) or as [String]).
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained; traversal orders
///   are computed on demand (see [`GenTree::post_order_indices`]).
///
/// # Construction
/// Specify the number of leaves, then add vertices bottom-up with
/// [`add_leaf`](GenTree::add_leaf), [`add_internal_vertex`](GenTree::add_internal_vertex)
/// and finally [`add_root`](GenTree::add_root).
/// Test validity with [`GenTree::validate()`].
#[derive(Debug, Clone)]
pub struct GenTree<L> {
    /// Number of leaf nodes the tree was created for
    num_leaves_init: usize,

    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex<L>>,

    /// Index of the root of this tree
    root_index: VertexIndex,
}

// Convenient type aliases
/// Tree with shared labels via [LeafLabelMap](crate::model::LeafLabelMap),
/// which is efficient for a species tree and its gene trees.
pub type CompactTree = GenTree<LabelIndex>;

/// Tree with embedded String labels.
pub type SimpleTree = GenTree<String>;

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl<L> GenTree<L> {
    /// Creates a new tree with capacity for a binary tree with `num_leaves` leaves.
    ///
    /// # Arguments
    /// `num_leaves` - number of leaves of the new binary tree, implying number of vertices
    pub fn new(num_leaves: usize) -> Self {
        let capacity = (2 * num_leaves).saturating_sub(1);
        GenTree {
            num_leaves_init: num_leaves,
            root_index: NO_ROOT_SET_INDEX,
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    pub fn add_leaf(&mut self, label: L) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(index, label));
        index
    }

    /// Adds an internal vertex above the two given children and returns its index.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds or refers to the root.
    pub fn add_internal_vertex(&mut self, children: (VertexIndex, VertexIndex), name: Option<String>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_internal(index, children, name));

        self[children.0].set_parent(index);
        self[children.1].set_parent(index);

        index
    }

    /// Adds the root above the two given children and returns its index.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds or refers to the root.
    pub fn add_root(&mut self, children: (VertexIndex, VertexIndex), name: Option<String>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_root(index, children, name));

        self.root_index = index;
        self[children.0].set_parent(index);
        self[children.1].set_parent(index);

        index
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex<L> {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex<L> {
        &self[index]
    }

    /// Returns the number of leaves this tree was initialized to hold.
    pub fn num_leaves_init(&self) -> usize {
        self.num_leaves_init
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of internal (non-root, non-leaf) vertices in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the indices of all leaves, in arena order.
    pub fn leaf_indices(&self) -> Vec<VertexIndex> {
        self.vertices
            .iter()
            .filter(|v| v.is_leaf())
            .map(|v| v.index())
            .collect()
    }

    /// Returns all vertex indices in post-order (children before parents).
    ///
    /// Computed once by the caller and iterated imperatively, so children-before-parent
    /// becomes a loop invariant rather than recursion depth.
    pub fn post_order_indices(&self) -> Vec<VertexIndex> {
        self.post_order_iter().map(|v| v.index()).collect()
    }

    /// Returns all vertex indices in pre-order (parents before children).
    pub fn pre_order_indices(&self) -> Vec<VertexIndex> {
        self.pre_order_iter().map(|v| v.index()).collect()
    }

    /// Returns an iterator over the path from `index` up to the root,
    /// starting with `index` itself (distance 0).
    ///
    /// # Example
    /// ```
    /// use dtlrec::model::SimpleTree;
    ///
    /// let mut tree = SimpleTree::new(3);
    /// let a = tree.add_leaf("A".to_string());
    /// let b = tree.add_leaf("B".to_string());
    /// let c = tree.add_leaf("C".to_string());
    /// let ab = tree.add_internal_vertex((a, b), None);
    /// let root = tree.add_root((ab, c), None);
    ///
    /// let path: Vec<_> = tree.ancestors(a).collect();
    /// assert_eq!(path, vec![a, ab, root]);
    /// ```
    pub fn ancestors(&self, index: VertexIndex) -> Ancestors<'_, L> {
        Ancestors {
            tree: self,
            next: Some(index),
        }
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl<L> GenTree<L> {
    /// Validates that this is a well-formed rooted binary tree.
    ///
    /// Checks:
    /// - Root index is set, within bounds and points to a Root vertex
    /// - There are at least two leaves and exactly `2·leaves − 1` vertices
    /// - All vertex indices match their position in the arena
    /// - There is only one root
    /// - All child indices are valid and point back to correct parent
    /// - All non-root vertices have a parent that includes them as a child
    /// - Every vertex is reached exactly once from the root (no cycles, no orphans)
    ///
    /// # Returns
    /// `Ok(())` if tree is valid, otherwise the first [TreeError] found
    pub fn validate(&self) -> Result<(), TreeError> {
        let num_vertices = self.vertices.len();

        if self.root_index == NO_ROOT_SET_INDEX {
            return Err(TreeError::RootNotSet);
        }
        if self.root_index >= num_vertices || !self.vertices[self.root_index].is_root() {
            return Err(TreeError::InvalidRoot(self.root_index));
        }

        let num_leaves = self.num_leaves();
        if num_leaves < 2 {
            return Err(TreeError::TooFewLeaves(num_leaves));
        }
        if num_vertices != 2 * num_leaves - 1 {
            return Err(TreeError::NotBinary {
                leaves: num_leaves,
                vertices: num_vertices,
            });
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return Err(TreeError::IndexMismatch {
                    position: index,
                    stored: vertex.index(),
                });
            }

            if vertex.is_root() && index != self.root_index {
                return Err(TreeError::MultipleRoots(index));
            }

            if let Some((left, right)) = vertex.children() {
                for child in [left, right] {
                    if child >= num_vertices {
                        return Err(TreeError::OutOfBounds(child));
                    }
                    if self.vertices[child].parent() != Some(index) {
                        return Err(TreeError::InconsistentParent(child));
                    }
                }
            }

            if !vertex.is_root() {
                let parent = vertex.parent().ok_or(TreeError::MissingParent(index))?;
                if parent >= num_vertices {
                    return Err(TreeError::OutOfBounds(parent));
                }
                match self.vertices[parent].children() {
                    Some((left, right)) if left == index || right == index => {}
                    _ => return Err(TreeError::InconsistentParent(index)),
                }
            }
        }

        // Bounded walk from the root; a vertex seen twice means a cycle
        let mut seen = vec![false; num_vertices];
        let mut stack = vec![self.root_index];
        let mut reached = 0;
        while let Some(index) = stack.pop() {
            if seen[index] {
                return Err(TreeError::Cycle(index));
            }
            seen[index] = true;
            reached += 1;
            if let Some((left, right)) = self.vertices[index].children() {
                stack.push(right);
                stack.push(left);
            }
        }
        if reached != num_vertices {
            let orphan = seen.iter().position(|&s| !s).unwrap_or(0);
            return Err(TreeError::Unreachable(orphan));
        }

        Ok(())
    }

    /// Returns `true` if [`validate`](Self::validate) succeeds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl<L> std::ops::Index<VertexIndex> for GenTree<L> {
    type Output = Vertex<L>;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl<L> std::ops::IndexMut<VertexIndex> for GenTree<L> {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =#========================================================================#=
// TREE ERROR
// =#========================================================================#=
/// Reasons why a tree is not a well-formed rooted binary tree.
///
/// These are preconditions of reconciliation and are checked before
/// any cost table is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("root has not been set")]
    RootNotSet,
    #[error("root index {0} does not refer to a root vertex")]
    InvalidRoot(VertexIndex),
    #[error("tree needs at least 2 leaves, found {0}")]
    TooFewLeaves(usize),
    #[error("binary tree with {leaves} leaves cannot have {vertices} vertices")]
    NotBinary { leaves: usize, vertices: usize },
    #[error("vertex at position {position} stores index {stored}")]
    IndexMismatch { position: VertexIndex, stored: VertexIndex },
    #[error("second root at index {0}")]
    MultipleRoots(VertexIndex),
    #[error("vertex index {0} is out of bounds")]
    OutOfBounds(VertexIndex),
    #[error("vertex {0} has no parent")]
    MissingParent(VertexIndex),
    #[error("parent and child references of vertex {0} disagree")]
    InconsistentParent(VertexIndex),
    #[error("cycle through vertex {0}")]
    Cycle(VertexIndex),
    #[error("vertex {0} is not reachable from the root")]
    Unreachable(VertexIndex),
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl<L> GenTree<L> {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Left subtrees are visited before right subtrees.
    pub fn post_order_iter(&self) -> PostOrderIter<'_, L> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_, L> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Stack based; each vertex is visited after all its descendants.
pub struct PostOrderIter<'a, L> {
    tree: &'a GenTree<L>,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a, L> PostOrderIter<'a, L> {
    fn new(tree: &'a GenTree<L>) -> Self {
        let mut stack = Vec::with_capacity(tree.num_vertices());
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a, L> Iterator for PostOrderIter<'a, L> {
    type Item = &'a Vertex<L>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            match vertex.children() {
                Some((left, right)) if !children_visited => {
                    self.stack.push((index, true));
                    self.stack.push((right, false));
                    self.stack.push((left, false));
                }
                _ => return Some(vertex),
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
pub struct PreOrderIter<'a, L> {
    tree: &'a GenTree<L>,
    stack: Vec<VertexIndex>,
}

impl<'a, L> PreOrderIter<'a, L> {
    fn new(tree: &'a GenTree<L>) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a, L> Iterator for PreOrderIter<'a, L> {
    type Item = &'a Vertex<L>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        if let Some((left, right)) = vertex.children() {
            self.stack.push(right);
            self.stack.push(left);
        }

        Some(vertex)
    }
}

/// Iterator over a vertex and its ancestors up to the root.
pub struct Ancestors<'a, L> {
    tree: &'a GenTree<L>,
    next: Option<VertexIndex>,
}

impl<L> Iterator for Ancestors<'_, L> {
    type Item = VertexIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree[current].parent();
        Some(current)
    }
}
