//! Shared leaf label storage for a species tree and its gene trees.
//!
//! A gene leaf and a species leaf are associated exactly when their labels are
//! identical. Storing both trees' labels in one [LeafLabelMap] turns that string
//! comparison into an index comparison.

use std::collections::HashMap;
use std::fmt;

/// Index of a label in a [LeafLabelMap].
pub type LabelIndex = usize;

// =#========================================================================#=
// LEAF LABEL MAP
// =#========================================================================#=
/// Maps leaf labels (strings) to compact indices.
///
/// Labels are deduplicated: inserting the same label twice returns the same
/// index, so two [CompactTree](crate::model::CompactTree)s built against one
/// map have equal leaf labels exactly when their indices are equal.
///
/// # Example
/// ```
/// use dtlrec::model::LeafLabelMap;
///
/// let mut labels = LeafLabelMap::new(3);
///
/// let idx_a = labels.get_or_insert("A");  // idx_a = 0
/// let idx_b = labels.get_or_insert("B");  // idx_b = 1
/// let idx_a2 = labels.get_or_insert("A"); // idx_a2 = 0 (deduplicated)
///
/// assert_eq!(idx_a, idx_a2);
/// assert_ne!(idx_a, idx_b);
/// assert_eq!(labels.get_label(idx_a), Some("A"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeafLabelMap {
    /// List of unique labels
    labels: Vec<String>,
    /// Map from label to its index
    map: HashMap<String, LabelIndex>,
}

impl LeafLabelMap {
    /// Creates a new, empty map with pre-allocated capacity.
    pub fn new(capacity: usize) -> Self {
        LeafLabelMap {
            labels: Vec::with_capacity(capacity),
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Gets the index for a label, inserting it if it doesn't exist.
    pub fn get_or_insert(&mut self, label: &str) -> LabelIndex {
        if let Some(&index) = self.map.get(label) {
            return index;
        }

        let index = self.labels.len();
        self.labels.push(label.to_string());
        self.map.insert(label.to_string(), index);
        index
    }

    /// Retrieves the index for a given label, if present.
    pub fn get_index(&self, label: &str) -> Option<LabelIndex> {
        self.map.get(label).copied()
    }

    /// Retrieves the leaf label for a given index, if valid.
    pub fn get_label(&self, index: LabelIndex) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Checks if a label exists in the map.
    pub fn contains_label(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    /// Returns the number of labels currently stored.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Returns the stored labels, ordered by index.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl fmt::Display for LeafLabelMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "LeafLabelMap ({} labels):", self.labels.len())?;
        for (idx, label) in self.labels.iter().enumerate() {
            writeln!(f, "  [{}] {}", idx, label)?;
        }
        Ok(())
    }
}

impl std::ops::Index<LabelIndex> for LeafLabelMap {
    type Output = str;

    fn index(&self, index: LabelIndex) -> &Self::Output {
        &self.labels[index]
    }
}
