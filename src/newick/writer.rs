//! Newick string writing for gene and species trees.
//!
//! Branch lengths are not part of the tree model, so written trees carry
//! topology, leaf labels and (optionally) internal vertex names only.

use crate::model::{CompactTree, GenTree, LeafLabelMap, SimpleTree, VertexIndex};

/// Characters per internal vertex: `(`, `,`, `)`
const INTERNAL_VERTEX_CHARS: usize = 3;
/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Returns the Newick representation of a [SimpleTree] with closing semicolon.
///
/// # Arguments
/// * `tree` - The tree to write
/// * `names` - Optional replacement names for root and internal vertices,
///   indexed by [VertexIndex]. Where `names` is `None` or holds `None` for a
///   vertex, the vertex's own name (if any) is written.
///
/// # Example
/// ```
/// use dtlrec::newick::{parse_str, to_newick};
///
/// let tree = parse_str("((A,B)x,'C d');").unwrap();
/// assert_eq!(to_newick(&tree, None), "((A,B)x,'C d');");
/// ```
pub fn to_newick(tree: &SimpleTree, names: Option<&[Option<String>]>) -> String {
    let label_len: usize = tree.leaf_indices().iter().filter_map(|&i| tree[i].label()).map(String::len).sum();
    let mut newick = String::with_capacity(estimate_newick_len(tree, label_len));
    write_vertex(tree, tree.root_index(), names, &|label: &String, out: &mut String| push_label(out, label), &mut newick);
    newick.push(';');
    newick
}

/// Returns the Newick representation of a [CompactTree] with closing semicolon,
/// resolving leaf labels through `labels`.
///
/// Leaves whose label index is not in `labels` are written by index.
/// See [to_newick] for the meaning of `names`.
pub fn compact_to_newick(tree: &CompactTree, labels: &LeafLabelMap, names: Option<&[Option<String>]>) -> String {
    let label_len: usize = labels.labels().iter().map(String::len).sum();
    let mut newick = String::with_capacity(estimate_newick_len(tree, label_len));
    let resolve = |label_index: &usize, out: &mut String| match labels.get_label(*label_index) {
        Some(label) => push_label(out, label),
        None => out.push_str(&label_index.to_string()),
    };
    write_vertex(tree, tree.root_index(), names, &resolve, &mut newick);
    newick.push(';');
    newick
}

/// Recursive helper for building the Newick string.
fn write_vertex<L>(
    tree: &GenTree<L>,
    index: VertexIndex,
    names: Option<&[Option<String>]>,
    write_label: &dyn Fn(&L, &mut String),
    newick: &mut String,
) {
    let vertex = &tree[index];
    if let Some(label) = vertex.label() {
        write_label(label, newick);
        return;
    }

    if let Some((left, right)) = vertex.children() {
        newick.push('(');
        write_vertex(tree, left, names, write_label, newick);
        newick.push(',');
        write_vertex(tree, right, names, write_label, newick);
        newick.push(')');
    }

    let replacement = names.and_then(|names| names.get(index)).and_then(Option::as_deref);
    if let Some(name) = replacement.or(vertex.name()) {
        push_label(newick, name);
    }
}

/// Appends the label, quoted if it contains Newick delimiters.
fn push_label(newick: &mut String, label: &str) {
    if label.chars().any(|c| matches!(c, ' ' | ',' | ';' | '\t' | '\n' | '\r' | '(' | ')' | ':' | '[' | ']' | '\'')) {
        // Replace single quotes with double single quotes
        newick.push('\'');
        newick.push_str(&label.replace('\'', "''"));
        newick.push('\'');
    } else {
        newick.push_str(label);
    }
}

fn estimate_newick_len<L>(tree: &GenTree<L>, label_len: usize) -> usize {
    (tree.num_internal() + 1) * INTERNAL_VERTEX_CHARS + label_len + BUFFER_CHARS
}
