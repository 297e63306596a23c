use dtlrec::model::{GenTree, LeafLabelMap, SimpleTree, TreeError, Vertex};

/// ((A,B),C) built bottom-up
fn three_leaf_tree() -> SimpleTree {
    let mut tree = SimpleTree::new(3);
    let a = tree.add_leaf("A".to_string());
    let b = tree.add_leaf("B".to_string());
    let ab = tree.add_internal_vertex((a, b), Some("AB".to_string()));
    let c = tree.add_leaf("C".to_string());
    tree.add_root((ab, c), None);
    tree
}

#[test]
fn test_building_tree() {
    let tree = three_leaf_tree();

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.validate().is_ok());

    // Root
    let root = tree.root();
    assert!(root.is_root());
    assert_eq!(root.index(), tree.root_index());
    assert_eq!(root.parent(), None);
    assert_eq!(root.children(), Some((2, 3)));

    // Leaf
    let b = &tree[1];
    assert!(b.is_leaf());
    assert_eq!(b.label().map(String::as_str), Some("B"));
    assert_eq!(b.parent(), Some(2));
    assert_eq!(b.children(), None);

    // Internal
    let ab = &tree[2];
    assert!(ab.is_internal());
    assert_eq!(ab.name(), Some("AB"));
    assert_eq!(ab.parent(), Some(4));
}

#[test]
fn test_parent_unset_until_attached() {
    let mut tree = SimpleTree::new(2);
    let a = tree.add_leaf("A".to_string());
    assert_eq!(tree[a].parent(), None);
    assert_eq!(tree.ancestors(a).collect::<Vec<_>>(), vec![a]);

    let b = tree.add_leaf("B".to_string());
    let root = tree.add_root((a, b), Some("R".to_string()));
    assert_eq!(tree[a].parent(), Some(root));
    assert_eq!(tree.root().name(), Some("R"));
    assert!(tree.validate().is_ok());
}

#[test]
fn test_traversal_orders() {
    let tree = three_leaf_tree();
    assert_eq!(tree.post_order_indices(), vec![0, 1, 2, 3, 4]);
    assert_eq!(tree.pre_order_indices(), vec![4, 2, 0, 1, 3]);
    assert_eq!(tree.leaf_indices(), vec![0, 1, 3]);
    assert_eq!(tree.ancestors(1).collect::<Vec<_>>(), vec![1, 2, 4]);
    assert_eq!(tree.ancestors(4).collect::<Vec<_>>(), vec![4]);
}

#[test]
fn test_post_order_children_before_parent() {
    // Root added before some leaves would be in arena order, still children first
    let mut tree = SimpleTree::new(4);
    let c = tree.add_leaf("C".to_string());
    let d = tree.add_leaf("D".to_string());
    let cd = tree.add_internal_vertex((c, d), None);
    let a = tree.add_leaf("A".to_string());
    let b = tree.add_leaf("B".to_string());
    let ab = tree.add_internal_vertex((a, b), None);
    let root = tree.add_root((ab, cd), None);

    let order = tree.post_order_indices();
    let position = |v| order.iter().position(|&x| x == v).unwrap();
    for v in [a, b, c, d, ab, cd] {
        let parent = tree[v].parent().unwrap();
        assert!(position(v) < position(parent));
    }
    assert_eq!(*order.last().unwrap(), root);
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = SimpleTree::new(2);
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = SimpleTree::new(2);
    let _ = &tree[55];
}

#[test]
#[should_panic]
fn test_set_parent_on_root_panics() {
    let mut root: Vertex<String> = Vertex::new_root(0, (1, 2), None);
    root.set_parent(3);
}

// ============= Validation Tests =============

#[test]
fn test_validate_root_not_set() {
    let mut tree = SimpleTree::new(2);
    let a = tree.add_leaf("A".to_string());
    let b = tree.add_leaf("B".to_string());
    tree.add_internal_vertex((a, b), None);
    assert_eq!(tree.validate(), Err(TreeError::RootNotSet));
}

#[test]
fn test_validate_too_few_leaves() {
    let tree: GenTree<usize> = GenTree::new(1);
    assert_eq!(tree.validate(), Err(TreeError::RootNotSet));

    // A root above the same leaf twice has only one leaf
    let mut tree = SimpleTree::new(1);
    let a = tree.add_leaf("A".to_string());
    tree.add_root((a, a), None);
    assert_eq!(tree.validate(), Err(TreeError::TooFewLeaves(1)));
}

#[test]
fn test_validate_dangling_leaf() {
    let mut tree = three_leaf_tree();
    tree.add_leaf("D".to_string());
    assert!(matches!(tree.validate(), Err(TreeError::NotBinary { leaves: 4, vertices: 6 })));
}

#[test]
fn test_validate_inconsistent_parent() {
    let mut tree = three_leaf_tree();
    // Leaf C claims the internal vertex as parent
    tree[3].set_parent(2);
    assert_eq!(tree.validate(), Err(TreeError::InconsistentParent(3)));
}

#[test]
fn test_is_valid() {
    assert!(three_leaf_tree().is_valid());
    assert!(!SimpleTree::new(3).is_valid());
}

// ============= LeafLabelMap Tests =============

#[test]
fn test_get_or_insert_new_label() {
    let mut map = LeafLabelMap::new(5);
    let index_wrybill = map.get_or_insert("Anarhynchus frontalis");
    assert_eq!(index_wrybill, 0);
    assert!(map.contains_label("Anarhynchus frontalis"));
}

#[test]
fn test_get_or_insert_deduplicates() {
    let mut map = LeafLabelMap::new(2);
    let first = map.get_or_insert("Apteryx owenii");
    let second = map.get_or_insert("Apteryx haastii");
    let again = map.get_or_insert("Apteryx owenii");

    assert_eq!(first, again);
    assert_ne!(first, second);
    assert_eq!(map.num_labels(), 2);
    assert_eq!(&map[second], "Apteryx haastii");
    assert_eq!(map.get_index("Apteryx haastii"), Some(second));
    assert_eq!(map.get_index("Apteryx mantelli"), None);
    assert_eq!(map.get_label(7), None);
}
