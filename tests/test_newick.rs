use dtlrec::newick::{NewickParser, compact_to_newick, parse_file, parse_pair_str, parse_str, parse_trees_str, to_newick};
use dtlrec::parser::{ByteParser, ParsingErrorType};
use std::path::Path;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_compact_tree() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0):0.5;";
    let mut parser = ByteParser::from_str(newick);
    let mut newick_parser = NewickParser::new_compact_defaults().with_num_leaves(3);
    let tree = newick_parser.parse_str(&mut parser).unwrap();
    let leaf_map = newick_parser.into_builder().into_label_map();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(leaf_map.num_labels(), 3);
    assert!(tree.is_valid());

    // Test basic label parsing
    assert!(leaf_map.contains_label("A"));
    assert!(leaf_map.contains_label("B"));
    assert!(leaf_map.contains_label("C"));

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root();
    let root_index = root.index();
    let (root_left, root_right) = root.children().unwrap();

    // - Internal node has children (A, B)
    let internal = tree.vertex(root_left);
    assert!(internal.is_internal());
    let (internal_left, internal_right) = internal.children().unwrap();

    // - Three leaves
    let leaf_a = tree.vertex(internal_left);
    let leaf_b = tree.vertex(internal_right);
    let leaf_c = tree.vertex(root_right);
    assert_eq!(leaf_map.get_label(*leaf_a.label().unwrap()), Some("A"));
    assert_eq!(leaf_map.get_label(*leaf_b.label().unwrap()), Some("B"));
    assert_eq!(leaf_map.get_label(*leaf_c.label().unwrap()), Some("C"));

    // - Parent relationships
    assert_eq!(internal.parent(), Some(root_index));
    assert_eq!(leaf_a.parent(), Some(root_left));
    assert_eq!(leaf_b.parent(), Some(root_left));
    assert_eq!(leaf_c.parent(), Some(root_index));
}

#[test]
fn test_basic_simple_tree() {
    let tree = parse_str("((Kea,Kaka),Kakapo);").unwrap();

    assert_eq!(tree.num_leaves(), 3);
    let labels: Vec<&str> = tree
        .leaf_indices()
        .into_iter()
        .map(|i| tree[i].label().unwrap().as_str())
        .collect();
    assert_eq!(labels, vec!["Kea", "Kaka", "Kakapo"]);
}

#[test]
fn test_internal_names() {
    let tree = parse_str("((A,B)'Ancestor Species 1',C)Root;").unwrap();

    assert_eq!(tree.root().name(), Some("Root"));
    let (left, _) = tree.root().children().unwrap();
    assert_eq!(tree[left].name(), Some("Ancestor Species 1"));
}

#[test]
fn test_tree_with_quoted_labels() {
    let newick = "(('Taxon one':1.5,'Second''s taxon':2.5):3.0,'3rd Taxon':4.0):0.0;";
    let mut parser = ByteParser::from_str(newick);
    let mut newick_parser = NewickParser::new_compact_defaults().with_num_leaves(3);
    let tree = newick_parser.parse_str(&mut parser).unwrap();
    let leaf_map = newick_parser.into_builder().into_label_map();

    assert_eq!(tree.num_leaves(), 3);
    assert!(leaf_map.contains_label("Taxon one"));
    assert!(leaf_map.contains_label("Second's taxon"));
    assert!(leaf_map.contains_label("3rd Taxon"));
}

#[test]
fn test_tree_with_scientific_notation() {
    let newick = "((A:1e-5,B:2.5E+3):1.0e2,C:3.14E-10):0.0;";
    let mut parser = ByteParser::from_str(newick);
    let mut newick_parser = NewickParser::new_compact_defaults().with_num_leaves(3);
    let tree = newick_parser.parse_str(&mut parser).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
}

#[test]
fn test_optional_branch_length() {
    let newick = "((A:1.0,B),C:4.0);";
    let mut parser = ByteParser::from_str(newick);
    let tree = NewickParser::new_compact_defaults().with_num_leaves(3).parse_str(&mut parser);
    assert!(tree.is_ok());
}

#[test]
fn test_newick_with_comment_1() {
    let newick_with_comment = "[A tree of] (([Shags!]A[Great Commentoran]:0.33,B[Pied Commentoran]:0.33):1.87,C:[King Commentoran]2.2):0.0;";
    let mut parser = ByteParser::from_str(newick_with_comment);
    let tree = NewickParser::new_compact_defaults().parse_str(&mut parser);

    if tree.is_err() {
        eprintln!("Error parsing tree with comments: {:?}", tree.as_ref().err());
    }

    assert!(tree.is_ok());
}

#[test]
fn test_newick_with_comment_2() {
    let newick_with_comment = "[A tree of] ([Shags!] C:[King Commentoran] 2.2, (A[Great Commentoran]:0.33, B[Pied Commentoran]:0.33):1.87):0.0[The end.];";
    let mut parser = ByteParser::from_str(newick_with_comment);
    let tree = NewickParser::new_compact_defaults().parse_str(&mut parser);

    if tree.is_err() {
        eprintln!("Error parsing tree with comments: {:?}", tree.as_ref().err());
    }

    assert!(tree.is_ok());
}

#[test]
fn test_multiple_trees_share_labels() {
    let (trees, labels) = parse_trees_str("((A,B),C);\n((C,A),B);\n(D,A);").unwrap();

    assert_eq!(trees.len(), 3);
    assert_eq!(labels.num_labels(), 4);
    let a = labels.get_index("A").unwrap();
    for tree in &trees {
        assert!(tree.leaf_indices().iter().any(|&i| tree[i].label() == Some(&a)));
    }
}

#[test]
fn test_pair() {
    let (species, gene, labels) = parse_pair_str("((A,B),C); (A,(B,C));").unwrap();
    assert_eq!(species.num_leaves(), 3);
    assert_eq!(gene.num_leaves(), 3);
    assert_eq!(labels.num_labels(), 3);
}

#[test]
fn test_pair_wrong_count() {
    let err = parse_pair_str("((A,B),C);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::WrongTreeCount { expected: 2, found: 1 });

    let err = parse_pair_str("(A,B); (A,B); (A,B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::WrongTreeCount { expected: 2, found: 3 });
}

// --- TESTS DEALING WITH CORRUPT NEWICK STRINGS ---

#[test]
fn test_missing_semicolon() {
    let err = parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_missing_comma() {
    assert!(parse_str("((A:1.0 B:2.0):3.0,C:4.0):0.5;").is_err());
}

#[test]
fn test_unmatched_parentheses() {
    assert!(parse_str("((A:1.0,B:2.0:3.0,C:4.0):0.5;").is_err());
}

#[test]
fn test_invalid_branch_length() {
    let err = parse_str("((A:1.0,B:abc):3.0,C:4.0):0.5;").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidBranchLength(_)));

    let err = parse_str("((A:1.0,B:-2.0):3.0,C:4.0);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::InvalidBranchLength("-2.0".to_string()));
}

#[test]
fn test_unary_vertex_rejected() {
    assert!(parse_str("((A),B);").is_err());
}

#[test]
fn test_multifurcation_rejected() {
    assert!(parse_str("(A,B,C);").is_err());
}

#[test]
fn test_empty_label_rejected() {
    let err = parse_str("((A,),C);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::EmptyLabel);
}

#[test]
fn test_single_leaf_rejected() {
    assert!(parse_str("A;").is_err());
}

/// Caterpillar `(((A,B),B),B)...;` with `depth` nested parentheses.
fn nested(depth: usize) -> String {
    format!("{}A{};", "(".repeat(depth), ",B)".repeat(depth))
}

#[test]
fn test_deep_nesting_within_limit() {
    let tree = parse_str(nested(1024)).unwrap();
    assert_eq!(tree.num_leaves(), 1025);
    assert!(tree.validate().is_ok());
}

#[test]
fn test_deep_nesting_rejected() {
    let err = parse_str(nested(1025)).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::NestingTooDeep(1024));

    let err = parse_str(nested(100_000)).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::NestingTooDeep(1024));
    assert_eq!(err.position(), 1024);

    let err = parse_trees_str(format!("(A,B); {}", nested(100_000))).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::NestingTooDeep(1024));
}

#[test]
fn test_custom_max_depth() {
    let mut newick_parser = NewickParser::new_simple_defaults().with_max_depth(2);
    assert!(newick_parser.parse_str(&mut ByteParser::from_str("((A,B),C);")).is_ok());

    let mut newick_parser = NewickParser::new_simple_defaults().with_max_depth(2);
    let err = newick_parser.parse_str(&mut ByteParser::from_str("(((A,B),C),D);")).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::NestingTooDeep(2));
}

#[test]
fn test_error_reports_position_and_context() {
    let err = parse_str("((A,B)#C);").unwrap_err();
    assert!(err.position() > 0);
    assert!(err.to_string().contains("position"));
}

// --- TESTS WRITING ---

#[test]
fn test_write_simple_tree() {
    let tree = parse_str("((A:1,B:2)x:3,'C d':4)root;").unwrap();
    assert_eq!(to_newick(&tree, None), "((A,B)x,'C d')root;");
}

#[test]
fn test_write_compact_tree_is_reparsable() {
    let (trees, labels) = parse_trees_str("(('Wilson''s petrel',B),(C,D));").unwrap();
    let written = compact_to_newick(&trees[0], &labels, None);
    assert_eq!(written, "(('Wilson''s petrel',B),(C,D));");

    let (reparsed, relabels) = parse_trees_str(&written).unwrap();
    assert_eq!(reparsed[0].num_vertices(), trees[0].num_vertices());
    assert!(relabels.contains_label("Wilson's petrel"));
}

// --- TESTS PARSING WHOLE FILE ---
#[test]
fn test_parsing_newick_file() {
    let path = Path::new("tests").join("fixtures").join("scenario.nwk");
    let (trees, leaf_map) = parse_file(path).unwrap();

    assert_eq!(trees.len(), 3);
    assert_eq!(leaf_map.num_labels(), 4);

    for tree in &trees {
        assert_eq!(tree.num_leaves(), 4);
        assert!(tree.is_valid());
    }
    assert_eq!(trees[0].root().name(), Some("root"));
}

#[test]
fn test_parsing_missing_file() {
    let err = parse_file(Path::new("tests").join("fixtures").join("missing.nwk")).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}
