//! Recursive-descent parser for Newick strings.

use crate::model::tree_builder::TreeBuilder;
use crate::model::{CompactTreeBuilder, SimpleTreeBuilder, VertexIndex};
use crate::newick::defs::{DEFAULT_MAX_DEPTH, DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for single/multiple Newick format binary trees.
///
/// Generic over [TreeBuilder] (construction), so the same parser yields
/// [SimpleTree](crate::model::SimpleTree)s or [CompactTree](crate::model::CompactTree)s.
///
/// # Construction
/// * [`new(tree_builder)`](Self::new) - generic constructor
/// * [`new_compact_defaults()`](Self::new_compact_defaults) - shared [LeafLabelMap](crate::model::LeafLabelMap)
/// * [`new_simple_defaults()`](Self::new_simple_defaults) - labels owned by leaves
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees until end of input
///
/// # Example
/// ```
/// use dtlrec::newick::NewickParser;
/// use dtlrec::parser::ByteParser;
///
/// let input = "((A,B)AB,C)root; ((A,C),B);";
/// let byte_parser = ByteParser::from_str(input);
/// let mut newick_parser = NewickParser::new_compact_defaults();
///
/// let trees = newick_parser.parse_all(byte_parser).unwrap();
/// let labels = newick_parser.into_builder().into_label_map();
/// assert_eq!(trees.len(), 2);
/// assert_eq!(labels.num_labels(), 3);
/// ```
pub struct NewickParser<T: TreeBuilder> {
    know_num_leaves: bool,
    num_leaves: usize,
    max_depth: usize,
    tree_builder: T,
}

// ============================================================================
// Construction & Configuration, Deconstruction (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Creates a new [NewickParser] with the given tree builder.
    pub fn new(tree_builder: T) -> Self {
        Self {
            know_num_leaves: false,
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
            max_depth: DEFAULT_MAX_DEPTH,
            tree_builder,
        }
    }

    /// Sets the expected number of leaves in each parsed tree.
    ///
    /// Only an allocation hint; if not set, it is inferred from the first parsed tree.
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self.know_num_leaves = true;
        self
    }

    /// Sets how deeply parentheses may nest (default 1024).
    ///
    /// Deeper input fails with [NestingTooDeep](crate::parser::ParsingErrorType::NestingTooDeep)
    /// instead of exhausting the stack.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Consumes the parser and returns the tree builder, e.g. to obtain
    /// the shared label map of a [CompactTreeBuilder].
    pub fn into_builder(self) -> T {
        self.tree_builder
    }
}

impl NewickParser<CompactTreeBuilder> {
    /// Creates a new [NewickParser] for [CompactTree](crate::model::CompactTree)s
    /// sharing one label map.
    pub fn new_compact_defaults() -> Self {
        Self::new(CompactTreeBuilder::new())
    }
}

impl NewickParser<SimpleTreeBuilder> {
    /// Creates a new [NewickParser] for [SimpleTree](crate::model::SimpleTree)s.
    pub fn new_simple_defaults() -> Self {
        Self::new(SimpleTreeBuilder::new())
    }
}

// ============================================================================
// Parsing (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses a single Newick tree, terminated by `;`, from the given [ByteParser].
    ///
    /// # Returns
    /// * `Ok(T::Tree)` - The parsed tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str(&mut self, parser: &mut ByteParser) -> Result<T::Tree, ParsingError> {
        self.tree_builder.init_next(self.num_leaves);

        // Count leaves of this tree, unless given
        if !self.know_num_leaves {
            self.num_leaves = 0;
        }

        self.parse_root(parser)?;
        self.know_num_leaves = true;

        self.tree_builder
            .finish_tree()
            .ok_or_else(|| ParsingError::invalid_newick_string(parser, "Builder produced no tree".to_string()))
    }

    /// Parses all semicolon-terminated Newick trees until the end of input.
    pub fn parse_all(&mut self, mut parser: ByteParser) -> Result<Vec<T::Tree>, ParsingError> {
        let mut trees = Vec::new();
        parser.skip_comment_and_whitespace()?;
        while !parser.is_eof() {
            trees.push(self.parse_str(&mut parser)?);
            parser.skip_comment_and_whitespace()?;
        }
        Ok(trees)
    }
}

// ============================================================================
// Parsing Helpers (private)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses root of tree and adds it to tree:
    /// - `(left, right)[name][:branch_length];`
    fn parse_root(&mut self, parser: &mut ByteParser) -> Result<VertexIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;

        let children = self.parse_children(parser, 1)?;
        let name = self.parse_vertex_name(parser)?;
        // Root may have a branch length, which carries no information here
        self.parse_branch_length(parser)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(match parser.peek() {
                None => ParsingError::unexpected_eof(parser),
                Some(b) => ParsingError::invalid_newick_string(
                    parser,
                    format!("Expected ';' at end of tree but found {:?}", b as char),
                ),
            });
        }

        Ok(self.tree_builder.add_root(children, name))
    }

    /// Parses a vertex (either internal vertex or leaf) and returns its index.
    ///
    /// `depth` counts the parentheses enclosing this vertex.
    fn parse_vertex(&mut self, parser: &mut ByteParser, depth: usize) -> Result<VertexIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek() == Some(b'(') {
            let children = self.parse_children(parser, depth + 1)?;
            let name = self.parse_vertex_name(parser)?;
            self.parse_branch_length(parser)?;
            Ok(self.tree_builder.add_internal(children, name))
        } else {
            self.parse_leaf(parser)
        }
    }

    /// Parses children pair `(left, right)` and returns their indices.
    ///
    /// Exactly two children are accepted, so `(A)` and `(A,B,C)` are rejected.
    /// `depth` is the nesting level of the opening parenthesis.
    fn parse_children(
        &mut self,
        parser: &mut ByteParser,
        depth: usize,
    ) -> Result<(VertexIndex, VertexIndex), ParsingError> {
        if depth > self.max_depth {
            return Err(ParsingError::nesting_too_deep(parser, self.max_depth));
        }
        self.expect_byte(parser, b'(', "before children")?;
        let left = self.parse_vertex(parser, depth)?;

        parser.skip_comment_and_whitespace()?;
        self.expect_byte(parser, b',', "between children (vertices must be binary)")?;
        let right = self.parse_vertex(parser, depth)?;

        parser.skip_comment_and_whitespace()?;
        self.expect_byte(parser, b')', "after two children (vertices must be binary)")?;

        Ok((left, right))
    }

    /// Parses leaf `label[:branch_length]` and adds it to the tree.
    fn parse_leaf(&mut self, parser: &mut ByteParser) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            return Err(match parser.peek() {
                None => ParsingError::unexpected_eof(parser),
                Some(_) => ParsingError::empty_label(parser),
            });
        }
        self.parse_branch_length(parser)?;

        if !self.know_num_leaves {
            self.num_leaves += 1;
        }
        Ok(self.tree_builder.add_leaf(&label))
    }

    /// Parses the optional name following the closing `)` of an internal vertex.
    fn parse_vertex_name(&mut self, parser: &mut ByteParser) -> Result<Option<String>, ParsingError> {
        let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        Ok((!name.is_empty()).then_some(name))
    }

    /// Parses optional branch length `[:number]`; the value is checked but not kept.
    ///
    /// Supports scientific notation (e.g., `1.5e-10`).
    fn parse_branch_length(&mut self, parser: &mut ByteParser) -> Result<Option<f64>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let raw = parser.consume_while(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
        match raw.parse::<f64>() {
            Ok(value) if value >= 0.0 && value.is_finite() => Ok(Some(value)),
            _ => Err(ParsingError::invalid_branch_length(parser, raw)),
        }
    }

    fn expect_byte(&self, parser: &mut ByteParser, ch: u8, what: &str) -> Result<(), ParsingError> {
        if parser.consume_if(ch) {
            return Ok(());
        }
        Err(match parser.peek() {
            None => ParsingError::unexpected_eof(parser),
            Some(found) => ParsingError::invalid_newick_string(
                parser,
                format!("Expected '{}' {} but found {:?}", ch as char, what, found as char),
            ),
        })
    }
}
