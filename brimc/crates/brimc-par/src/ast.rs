//! AST node definitions and the node arena.
//!
//! Nodes live in a single index-addressed arena; `parent`, `first_child`,
//! `last_child`, and `next_sibling` are arena indices, so growing the arena
//! never moves a node or invalidates a link, and the arena owns every node
//! outright. Abandoned productions may leave unreachable nodes behind; the
//! tree is whatever is reachable from the root.

use brimc_lex::{TokenId, TokenList};
use brimc_util::define_idx;
use brimc_util::IndexVec;

define_idx!(NodeId);

/// The closed set of AST node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Arena root; its single child is the file-level scope.
    Root,
    /// Leaf: an identifier, number, string, or stray token.
    Literal,
    /// `name :: struct { … }`
    Struct,
    /// One field of a struct, named by the field name.
    StructField,
    /// `name :: function(…) { … }`
    Function,
    /// Parameter list of a function.
    Arguments,
    /// `name := value` / `name :: value` binding.
    Statement,
    /// Operator application; the name is the operator text.
    Expression,
    /// `callee(args…)`, named by the callee.
    Call,
    /// `if` construct; also the kind of its marker children.
    If,
    /// C-style `for` loop.
    For,
    /// Reserved for `for … in …`; not yet produced by the grammar.
    ForIn,
    /// `while` loop.
    While,
    /// `do … while` loop.
    DoWhile,
    /// `continue`.
    Continue,
    /// `break`.
    Break,
    /// Brace-delimited or file-level statement sequence.
    Scope,
}

impl NodeKind {
    /// Lowercase dashed label, used by the debug renderer.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Literal => "literal",
            NodeKind::Struct => "struct",
            NodeKind::StructField => "struct-field",
            NodeKind::Function => "function",
            NodeKind::Arguments => "arguments",
            NodeKind::Statement => "statement",
            NodeKind::Expression => "expression",
            NodeKind::Call => "call",
            NodeKind::If => "if",
            NodeKind::For => "for",
            NodeKind::ForIn => "for-in",
            NodeKind::While => "while",
            NodeKind::DoWhile => "do-while",
            NodeKind::Continue => "continue",
            NodeKind::Break => "break",
            NodeKind::Scope => "scope",
        }
    }
}

/// Where a node's name comes from.
///
/// Most names are borrowed token values (a binding name, an operator byte);
/// marker children and fused operators use static text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeName {
    /// The value of a token, resolved against the token list.
    Token(TokenId),
    /// Static marker or fused-operator text.
    Static(&'static str),
}

/// A single AST node.
///
/// All links are arena indices. `first_child`/`last_child` are either both
/// `None` or both set; siblings chain first-to-last through `next_sibling`.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    /// Enclosing node; `None` for the root and unattached nodes.
    pub parent: Option<NodeId>,
    /// First child in source order.
    pub first_child: Option<NodeId>,
    /// Last child in source order.
    pub last_child: Option<NodeId>,
    /// Following sibling under the same parent.
    pub next_sibling: Option<NodeId>,
    /// Optional name.
    pub name: Option<NodeName>,
    /// Node kind.
    pub kind: NodeKind,
}

/// Tuning knobs for the node arena.
#[derive(Clone, Copy, Debug)]
pub struct AstOptions {
    /// Initial capacity of the node vector.
    pub initial_node_capacity: usize,
}

impl Default for AstOptions {
    fn default() -> Self {
        Self {
            initial_node_capacity: 256,
        }
    }
}

/// The AST arena.
///
/// Created with a root node already in place; the parser allocates nodes
/// with [`Ast::alloc`] and wires them with [`Ast::append`]. Dropping the
/// `Ast` releases every node at once.
///
/// # Example
///
/// ```
/// use brimc_par::ast::{Ast, NodeKind};
///
/// let mut ast = Ast::new();
/// let scope = ast.alloc(NodeKind::Scope, None);
/// ast.append(ast.root(), scope);
///
/// assert_eq!(ast.kind(ast.root()), NodeKind::Root);
/// assert_eq!(ast.first_child(ast.root()), Some(scope));
/// assert_eq!(ast.parent(scope), Some(ast.root()));
/// ```
#[derive(Debug)]
pub struct Ast {
    nodes: IndexVec<NodeId, Node>,
    root: NodeId,
}

impl Ast {
    /// Create an arena holding only the root node.
    pub fn new() -> Self {
        Self::with_options(AstOptions::default())
    }

    /// Create an arena with an explicit initial capacity.
    pub fn with_options(options: AstOptions) -> Self {
        let mut nodes = IndexVec::with_capacity(options.initial_node_capacity);
        let root = nodes.push(Node {
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            name: None,
            kind: NodeKind::Root,
        });
        Self { nodes, root }
    }

    /// The root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes allocated, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Allocate a detached node.
    pub fn alloc(&mut self, kind: NodeKind, name: Option<NodeName>) -> NodeId {
        self.nodes.push(Node {
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            name,
            kind,
        })
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        match self.nodes[parent].last_child {
            None => {
                self.nodes[parent].first_child = Some(child);
                self.nodes[parent].last_child = Some(child);
            }
            Some(last) => {
                self.nodes[last].next_sibling = Some(child);
                self.nodes[parent].last_child = Some(child);
            }
        }
    }

    /// The node record for an id.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Node kind.
    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id].kind
    }

    /// Parent link.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// First child link.
    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].first_child
    }

    /// Last child link.
    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].last_child
    }

    /// Next sibling link.
    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].next_sibling
    }

    /// Resolve a node's name against the token list.
    pub fn name<'a>(&self, id: NodeId, tokens: &'a TokenList) -> Option<&'a str> {
        match self.nodes[id].name? {
            NodeName::Token(token) => Some(tokens.value(token)),
            NodeName::Static(text) => Some(text),
        }
    }

    /// Iterate over the children of a node in source order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            ast: self,
            next: self.nodes[id].first_child,
        }
    }

    /// Render the subtree under `id` as a compact one-line string.
    ///
    /// Format: `kind`, `kind(name)`, with children in `[…]` separated by
    /// commas — e.g. `scope[statement(a)[literal(55)]]`.
    pub fn debug_tree(&self, id: NodeId, tokens: &TokenList) -> String {
        let mut out = String::new();
        self.render(id, tokens, &mut out);
        out
    }

    fn render(&self, id: NodeId, tokens: &TokenList, out: &mut String) {
        out.push_str(self.kind(id).label());
        if let Some(name) = self.name(id, tokens) {
            out.push('(');
            out.push_str(name);
            out.push(')');
        }
        if self.first_child(id).is_some() {
            out.push('[');
            let mut first = true;
            let children: Vec<_> = self.children(id).collect();
            for child in children {
                if !first {
                    out.push(',');
                }
                first = false;
                self.render(child, tokens, out);
            }
            out.push(']');
        }
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children.
pub struct Children<'a> {
    ast: &'a Ast,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.ast.next_sibling(current);
        Some(current)
    }
}
