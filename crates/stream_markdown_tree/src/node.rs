use serde::Serialize;
use stream_markdown::{Align, FormatKind};

/// Arena index of a node within its owning [`TreeDocument`].
pub type NodeId = usize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum NodeKind {
    Document,
    /// A block container: paragraph, heading, or blockquote. `level` is the
    /// heading level or quote depth, zero otherwise.
    Block { kind: FormatKind, level: usize },
    CodeBlock { lang: String },
    List { ordered: bool, indent: usize },
    ListItem { task: bool, checked: bool },
    /// An inline format container (emphasis, code span, strikethrough).
    Format { kind: FormatKind },
    Text { text: String },
    Link { href: String, title: String, reference: bool },
    Image { src: String, title: String },
    Html { tag: String, attributes: String, closing: bool },
    Table,
    TableRow,
    TableCell { header: bool, align: Align },
    Rule,
}

#[derive(Clone, Debug, Serialize)]
pub struct Node {
    /// Unique id, assigned monotonically by the owning document.
    pub id: u64,
    /// Non-owning back-reference; excluded from serialization.
    #[serde(skip)]
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
}

/// The arena that owns every node. Index 0 is always the document root.
#[derive(Clone, Debug, Serialize)]
pub struct TreeDocument {
    nodes: Vec<Node>,
    #[serde(skip)]
    next_id: u64,
}

impl Default for TreeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                id: 0,
                parent: None,
                kind: NodeKind::Document,
                children: Vec::new(),
            }],
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.nodes[id].children.iter().map(|child| &self.nodes[*child])
    }

    /// Concatenated text content below a node, in document order.
    pub fn text_of(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let NodeKind::Text { text } = &self.nodes[id].kind {
            out.push_str(text);
        }
        for child in &self.nodes[id].children {
            self.collect_text(*child, out);
        }
    }

    pub(crate) fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        let index = self.nodes.len();
        self.nodes.push(Node {
            id,
            parent: Some(parent),
            kind,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(index);
        index
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }
}
