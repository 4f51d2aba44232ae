//! A renderer that assembles a [`TreeDocument`] from parser callbacks. The
//! parser guarantees LIFO start/end pairing, so an open-node stack is all
//! the bookkeeping the builder needs.

use stream_markdown::{Align, FormatKind, Renderer};

use crate::node::{NodeId, NodeKind, TreeDocument};

pub struct TreeBuilder {
    doc: TreeDocument,
    open: Vec<NodeId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let doc = TreeDocument::new();
        let root = doc.root();
        Self {
            doc,
            open: vec![root],
        }
    }

    pub fn finish(self) -> TreeDocument {
        self.doc
    }

    fn top(&self) -> NodeId {
        *self.open.last().expect("the document root is always open")
    }

    fn toggle(&mut self, start: bool, kind: NodeKind) {
        if start {
            let id = self.doc.push(self.top(), kind);
            self.open.push(id);
        } else if self.open.len() > 1 {
            self.open.pop();
        }
    }

    fn leaf(&mut self, kind: NodeKind) {
        self.doc.push(self.top(), kind);
    }

    /// Adjacent text merges into one node, so chunk-split payloads produce
    /// the same tree as whole ones.
    fn append_text(&mut self, text: &str) {
        let top = self.top();
        if let Some(last) = self.doc.node(top).children.last().copied() {
            if let NodeKind::Text { text: existing } = &mut self.doc.node_mut(last).kind {
                existing.push_str(text);
                return;
            }
        }
        self.leaf(NodeKind::Text {
            text: text.to_string(),
        });
    }
}

impl Renderer for TreeBuilder {
    fn on_text(&mut self, text: &str) {
        self.append_text(text);
    }

    fn on_entity(&mut self, entity: &str) {
        self.append_text(entity);
    }

    fn on_code_text(&mut self, text: &str) {
        self.append_text(text);
    }

    fn on_em(&mut self, start: bool) {
        self.toggle(
            start,
            NodeKind::Format {
                kind: FormatKind::ITALIC,
            },
        );
    }

    fn on_strong(&mut self, start: bool) {
        self.toggle(
            start,
            NodeKind::Format {
                kind: FormatKind::BOLD,
            },
        );
    }

    fn on_code_span(&mut self, start: bool) {
        self.toggle(
            start,
            NodeKind::Format {
                kind: FormatKind::CODE,
            },
        );
    }

    fn on_del(&mut self, start: bool) {
        self.toggle(
            start,
            NodeKind::Format {
                kind: FormatKind::STRIKETHROUGH,
            },
        );
    }

    fn on_h(&mut self, start: bool, level: u8) {
        self.toggle(
            start,
            NodeKind::Block {
                kind: FormatKind::heading(level),
                level: level as usize,
            },
        );
    }

    fn on_p(&mut self, start: bool) {
        self.toggle(
            start,
            NodeKind::Block {
                kind: FormatKind::PARAGRAPH,
                level: 0,
            },
        );
    }

    fn on_hr(&mut self) {
        self.leaf(NodeKind::Rule);
    }

    fn on_br(&mut self) {
        self.append_text("\n");
    }

    fn on_ul(&mut self, start: bool, indent: usize) {
        self.toggle(
            start,
            NodeKind::List {
                ordered: false,
                indent,
            },
        );
    }

    fn on_ol(&mut self, start: bool, indent: usize) {
        self.toggle(
            start,
            NodeKind::List {
                ordered: true,
                indent,
            },
        );
    }

    fn on_li(&mut self, start: bool) {
        self.toggle(
            start,
            NodeKind::ListItem {
                task: false,
                checked: false,
            },
        );
    }

    fn on_task_list(&mut self, start: bool, done: bool) {
        if !start {
            return;
        }
        // The surrounding list item becomes a task item.
        let top = self.top();
        if let NodeKind::ListItem { task, checked } = &mut self.doc.node_mut(top).kind {
            *task = true;
            *checked = done;
        }
    }

    fn on_code_block(&mut self, start: bool, lang: &str) {
        self.toggle(
            start,
            NodeKind::CodeBlock {
                lang: lang.to_string(),
            },
        );
    }

    fn on_quote(&mut self, start: bool, level: usize) {
        self.toggle(
            start,
            NodeKind::Block {
                kind: FormatKind::BLOCKQUOTE,
                level,
            },
        );
    }

    fn on_table(&mut self, start: bool) {
        self.toggle(start, NodeKind::Table);
    }

    fn on_table_row(&mut self, start: bool) {
        self.toggle(start, NodeKind::TableRow);
    }

    fn on_table_hcell(&mut self, start: bool, align: Align) {
        self.toggle(
            start,
            NodeKind::TableCell {
                header: true,
                align,
            },
        );
    }

    fn on_table_cell(&mut self, start: bool, align: Align) {
        self.toggle(
            start,
            NodeKind::TableCell {
                header: false,
                align,
            },
        );
    }

    fn on_a(&mut self, start: bool, href: &str, title: &str, is_reference: bool) {
        self.toggle(
            start,
            NodeKind::Link {
                href: href.to_string(),
                title: title.to_string(),
                reference: is_reference,
            },
        );
    }

    fn on_img(&mut self, src: &str, title: &str) {
        self.leaf(NodeKind::Image {
            src: src.to_string(),
            title: title.to_string(),
        });
    }

    fn on_html(&mut self, start: bool, tag: &str, attributes: &str) {
        self.leaf(NodeKind::Html {
            tag: tag.to_string(),
            attributes: attributes.to_string(),
            closing: !start,
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse_to_tree;

    #[test]
    fn builds_a_paragraph_with_emphasis() {
        let doc = parse_to_tree("hello **world**\n");
        let root = doc.node(doc.root());
        assert_eq!(root.children.len(), 1);
        let paragraph = doc.node(root.children[0]);
        assert_eq!(
            paragraph.kind,
            NodeKind::Block {
                kind: FormatKind::PARAGRAPH,
                level: 0
            }
        );
        let kinds: Vec<_> = doc
            .children(root.children[0])
            .map(|node| node.kind.clone())
            .collect();
        assert_eq!(kinds.len(), 3);
        assert_eq!(
            kinds[0],
            NodeKind::Text {
                text: "hello ".to_string()
            }
        );
        assert_eq!(
            kinds[1],
            NodeKind::Format {
                kind: FormatKind::BOLD
            }
        );
        // The trailing newline merges into one text node.
        assert_eq!(
            kinds[2],
            NodeKind::Text {
                text: "\n".to_string()
            }
        );
        assert_eq!(doc.text_of(doc.root()), "hello world\n");
    }

    #[test]
    fn task_items_mark_their_list_item() {
        let doc = parse_to_tree("- [x] done\n- [ ] todo\n");
        let root = doc.node(doc.root());
        let list = doc.node(root.children[0]);
        assert_eq!(
            list.kind,
            NodeKind::List {
                ordered: false,
                indent: 1
            }
        );
        let items: Vec<_> = doc
            .children(root.children[0])
            .map(|node| node.kind.clone())
            .collect();
        assert_eq!(
            items,
            vec![
                NodeKind::ListItem {
                    task: true,
                    checked: true
                },
                NodeKind::ListItem {
                    task: true,
                    checked: false
                },
            ]
        );
    }

    #[test]
    fn ids_are_monotonic_and_parents_are_consistent() {
        let doc = parse_to_tree("# h\n\ntext\n");
        let mut last_id = None;
        for index in 0..doc.len() {
            let node = doc.node(index);
            if let Some(previous) = last_id {
                assert!(node.id > previous);
            }
            last_id = Some(node.id);
            for child in &node.children {
                assert_eq!(doc.node(*child).parent, Some(index));
            }
        }
    }

    #[test]
    fn serialization_skips_parents() {
        let doc = parse_to_tree("hi\n");
        let json = serde_json::to_value(&doc).unwrap();
        let first = &json["nodes"][0];
        assert!(first.get("parent").is_none());
        assert_eq!(first["kind"], "Document");
    }
}
