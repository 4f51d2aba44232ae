//! The callback surface the parser emits against. Renderers choose the
//! semantics; the parser only guarantees that start/end pairs are well
//! nested (LIFO) and that text callbacks only arrive inside an open block.

use serde::Serialize;

/// Table cell alignment, decoded from colon placement in the separator line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Align {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// The operations a parser drives. Every method has a no-op default so a
/// renderer only implements the callbacks it cares about.
///
/// A handful of operations are part of the shared surface but are never
/// emitted by the Markdown parser itself (`on_entity`, `on_br`, `on_u`,
/// `on_other`, and the fence-aware `on_code`): they exist for other
/// producers that drive the same renderers, such as an HTML-to-Markdown
/// converter.
#[allow(unused_variables)]
pub trait Renderer {
    fn on_text(&mut self, text: &str) {}
    fn on_entity(&mut self, entity: &str) {}

    fn on_em(&mut self, start: bool) {}
    fn on_strong(&mut self, start: bool) {}
    fn on_code_span(&mut self, start: bool) {}
    fn on_del(&mut self, start: bool) {}
    fn on_u(&mut self, start: bool) {}

    fn on_h(&mut self, start: bool, level: u8) {}
    fn on_p(&mut self, start: bool) {}
    fn on_hr(&mut self) {}
    fn on_br(&mut self) {}
    fn on_softbr(&mut self) {}

    fn on_ul(&mut self, start: bool, indent: usize) {}
    fn on_ol(&mut self, start: bool, indent: usize) {}
    fn on_li(&mut self, start: bool) {}
    fn on_task_list(&mut self, start: bool, checked: bool) {}

    fn on_code_block(&mut self, start: bool, lang: &str) {}
    fn on_code_text(&mut self, text: &str) {}
    fn on_code(&mut self, start: bool, lang: &str, fence_char: char) {}

    fn on_quote(&mut self, start: bool, level: usize) {}

    fn on_table(&mut self, start: bool) {}
    fn on_table_row(&mut self, start: bool) {}
    fn on_table_hcell(&mut self, start: bool, align: Align) {}
    fn on_table_cell(&mut self, start: bool, align: Align) {}

    fn on_a(&mut self, start: bool, href: &str, title: &str, is_reference: bool) {}
    fn on_img(&mut self, src: &str, title: &str) {}

    fn on_html(&mut self, start: bool, tag: &str, attributes: &str) {}
    fn on_other(&mut self, start: bool, tag: &str) {}
}
