//! A markup-stripping renderer: only the visible text survives. Useful for
//! clipboard copies and search indexing of rendered chat output.

use crate::render::Renderer;

#[derive(Debug, Default)]
pub struct PlainTextRenderer {
    out: String,
}

impl PlainTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.out
    }

    pub fn into_text(self) -> String {
        self.out
    }
}

impl Renderer for PlainTextRenderer {
    fn on_text(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn on_entity(&mut self, entity: &str) {
        self.out.push_str(entity);
    }

    fn on_code_text(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn on_softbr(&mut self) {
        self.out.push('\n');
    }

    fn on_br(&mut self) {
        self.out.push('\n');
    }
}
