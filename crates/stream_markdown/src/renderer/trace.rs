//! A renderer that records every callback as a value. This is the plain
//! "dump" surface: useful for debugging what a parser emitted, and the
//! observation point for the test suite.

use serde::Serialize;

use crate::render::{Align, Renderer};

/// One recorded renderer callback, payloads included.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum RenderEvent {
    Text(String),
    Entity(String),
    Em(bool),
    Strong(bool),
    CodeSpan(bool),
    Del(bool),
    U(bool),
    H(bool, u8),
    P(bool),
    Hr,
    Br,
    SoftBr,
    Ul(bool, usize),
    Ol(bool, usize),
    Li(bool),
    TaskList(bool, bool),
    CodeBlock(bool, String),
    CodeText(String),
    Code(bool, String, char),
    Quote(bool, usize),
    Table(bool),
    TableRow(bool),
    TableHCell(bool, Align),
    TableCell(bool, Align),
    A {
        start: bool,
        href: String,
        title: String,
        is_reference: bool,
    },
    Img {
        src: String,
        title: String,
    },
    Html {
        start: bool,
        tag: String,
        attributes: String,
    },
    Other(bool, String),
}

#[derive(Clone, Debug, Default)]
pub struct TraceRenderer {
    events: Vec<RenderEvent>,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<RenderEvent> {
        self.events
    }
}

impl Renderer for TraceRenderer {
    fn on_text(&mut self, text: &str) {
        self.events.push(RenderEvent::Text(text.to_string()));
    }

    fn on_entity(&mut self, entity: &str) {
        self.events.push(RenderEvent::Entity(entity.to_string()));
    }

    fn on_em(&mut self, start: bool) {
        self.events.push(RenderEvent::Em(start));
    }

    fn on_strong(&mut self, start: bool) {
        self.events.push(RenderEvent::Strong(start));
    }

    fn on_code_span(&mut self, start: bool) {
        self.events.push(RenderEvent::CodeSpan(start));
    }

    fn on_del(&mut self, start: bool) {
        self.events.push(RenderEvent::Del(start));
    }

    fn on_u(&mut self, start: bool) {
        self.events.push(RenderEvent::U(start));
    }

    fn on_h(&mut self, start: bool, level: u8) {
        self.events.push(RenderEvent::H(start, level));
    }

    fn on_p(&mut self, start: bool) {
        self.events.push(RenderEvent::P(start));
    }

    fn on_hr(&mut self) {
        self.events.push(RenderEvent::Hr);
    }

    fn on_br(&mut self) {
        self.events.push(RenderEvent::Br);
    }

    fn on_softbr(&mut self) {
        self.events.push(RenderEvent::SoftBr);
    }

    fn on_ul(&mut self, start: bool, indent: usize) {
        self.events.push(RenderEvent::Ul(start, indent));
    }

    fn on_ol(&mut self, start: bool, indent: usize) {
        self.events.push(RenderEvent::Ol(start, indent));
    }

    fn on_li(&mut self, start: bool) {
        self.events.push(RenderEvent::Li(start));
    }

    fn on_task_list(&mut self, start: bool, checked: bool) {
        self.events.push(RenderEvent::TaskList(start, checked));
    }

    fn on_code_block(&mut self, start: bool, lang: &str) {
        self.events
            .push(RenderEvent::CodeBlock(start, lang.to_string()));
    }

    fn on_code_text(&mut self, text: &str) {
        self.events.push(RenderEvent::CodeText(text.to_string()));
    }

    fn on_code(&mut self, start: bool, lang: &str, fence_char: char) {
        self.events
            .push(RenderEvent::Code(start, lang.to_string(), fence_char));
    }

    fn on_quote(&mut self, start: bool, level: usize) {
        self.events.push(RenderEvent::Quote(start, level));
    }

    fn on_table(&mut self, start: bool) {
        self.events.push(RenderEvent::Table(start));
    }

    fn on_table_row(&mut self, start: bool) {
        self.events.push(RenderEvent::TableRow(start));
    }

    fn on_table_hcell(&mut self, start: bool, align: Align) {
        self.events.push(RenderEvent::TableHCell(start, align));
    }

    fn on_table_cell(&mut self, start: bool, align: Align) {
        self.events.push(RenderEvent::TableCell(start, align));
    }

    fn on_a(&mut self, start: bool, href: &str, title: &str, is_reference: bool) {
        self.events.push(RenderEvent::A {
            start,
            href: href.to_string(),
            title: title.to_string(),
            is_reference,
        });
    }

    fn on_img(&mut self, src: &str, title: &str) {
        self.events.push(RenderEvent::Img {
            src: src.to_string(),
            title: title.to_string(),
        });
    }

    fn on_html(&mut self, start: bool, tag: &str, attributes: &str) {
        self.events.push(RenderEvent::Html {
            start,
            tag: tag.to_string(),
            attributes: attributes.to_string(),
        });
    }

    fn on_other(&mut self, start: bool, tag: &str) {
        self.events.push(RenderEvent::Other(start, tag.to_string()));
    }
}
