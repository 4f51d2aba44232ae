//! A streaming, chunk-fed Markdown parser. Text arrives in arbitrary chunks
//! (token-by-token output from a language model is the motivating case) and
//! rendering callbacks are emitted incrementally: the parser never needs the
//! whole document, and any prefix whose meaning is still ambiguous is
//! retained and resolved once more input arrives.

pub use kind::FormatKind;
pub use parser::{Parser, ParserOptions};
pub use render::{Align, Renderer};
pub use renderer::html::HtmlRenderer;
pub use renderer::plain_text::PlainTextRenderer;
pub use renderer::trace::{RenderEvent, TraceRenderer};

mod byte_lookup;
mod kind;
mod marker;
mod parser;
mod render;
pub mod renderer;

/// Parse a complete document in one pass and return the renderer with its
/// accumulated output.
pub fn parse_markdown<R: Renderer>(content: &str, renderer: R) -> R {
    let mut parser = Parser::new(renderer);
    parser.add(content);
    parser.flush();
    parser.into_renderer()
}

/// Render a complete document to HTML.
pub fn markdown_to_html(content: &str) -> String {
    parse_markdown(content, HtmlRenderer::new()).into_html()
}

/// Render a complete document to plain text, markup stripped.
pub fn markdown_to_plain_text(content: &str) -> String {
    parse_markdown(content, PlainTextRenderer::new()).into_text()
}
