//! The chunk-fed parser core: feeds bytes through the marker maps, maintains
//! the block and inline state machines, and invokes the renderer callbacks.
//! Any byte range that cannot be classified yet is retained as the leftover
//! chunk and re-scanned when more input arrives.

use bitflags::bitflags;
use memchr::memchr;

use crate::byte_lookup::char_length_from_byte;
use crate::kind::FormatKind;
use crate::marker::block::{
    is_table_boundary_row, peek_block, peek_fence_end, split_table_row, BlockMatch, FenceEnd,
};
use crate::render::{Align, Renderer};

mod html;
mod inline;
mod link;

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "debug-tracing")]
        eprintln!($($arg)*);
    }};
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct ParserFlags: u8 {
        /// Set after every newline and cleared once the first inline byte of
        /// the line is consumed. Block markers do not clear it.
        const AT_LINE_START = 1 << 0;
        /// Set once the current line's block decision has been made.
        const BLOCK_DECIDED = 1 << 1;
        /// Inside a single-backtick code span; only the closing backtick is
        /// recognized.
        const IN_LITERAL = 1 << 2;
        /// At the start of a list item body, where a task box may appear.
        const ITEM_START = 1 << 3;
        /// Re-parsing link text: nested links are disabled.
        const IN_LINK = 1 << 4;
    }
}

/// Configuration for a [`Parser`]. Every construct defaults to enabled;
/// disabled constructs fall back to literal text.
#[derive(Clone, Copy, Debug)]
pub struct ParserOptions {
    tables: bool,
    raw_html: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            tables: true,
            raw_html: true,
        }
    }
}

impl ParserOptions {
    pub fn with_tables(mut self, tables: bool) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_raw_html(mut self, raw_html: bool) -> Self {
        self.raw_html = raw_html;
        self
    }
}

/// The block currently open, together with its per-kind payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum Block {
    #[default]
    None,
    Paragraph,
    Heading(u8),
    Quote(usize),
    List {
        kind: FormatKind,
        indent: usize,
    },
    FencedCode {
        kind: FormatKind,
        lang: String,
    },
    Table,
}

impl Block {
    fn kind(&self) -> FormatKind {
        match self {
            Block::None => FormatKind::NONE,
            Block::Paragraph => FormatKind::PARAGRAPH,
            Block::Heading(level) => FormatKind::heading(*level),
            Block::Quote(_) => FormatKind::BLOCKQUOTE,
            Block::List { kind, .. } => *kind,
            Block::FencedCode { kind, .. } => *kind,
            Block::Table => FormatKind::TABLE,
        }
    }
}

#[derive(Debug)]
struct TableState {
    aligns: Vec<Align>,
    rows_done: usize,
}

/// Control flow for one scanning step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Step {
    Continue,
    /// Classification needs bytes that have not arrived yet; the run must
    /// stop and stash the unconsumed suffix.
    Suspend,
}

enum TableStep {
    Consumed,
    Suspend,
    /// The line did not extend the table; it has been closed and the line
    /// must be reprocessed as ordinary input.
    Closed,
}

/// A cursor over the working buffer of one `add` call: the leftover from the
/// previous call followed by the new chunk. Everything in
/// `buf[text_start..pos]` has been classified as plain text but not yet
/// emitted; on suspension that whole suffix goes back to the leftover.
pub(super) struct Scan<'a> {
    buf: &'a str,
    pos: usize,
    text_start: usize,
    text: String,
    is_final: bool,
}

impl<'a> Scan<'a> {
    fn new(buf: &'a str, is_final: bool) -> Self {
        Self {
            buf,
            pos: 0,
            text_start: 0,
            text: String::new(),
            is_final,
        }
    }

    fn rest(&self) -> &'a str {
        &self.buf[self.pos..]
    }

    fn byte(&self) -> u8 {
        self.buf.as_bytes()[self.pos]
    }

    /// Consume one character as pending plain text, multi-byte sequences
    /// whole.
    fn push_char(&mut self) {
        let end = self.pos + char_length_from_byte(self.byte());
        self.text.push_str(&self.buf[self.pos..end]);
        self.pos = end;
    }

    /// Consume a run of bytes as pending plain text. The caller guarantees
    /// the run ends on a character boundary.
    fn push_str(&mut self, run: &str) {
        self.text.push_str(run);
        self.pos += run.len();
    }

    /// Consume marker bytes. Pending text must have been flushed first so
    /// that the not-yet-emitted suffix stays contiguous.
    fn consume(&mut self, bytes: usize) {
        debug_assert!(self.text.is_empty(), "consuming a marker with pending text");
        self.pos += bytes;
        self.text_start = self.pos;
    }
}

/// A streaming Markdown parser. Chunks arrive through [`Parser::add`] with
/// arbitrary boundaries; [`Parser::flush`] signals the end of input. The
/// parser owns its renderer and calls it synchronously; one parser serves
/// one document.
pub struct Parser<R: Renderer> {
    renderer: R,
    options: ParserOptions,
    /// Bytes retained from the previous call because their classification
    /// depends on input that has not arrived yet.
    leftover: String,
    /// Open inline kinds, pushed on open and popped on close.
    stack: Vec<FormatKind>,
    current_block: Block,
    /// The block kind in effect at the previous line's end; gates the
    /// continuation indent. Blank lines reset it.
    last_line_block: FormatKind,
    /// The exact byte run that opened the active fenced code block,
    /// indentation included. The closing fence must reproduce it.
    fence_open: String,
    table: Option<TableState>,
    flags: ParserFlags,
}

impl<R: Renderer> Parser<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_options(renderer, ParserOptions::default())
    }

    pub fn with_options(renderer: R, options: ParserOptions) -> Self {
        Self {
            renderer,
            options,
            leftover: String::new(),
            stack: Vec::new(),
            current_block: Block::None,
            last_line_block: FormatKind::NONE,
            fence_open: String::new(),
            table: None,
            flags: ParserFlags::AT_LINE_START,
        }
    }

    /// Feed the next chunk of the document. Chunk boundaries are arbitrary;
    /// the renderer sees the same call sequence no matter how the input is
    /// split.
    pub fn add(&mut self, chunk: &str) {
        self.feed(chunk, false);
    }

    /// Signal the end of input: drains any retained bytes, then closes every
    /// open inline state and the current block in reverse order of opening.
    pub fn flush(&mut self) {
        self.feed("", true);
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn feed(&mut self, chunk: &str, is_final: bool) {
        if self.leftover.is_empty() {
            self.run(chunk, is_final);
        } else {
            let mut buf = std::mem::take(&mut self.leftover);
            buf.push_str(chunk);
            self.run(&buf, is_final);
        }
    }

    fn run(&mut self, buf: &str, is_final: bool) {
        let mut scan = Scan::new(buf, is_final);
        while scan.pos < buf.len() {
            if matches!(self.current_block, Block::FencedCode { .. }) {
                match self.scan_fenced(&mut scan) {
                    Step::Continue => continue,
                    Step::Suspend => return self.suspend(&scan),
                }
            }
            if matches!(self.current_block, Block::Table)
                && self.flags.contains(ParserFlags::AT_LINE_START)
            {
                match self.scan_table_row(&mut scan) {
                    TableStep::Consumed => continue,
                    TableStep::Suspend => return self.suspend(&scan),
                    TableStep::Closed => {}
                }
            }
            if scan.byte() == b'\n' {
                self.handle_newline(&mut scan);
                continue;
            }
            if self.flags.contains(ParserFlags::AT_LINE_START)
                && !self.flags.contains(ParserFlags::BLOCK_DECIDED)
            {
                match self.decide_block(&mut scan) {
                    Step::Continue => continue,
                    Step::Suspend => return self.suspend(&scan),
                }
            }
            match self.scan_inline(&mut scan) {
                Step::Continue => {}
                Step::Suspend => return self.suspend(&scan),
            }
        }
        if is_final {
            self.finish(&mut scan);
        } else {
            self.leftover = buf[scan.text_start..].to_string();
        }
    }

    /// Stash the not-yet-classified suffix, pending text included, to be
    /// re-scanned when the next chunk arrives. Pending text never produced a
    /// renderer call or a state change, so re-scanning it is exact.
    fn suspend(&mut self, scan: &Scan) {
        trace!("suspend: retaining {} bytes", scan.buf.len() - scan.text_start);
        self.leftover = scan.buf[scan.text_start..].to_string();
    }

    fn finish(&mut self, scan: &mut Scan) {
        self.flush_text(scan);
        self.close_block();
        self.last_line_block = FormatKind::NONE;
        self.flags = ParserFlags::AT_LINE_START;
    }

    /// Emit pending plain text, if any.
    pub(super) fn flush_text(&mut self, scan: &mut Scan) {
        if !scan.text.is_empty() {
            self.renderer.on_text(&scan.text);
            scan.text.clear();
        }
        scan.text_start = scan.pos;
    }

    fn handle_newline(&mut self, scan: &mut Scan) {
        let at_start = self.flags.contains(ParserFlags::AT_LINE_START);
        if at_start && !self.flags.contains(ParserFlags::BLOCK_DECIDED) {
            // A blank line closes whatever is open and drops the
            // continuation gate.
            self.close_block();
            self.last_line_block = FormatKind::NONE;
            self.renderer.on_softbr();
            scan.consume(1);
            return;
        }
        self.flush_text(scan);
        // Inline states are line-scoped; anything left open closes here.
        self.close_inline();
        self.renderer.on_text("\n");
        scan.consume(1);
        self.last_line_block = self.current_block.kind();
        // Single-line blocks end with their line. Paragraphs, quotes, lists,
        // and tables stay open until the next line's block decision (or the
        // final flush) settles their fate.
        if matches!(self.current_block, Block::Heading(_)) {
            self.close_block();
        }
        self.flags.insert(ParserFlags::AT_LINE_START);
        self.flags
            .remove(ParserFlags::BLOCK_DECIDED | ParserFlags::ITEM_START);
    }

    fn decide_block(&mut self, scan: &mut Scan) -> Step {
        debug_assert!(scan.text.is_empty());
        // With tables off, a pipe line must not buffer a validation window
        // it can never use.
        let result = if !self.options.tables && scan.byte() == b'|' {
            BlockMatch::None
        } else {
            peek_block(scan.buf, scan.pos, scan.is_final, self.last_line_block)
        };
        match result {
            // The decided flag must stay clear on suspension so the line is
            // re-decided once more input arrives.
            BlockMatch::Suspend => Step::Suspend,
            BlockMatch::None => {
                self.flags.insert(ParserFlags::BLOCK_DECIDED);
                match self.current_block {
                    // A plain line lazily continues an open paragraph.
                    Block::Paragraph => {}
                    Block::None => self.open_block(Block::Paragraph),
                    _ => {
                        self.close_block();
                        self.open_block(Block::Paragraph);
                    }
                }
                Step::Continue
            }
            BlockMatch::Rule { bytes } => {
                // The rule consumes its whole line, newline included, so the
                // next iteration starts a fresh line.
                self.close_block();
                self.renderer.on_hr();
                scan.consume(bytes);
                self.last_line_block = FormatKind::HORIZONTAL_RULE;
                Step::Continue
            }
            BlockMatch::Fence {
                kind,
                bytes,
                open,
                lang,
            } => {
                self.close_block();
                self.fence_open = open;
                self.open_block(Block::FencedCode { kind, lang });
                scan.consume(bytes);
                Step::Continue
            }
            BlockMatch::Table { aligns } => {
                self.close_block();
                self.table = Some(TableState {
                    aligns,
                    rows_done: 0,
                });
                self.open_block(Block::Table);
                Step::Continue
            }
            BlockMatch::Block {
                kind,
                bytes,
                indent,
            } => {
                self.flags.insert(ParserFlags::BLOCK_DECIDED);
                self.transition_block(scan, kind, bytes, indent);
                Step::Continue
            }
        }
    }

    fn transition_block(&mut self, scan: &mut Scan, kind: FormatKind, bytes: usize, indent: usize) {
        match kind {
            k if k.is_heading() => {
                self.close_block();
                self.open_block(Block::Heading(k.heading_level().unwrap_or(1)));
            }
            FormatKind::BLOCKQUOTE => {
                // The same quote level continues the open quote.
                if self.current_block != Block::Quote(indent) {
                    self.close_block();
                    self.open_block(Block::Quote(indent));
                }
            }
            FormatKind::UNORDERED_LIST | FormatKind::ORDERED_LIST => {
                if self.current_block == (Block::List { kind, indent }) {
                    // A sibling item of the same list.
                    self.renderer.on_li(false);
                    self.renderer.on_li(true);
                    self.flags.insert(ParserFlags::ITEM_START);
                } else {
                    self.close_block();
                    self.open_block(Block::List { kind, indent });
                }
            }
            FormatKind::CONTINUE_LIST => {
                // The indent was consumed; the line continues the open item.
                debug_assert!(matches!(self.current_block, Block::List { .. }));
            }
            _ => unreachable!("peek_block returned a non-block kind: {kind:?}"),
        }
        scan.consume(bytes);
    }

    fn open_block(&mut self, block: Block) {
        debug_assert!(matches!(self.current_block, Block::None));
        match &block {
            Block::None => {}
            Block::Paragraph => self.renderer.on_p(true),
            Block::Heading(level) => self.renderer.on_h(true, *level),
            Block::Quote(level) => self.renderer.on_quote(true, *level),
            Block::List { kind, indent } => {
                if *kind == FormatKind::ORDERED_LIST {
                    self.renderer.on_ol(true, *indent);
                } else {
                    self.renderer.on_ul(true, *indent);
                }
                self.renderer.on_li(true);
                self.flags.insert(ParserFlags::ITEM_START);
            }
            Block::FencedCode { lang, .. } => self.renderer.on_code_block(true, lang),
            Block::Table => self.renderer.on_table(true),
        }
        self.current_block = block;
    }

    /// Close the current block, implicitly closing any open inline states
    /// first, and record its kind for the continuation gate.
    fn close_block(&mut self) {
        self.close_inline();
        let block = std::mem::take(&mut self.current_block);
        self.last_line_block = block.kind();
        match block {
            Block::None => {}
            Block::Paragraph => self.renderer.on_p(false),
            Block::Heading(level) => self.renderer.on_h(false, level),
            Block::Quote(level) => self.renderer.on_quote(false, level),
            Block::List { kind, indent } => {
                self.renderer.on_li(false);
                if kind == FormatKind::ORDERED_LIST {
                    self.renderer.on_ol(false, indent);
                } else {
                    self.renderer.on_ul(false, indent);
                }
            }
            Block::FencedCode { lang, .. } => {
                self.fence_open.clear();
                self.renderer.on_code_block(false, &lang);
            }
            Block::Table => {
                self.table = None;
                self.renderer.on_table(false);
            }
        }
    }

    /// Pop and close every open inline state, in reverse order of opening.
    pub(super) fn close_inline(&mut self) {
        while let Some(kind) = self.stack.pop() {
            self.emit_format(kind, false);
        }
        self.flags.remove(ParserFlags::IN_LITERAL);
    }

    /// One step inside a fenced code block. At line start the line is tested
    /// against the opening run; everything else streams out as code text.
    fn scan_fenced(&mut self, scan: &mut Scan) -> Step {
        if self.flags.contains(ParserFlags::AT_LINE_START) {
            match peek_fence_end(scan.buf, scan.pos, scan.is_final, &self.fence_open) {
                FenceEnd::Suspend => return Step::Suspend,
                FenceEnd::Close { bytes } => {
                    self.close_block();
                    scan.consume(bytes);
                    self.flags.remove(ParserFlags::BLOCK_DECIDED);
                    return Step::Continue;
                }
                FenceEnd::NotClose => {}
            }
        }
        let rest = scan.rest();
        match memchr(b'\n', rest.as_bytes()) {
            Some(i) => {
                if i > 0 {
                    self.renderer.on_code_text(&rest[..i]);
                }
                self.renderer.on_code_text("\n");
                scan.consume(i + 1);
                self.last_line_block = self.current_block.kind();
                self.flags.insert(ParserFlags::AT_LINE_START);
                self.flags.remove(ParserFlags::BLOCK_DECIDED);
            }
            None => {
                // Code text streams eagerly; it never waits for a newline.
                self.renderer.on_code_text(rest);
                scan.consume(rest.len());
                self.flags.remove(ParserFlags::AT_LINE_START);
            }
        }
        Step::Continue
    }

    /// Consume one table line: the header row, the separator, a body row, or
    /// a line that ends the table.
    fn scan_table_row(&mut self, scan: &mut Scan) -> TableStep {
        let rest = scan.rest();
        let (line, consumed) = match memchr(b'\n', rest.as_bytes()) {
            Some(i) => (&rest[..i], i + 1),
            None if scan.is_final => (rest, rest.len()),
            None => return TableStep::Suspend,
        };
        let (row, aligns) = {
            let state = self.table.as_mut().expect("table mode without state");
            let row = state.rows_done;
            state.rows_done += 1;
            (row, state.aligns.clone())
        };
        if row == 1 {
            // The separator line was validated with the window.
            scan.consume(consumed);
            self.last_line_block = FormatKind::TABLE;
            self.flags.remove(ParserFlags::BLOCK_DECIDED);
            return TableStep::Consumed;
        }
        if !is_table_boundary_row(line) {
            self.close_block();
            self.flags.remove(ParserFlags::BLOCK_DECIDED);
            return TableStep::Closed;
        }
        let header = row == 0;
        self.renderer.on_table_row(true);
        for (index, cell) in split_table_row(line).into_iter().enumerate() {
            let align = aligns.get(index).copied().unwrap_or_default();
            if header {
                self.renderer.on_table_hcell(true, align);
                self.parse_inline_fragment(cell);
                self.renderer.on_table_hcell(false, align);
            } else {
                self.renderer.on_table_cell(true, align);
                self.parse_inline_fragment(cell);
                self.renderer.on_table_cell(false, align);
            }
        }
        self.renderer.on_table_row(false);
        scan.consume(consumed);
        self.last_line_block = FormatKind::TABLE;
        self.flags.remove(ParserFlags::BLOCK_DECIDED);
        TableStep::Consumed
    }
}
