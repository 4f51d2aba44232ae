//! Inline dispatch: the position-specialized maps are consulted in order and
//! the first decisive answer wins. Open/close bookkeeping for emphasis and
//! the other paired formats lives on the parser's state stack.

use super::{Parser, ParserFlags, Scan, Step};
use crate::byte_lookup::byte_is_significant_inline;
use crate::kind::FormatKind;
use crate::marker::maps::{self, FORMAT_MAP};
use crate::marker::MarkerMatch;
use crate::render::Renderer;

impl<R: Renderer> Parser<R> {
    /// Classify and consume the inline content at the cursor: an escape, a
    /// format marker, or plain text. Any consumption ends the "line start"
    /// position.
    pub(super) fn scan_inline(&mut self, scan: &mut Scan) -> Step {
        let step = self.scan_inline_inner(scan);
        if step == Step::Continue {
            self.flags
                .remove(ParserFlags::AT_LINE_START | ParserFlags::ITEM_START);
        }
        step
    }

    fn scan_inline_inner(&mut self, scan: &mut Scan) -> Step {
        let b = scan.byte();

        // Literal mode: nothing matches except the closing backtick, and
        // escapes do not apply.
        if self.flags.contains(ParserFlags::IN_LITERAL) {
            if b == b'`' {
                self.flush_text(scan);
                self.got_format(FormatKind::LITERAL);
                scan.consume(1);
            } else {
                scan.push_char();
            }
            return Step::Continue;
        }

        if b == b'\\' {
            return self.scan_escape(scan);
        }

        let at_start = self.flags.contains(ParserFlags::AT_LINE_START);

        // Emphasis openers: at line start directly, elsewhere gated by the
        // whitespace byte in front of the run.
        let opener = if at_start {
            maps::eat_start(scan.buf, scan.pos, scan.is_final)
        } else {
            maps::eat_left(scan.buf, scan.pos, scan.is_final)
        };
        match opener {
            MarkerMatch::Suspend => return Step::Suspend,
            MarkerMatch::Match { kind, bytes, .. } => {
                let mut marker_bytes = bytes;
                if !at_start {
                    // The gating whitespace byte belongs to the text.
                    scan.push_char();
                    marker_bytes -= 1;
                }
                self.flush_text(scan);
                self.got_format(kind);
                scan.consume(marker_bytes);
                return Step::Continue;
            }
            MarkerMatch::None => {}
        }

        // Position-independent format markers.
        match FORMAT_MAP.eat(scan.buf, scan.pos, scan.is_final) {
            MarkerMatch::Suspend => return Step::Suspend,
            MarkerMatch::Match { kind, bytes, .. } => match kind {
                FormatKind::LITERAL | FormatKind::CODE | FormatKind::STRIKETHROUGH => {
                    self.flush_text(scan);
                    self.got_format(kind);
                    scan.consume(bytes);
                    return Step::Continue;
                }
                FormatKind::LINK if !self.flags.contains(ParserFlags::IN_LINK) => {
                    return self.scan_link(scan, false);
                }
                FormatKind::IMAGE if !self.flags.contains(ParserFlags::IN_LINK) => {
                    return self.scan_link(scan, true);
                }
                FormatKind::TASK_LIST | FormatKind::TASK_LIST_DONE => {
                    if self.at_item_start() {
                        self.flush_text(scan);
                        self.renderer
                            .on_task_list(true, kind == FormatKind::TASK_LIST_DONE);
                        scan.consume(bytes);
                        return Step::Continue;
                    }
                    if !self.flags.contains(ParserFlags::IN_LINK) {
                        // `[x](…)` outside an item start is a link candidate.
                        return self.scan_link(scan, false);
                    }
                }
                FormatKind::HTML if self.options.raw_html => {
                    return self.scan_html(scan);
                }
                _ => {}
            },
            MarkerMatch::None => {}
        }

        // Emphasis closers need something on the stack to close.
        if !self.stack.is_empty() && !at_start {
            match maps::eat_closer(scan.buf, scan.pos, scan.is_final) {
                MarkerMatch::Suspend => return Step::Suspend,
                MarkerMatch::Match { kind, bytes, .. } => {
                    self.flush_text(scan);
                    self.got_format(kind);
                    scan.consume(bytes);
                    return Step::Continue;
                }
                MarkerMatch::None => {}
            }
        }

        // Plain text: take the whole run of insignificant bytes at once.
        let rest = scan.rest();
        let end = rest
            .bytes()
            .position(byte_is_significant_inline)
            .unwrap_or(rest.len());
        if end == 0 {
            scan.push_char();
        } else {
            scan.push_str(&rest[..end]);
        }
        Step::Continue
    }

    /// A backslash takes the next character literally. A trailing backslash
    /// at the true end of input stands for itself.
    fn scan_escape(&mut self, scan: &mut Scan) -> Step {
        match scan.buf[scan.pos + 1..].chars().next() {
            Some(ch) => {
                scan.text.push(ch);
                scan.pos += 1 + ch.len_utf8();
                Step::Continue
            }
            None if scan.is_final => {
                scan.push_char();
                Step::Continue
            }
            None => Step::Suspend,
        }
    }

    fn at_item_start(&self) -> bool {
        matches!(self.current_block, super::Block::List { .. })
            && self.flags.contains(ParserFlags::ITEM_START)
            && self.stack.is_empty()
    }

    /// Open-or-close bookkeeping for a paired inline format: a kind matching
    /// the top of the stack closes it, anything else opens.
    pub(super) fn got_format(&mut self, kind: FormatKind) {
        let closing = self.stack.last() == Some(&kind);
        if closing {
            self.stack.pop();
        } else {
            self.stack.push(kind);
        }
        self.emit_format(kind, !closing);
        if kind == FormatKind::LITERAL {
            self.flags.set(ParserFlags::IN_LITERAL, !closing);
        }
    }

    pub(super) fn emit_format(&mut self, kind: FormatKind, start: bool) {
        match kind {
            FormatKind::ITALIC => self.renderer.on_em(start),
            FormatKind::BOLD => self.renderer.on_strong(start),
            FormatKind::BOLD_ITALIC => {
                // Strong wraps em; closed in reverse.
                if start {
                    self.renderer.on_strong(true);
                    self.renderer.on_em(true);
                } else {
                    self.renderer.on_em(false);
                    self.renderer.on_strong(false);
                }
            }
            FormatKind::CODE | FormatKind::LITERAL => self.renderer.on_code_span(start),
            FormatKind::STRIKETHROUGH => self.renderer.on_del(start),
            _ => unreachable!("{kind:?} does not participate in the inline stack"),
        }
    }

    /// Inline-only re-parse for link text and table cells: emphasis and code
    /// work, nested links do not. The fragment runs on its own stack so it
    /// cannot close formats opened outside of it, and anything it leaves
    /// open closes at the fragment end.
    pub(super) fn parse_inline_fragment(&mut self, fragment: &str) {
        let saved_flags = self.flags;
        let saved_stack = std::mem::take(&mut self.stack);
        self.flags.insert(ParserFlags::IN_LINK | ParserFlags::AT_LINE_START);
        self.flags.remove(
            ParserFlags::ITEM_START | ParserFlags::IN_LITERAL | ParserFlags::BLOCK_DECIDED,
        );
        let mut scan = Scan::new(fragment, true);
        while scan.pos < fragment.len() {
            if scan.byte() == b'\n' {
                // Fragments are single-line by construction.
                scan.push_char();
                continue;
            }
            match self.scan_inline(&mut scan) {
                Step::Continue => {}
                Step::Suspend => {
                    debug_assert!(false, "a final fragment cannot suspend");
                    break;
                }
            }
        }
        self.flush_text(&mut scan);
        while let Some(kind) = self.stack.pop() {
            self.emit_format(kind, false);
        }
        self.stack = saved_stack;
        self.flags = saved_flags;
    }
}
