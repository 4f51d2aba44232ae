//! The inline link/image consumer. After the format map recognizes a lead,
//! the matcher locates the closing bracket of the link text and then decides
//! between the inline resource form `](url "title")` and the reference forms
//! `][label]` / `][]`.

use super::{Parser, Scan, Step};
use crate::render::Renderer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LinkMatch {
    /// Not a link; the lead byte is literal text.
    None,
    Suspend,
    Match {
        /// Byte offset of the `]` closing the link text.
        text_end: usize,
        /// Total bytes of the whole construct, from the opening bracket.
        consumed: usize,
        href: String,
        title: String,
        is_reference: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ResourceMatch {
    None,
    Suspend,
    Match {
        href: String,
        title: String,
        /// Byte offset just past the closing parenthesis.
        end: usize,
    },
}

fn suspend_or_none(is_final: bool) -> ResourceMatch {
    if is_final {
        ResourceMatch::None
    } else {
        ResourceMatch::Suspend
    }
}

/// Locate the matching `]` for a link opened at `pos` (scanning from
/// `after_lead`) and consume the resource that follows. The link text may
/// contain neither a newline nor a nested `[`; both reject the construct.
pub(crate) fn eat_link(input: &str, pos: usize, after_lead: usize, is_final: bool) -> LinkMatch {
    let mut text_end = None;
    for (i, ch) in input[after_lead..].char_indices() {
        match ch {
            ']' => {
                text_end = Some(after_lead + i);
                break;
            }
            '[' | '\n' => return LinkMatch::None,
            _ => {}
        }
    }
    let Some(text_end) = text_end else {
        return if is_final {
            LinkMatch::None
        } else {
            LinkMatch::Suspend
        };
    };

    let after = text_end + 1;
    match input[after..].chars().next() {
        None => {
            if is_final {
                LinkMatch::None
            } else {
                LinkMatch::Suspend
            }
        }
        Some('(') => match eat_inline_resource(input, after + 1, is_final) {
            ResourceMatch::Suspend => LinkMatch::Suspend,
            ResourceMatch::None => LinkMatch::None,
            ResourceMatch::Match { href, title, end } => LinkMatch::Match {
                text_end,
                consumed: end - pos,
                href,
                title,
                is_reference: false,
            },
        },
        Some('[') => {
            for (i, ch) in input[after + 1..].char_indices() {
                match ch {
                    ']' => {
                        return LinkMatch::Match {
                            text_end,
                            consumed: after + 1 + i + 1 - pos,
                            href: input[after + 1..after + 1 + i].to_string(),
                            title: String::new(),
                            is_reference: true,
                        };
                    }
                    '\n' => return LinkMatch::None,
                    _ => {}
                }
            }
            if is_final {
                LinkMatch::None
            } else {
                LinkMatch::Suspend
            }
        }
        Some(_) => LinkMatch::None,
    }
}

/// The inline resource: `(\s*<URL>|\s*RAW)(\s+"T"|\s+'T'|\s+(T))?\s*\)`.
/// A newline anywhere inside rejects; running out of buffer suspends.
fn eat_inline_resource(input: &str, start: usize, is_final: bool) -> ResourceMatch {
    let bytes = input.as_bytes();
    let len = input.len();
    let mut i = start;

    while i < len && matches!(bytes[i], b' ' | b'\t') {
        i += 1;
    }
    if i >= len {
        return suspend_or_none(is_final);
    }

    let href = if bytes[i] == b'<' {
        let dest_start = i + 1;
        let mut j = dest_start;
        loop {
            if j >= len {
                return suspend_or_none(is_final);
            }
            match bytes[j] {
                b'>' => break,
                b'\n' => return ResourceMatch::None,
                _ => j += 1,
            }
        }
        i = j + 1;
        input[dest_start..j].to_string()
    } else {
        let dest_start = i;
        while i < len && !matches!(bytes[i], b' ' | b'\t' | b')' | b'\n') {
            i += 1;
        }
        if i >= len {
            return suspend_or_none(is_final);
        }
        if bytes[i] == b'\n' {
            return ResourceMatch::None;
        }
        input[dest_start..i].to_string()
    };

    // Whitespace before an optional title. The title only counts when some
    // whitespace separates it from the destination.
    let ws_start = i;
    while i < len && matches!(bytes[i], b' ' | b'\t') {
        i += 1;
    }
    if i >= len {
        return suspend_or_none(is_final);
    }

    let mut title = String::new();
    if bytes[i] != b')' {
        if i == ws_start {
            return ResourceMatch::None;
        }
        let close = match bytes[i] {
            b'"' => b'"',
            b'\'' => b'\'',
            b'(' => b')',
            _ => return ResourceMatch::None,
        };
        let title_start = i + 1;
        let mut j = title_start;
        loop {
            if j >= len {
                return suspend_or_none(is_final);
            }
            match bytes[j] {
                b'\n' => return ResourceMatch::None,
                b if b == close => break,
                _ => j += 1,
            }
        }
        title = input[title_start..j].to_string();
        i = j + 1;
        while i < len && matches!(bytes[i], b' ' | b'\t') {
            i += 1;
        }
        if i >= len {
            return suspend_or_none(is_final);
        }
    }

    if bytes[i] != b')' {
        return ResourceMatch::None;
    }
    ResourceMatch::Match {
        href,
        title,
        end: i + 1,
    }
}

impl<R: Renderer> Parser<R> {
    /// Drive a recognized link or image lead through the matcher. On success
    /// the link text is re-parsed inline-only between the wrapping `on_a`
    /// calls; images emit a single `on_img`. On rejection the lead byte is
    /// literal text and scanning simply continues after it.
    pub(super) fn scan_link(&mut self, scan: &mut Scan, is_image: bool) -> Step {
        let open_len = if is_image { 2 } else { 1 };
        match eat_link(scan.buf, scan.pos, scan.pos + open_len, scan.is_final) {
            LinkMatch::Suspend => Step::Suspend,
            LinkMatch::None => {
                scan.push_char();
                Step::Continue
            }
            LinkMatch::Match {
                text_end,
                consumed,
                href,
                title,
                is_reference,
            } => {
                let text = &scan.buf[scan.pos + open_len..text_end];
                // An empty reference label falls back to the link text.
                let href = if is_reference && href.is_empty() {
                    text.to_string()
                } else {
                    href
                };
                self.flush_text(scan);
                if is_image {
                    self.renderer.on_img(&href, &title);
                } else {
                    self.renderer.on_a(true, &href, &title, is_reference);
                    self.parse_inline_fragment(text);
                    self.renderer.on_a(false, &href, &title, is_reference);
                }
                scan.consume(consumed);
                Step::Continue
            }
        }
    }
}
