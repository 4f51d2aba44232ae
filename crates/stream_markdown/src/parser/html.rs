//! The raw HTML sub-parser: consumes tag-like runs starting at `<` and
//! decides open tag, close tag, or not-a-tag. Attribute runs pass through
//! unparsed.

use super::{Parser, Scan, Step};
use crate::render::Renderer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TagMatch {
    /// The run is not a tag; the `<` is literal text.
    NotTag,
    Suspend,
    Tag {
        is_close: bool,
        name: String,
        attributes: String,
        bytes: usize,
    },
}

fn suspend_or_not(is_final: bool) -> TagMatch {
    if is_final {
        TagMatch::NotTag
    } else {
        TagMatch::Suspend
    }
}

/// Consume a tag starting at the `<` at `pos`: an optional `/`, a tag name
/// (alphabetic lead, alphanumeric continuation), then either `>` directly,
/// `/>`, or whitespace followed by a raw attribute run up to `>`. A newline
/// before the closing angle means this was never a tag.
pub(crate) fn eat_tag(input: &str, pos: usize, is_final: bool) -> TagMatch {
    let bytes = input.as_bytes();
    let len = input.len();
    debug_assert_eq!(bytes[pos], b'<');

    let mut i = pos + 1;
    if i >= len {
        return suspend_or_not(is_final);
    }
    let is_close = bytes[i] == b'/';
    if is_close {
        i += 1;
        if i >= len {
            return suspend_or_not(is_final);
        }
    }
    if !bytes[i].is_ascii_alphabetic() {
        return TagMatch::NotTag;
    }
    let name_start = i;
    while i < len && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i >= len {
        return suspend_or_not(is_final);
    }
    let name = input[name_start..i].to_string();

    match bytes[i] {
        b'>' => {
            return TagMatch::Tag {
                is_close,
                name,
                attributes: String::new(),
                bytes: i + 1 - pos,
            }
        }
        b'/' => {
            // Self-closing with no attributes.
            if i + 1 >= len {
                return suspend_or_not(is_final);
            }
            return if bytes[i + 1] == b'>' {
                TagMatch::Tag {
                    is_close,
                    name,
                    attributes: String::new(),
                    bytes: i + 2 - pos,
                }
            } else {
                TagMatch::NotTag
            };
        }
        b' ' | b'\t' => {}
        _ => return TagMatch::NotTag,
    }

    let attr_start = i;
    loop {
        if i >= len {
            return suspend_or_not(is_final);
        }
        match bytes[i] {
            b'>' => break,
            b'\n' => return TagMatch::NotTag,
            _ => i += 1,
        }
    }
    let attributes = input[attr_start..i].trim();
    // A trailing slash is self-close syntax, not attribute content.
    let attributes = attributes
        .strip_suffix('/')
        .map(str::trim_end)
        .unwrap_or(attributes);
    TagMatch::Tag {
        is_close,
        name,
        attributes: attributes.to_string(),
        bytes: i + 1 - pos,
    }
}

impl<R: Renderer> Parser<R> {
    pub(super) fn scan_html(&mut self, scan: &mut Scan) -> Step {
        match eat_tag(scan.buf, scan.pos, scan.is_final) {
            TagMatch::Suspend => Step::Suspend,
            TagMatch::NotTag => {
                scan.push_char();
                Step::Continue
            }
            TagMatch::Tag {
                is_close,
                name,
                attributes,
                bytes,
            } => {
                self.flush_text(scan);
                self.renderer.on_html(!is_close, &name, &attributes);
                scan.consume(bytes);
                Step::Continue
            }
        }
    }
}
