//! Block-level matching: the raw [`BLOCK_MAP`] lookup plus the bespoke logic
//! that some block markers need before they can be accepted — horizontal rule
//! line validation, fence info strings, list continuation indents, and the
//! three-line table window.

use memchr::memchr;

use super::maps::{BLOCK_MAP, LIST_MAP};
use super::MarkerMatch;
use crate::kind::FormatKind;
use crate::render::Align;

/// Result of classifying a position at line start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BlockMatch {
    /// Not a block marker; the line is inline content.
    None,
    /// More input is required before the line can be classified.
    Suspend,
    /// An ordinary block marker. The parser consumes `bytes` and transitions
    /// to `kind`. For blockquotes `indent` carries the quote level, for list
    /// markers the list indent level (minimum 1).
    Block {
        kind: FormatKind,
        bytes: usize,
        indent: usize,
    },
    /// A fenced code opener. `bytes` covers the entire opening line including
    /// its newline. `open` is the exact fence run (with indentation) that the
    /// closing line must reproduce byte for byte.
    Fence {
        kind: FormatKind,
        bytes: usize,
        open: String,
        lang: String,
    },
    /// A horizontal rule; `bytes` covers the whole line including its
    /// newline.
    Rule { bytes: usize },
    /// A validated three-line table window. Nothing is consumed here; the
    /// parser takes over row by row. `aligns` comes from the separator line.
    Table { aligns: Vec<Align> },
}

/// Classify the line beginning at `pos`. `last_line_block` gates the
/// continuation indent: two leading spaces only continue an open list.
pub(crate) fn peek_block(
    input: &str,
    pos: usize,
    is_final: bool,
    last_line_block: FormatKind,
) -> BlockMatch {
    let (kind, bytes) = match BLOCK_MAP.eat(input, pos, is_final) {
        MarkerMatch::Suspend => return BlockMatch::Suspend,
        MarkerMatch::None => return BlockMatch::None,
        MarkerMatch::Match { kind, bytes, .. } => (kind, bytes),
    };

    match kind {
        FormatKind::BLOCKQUOTE => BlockMatch::Block {
            kind,
            bytes,
            indent: bytes / 2,
        },
        FormatKind::UNORDERED_LIST | FormatKind::ORDERED_LIST => BlockMatch::Block {
            kind,
            bytes,
            indent: 1,
        },
        FormatKind::HORIZONTAL_RULE => peek_rule(input, pos, bytes, is_final),
        FormatKind::FENCED_CODE_QUOTE | FormatKind::FENCED_CODE_TILD => {
            peek_fence_open(input, pos, kind, bytes, is_final)
        }
        FormatKind::CONTINUE_LIST => {
            if !last_line_block.is_list() {
                return BlockMatch::None;
            }
            match peek_list(input, pos + bytes, is_final) {
                ListPeek::Suspend => BlockMatch::Suspend,
                ListPeek::Match {
                    kind: list_kind,
                    bytes: extra,
                    spaces,
                } => {
                    if list_kind == FormatKind::CONTINUE_LIST {
                        BlockMatch::Block {
                            kind: FormatKind::CONTINUE_LIST,
                            bytes: bytes + extra,
                            indent: 0,
                        }
                    } else {
                        BlockMatch::Block {
                            kind: list_kind,
                            bytes: bytes + extra,
                            indent: (bytes + spaces) / 2 + 1,
                        }
                    }
                }
            }
        }
        FormatKind::TABLE => peek_table(input, pos, is_final),
        _ => BlockMatch::Block {
            kind,
            bytes,
            indent: 0,
        },
    }
}

enum ListPeek {
    Suspend,
    Match {
        kind: FormatKind,
        bytes: usize,
        spaces: usize,
    },
}

/// Consume chained continuation indents and an optional trailing list marker.
/// `spaces` counts the indentation bytes in front of the marker itself.
fn peek_list(input: &str, pos: usize, is_final: bool) -> ListPeek {
    match LIST_MAP.eat(input, pos, is_final) {
        MarkerMatch::Suspend => ListPeek::Suspend,
        MarkerMatch::None => ListPeek::Match {
            kind: FormatKind::CONTINUE_LIST,
            bytes: 0,
            spaces: 0,
        },
        MarkerMatch::Match { kind, bytes, .. } if kind == FormatKind::CONTINUE_LIST => {
            match peek_list(input, pos + bytes, is_final) {
                ListPeek::Suspend => ListPeek::Suspend,
                ListPeek::Match {
                    kind: inner,
                    bytes: extra,
                    spaces,
                } => ListPeek::Match {
                    kind: inner,
                    bytes: bytes + extra,
                    spaces: bytes + spaces,
                },
            }
        }
        MarkerMatch::Match { kind, bytes, .. } => {
            // Single-leading-space marker variants count one indent byte.
            let spaces = input[pos..pos + bytes]
                .bytes()
                .take_while(|b| *b == b' ')
                .count();
            ListPeek::Match {
                kind,
                bytes,
                spaces,
            }
        }
    }
}

/// A rule marker only forms a rule when the rest of its line is blank.
fn peek_rule(input: &str, pos: usize, marker_bytes: usize, is_final: bool) -> BlockMatch {
    let rest = &input[pos + marker_bytes..];
    for (i, byte) in rest.bytes().enumerate() {
        match byte {
            b' ' | b'\t' => {}
            b'\n' => {
                return BlockMatch::Rule {
                    bytes: marker_bytes + i + 1,
                }
            }
            _ => return BlockMatch::None,
        }
    }
    if is_final {
        BlockMatch::Rule {
            bytes: marker_bytes + rest.len(),
        }
    } else {
        BlockMatch::Suspend
    }
}

/// A fence opener consumes its whole line: the matched run becomes the
/// required closing sequence and the remainder, stripped, is the language
/// tag.
fn peek_fence_open(
    input: &str,
    pos: usize,
    kind: FormatKind,
    marker_bytes: usize,
    is_final: bool,
) -> BlockMatch {
    let rest = &input[pos + marker_bytes..];
    let (info, consumed) = match memchr(b'\n', rest.as_bytes()) {
        Some(i) => (&rest[..i], i + 1),
        None if is_final => (rest, rest.len()),
        None => return BlockMatch::Suspend,
    };
    BlockMatch::Fence {
        kind,
        bytes: marker_bytes + consumed,
        open: input[pos..pos + marker_bytes].to_string(),
        lang: info.trim().to_string(),
    }
}

/// Result of checking a line inside a fenced block against the opening run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FenceEnd {
    /// The line is ordinary code text.
    NotClose,
    Suspend,
    /// The block closes; `bytes` covers the closing line and its newline.
    Close { bytes: usize },
}

/// The closing fence must repeat the exact opening run (indentation
/// included), followed only by inline whitespace up to the newline or the
/// end of a final input.
pub(crate) fn peek_fence_end(input: &str, pos: usize, is_final: bool, open: &str) -> FenceEnd {
    let rest = &input[pos..];
    let common = rest.len().min(open.len());
    if rest.as_bytes()[..common] != open.as_bytes()[..common] {
        return FenceEnd::NotClose;
    }
    if rest.len() < open.len() {
        return if is_final {
            FenceEnd::NotClose
        } else {
            FenceEnd::Suspend
        };
    }
    for (i, byte) in rest[open.len()..].bytes().enumerate() {
        match byte {
            b' ' | b'\t' => {}
            b'\n' => {
                return FenceEnd::Close {
                    bytes: open.len() + i + 1,
                }
            }
            _ => return FenceEnd::NotClose,
        }
    }
    if is_final {
        FenceEnd::Close { bytes: rest.len() }
    } else {
        FenceEnd::Suspend
    }
}

/// A table only opens once three well-formed lines are buffered: the header
/// row, the separator, and the first body row. The header and body rows must
/// start and end with `|` (ignoring surrounding spaces); the stripped
/// separator may contain only dashes, pipes, colons, and whitespace.
fn peek_table(input: &str, pos: usize, is_final: bool) -> BlockMatch {
    let rest = &input[pos..];
    let mut lines = [""; 3];
    let mut start = 0;
    for slot in lines.iter_mut() {
        match memchr(b'\n', rest[start..].as_bytes()) {
            Some(i) => {
                *slot = &rest[start..start + i];
                start += i + 1;
            }
            None if is_final => return BlockMatch::None,
            None => return BlockMatch::Suspend,
        }
    }
    if !is_table_boundary_row(lines[0])
        || !is_table_separator(lines[1])
        || !is_table_boundary_row(lines[2])
    {
        return BlockMatch::None;
    }
    BlockMatch::Table {
        aligns: parse_alignments(lines[1]),
    }
}

pub(crate) fn is_table_boundary_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | '|' | ':') || c.is_whitespace())
}

/// Split a row into trimmed cell slices, dropping the outer pipes.
pub(crate) fn split_table_row(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

/// Column alignment is encoded by colon placement in the separator cells.
pub(crate) fn parse_alignments(line: &str) -> Vec<Align> {
    split_table_row(line)
        .into_iter()
        .map(|cell| {
            let left = cell.starts_with(':');
            let right = cell.ends_with(':') && cell.len() > 1;
            match (left, right) {
                (true, true) => Align::Center,
                (true, false) => Align::Left,
                (false, true) => Align::Right,
                (false, false) => Align::None,
            }
        })
        .collect()
}
