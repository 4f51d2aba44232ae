//! The process-wide marker map instances and their position-specialized entry
//! points. All maps are immutable after construction.

use lazy_static::lazy_static;

use super::{MarkerMap, MarkerMatch};
use crate::byte_lookup::byte_is_inline_whitespace;
use crate::kind::FormatKind::*;

/// The emphasis delimiter table shared by the four position-specialized maps.
fn emphasis_map() -> MarkerMap {
    let mut map = MarkerMap::new();
    map.add("*", ITALIC);
    map.add("**", BOLD);
    map.add("***", BOLD_ITALIC);
    map.add("_", ITALIC);
    map.add("__", BOLD);
    map.add("___", BOLD_ITALIC);
    map
}

fn format_map() -> MarkerMap {
    let mut map = MarkerMap::new();
    map.add("`", LITERAL);
    map.add("``", CODE);
    map.add("~~", STRIKETHROUGH);
    map.add("[??", LINK);
    map.add("[?]", LINK);
    map.add("![??", IMAGE);
    map.add("![?]", IMAGE);
    map.add("[ ]", TASK_LIST);
    map.add("[x]", TASK_LIST_DONE);
    map.add("[X]", TASK_LIST_DONE);
    map.add("<", HTML);
    map
}

fn block_map() -> MarkerMap {
    let mut map = MarkerMap::new();
    for level in 1..=6u8 {
        let key = format!("{} ", "#".repeat(level as usize));
        map.add(&key, crate::kind::FormatKind::heading(level));
    }
    map.add("---", HORIZONTAL_RULE);
    map.add("***", HORIZONTAL_RULE);
    map.add("___", HORIZONTAL_RULE);
    map.add("- ", UNORDERED_LIST);
    map.add("* ", UNORDERED_LIST);
    map.add("+ ", UNORDERED_LIST);
    map.add("1. ", ORDERED_LIST);
    for level in 1..=6usize {
        map.add(&"> ".repeat(level), BLOCKQUOTE);
    }
    map.add("```", FENCED_CODE_QUOTE);
    map.add("~~~", FENCED_CODE_TILD);
    // Fences may be indented by exactly three spaces.
    map.add("   ```", FENCED_CODE_QUOTE);
    map.add("   ~~~", FENCED_CODE_TILD);
    map.add("  ", CONTINUE_LIST);
    map.add("|", TABLE);
    map
}

fn list_map() -> MarkerMap {
    let mut map = MarkerMap::new();
    map.add("  ", CONTINUE_LIST);
    for marker in ["- ", "* ", "+ "] {
        map.add(marker, UNORDERED_LIST);
        map.add(&format!(" {marker}"), UNORDERED_LIST);
    }
    map.add("1. ", ORDERED_LIST);
    map.add(" 1. ", ORDERED_LIST);
    map
}

lazy_static! {
    /// Inline format markers valid at any position: code spans, strike,
    /// link/image leads, task boxes, and the raw HTML lead.
    pub(crate) static ref FORMAT_MAP: MarkerMap = format_map();
    /// Emphasis openers at the start of a line's inline content.
    pub(crate) static ref START_MAP: MarkerMap = emphasis_map();
    /// Emphasis openers after inline whitespace.
    pub(crate) static ref LEFT_MAP: MarkerMap = emphasis_map();
    /// Emphasis closers followed by whitespace or any non-letter.
    pub(crate) static ref RIGHT_MAP: MarkerMap = emphasis_map();
    /// Emphasis closers at the end of a line or of the whole input.
    pub(crate) static ref END_MAP: MarkerMap = emphasis_map();
    /// Block markers at line start.
    pub(crate) static ref BLOCK_MAP: MarkerMap = block_map();
    /// The reduced list-marker table used for continuation indents.
    pub(crate) static ref LIST_MAP: MarkerMap = list_map();
}

/// An emphasis opener at line start delegates straight to the table.
pub(crate) fn eat_start(input: &str, pos: usize, is_final: bool) -> MarkerMatch {
    START_MAP.eat(input, pos, is_final)
}

/// An emphasis opener elsewhere requires the current byte to be inline
/// whitespace; the match is taken at the next position and the reported
/// length includes the whitespace byte.
pub(crate) fn eat_left(input: &str, pos: usize, is_final: bool) -> MarkerMatch {
    if !byte_is_inline_whitespace(input.as_bytes()[pos]) {
        return MarkerMatch::None;
    }
    match LEFT_MAP.eat(input, pos + 1, is_final) {
        MarkerMatch::Match { kind, chars, bytes } => MarkerMatch::Match {
            kind,
            chars: chars + 1,
            bytes: bytes + 1,
        },
        other => other,
    }
}

/// An emphasis closer. The run itself comes from the right map; what follows
/// decides acceptance: whitespace or any non-letter accepts in place, a
/// newline or the verified end of input accepts through the end map, and a
/// letter rejects. A closer at the end of a non-final buffer suspends, since
/// the next chunk could begin with a letter.
pub(crate) fn eat_closer(input: &str, pos: usize, is_final: bool) -> MarkerMatch {
    let result = RIGHT_MAP.eat(input, pos, is_final);
    let MarkerMatch::Match { bytes, .. } = result else {
        return result;
    };
    match input[pos + bytes..].chars().next() {
        None => {
            if is_final {
                END_MAP.eat(input, pos, true)
            } else {
                MarkerMatch::Suspend
            }
        }
        Some('\n') => END_MAP.eat(input, pos, is_final),
        Some(c) if c.is_whitespace() || !c.is_alphabetic() => result,
        Some(_) => MarkerMatch::None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn left_requires_whitespace() {
        assert_eq!(eat_left("a**b", 0, false), MarkerMatch::None);
        assert_eq!(
            eat_left(" **b", 0, false),
            MarkerMatch::Match {
                kind: BOLD,
                chars: 3,
                bytes: 3
            }
        );
    }

    #[test]
    fn closer_rejects_a_following_letter() {
        assert_eq!(eat_closer("**x", 0, false), MarkerMatch::None);
        assert_eq!(
            eat_closer("** x", 0, false),
            MarkerMatch::Match {
                kind: BOLD,
                chars: 2,
                bytes: 2
            }
        );
        assert_eq!(
            eat_closer("**.", 0, false),
            MarkerMatch::Match {
                kind: BOLD,
                chars: 2,
                bytes: 2
            }
        );
    }

    #[test]
    fn closer_at_end_of_line_and_input() {
        assert_eq!(
            eat_closer("**\nx", 0, false),
            MarkerMatch::Match {
                kind: BOLD,
                chars: 2,
                bytes: 2
            }
        );
        assert_eq!(eat_closer("**", 0, false), MarkerMatch::Suspend);
        assert_eq!(
            eat_closer("**", 0, true),
            MarkerMatch::Match {
                kind: BOLD,
                chars: 2,
                bytes: 2
            }
        );
    }

    #[test]
    fn block_map_prefixes_stay_invalid() {
        assert_eq!(BLOCK_MAP.eat("#x", 0, false), MarkerMatch::None);
        assert_eq!(
            BLOCK_MAP.eat("## title", 0, false),
            MarkerMatch::Match {
                kind: HEADING_2,
                chars: 3,
                bytes: 3
            }
        );
        assert_eq!(BLOCK_MAP.eat("#", 0, false), MarkerMatch::Suspend);
    }
}
