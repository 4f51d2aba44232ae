use serde::Serialize;

/// The single closed kind enumeration shared by every marker map, the parser
/// state machine, and downstream consumers.
///
/// `INVALID` is a sentinel used inside marker maps meaning "this string is a
/// known prefix of a longer marker and must not be treated as a match on its
/// own". It never escapes the map layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[allow(non_camel_case_types)]
pub enum FormatKind {
    #[default]
    NONE,
    INVALID,
    TEXT,
    ITALIC,
    BOLD,
    BOLD_ITALIC,
    /// Double-backtick inline code run.
    CODE,
    /// Single-backtick code span. While open, all other inline markers are
    /// suppressed.
    LITERAL,
    STRIKETHROUGH,
    LINK,
    IMAGE,
    HTML,
    TASK_LIST,
    TASK_LIST_DONE,
    HEADING_1,
    HEADING_2,
    HEADING_3,
    HEADING_4,
    HEADING_5,
    HEADING_6,
    HORIZONTAL_RULE,
    PARAGRAPH,
    UNORDERED_LIST,
    ORDERED_LIST,
    /// Two leading spaces continuing the body of an open list item.
    CONTINUE_LIST,
    FENCED_CODE_QUOTE,
    FENCED_CODE_TILD,
    BLOCKQUOTE,
    TABLE,
}

impl FormatKind {
    pub fn is_list(&self) -> bool {
        matches!(self, FormatKind::UNORDERED_LIST | FormatKind::ORDERED_LIST)
    }

    pub fn is_fenced_code(&self) -> bool {
        matches!(
            self,
            FormatKind::FENCED_CODE_QUOTE | FormatKind::FENCED_CODE_TILD
        )
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// The level of a heading kind, or None for every other kind.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            FormatKind::HEADING_1 => Some(1),
            FormatKind::HEADING_2 => Some(2),
            FormatKind::HEADING_3 => Some(3),
            FormatKind::HEADING_4 => Some(4),
            FormatKind::HEADING_5 => Some(5),
            FormatKind::HEADING_6 => Some(6),
            _ => None,
        }
    }

    pub fn heading(level: u8) -> FormatKind {
        match level {
            1 => FormatKind::HEADING_1,
            2 => FormatKind::HEADING_2,
            3 => FormatKind::HEADING_3,
            4 => FormatKind::HEADING_4,
            5 => FormatKind::HEADING_5,
            _ => FormatKind::HEADING_6,
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, FormatKind::TASK_LIST | FormatKind::TASK_LIST_DONE)
    }
}
