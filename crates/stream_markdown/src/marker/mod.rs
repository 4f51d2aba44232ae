//! Marker maps: read-only tables from literal marker strings to
//! [`FormatKind`], plus the greedy incremental matcher that drives all block
//! and inline classification.

use rustc_hash::FxHashMap;

use crate::kind::FormatKind;

pub(crate) mod block;
pub(crate) mod maps;

/// Result of scanning for a marker at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MarkerMatch {
    /// No marker begins at this position; the byte is literal text.
    None,
    /// The buffer ended while a longer marker could still form and the input
    /// is not final. The caller must retain the unconsumed bytes and wait.
    Suspend,
    /// The longest match starting at the position: `chars` input characters
    /// covering `bytes` input bytes. The two differ when a digit run
    /// collapses onto the `1` wildcard or a wildcard letter is multi-byte.
    Match {
        kind: FormatKind,
        chars: usize,
        bytes: usize,
    },
}

/// A single in-flight key being grown by [`MarkerMap::eat`]. Literal and
/// wildcard expansions of the same input can both be live at once (`[x]` the
/// task box vs `[xy](…)` the link lead), so the scanner advances a small set
/// of these per character.
#[derive(Clone, Debug)]
struct Candidate {
    key: String,
    last_was_digit: bool,
}

/// Mapping from literal marker byte sequences to kinds. Two wildcard
/// conventions apply to keys:
///
/// - `1` matches any ASCII digit, and a run of consecutive digits in the
///   input collapses onto a single `1` key character;
/// - `?` matches any alphabetic character (used only by the link and image
///   leads).
///
/// The map is populated at construction and read-only afterwards. Inserting a
/// key fills every missing proper prefix with `INVALID` so that the greedy
/// scanner knows a longer match may still form.
pub(crate) struct MarkerMap {
    entries: FxHashMap<String, FormatKind>,
}

impl MarkerMap {
    pub(crate) fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    pub(crate) fn add(&mut self, key: &str, kind: FormatKind) {
        debug_assert!(
            kind != FormatKind::INVALID,
            "INVALID entries are created implicitly from prefixes"
        );
        // Keys are ASCII, so byte indices are character boundaries.
        for end in 1..key.len() {
            self.entries
                .entry(key[..end].to_string())
                .or_insert(FormatKind::INVALID);
        }
        self.entries.insert(key.to_string(), kind);
    }

    fn kind_of(&self, key: &str) -> Option<FormatKind> {
        self.entries.get(key).copied()
    }

    /// Find the longest marker starting at `pos`. Candidate keys are grown
    /// one character at a time; a key mapping to a real kind is remembered as
    /// the current best, an `INVALID` key keeps growing, and an absent key
    /// dies. When every candidate is dead the best remembered match wins.
    /// Running out of buffer with a live candidate suspends unless the input
    /// is final.
    pub(crate) fn eat(&self, input: &str, pos: usize, is_final: bool) -> MarkerMatch {
        let rest = &input[pos..];
        let Some(first) = rest.chars().next() else {
            return if is_final {
                MarkerMatch::None
            } else {
                MarkerMatch::Suspend
            };
        };
        // Fast path: markers are punctuation, whitespace, or digits. A letter
        // can only ever match through the `?` wildcard, which never appears
        // at the start of a key.
        if first.is_alphabetic() {
            return MarkerMatch::None;
        }

        let mut best: Option<(FormatKind, usize, usize)> = None;
        let mut live = vec![Candidate {
            key: String::new(),
            last_was_digit: false,
        }];
        let mut chars = 0usize;
        let mut bytes = 0usize;

        for ch in rest.chars() {
            chars += 1;
            bytes += ch.len_utf8();

            let mut next: Vec<Candidate> = Vec::with_capacity(live.len() + 1);
            for cand in &live {
                if ch.is_ascii_digit() {
                    if cand.last_was_digit {
                        // The digit run stays on the same `1` key character.
                        next.push(cand.clone());
                    } else {
                        let mut key = cand.key.clone();
                        key.push('1');
                        next.push(Candidate {
                            key,
                            last_was_digit: true,
                        });
                    }
                } else {
                    let mut key = cand.key.clone();
                    key.push(ch);
                    next.push(Candidate {
                        key,
                        last_was_digit: false,
                    });
                    if ch.is_alphabetic() {
                        let mut key = cand.key.clone();
                        key.push('?');
                        next.push(Candidate {
                            key,
                            last_was_digit: false,
                        });
                    }
                }
            }

            next.retain(|cand| self.entries.contains_key(&cand.key));
            for cand in &next {
                match self.kind_of(&cand.key) {
                    Some(FormatKind::INVALID) | None => {}
                    Some(kind) => {
                        best = Some((kind, chars, bytes));
                        break;
                    }
                }
            }

            live = next;
            if live.is_empty() {
                break;
            }
        }

        if !live.is_empty() && !is_final {
            return MarkerMatch::Suspend;
        }
        match best {
            Some((kind, chars, bytes)) => MarkerMatch::Match { kind, chars, bytes },
            None => MarkerMatch::None,
        }
    }
}
