//! Chunk invariance: the renderer must see the same call sequence no matter
//! how the input is split across `add` calls, with adjacent code-text
//! payloads merged (fenced code streams eagerly by design).


use harness::{assert_well_nested, events, events_chunked, normalize};
use stream_markdown::RenderEvent::*;
use stream_markdown::{Parser, TraceRenderer};
use test_case::test_case;

const DOCUMENTS: &[&str] = &[
    "hello **world**\n",
    "plain text with no markup\n",
    "# Heading *one*\n\nbody\n",
    "***wow*** and _more_\n",
    "a `lit *span*` b\n",
    "``double`` tick\n",
    "~~strike~~ survives\n",
    "> > quoted **deep**\n",
    "> a\n> b\nplain\n",
    "- one\n- two\n  - nested\n  tail\n",
    "1. first\n42. second\n",
    "- [x] done\n- [ ] open\n",
    "para\n---\nafter\n",
    "```rust\nfn main() { println!(\"hi\"); }\n```\nafter\n",
    "   ~~~\nindented fence\n   ~~~\n",
    "[click](https://x 'T') and [ref][label]\n",
    "![pic](i.png) stays\n",
    "text [with][] reference\n",
    "a <b>bold</b> and <br/> <not a tag\n",
    "| a | b |\n|---|:-:|\n| 1 | 2 |\n| 3 | 4 |\ntail\n",
    "escaped \\*stars\\* and a trailing backslash \\\\\n",
    "unicode héllo → 日本語 **bold 本** ok\n",
    "unclosed **strong\nand `code\n",
    "mixed\n\n\n# h\n```\nx\n```\n- l\n",
];

#[test_case(1; "one char at a time")]
#[test_case(2; "pairs")]
#[test_case(3; "triples")]
#[test_case(5; "fives")]
#[test_case(7; "sevens")]
fn chunked_parses_match_whole_parses(size: usize) {
    for document in DOCUMENTS {
        assert_eq!(
            events_chunked(document, size),
            normalize(events(document)),
            "chunk size {size} diverged for {document:?}"
        );
    }
}

#[test]
fn every_two_way_split_matches() {
    for document in DOCUMENTS {
        let whole = normalize(events(document));
        let chars: Vec<char> = document.chars().collect();
        for split in 0..=chars.len() {
            let head: String = chars[..split].iter().collect();
            let tail: String = chars[split..].iter().collect();
            let mut parser = Parser::new(TraceRenderer::new());
            parser.add(&head);
            parser.add(&tail);
            parser.flush();
            let got = normalize(parser.into_renderer().into_events());
            assert_eq!(
                got, whole,
                "split at {split} diverged for {document:?}"
            );
        }
    }
}

#[test]
fn all_documents_stay_well_nested() {
    for document in DOCUMENTS {
        assert_well_nested(&events(document));
        assert_well_nested(&events_chunked(document, 1));
    }
}

/// The split from the original hand-written scenario: the text payload must
/// arrive whole even though the strong span straddles the boundary.
#[test]
fn straddled_emphasis_emits_whole_text() {
    let mut parser = Parser::new(TraceRenderer::new());
    parser.add("**ab");
    parser.add("c**");
    parser.flush();
    assert_eq!(
        parser.into_renderer().into_events(),
        vec![
            P(true),
            Strong(true),
            Text("abc".into()),
            Strong(false),
            P(false),
        ]
    );
    assert_eq!(
        events("**abc**"),
        vec![
            P(true),
            Strong(true),
            Text("abc".into()),
            Strong(false),
            P(false),
        ]
    );
}

/// Empty chunks are legal no-ops at any point.
#[test]
fn empty_chunks_change_nothing() {
    let mut parser = Parser::new(TraceRenderer::new());
    parser.add("");
    parser.add("# h");
    parser.add("");
    parser.add("i\n");
    parser.add("");
    parser.flush();
    assert_eq!(
        parser.into_renderer().into_events(),
        vec![
            H(true, 1),
            Text("hi".into()),
            Text("\n".into()),
            H(false, 1),
        ]
    );
}
