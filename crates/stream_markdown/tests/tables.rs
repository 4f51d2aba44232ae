//! Table validation and row streaming: the three-line window, alignment
//! decoding, continuation rows, and rejection back to paragraph text.


use harness::{events, events_test};
use stream_markdown::RenderEvent::*;
use stream_markdown::{Align, Parser, ParserOptions, TraceRenderer};

events_test!(
    basic_table,
    "| a | b |\n|---|---|\n| 1 | 2 |\n",
    vec![
        Table(true),
        TableRow(true),
        TableHCell(true, Align::None),
        Text("a".into()),
        TableHCell(false, Align::None),
        TableHCell(true, Align::None),
        Text("b".into()),
        TableHCell(false, Align::None),
        TableRow(false),
        TableRow(true),
        TableCell(true, Align::None),
        Text("1".into()),
        TableCell(false, Align::None),
        TableCell(true, Align::None),
        Text("2".into()),
        TableCell(false, Align::None),
        TableRow(false),
        Table(false),
    ]
);

events_test!(
    alignment_comes_from_the_separator,
    "| l | c | r |\n|:--|:-:|--:|\n| 1 | 2 | 3 |\n",
    vec![
        Table(true),
        TableRow(true),
        TableHCell(true, Align::Left),
        Text("l".into()),
        TableHCell(false, Align::Left),
        TableHCell(true, Align::Center),
        Text("c".into()),
        TableHCell(false, Align::Center),
        TableHCell(true, Align::Right),
        Text("r".into()),
        TableHCell(false, Align::Right),
        TableRow(false),
        TableRow(true),
        TableCell(true, Align::Left),
        Text("1".into()),
        TableCell(false, Align::Left),
        TableCell(true, Align::Center),
        Text("2".into()),
        TableCell(false, Align::Center),
        TableCell(true, Align::Right),
        Text("3".into()),
        TableCell(false, Align::Right),
        TableRow(false),
        Table(false),
    ]
);

events_test!(
    header_without_trailing_pipe_is_text,
    "| a | b\n|---|---|\n| 1 | 2 |\n",
    vec![
        P(true),
        Text("| a | b".into()),
        Text("\n".into()),
        Text("|---|---|".into()),
        Text("\n".into()),
        Text("| 1 | 2 |".into()),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    table_closes_on_a_plain_line,
    "| a |\n|---|\n| 1 |\n| 2 |\nend\n",
    vec![
        Table(true),
        TableRow(true),
        TableHCell(true, Align::None),
        Text("a".into()),
        TableHCell(false, Align::None),
        TableRow(false),
        TableRow(true),
        TableCell(true, Align::None),
        Text("1".into()),
        TableCell(false, Align::None),
        TableRow(false),
        TableRow(true),
        TableCell(true, Align::None),
        Text("2".into()),
        TableCell(false, Align::None),
        TableRow(false),
        Table(false),
        P(true),
        Text("end".into()),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    cells_carry_inline_formatting,
    "| **b** |\n|---|\n| `c` |\n",
    vec![
        Table(true),
        TableRow(true),
        TableHCell(true, Align::None),
        Strong(true),
        Text("b".into()),
        Strong(false),
        TableHCell(false, Align::None),
        TableRow(false),
        TableRow(true),
        TableCell(true, Align::None),
        CodeSpan(true),
        Text("c".into()),
        CodeSpan(false),
        TableCell(false, Align::None),
        TableRow(false),
        Table(false),
    ]
);

/// Feeding byte by byte, nothing may be emitted until the third line's
/// newline completes the validation window.
#[test]
fn window_suspends_until_three_lines() {
    let input = "| a |\n|---|\n| 1 |\n";
    let last_newline = input.rfind('\n').unwrap();
    let mut parser = Parser::new(TraceRenderer::new());
    for (offset, ch) in input.char_indices() {
        if offset <= last_newline {
            assert!(
                parser.renderer().events().is_empty(),
                "emitted before the window was complete, at offset {offset}"
            );
        }
        parser.add(&ch.to_string());
    }
    parser.flush();
    assert_eq!(parser.into_renderer().into_events(), events(input));
}

#[test]
fn tables_can_be_disabled() {
    let options = ParserOptions::default().with_tables(false);
    let mut parser = Parser::with_options(TraceRenderer::new(), options);
    parser.add("| a |\n|---|\n| 1 |\n");
    parser.flush();
    assert_eq!(
        parser.into_renderer().into_events(),
        vec![
            P(true),
            Text("| a |".into()),
            Text("\n".into()),
            Text("|---|".into()),
            Text("\n".into()),
            Text("| 1 |".into()),
            Text("\n".into()),
            P(false),
        ]
    );
}
