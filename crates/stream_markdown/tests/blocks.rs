//! Block-level behavior: headings, rules, blockquotes, lists, task items,
//! paragraph continuation, and the deferred close discipline.


use harness::{events, events_test, html_test};
use stream_markdown::RenderEvent::*;

events_test!(
    heading_closes_with_its_line,
    "# Title\nafter\n",
    vec![
        H(true, 1),
        Text("Title".into()),
        Text("\n".into()),
        H(false, 1),
        P(true),
        Text("after".into()),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    heading_without_trailing_newline,
    "### x",
    vec![H(true, 3), Text("x".into()), H(false, 3)]
);

events_test!(
    hash_without_space_is_text,
    "#tag\n",
    vec![P(true), Text("#tag".into()), Text("\n".into()), P(false)]
);

events_test!(
    paragraph_closes_only_at_flush,
    "hello **world**\n",
    vec![
        P(true),
        Text("hello ".into()),
        Strong(true),
        Text("world".into()),
        Strong(false),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    plain_lines_continue_a_paragraph,
    "line one\nline two\n",
    vec![
        P(true),
        Text("line one".into()),
        Text("\n".into()),
        Text("line two".into()),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    blank_line_splits_paragraphs,
    "a\n\nb\n",
    vec![
        P(true),
        Text("a".into()),
        Text("\n".into()),
        P(false),
        SoftBr,
        P(true),
        Text("b".into()),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    nested_quote_has_no_paragraph,
    "> > quoted\n",
    vec![
        Quote(true, 2),
        Text("quoted".into()),
        Text("\n".into()),
        Quote(false, 2),
    ]
);

events_test!(
    quote_lines_share_one_block,
    "> a\n> b\n",
    vec![
        Quote(true, 1),
        Text("a".into()),
        Text("\n".into()),
        Text("b".into()),
        Text("\n".into()),
        Quote(false, 1),
    ]
);

events_test!(
    quote_level_change_reopens,
    "> a\n> > b\n",
    vec![
        Quote(true, 1),
        Text("a".into()),
        Text("\n".into()),
        Quote(false, 1),
        Quote(true, 2),
        Text("b".into()),
        Text("\n".into()),
        Quote(false, 2),
    ]
);

events_test!(
    rule_between_paragraphs,
    "para\n---\nafter\n",
    vec![
        P(true),
        Text("para".into()),
        Text("\n".into()),
        P(false),
        Hr,
        P(true),
        Text("after".into()),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    rule_with_trailing_content_is_text,
    "***bold***\n",
    vec![
        P(true),
        Strong(true),
        Em(true),
        Text("bold".into()),
        Em(false),
        Strong(false),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    sibling_list_items,
    "- a\n- b\n",
    vec![
        Ul(true, 1),
        Li(true),
        Text("a".into()),
        Text("\n".into()),
        Li(false),
        Li(true),
        Text("b".into()),
        Text("\n".into()),
        Li(false),
        Ul(false, 1),
    ]
);

events_test!(
    multi_digit_ordered_list,
    "1. a\n42. b\n",
    vec![
        Ol(true, 1),
        Li(true),
        Text("a".into()),
        Text("\n".into()),
        Li(false),
        Li(true),
        Text("b".into()),
        Text("\n".into()),
        Li(false),
        Ol(false, 1),
    ]
);

events_test!(
    continuation_indent_extends_the_item,
    "- a\n  b\n",
    vec![
        Ul(true, 1),
        Li(true),
        Text("a".into()),
        Text("\n".into()),
        Text("b".into()),
        Text("\n".into()),
        Li(false),
        Ul(false, 1),
    ]
);

events_test!(
    deeper_indent_nests_a_new_list,
    "- a\n  - b\n",
    vec![
        Ul(true, 1),
        Li(true),
        Text("a".into()),
        Text("\n".into()),
        Li(false),
        Ul(false, 1),
        Ul(true, 2),
        Li(true),
        Text("b".into()),
        Text("\n".into()),
        Li(false),
        Ul(false, 2),
    ]
);

events_test!(
    plain_line_ends_the_list,
    "- a\nplain\n",
    vec![
        Ul(true, 1),
        Li(true),
        Text("a".into()),
        Text("\n".into()),
        Li(false),
        Ul(false, 1),
        P(true),
        Text("plain".into()),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    blank_line_drops_the_continuation_gate,
    "- a\n\n  b\n",
    vec![
        Ul(true, 1),
        Li(true),
        Text("a".into()),
        Text("\n".into()),
        Li(false),
        Ul(false, 1),
        SoftBr,
        P(true),
        Text("  b".into()),
        Text("\n".into()),
        P(false),
    ]
);

events_test!(
    task_items_flag_the_box,
    "- [x] done\n- [ ] todo\n",
    vec![
        Ul(true, 1),
        Li(true),
        TaskList(true, true),
        Text(" done".into()),
        Text("\n".into()),
        Li(false),
        Li(true),
        TaskList(true, false),
        Text(" todo".into()),
        Text("\n".into()),
        Li(false),
        Ul(false, 1),
    ]
);

#[test]
fn mixed_documents_stay_well_nested() {
    for input in [
        "# h\n\npara **b**\n\n- a\n- b\n  - c\n\n> q\n> q2\n\n---\n",
        "| a |\n|---|\n| b |\nplain\n```\ncode\n```\n",
        "1. one\n2. two\n   \ntail\n",
    ] {
        harness::assert_well_nested(&events(input));
    }
}

html_test!(html_paragraph, "hello **world**\n", "<p>hello <strong>world</strong>\n</p>");
html_test!(html_heading, "# Hi\n", "<h1>Hi\n</h1>");
html_test!(html_rule, "---\n", "<hr/>");
html_test!(html_quote, "> hi\n", "<blockquote>hi\n</blockquote>");
html_test!(
    html_list,
    "- a\n- b\n",
    "<ul><li>a\n</li><li>b\n</li></ul>"
);
html_test!(
    html_task_list,
    "- [x] ok\n",
    "<ul><li><input type=\"checkbox\" checked disabled> ok\n</li></ul>"
);
html_test!(
    html_escapes_body_text,
    "a < b & c\n",
    "<p>a &lt; b &amp; c\n</p>"
);
