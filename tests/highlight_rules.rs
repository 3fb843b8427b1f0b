//! Rule output over whole documents

mod common;

use common::{palette, run_texts};
use markpad::highlight::{
    highlight_text, HighlightCoordinator, HighlightPass, PassLimits, PatternRegistry, RuleKind,
};
use markpad::model::StyledBuffer;

fn pass(text: &str) -> HighlightPass {
    let mut registry = PatternRegistry::new();
    highlight_text(text, &mut registry, &palette(), &PassLimits::DEFAULT)
}

fn covered<'a>(text: &'a str, pass: &HighlightPass, rule: RuleKind) -> Vec<&'a str> {
    pass.spans_for(rule).map(|s| &text[s.range()]).collect()
}

// ========================================================================
// Scenarios
// ========================================================================

#[test]
fn test_headers_by_level() {
    let text = "# Title\n## Sub\nBody text";
    let pass = pass(text);
    let palette = palette();

    let headers: Vec<_> = pass.spans_for(RuleKind::Header).collect();
    assert_eq!(headers.len(), 2);
    assert_eq!(&text[headers[0].range()], "# Title");
    assert_eq!(headers[0].style, *palette.header(1));
    assert_eq!(&text[headers[1].range()], "## Sub");
    assert_eq!(headers[1].style, *palette.header(2));

    let body = text.find("Body").unwrap();
    assert!(pass.spans.iter().all(|s| s.end() <= body));
}

#[test]
fn test_bold_and_italic_do_not_overlap() {
    let text = "**bold** and *italic*";
    let pass = pass(text);

    assert_eq!(covered(text, &pass, RuleKind::Bold), vec!["**bold**"]);
    assert_eq!(covered(text, &pass, RuleKind::Italic), vec!["*italic*"]);

    let bold = pass.spans_for(RuleKind::Bold).next().unwrap();
    let italic = pass.spans_for(RuleKind::Italic).next().unwrap();
    assert!(bold.end() <= italic.start);
}

#[test]
fn test_oversized_document_is_not_styled() {
    let text = "a".repeat(60_000);
    let pass = pass(&text);
    assert!(pass.oversized);
    assert_eq!(pass.rules_run, 0);
    assert!(pass.spans.is_empty());
}

#[test]
fn test_document_under_limit_runs_all_rules() {
    let mut text = String::from("# heading\n");
    text.push_str(&"b".repeat(49_999 - text.len()));
    assert_eq!(text.chars().count(), 49_999);

    let pass = pass(&text);
    assert!(!pass.oversized);
    assert_eq!(pass.rules_run, 9);
    assert_eq!(pass.spans_for(RuleKind::Header).count(), 1);
}

#[test]
fn test_size_guard_counts_chars_not_bytes() {
    // 30,000 chars, 60,000 bytes
    let text = "é".repeat(30_000);
    let pass = pass(&text);
    assert!(!pass.oversized);
    assert_eq!(pass.rules_run, 9);
}

#[test]
fn test_match_cap_per_rule() {
    let text = "`x` ".repeat(1_500);
    let pass = pass(&text);

    assert_eq!(pass.spans_for(RuleKind::InlineCode).count(), 1_000);
    assert_eq!(pass.capped, vec![RuleKind::InlineCode]);
}

#[test]
fn test_configured_cap_is_used() {
    let text = "- a\n".repeat(20);
    let mut registry = PatternRegistry::new();
    let limits = PassLimits {
        max_document_chars: 50_000,
        max_matches_per_rule: 5,
    };
    let pass = highlight_text(&text, &mut registry, &palette(), &limits);
    assert_eq!(pass.spans_for(RuleKind::List).count(), 5);
}

// ========================================================================
// Mixed documents
// ========================================================================

#[test]
fn test_mixed_document() {
    let text = "\
# Notes

> quoted line
- item one
1. first
---
See [docs](https://example.com) or <https://example.org>.
Use `cargo` here.
```
let x = 1;
```
";
    let pass = pass(text);

    assert_eq!(covered(text, &pass, RuleKind::Header), vec!["# Notes"]);
    assert_eq!(covered(text, &pass, RuleKind::Quote), vec!["> quoted line"]);
    assert_eq!(covered(text, &pass, RuleKind::List), vec!["- ", "1. "]);
    assert_eq!(covered(text, &pass, RuleKind::HorizontalRule), vec!["---"]);
    assert_eq!(
        covered(text, &pass, RuleKind::Link),
        vec!["[docs](https://example.com)", "<https://example.org>"]
    );
    assert_eq!(covered(text, &pass, RuleKind::InlineCode), vec!["`cargo`"]);
    assert_eq!(
        covered(text, &pass, RuleKind::CodeBlock),
        vec!["```\nlet x = 1;\n```"]
    );
    assert!(pass.failures.is_empty());
}

#[test]
fn test_bare_double_hash_is_a_header() {
    let text = "##\n#no space";
    let pass = pass(text);
    assert_eq!(covered(text, &pass, RuleKind::Header), vec!["##"]);
}

#[test]
fn test_spans_are_ordered_by_rule() {
    let text = "# *a* `b`";
    let pass = pass(text);
    let order: Vec<_> = pass.spans.iter().map(|s| s.rule).collect();
    assert_eq!(
        order,
        vec![RuleKind::InlineCode, RuleKind::Header, RuleKind::Italic]
    );
}

// ========================================================================
// Applied output
// ========================================================================

#[test]
fn test_pass_is_idempotent() {
    let text = "# Title\n**bold** and *italic*\n> q\n- [x](y)";
    let mut coordinator = HighlightCoordinator::default();
    let mut buffer = StyledBuffer::new(text, palette().base);

    assert!(coordinator.force_pass(&mut buffer).is_completed());
    let first = buffer.runs().to_vec();
    assert!(coordinator.force_pass(&mut buffer).is_completed());

    assert_eq!(buffer.runs(), first.as_slice());
}

#[test]
fn test_later_rules_paint_over_earlier_ones() {
    // The header run is split by the bold run painted after it
    let text = "# a **b** c";
    let mut coordinator = HighlightCoordinator::default();
    let mut buffer = StyledBuffer::new(text, palette().base);
    coordinator.force_pass(&mut buffer);

    assert_eq!(run_texts(&buffer), vec!["# a ", "**b**", " c"]);
    assert_eq!(buffer.style_at(5), palette().bold);
    assert_eq!(buffer.style_at(0), *palette().header(1));
}
