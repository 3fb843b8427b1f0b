//! Markdown highlight rules and the pass that runs them
//!
//! Every rule scans the whole text snapshot. Rules run in a fixed order and
//! later rules paint over earlier ones, so the order is part of the output.

use std::fmt;

use serde::Serialize;

use super::patterns::PatternRegistry;
use super::style::{MarkdownPalette, StyleSpan, TextStyle};

/// One highlighting rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    CodeBlock,
    InlineCode,
    Header,
    Link,
    Bold,
    Italic,
    Quote,
    List,
    HorizontalRule,
}

/// Order in which a pass runs the rules.
///
/// Italic must follow Bold: its lookarounds only reject `**`, they do not
/// understand bold spans.
pub const RULE_ORDER: [RuleKind; 9] = [
    RuleKind::CodeBlock,
    RuleKind::InlineCode,
    RuleKind::Header,
    RuleKind::Link,
    RuleKind::Bold,
    RuleKind::Italic,
    RuleKind::Quote,
    RuleKind::List,
    RuleKind::HorizontalRule,
];

/// A regex sub-pattern of a rule and the capture group that gets styled
struct RulePattern {
    source: &'static str,
    group: usize,
}

const CODE_BLOCK_PATTERNS: &[RulePattern] = &[RulePattern {
    source: r"```[\s\S]*?```",
    group: 0,
}];

const INLINE_CODE_PATTERNS: &[RulePattern] = &[RulePattern {
    source: r"(?<!`)`[^`\n]+`(?!`)",
    group: 0,
}];

const LINK_PATTERNS: &[RulePattern] = &[
    RulePattern {
        source: r"\[[^\]\n]+\]\([^)\n]+\)",
        group: 0,
    },
    RulePattern {
        source: r"<https?://[^>\s]+>",
        group: 0,
    },
];

const BOLD_PATTERNS: &[RulePattern] = &[RulePattern {
    source: r"(?<!\*)\*\*(?!\*).+?(?<!\*)\*\*(?!\*)",
    group: 0,
}];

const ITALIC_PATTERNS: &[RulePattern] = &[RulePattern {
    source: r"(?<!\*)\*(?!\*)[^*\n]+?(?<!\*)\*(?!\*)",
    group: 0,
}];

const LIST_PATTERNS: &[RulePattern] = &[
    RulePattern {
        source: r"(?m)^[ \t]*([-*+][ \t])",
        group: 1,
    },
    RulePattern {
        source: r"(?m)^[ \t]*(\d+\.[ \t])",
        group: 1,
    },
];

const HORIZONTAL_RULE_PATTERNS: &[RulePattern] = &[RulePattern {
    source: r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*\r?$",
    group: 0,
}];

impl RuleKind {
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::CodeBlock => "code_block",
            RuleKind::InlineCode => "inline_code",
            RuleKind::Header => "header",
            RuleKind::Link => "link",
            RuleKind::Bold => "bold",
            RuleKind::Italic => "italic",
            RuleKind::Quote => "quote",
            RuleKind::List => "list",
            RuleKind::HorizontalRule => "horizontal_rule",
        }
    }

    /// Regex sub-patterns; empty for the line-scanning rules
    fn patterns(self) -> &'static [RulePattern] {
        match self {
            RuleKind::CodeBlock => CODE_BLOCK_PATTERNS,
            RuleKind::InlineCode => INLINE_CODE_PATTERNS,
            RuleKind::Link => LINK_PATTERNS,
            RuleKind::Bold => BOLD_PATTERNS,
            RuleKind::Italic => ITALIC_PATTERNS,
            RuleKind::List => LIST_PATTERNS,
            RuleKind::HorizontalRule => HORIZONTAL_RULE_PATTERNS,
            RuleKind::Header | RuleKind::Quote => &[],
        }
    }

    /// Source strings of every regex the rule uses
    pub fn pattern_sources(self) -> impl Iterator<Item = &'static str> {
        self.patterns().iter().map(|p| p.source)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounds on how much work one pass may do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassLimits {
    /// Longer documents (in characters) are left unstyled
    pub max_document_chars: usize,
    /// Matches past this count are dropped, per rule
    pub max_matches_per_rule: usize,
}

impl PassLimits {
    pub const DEFAULT: PassLimits = PassLimits {
        max_document_chars: 50_000,
        max_matches_per_rule: 1_000,
    };
}

impl Default for PassLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Why a rule stopped early
#[derive(Debug)]
pub enum RuleError {
    /// The pattern failed to compile
    Compile {
        pattern: &'static str,
        source: fancy_regex::Error,
    },
    /// The matcher gave up while scanning (e.g. backtrack limit)
    Match {
        pattern: &'static str,
        source: fancy_regex::Error,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::Compile { pattern, source } => {
                write!(f, "pattern {:?} failed to compile: {}", pattern, source)
            }
            RuleError::Match { pattern, source } => {
                write!(f, "matching {:?} failed: {}", pattern, source)
            }
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuleError::Compile { source, .. } | RuleError::Match { source, .. } => Some(source),
        }
    }
}

/// A rule that failed part-way through a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFailure {
    pub rule: RuleKind,
    pub message: String,
}

/// Result of running every rule over one text snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightPass {
    /// Spans in application order
    pub spans: Vec<StyleSpan>,
    /// Rules that were executed (0 when the size guard tripped)
    pub rules_run: usize,
    /// Rules that hit the match cap
    pub capped: Vec<RuleKind>,
    pub failures: Vec<RuleFailure>,
    /// The size guard skipped the pass
    pub oversized: bool,
}

impl HighlightPass {
    /// Spans produced by one rule
    pub fn spans_for(&self, rule: RuleKind) -> impl Iterator<Item = &StyleSpan> {
        self.spans.iter().filter(move |s| s.rule == rule)
    }
}

/// Collects spans for one rule until the match cap is reached
struct SpanSink<'a> {
    spans: &'a mut Vec<StyleSpan>,
    rule: RuleKind,
    remaining: usize,
    capped: bool,
}

impl SpanSink<'_> {
    /// Record a span; returns false once the cap is hit and scanning should stop
    fn push(&mut self, start: usize, len: usize, style: TextStyle) -> bool {
        if self.remaining == 0 {
            self.capped = true;
            return false;
        }
        self.remaining -= 1;
        self.spans.push(StyleSpan {
            start,
            len,
            rule: self.rule,
            style,
        });
        true
    }
}

/// Run every rule over `text` and return the spans to apply, in order.
///
/// Pure: reads only its arguments (plus the pattern cache) and never touches
/// a surface. A failing rule is logged and recorded; the remaining rules still run.
pub fn highlight_text(
    text: &str,
    registry: &mut PatternRegistry,
    palette: &MarkdownPalette,
    limits: &PassLimits,
) -> HighlightPass {
    run_rules(text, registry, palette, limits, RuleKind::patterns)
}

/// Source of the regex sub-patterns for each rule
type PatternTable = fn(RuleKind) -> &'static [RulePattern];

fn run_rules(
    text: &str,
    registry: &mut PatternRegistry,
    palette: &MarkdownPalette,
    limits: &PassLimits,
    patterns: PatternTable,
) -> HighlightPass {
    let mut pass = HighlightPass::default();

    let char_count = text.chars().count();
    if char_count > limits.max_document_chars {
        tracing::debug!(
            "Skipping highlight pass: {} chars exceeds limit of {}",
            char_count,
            limits.max_document_chars
        );
        pass.oversized = true;
        return pass;
    }

    for rule in RULE_ORDER {
        pass.rules_run += 1;
        let mut sink = SpanSink {
            spans: &mut pass.spans,
            rule,
            remaining: limits.max_matches_per_rule,
            capped: false,
        };

        let errors = match rule {
            RuleKind::Header => {
                scan_headers(text, palette, &mut sink);
                Vec::new()
            }
            RuleKind::Quote => {
                scan_quotes(text, palette, &mut sink);
                Vec::new()
            }
            _ => scan_patterns(
                patterns(rule),
                text,
                registry,
                palette.for_rule(rule),
                &mut sink,
            ),
        };

        if sink.capped {
            tracing::debug!(
                "Rule {} hit the cap of {} matches",
                rule,
                limits.max_matches_per_rule
            );
            pass.capped.push(rule);
        }

        for e in errors {
            tracing::warn!("Highlight rule {} failed: {}", rule, e);
            pass.failures.push(RuleFailure {
                rule,
                message: e.to_string(),
            });
        }
    }

    pass
}

/// Scan each sub-pattern in turn. A pattern that fails only loses its own
/// matches; the next pattern still runs.
fn scan_patterns(
    patterns: &[RulePattern],
    text: &str,
    registry: &mut PatternRegistry,
    style: &TextStyle,
    sink: &mut SpanSink<'_>,
) -> Vec<RuleError> {
    let mut errors = Vec::new();

    'patterns: for pattern in patterns {
        let regex = match registry.get_or_compile(pattern.source) {
            Ok(regex) => regex,
            Err(source) => {
                errors.push(RuleError::Compile {
                    pattern: pattern.source,
                    source,
                });
                continue;
            }
        };

        for captures in regex.captures_iter(text) {
            let captures = match captures {
                Ok(captures) => captures,
                Err(source) => {
                    errors.push(RuleError::Match {
                        pattern: pattern.source,
                        source,
                    });
                    continue 'patterns;
                }
            };
            let Some(m) = captures.get(pattern.group) else {
                continue;
            };
            if !sink.push(m.start(), m.end() - m.start(), *style) {
                break 'patterns;
            }
        }
    }

    errors
}

/// Iterate lines as (byte offset of line start, line content without the terminator)
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0usize, |offset, raw| {
        let start = *offset;
        *offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Some((start, line))
    })
}

/// Header level for a line, if it is an ATX header.
///
/// 1-6 leading `#` followed by a space. A bare `##` with nothing after it
/// also counts as level 2.
pub(crate) fn header_level(line: &str) -> Option<u8> {
    let trimmed = line.trim_start();
    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }

    let followed_by_space = trimmed.as_bytes().get(hashes) == Some(&b' ');
    let bare_level_two = hashes == 2 && trimmed.trim_end().len() == 2;
    if followed_by_space || bare_level_two {
        Some(hashes as u8)
    } else {
        None
    }
}

fn scan_headers(text: &str, palette: &MarkdownPalette, sink: &mut SpanSink<'_>) {
    for (line_start, line) in lines_with_offsets(text) {
        let Some(level) = header_level(line) else {
            continue;
        };
        let indent = line.len() - line.trim_start().len();
        let len = line.trim().len();
        if !sink.push(line_start + indent, len, *palette.header(level)) {
            return;
        }
    }
}

fn scan_quotes(text: &str, palette: &MarkdownPalette, sink: &mut SpanSink<'_>) {
    for (line_start, line) in lines_with_offsets(text) {
        let trimmed = line.trim_start();
        if !trimmed.starts_with('>') {
            continue;
        }
        let indent = line.len() - trimmed.len();
        let len = trimmed.trim_end().len();
        if !sink.push(line_start + indent, len, palette.quote) {
            return;
        }
    }
}
