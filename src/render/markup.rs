//! Inline markup expansion for authored text.
//!
//! Authored text supports exactly two inline markers: `**bold**` and
//! `*italic*`. Both are non-nesting, matched lazily, first-match-wins
//! left to right. The bold pass runs before the italic pass so the
//! single-marker pattern cannot consume half of a double-marker pair;
//! text inside a matched bold span is kept literal.
//!
//! Expansion produces a span list rather than spliced markup strings, so
//! serializers render each span by kind.

use serde::Serialize;

/// One inline span of expanded text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "text")]
pub enum Inline {
    /// Plain text
    Text(String),

    /// Bold span (from `**...**`)
    Strong(String),

    /// Italic span (from `*...*`)
    Emphasis(String),

    /// Hard line break (from a newline in multi-line fields)
    #[serde(rename = "br")]
    LineBreak,
}

/// Expand inline markers in a single line of text
pub fn expand(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();

    for piece in strong_pass(text) {
        match piece {
            Inline::Text(t) => emphasis_pass(&t, &mut spans),
            other => spans.push(other),
        }
    }

    spans
}

/// Expand inline markers in a multi-line field, turning each newline
/// into a hard line break. Used for breakdown row bodies.
pub fn expand_lines(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            spans.push(Inline::LineBreak);
        }
        spans.extend(expand(line));
    }

    spans
}

fn push_text(spans: &mut Vec<Inline>, text: &str) {
    if !text.is_empty() {
        spans.push(Inline::Text(text.to_string()));
    }
}

/// Find the lazy closing position of `marker` in `rest`, requiring a
/// non-empty span (mirrors a lazy `(.+?)` between the delimiters).
fn find_close(rest: &str, marker: &str) -> Option<usize> {
    match rest.find(marker) {
        // Empty span: the next marker char belongs to the content
        Some(0) => rest[1..].find(marker).map(|i| i + 1),
        other => other,
    }
}

/// Split out `**...**` spans; everything else stays as text
fn strong_pass(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        match find_close(after, "**") {
            Some(close) => {
                push_text(&mut spans, &rest[..open]);
                spans.push(Inline::Strong(after[..close].to_string()));
                rest = &after[close + 2..];
            }
            // Unpaired opener: the rest is literal
            None => break,
        }
    }

    push_text(&mut spans, rest);
    spans
}

/// Split out `*...*` spans from a text segment
fn emphasis_pass(text: &str, spans: &mut Vec<Inline>) {
    let mut rest = text;

    while let Some(open) = rest.find('*') {
        let after = &rest[open + 1..];
        match find_close(after, "*") {
            Some(close) => {
                push_text(spans, &rest[..open]);
                spans.push(Inline::Emphasis(after[..close].to_string()));
                rest = &after[close + 1..];
            }
            None => break,
        }
    }

    push_text(spans, rest);
}
