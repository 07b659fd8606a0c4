//! Pure rendering of content blocks to presentation nodes.
//!
//! [`render`] is a total function over every declared block tag: no side
//! effects, no state, no I/O. Unrecognized tags render to
//! [`Rendered::Empty`] so content authored against a newer schema
//! degrades to nothing instead of failing.
//!
//! Markup expansion applies exactly where the schema says it does:
//! paragraph, list items, blockquote, callout text, and breakdown row
//! bodies. Headings, accordion content, options, and process steps are
//! verbatim.

pub mod html;
pub mod markup;

use serde::Serialize;

use crate::domain::{BreakdownRow, ContentBlock};

pub use html::{block_html, lesson_html, node_html};
pub use markup::{expand, expand_lines, Inline};

/// Marker substring that flags an options item as the correct answer.
///
/// This is a content convention carried by existing authored lessons,
/// not a structured field. Any item whose raw text contains this
/// substring is highlighted as correct.
pub const CORRECT_MARKER: &str = "(Correct)";

/// Visual treatment for a callout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutStyle {
    /// The "summary" treatment
    Summary,

    /// Everything else, including absent or unrecognized variants
    Default,
}

impl CalloutStyle {
    fn from_variant(variant: Option<&str>) -> Self {
        match variant {
            Some("summary") => CalloutStyle::Summary,
            _ => CalloutStyle::Default,
        }
    }
}

/// Badge color for a breakdown row. Unrecognized colors fall back to
/// the default (green) treatment, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeStyle {
    Green,
    Red,
}

impl BadgeStyle {
    fn from_color(color: Option<&str>) -> Self {
        match color {
            Some("red") => BadgeStyle::Red,
            _ => BadgeStyle::Green,
        }
    }
}

/// One rendered row of a breakdown table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownCell {
    pub title: String,
    pub badge: Option<(String, BadgeStyle)>,
    pub body: Vec<Inline>,
}

/// One rendered options item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceItem {
    pub text: String,
    pub correct: bool,
}

/// Presentation node produced by [`render`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "node")]
pub enum Rendered {
    /// Explicit no-output value for unrecognized tags
    Empty,

    Heading {
        /// 1, 2, or 3
        level: u8,
        text: String,
    },

    Paragraph {
        spans: Vec<Inline>,
    },

    List {
        ordered: bool,
        items: Vec<Vec<Inline>>,
    },

    Blockquote {
        spans: Vec<Inline>,
    },

    Divider,

    Callout {
        title: Option<String>,
        style: CalloutStyle,
        spans: Vec<Inline>,
    },

    Breakdown {
        title_label: String,
        text_label: String,
        rows: Vec<BreakdownCell>,
    },

    Accordion {
        title: String,
        /// Shown verbatim, newline-preserving, no markup expansion
        content: String,
    },

    Options {
        items: Vec<ChoiceItem>,
    },

    Process {
        steps: Vec<String>,
    },
}

impl Rendered {
    /// Whether this node produces no visible output
    pub fn is_empty(&self) -> bool {
        matches!(self, Rendered::Empty)
    }
}

fn render_row(row: &BreakdownRow) -> BreakdownCell {
    BreakdownCell {
        title: row.title.clone(),
        badge: row
            .badge
            .as_ref()
            .map(|b| (b.clone(), BadgeStyle::from_color(row.badge_color.as_deref()))),
        body: expand_lines(&row.text),
    }
}

/// Render one content block to a presentation node
pub fn render(block: &ContentBlock) -> Rendered {
    match block {
        ContentBlock::H1 { text } => Rendered::Heading {
            level: 1,
            text: text.clone(),
        },
        ContentBlock::H2 { text } => Rendered::Heading {
            level: 2,
            text: text.clone(),
        },
        ContentBlock::H3 { text } => Rendered::Heading {
            level: 3,
            text: text.clone(),
        },
        ContentBlock::Paragraph { text } => Rendered::Paragraph {
            spans: expand(text),
        },
        ContentBlock::List { items, ordered } => Rendered::List {
            ordered: *ordered,
            items: items.iter().map(|i| expand(i)).collect(),
        },
        ContentBlock::Blockquote { text } => Rendered::Blockquote {
            spans: expand(text),
        },
        ContentBlock::Divider => Rendered::Divider,
        ContentBlock::Callout {
            title,
            variant,
            text,
        } => Rendered::Callout {
            title: title.clone(),
            style: CalloutStyle::from_variant(variant.as_deref()),
            spans: expand(text),
        },
        ContentBlock::Breakdown { labels, items } => Rendered::Breakdown {
            title_label: labels.title.clone(),
            text_label: labels.text.clone(),
            rows: items.iter().map(render_row).collect(),
        },
        ContentBlock::Accordion { title, content } => Rendered::Accordion {
            title: title.clone(),
            content: content.clone(),
        },
        ContentBlock::Options { items } => Rendered::Options {
            items: items
                .iter()
                .map(|i| ChoiceItem {
                    text: i.clone(),
                    correct: i.contains(CORRECT_MARKER),
                })
                .collect(),
        },
        ContentBlock::Process { steps } => Rendered::Process {
            steps: steps.clone(),
        },
        ContentBlock::Unknown => Rendered::Empty,
    }
}
