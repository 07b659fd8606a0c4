//! Lesson content blocks.
//!
//! A lesson body is an ordered sequence of [`ContentBlock`]s, authored
//! offline and shipped as static JSON artifacts. The set of tags is
//! closed from the authoring side, but documents and renderer version
//! independently: a tag this build does not know deserializes to
//! [`ContentBlock::Unknown`] and renders as nothing instead of failing
//! the whole lesson.

use serde::{Deserialize, Serialize};

/// One atomic unit of lesson content, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Top-level heading. Headings never expand inline markup.
    H1 { text: String },

    /// Section heading
    H2 { text: String },

    /// Sub-section heading
    H3 { text: String },

    /// Body text; inline markup expanded
    Paragraph { text: String },

    /// Ordered or unordered list; each item independently markup-expanded
    List {
        items: Vec<String>,
        #[serde(default)]
        ordered: bool,
    },

    /// Quoted text; markup expanded
    Blockquote { text: String },

    /// Visual separator
    Divider,

    /// Highlighted aside; unrecognized `variant` falls back to the
    /// default treatment, never an error
    Callout {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant: Option<String>,
        text: String,
    },

    /// Tabular comparison with column headers and badged rows
    Breakdown {
        labels: BreakdownLabels,
        items: Vec<BreakdownRow>,
    },

    /// Collapsible disclosure; content shown verbatim, newline-preserving
    Accordion { title: String, content: String },

    /// Vertical stack of answer-choice-like items. Correctness is a
    /// content convention (a literal marker substring in the item text),
    /// not a structured field.
    Options { items: Vec<String> },

    /// Numbered step sequence, no markup expansion
    Process { steps: Vec<String> },

    /// Any tag this build does not recognize
    #[serde(other)]
    Unknown,
}

/// Column headers for a breakdown table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLabels {
    /// Header for the row-title column, e.g. "Structure Type"
    pub title: String,
    /// Header for the row-body column, e.g. "Identification Strategy"
    pub text: String,
}

/// One row of a breakdown table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    /// Row title (left column)
    pub title: String,

    /// Row body (right column); markup-expanded, newlines become line breaks
    pub text: String,

    /// Optional short tag shown next to the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    /// Badge color, "green" or "red"; anything else uses the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_color: Option<String>,
}

impl ContentBlock {
    /// The authoring-side tag for this block
    pub fn tag(&self) -> &'static str {
        match self {
            ContentBlock::H1 { .. } => "h1",
            ContentBlock::H2 { .. } => "h2",
            ContentBlock::H3 { .. } => "h3",
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::List { .. } => "list",
            ContentBlock::Blockquote { .. } => "blockquote",
            ContentBlock::Divider => "divider",
            ContentBlock::Callout { .. } => "callout",
            ContentBlock::Breakdown { .. } => "breakdown",
            ContentBlock::Accordion { .. } => "accordion",
            ContentBlock::Options { .. } => "options",
            ContentBlock::Process { .. } => "process",
            ContentBlock::Unknown => "unknown",
        }
    }
}
