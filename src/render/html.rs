//! HTML serialization of rendered nodes.
//!
//! Output is a trusted HTML fragment: library content originates only
//! from the internal authoring build step, never from end users, so no
//! escaping or sanitization is performed. That trust boundary must hold
//! for every content source wired into a store.

use crate::domain::Lesson;

use super::{render, BadgeStyle, CalloutStyle, Inline, Rendered};

/// Serialize a span list
fn inline_html(spans: &[Inline]) -> String {
    let mut out = String::new();

    for span in spans {
        match span {
            Inline::Text(t) => out.push_str(t),
            Inline::Strong(t) => {
                out.push_str("<strong>");
                out.push_str(t);
                out.push_str("</strong>");
            }
            Inline::Emphasis(t) => {
                out.push_str("<em>");
                out.push_str(t);
                out.push_str("</em>");
            }
            Inline::LineBreak => out.push_str("<br>"),
        }
    }

    out
}

/// Serialize one rendered node to an HTML fragment
pub fn node_html(node: &Rendered) -> String {
    match node {
        Rendered::Empty => String::new(),
        Rendered::Heading { level, text } => format!("<h{0}>{1}</h{0}>", level, text),
        Rendered::Paragraph { spans } => format!("<p>{}</p>", inline_html(spans)),
        Rendered::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let body: String = items
                .iter()
                .map(|i| format!("<li>{}</li>", inline_html(i)))
                .collect();
            format!("<{0}>{1}</{0}>", tag, body)
        }
        Rendered::Blockquote { spans } => {
            format!("<blockquote>{}</blockquote>", inline_html(spans))
        }
        Rendered::Divider => "<hr>".to_string(),
        Rendered::Callout {
            title,
            style,
            spans,
        } => {
            let class = match style {
                CalloutStyle::Summary => "callout callout-summary",
                CalloutStyle::Default => "callout",
            };
            let title_html = title
                .as_ref()
                .map(|t| format!("<div class=\"callout-title\">{}</div>", t))
                .unwrap_or_default();
            format!(
                "<aside class=\"{}\">{}<div class=\"callout-body\">{}</div></aside>",
                class,
                title_html,
                inline_html(spans)
            )
        }
        Rendered::Breakdown {
            title_label,
            text_label,
            rows,
        } => {
            let mut out = format!(
                "<table class=\"breakdown\"><thead><tr><th>{}</th><th>{}</th></tr></thead><tbody>",
                title_label, text_label
            );
            for row in rows {
                let badge = row
                    .badge
                    .as_ref()
                    .map(|(text, style)| {
                        let class = match style {
                            BadgeStyle::Green => "badge badge-green",
                            BadgeStyle::Red => "badge badge-red",
                        };
                        format!(" <span class=\"{}\">{}</span>", class, text)
                    })
                    .unwrap_or_default();
                out.push_str(&format!(
                    "<tr><td>{}{}</td><td>{}</td></tr>",
                    row.title,
                    badge,
                    inline_html(&row.body)
                ));
            }
            out.push_str("</tbody></table>");
            out
        }
        Rendered::Accordion { title, content } => format!(
            "<details class=\"accordion\"><summary>{}</summary><div class=\"accordion-body\">{}</div></details>",
            title, content
        ),
        Rendered::Options { items } => {
            let body: String = items
                .iter()
                .map(|item| {
                    let class = if item.correct {
                        "option option-correct"
                    } else {
                        "option"
                    };
                    format!("<div class=\"{}\">{}</div>", class, item.text)
                })
                .collect();
            format!("<div class=\"options\">{}</div>", body)
        }
        Rendered::Process { steps } => {
            let body: String = steps
                .iter()
                .map(|s| format!("<li>{}</li>", s))
                .collect();
            format!("<ol class=\"process\">{}</ol>", body)
        }
    }
}

/// Render a content block straight to an HTML fragment
pub fn block_html(block: &crate::domain::ContentBlock) -> String {
    node_html(&render(block))
}

/// Render a whole lesson to an HTML fragment, one node per block
pub fn lesson_html(lesson: &Lesson) -> String {
    lesson
        .content
        .iter()
        .map(block_html)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentBlock;

    #[test]
    fn test_paragraph_markup_html() {
        let html = block_html(&ContentBlock::Paragraph {
            text: "**bold** and *italic*".into(),
        });
        assert_eq!(html, "<p><strong>bold</strong> and <em>italic</em></p>");
    }

    #[test]
    fn test_unknown_tag_emits_nothing() {
        assert_eq!(block_html(&ContentBlock::Unknown), "");
    }

    #[test]
    fn test_options_correct_class() {
        let html = block_html(&ContentBlock::Options {
            items: vec!["(A) wrong".into(), "(B) right (Correct)".into()],
        });
        assert!(html.contains("<div class=\"option\">(A) wrong</div>"));
        assert!(html.contains("<div class=\"option option-correct\">(B) right (Correct)</div>"));
    }

    #[test]
    fn test_lesson_html_joins_blocks() {
        let lesson = Lesson {
            id: "21-3".into(),
            title: "Pattern Recognition".into(),
            content: vec![
                ContentBlock::H3 {
                    text: "Pattern Recognition: Clues in the Passage and Answers".into(),
                },
                ContentBlock::Divider,
            ],
        };

        let html = lesson_html(&lesson);
        assert!(html.starts_with("<h3>Pattern Recognition"));
        assert!(html.ends_with("<hr>"));
    }
}
