//! Example feedback lists → annotated blocks.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Which list an example belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleCategory {
    Positive,
    Negative,
}

impl ExampleCategory {
    pub fn icon(self) -> &'static str {
        match self {
            ExampleCategory::Positive => "✅",
            ExampleCategory::Negative => "⚠️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExampleCategory::Positive => "positive",
            ExampleCategory::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExampleBlock {
    Example {
        category: ExampleCategory,
        icon: String,
        text: String,
    },
    /// Stand-in when the list is empty.
    Empty { category: ExampleCategory },
}

impl ExampleBlock {
    /// Plain-text rendering: icon + text, or the fallback sentence.
    pub fn display_text(&self) -> String {
        match self {
            ExampleBlock::Example { icon, text, .. } => format!("{icon} {text}"),
            ExampleBlock::Empty { category } => {
                format!("No {} examples found.", category.label())
            }
        }
    }
}

/// Rendered list for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleMarkup {
    pub category: ExampleCategory,
    pub blocks: Vec<ExampleBlock>,
}

impl ExampleMarkup {
    /// HTML fragment; example text is escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                ExampleBlock::Example {
                    category,
                    icon,
                    text,
                } => {
                    let _ = write!(
                        out,
                        "<div class=\"example-feedback {}\">{} {}</div>",
                        category.label(),
                        icon,
                        escape_html(text)
                    );
                }
                ExampleBlock::Empty { .. } => {
                    let _ = write!(out, "<p>{}</p>", block.display_text());
                }
            }
        }
        out
    }
}

/// One block per example in input order; one fallback block if empty.
pub fn render_examples(examples: &[String], category: ExampleCategory) -> ExampleMarkup {
    let blocks = if examples.is_empty() {
        vec![ExampleBlock::Empty { category }]
    } else {
        examples
            .iter()
            .map(|text| ExampleBlock::Example {
                category,
                icon: category.icon().to_string(),
                text: text.clone(),
            })
            .collect()
    };
    ExampleMarkup { category, blocks }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_yields_one_fallback() {
        let markup = render_examples(&[], ExampleCategory::Positive);
        assert_eq!(
            markup.blocks,
            vec![ExampleBlock::Empty {
                category: ExampleCategory::Positive
            }]
        );
        assert_eq!(markup.to_html(), "<p>No positive examples found.</p>");
    }

    #[test]
    fn one_block_per_example_in_order() {
        let examples = vec!["first".to_string(), "second".to_string()];
        let markup = render_examples(&examples, ExampleCategory::Negative);
        let texts: Vec<String> = markup.blocks.iter().map(|b| b.display_text()).collect();
        assert_eq!(texts, vec!["⚠️ first", "⚠️ second"]);
        assert_eq!(
            markup.blocks[0],
            ExampleBlock::Example {
                category: ExampleCategory::Negative,
                icon: "⚠️".to_string(),
                text: "first".to_string(),
            }
        );
    }

    #[test]
    fn html_escapes_example_text() {
        let examples = vec!["<b>bold</b> & \"quoted\"".to_string()];
        let html = render_examples(&examples, ExampleCategory::Positive).to_html();
        assert_eq!(
            html,
            "<div class=\"example-feedback positive\">✅ &lt;b&gt;bold&lt;/b&gt; &amp; &quot;quoted&quot;</div>"
        );
    }
}
