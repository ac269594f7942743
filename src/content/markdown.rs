//! Markdown-lite rendering
//!
//! Post bodies are written in a constrained markdown subset: `#`/`##`/`###`
//! headings, `**bold**` spans, `- ` unordered items and `N. ` ordered items.
//! Every other non-blank line is a paragraph. The renderer works in two
//! passes: [`classify`] tags each line, then [`MarkdownLite::render`] folds
//! the tagged lines into HTML, opening and closing `<ul>`/`<ol>` wrappers
//! around runs of consecutive list items.
//!
//! Rendering never fails. A stray `**` or a line like `1` with no period is
//! not an error; it falls through to the paragraph rule.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ORDERED_ITEM_RE: Regex = Regex::new(r"^\d+\. (.*)$").unwrap();
}

// Classes carried over from the site's stylesheet. Output markup is styled
// entirely through these; the renderer emits no inline styles.
const H1_CLASS: &str = "text-3xl font-bold text-gray-900 mt-8 mb-4";
const H2_CLASS: &str = "text-2xl font-semibold text-gray-900 mt-6 mb-3";
const H3_CLASS: &str = "text-xl font-medium text-gray-900 mt-4 mb-2";
const STRONG_CLASS: &str = "font-semibold text-gray-900";
const LI_CLASS: &str = "ml-4 mb-2";
const LI_ORDERED_CLASS: &str = "ml-4 mb-2 list-decimal";
const P_CLASS: &str = "mb-4 leading-relaxed";

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `# `, `## ` or `### ` at the start of the raw line.
    Heading { level: u8, text: String },
    /// `- text` or `N. text` on the trimmed line.
    ListItem { ordered: bool, text: String },
    /// Whitespace-only line.
    Blank,
    /// Anything else, kept verbatim.
    Plain(String),
}

/// Classify one raw line. Heading markers match on the raw line start,
/// list markers on the trimmed line; a line can never match both.
pub fn classify(line: &str) -> Line {
    if let Some(rest) = line.strip_prefix("### ") {
        return Line::Heading {
            level: 3,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Line::Heading {
            level: 2,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return Line::Heading {
            level: 1,
            text: rest.to_string(),
        };
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if let Some(rest) = trimmed.strip_prefix("- ") {
        return Line::ListItem {
            ordered: false,
            text: rest.to_string(),
        };
    }
    if let Some(caps) = ORDERED_ITEM_RE.captures(trimmed) {
        return Line::ListItem {
            ordered: true,
            text: caps[1].to_string(),
        };
    }

    Line::Plain(line.to_string())
}

/// Replace every `**X**` span with a `<strong>` tag. Non-greedy, non-nested.
fn bold_spans(text: &str) -> String {
    let replacement = format!(r#"<strong class="{}">$1</strong>"#, STRONG_CLASS);
    BOLD_RE.replace_all(text, replacement.as_str()).into_owned()
}

/// Markdown-lite renderer.
///
/// Pure function of its input; safe to call from concurrent render paths.
#[derive(Debug, Clone, Default)]
pub struct MarkdownLite;

impl MarkdownLite {
    pub fn new() -> Self {
        Self
    }

    /// Render a post body to HTML.
    ///
    /// Every input produces output, including the empty string (which
    /// renders as a single line break, the same as one blank line).
    pub fn render(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len() * 2);
        let mut in_ul = false;
        let mut in_ol = false;

        for raw in content.split('\n') {
            let line = classify(raw);

            // Any line that does not continue the current run closes it
            // before the line itself is emitted.
            match &line {
                Line::ListItem { ordered: false, .. } => {
                    if in_ol {
                        out.push_str("</ol>");
                        in_ol = false;
                    }
                    if !in_ul {
                        out.push_str("<ul>");
                        in_ul = true;
                    }
                }
                Line::ListItem { ordered: true, .. } => {
                    if in_ul {
                        out.push_str("</ul>");
                        in_ul = false;
                    }
                    if !in_ol {
                        out.push_str("<ol>");
                        in_ol = true;
                    }
                }
                _ => {
                    if in_ul {
                        out.push_str("</ul>");
                        in_ul = false;
                    }
                    if in_ol {
                        out.push_str("</ol>");
                        in_ol = false;
                    }
                }
            }

            match line {
                Line::Heading { level, text } => {
                    let class = match level {
                        1 => H1_CLASS,
                        2 => H2_CLASS,
                        _ => H3_CLASS,
                    };
                    out.push_str(&format!(
                        r#"<h{level} class="{class}">{text}</h{level}>"#,
                        level = level,
                        class = class,
                        text = bold_spans(&text),
                    ));
                }
                Line::ListItem { ordered, text } => {
                    let class = if ordered { LI_ORDERED_CLASS } else { LI_CLASS };
                    out.push_str(&format!(
                        r#"<li class="{}">{}</li>"#,
                        class,
                        bold_spans(&text)
                    ));
                }
                Line::Blank => out.push_str("<br>"),
                Line::Plain(text) => {
                    // Wrap decision is made on the raw line, before bold
                    // substitution, so `<strong>` ends up inside the `<p>`.
                    let already_markup = text.trim_start().starts_with('<');
                    let text = bold_spans(&text);
                    if already_markup {
                        out.push_str(&text);
                    } else {
                        out.push_str(&format!(r#"<p class="{}">{}</p>"#, P_CLASS, text));
                    }
                }
            }
        }

        // End of input is an implicit non-matching line.
        if in_ul {
            out.push_str("</ul>");
        }
        if in_ol {
            out.push_str("</ol>");
        }

        out
    }
}
