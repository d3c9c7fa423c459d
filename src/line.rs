//! Classification and rendering of a single gemtext line.
//!
//! Every line maps to exactly one [`LineKind`]. The recognised markers are
//! tried in a fixed order and the first one that matches wins; anything else
//! is a paragraph.

use std::fmt;

/// HTML element produced for a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    H1,
    H2,
    H3,
    Li,
    Blockquote,
    A,
    P,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::Li => "li",
            Tag::Blockquote => "blockquote",
            Tag::A => "a",
            Tag::P => "p",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified line, borrowing its payload from the source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Heading1(&'a str),
    Heading2(&'a str),
    Heading3(&'a str),
    ListItem(&'a str),
    Quote(&'a str),
    Link {
        url: &'a str,
        /// `None` when nothing follows the url
        label: Option<&'a str>,
    },
    /// The whole line, untouched
    Paragraph(&'a str),
}

impl<'a> LineKind<'a> {
    pub fn tag(&self) -> Tag {
        match self {
            LineKind::Heading1(_) => Tag::H1,
            LineKind::Heading2(_) => Tag::H2,
            LineKind::Heading3(_) => Tag::H3,
            LineKind::ListItem(_) => Tag::Li,
            LineKind::Quote(_) => Tag::Blockquote,
            LineKind::Link { .. } => Tag::A,
            LineKind::Paragraph(_) => Tag::P,
        }
    }

    /// Text placed between the opening and closing tag
    pub fn text(&self) -> &'a str {
        match *self {
            LineKind::Heading1(text)
            | LineKind::Heading2(text)
            | LineKind::Heading3(text)
            | LineKind::ListItem(text)
            | LineKind::Quote(text)
            | LineKind::Paragraph(text) => text,
            LineKind::Link { label, .. } => label.unwrap_or(""),
        }
    }

    /// Payload text is written as-is; no HTML escaping takes place.
    pub fn render(&self) -> RenderedLine {
        let tag = self.tag();
        let html = match self {
            LineKind::Link { url, .. } => {
                format!("<a href=\"{}\">{}</a>", url, self.text())
            }
            _ => format!("<{tag}>{}</{tag}>", self.text()),
        };
        RenderedLine { tag, html }
    }
}

/// HTML fragment for one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    tag: Tag,
    html: String,
}

impl RenderedLine {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn is_list_item(&self) -> bool {
        self.tag == Tag::Li
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Line-type markers in match priority order.
#[derive(Debug, Clone, Copy)]
enum Rule {
    Heading1,
    Heading2,
    Heading3,
    ListItem,
    Quote,
    Link,
}

const RULES: [Rule; 6] = [
    Rule::Heading1,
    Rule::Heading2,
    Rule::Heading3,
    Rule::ListItem,
    Rule::Quote,
    Rule::Link,
];

impl Rule {
    fn apply(self, line: &str) -> Option<LineKind<'_>> {
        match self {
            Rule::Heading1 => marked_text(line, "# ").map(LineKind::Heading1),
            Rule::Heading2 => marked_text(line, "## ").map(LineKind::Heading2),
            Rule::Heading3 => marked_text(line, "### ").map(LineKind::Heading3),
            Rule::ListItem => marked_text(line, "* ").map(LineKind::ListItem),
            Rule::Quote => marked_text(line, "> ").map(LineKind::Quote),
            Rule::Link => link(line),
        }
    }
}

/// Text after `marker`, with any further leading whitespace dropped.
fn marked_text<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.strip_prefix(marker).map(str::trim_start)
}

/// `=>[ws]<url>[<ws><label>]`
fn link(line: &str) -> Option<LineKind<'_>> {
    let rest = line.strip_prefix("=>")?.trim_start();
    let url_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    if url_end == 0 {
        return None;
    }
    let (url, tail) = rest.split_at(url_end);
    let label = tail.trim();
    Some(LineKind::Link {
        url,
        label: (!label.is_empty()).then_some(label),
    })
}

/// Classify a raw line. Never fails: unmatched lines are paragraphs.
pub fn classify(line: &str) -> LineKind<'_> {
    RULES
        .iter()
        .find_map(|rule| rule.apply(line))
        .unwrap_or(LineKind::Paragraph(line))
}

pub fn classify_and_render(line: &str) -> RenderedLine {
    classify(line).render()
}
