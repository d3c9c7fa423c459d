//! Standalone HTML page wrapper around converted documents

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::converter::FenceMatch;
use crate::line::{self, LineKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    /// Wrap converted output in a complete HTML document
    pub standalone: bool,
    pub lang: String,
    /// Linked from every page when set
    pub stylesheet: Option<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            standalone: false,
            lang: "en".to_string(),
            stylesheet: None,
        }
    }
}

impl PageOptions {
    pub fn standalone() -> Self {
        Self {
            standalone: true,
            ..Self::default()
        }
    }

    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet = Some(href.into());
        self
    }

    /// Opening part of the page, up to and including `<body>`.
    /// Writes nothing for fragment output.
    pub fn write_header(&self, title: &str, output: &mut dyn Write) -> io::Result<()> {
        if !self.standalone {
            return Ok(());
        }
        write!(
            output,
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
"#,
            lang = self.lang,
        )?;
        if let Some(href) = &self.stylesheet {
            writeln!(output, "<link rel=\"stylesheet\" href=\"{}\">", href)?;
        }
        write!(output, "</head>\n<body>\n")
    }

    pub fn write_footer(&self, output: &mut dyn Write) -> io::Result<()> {
        if !self.standalone {
            return Ok(());
        }
        write!(output, "</body>\n</html>\n")
    }
}

/// Text of the first level-one heading outside preformatted blocks
pub fn document_title(text: &str, fence: FenceMatch) -> Option<&str> {
    let mut preformatted = false;
    for raw in text.lines() {
        if fence.is_fence(raw) {
            preformatted = !preformatted;
            continue;
        }
        if preformatted {
            continue;
        }
        if let LineKind::Heading1(title) = line::classify(raw) {
            return Some(title.trim_end());
        }
    }
    None
}
