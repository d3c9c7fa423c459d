//! Gemtext document to HTML conversion
//!
//! A document is converted line by line. Two pieces of block state are
//! tracked across lines: whether a preformatted (fenced) block is open, and
//! whether consecutive list items are being grouped inside a `<ul>`.
//! The state lives for exactly one conversion and is never shared.

mod options;
mod statistics;

pub use options::{ConvertOptions, FenceMatch, FENCE_MARKER};
pub use statistics::DocumentStatistics;

use std::convert::Infallible;
use std::io::{self, BufRead, Write};

use crate::line;

/// Block state of a document being converted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionState {
    pub preformatted: bool,
    pub in_list: bool,
}

type Emit<'e, E> = dyn FnMut(&str) -> Result<(), E> + 'e;

/// One in-flight conversion
struct Conversion<'o> {
    options: &'o ConvertOptions,
    state: ConversionState,
    stats: DocumentStatistics,
}

impl<'o> Conversion<'o> {
    fn new(options: &'o ConvertOptions) -> Self {
        Self {
            options,
            state: ConversionState::default(),
            stats: DocumentStatistics::default(),
        }
    }

    fn feed<E>(&mut self, line: &str, emit: &mut Emit<'_, E>) -> Result<(), E> {
        self.stats.total_lines += 1;

        // Fences are checked before classification. An open list is closed
        // first so <pre> never sits inside <ul>.
        if self.options.fence.is_fence(line) {
            self.stats.fences += 1;
            if self.state.preformatted {
                self.state.preformatted = false;
                return emit("</pre>");
            }
            if self.state.in_list {
                self.state.in_list = false;
                emit("</ul>")?;
            }
            self.state.preformatted = true;
            return emit("<pre>");
        }

        if self.state.preformatted {
            self.stats.preformatted_lines += 1;
            return emit(line);
        }

        let rendered = line::classify_and_render(line);
        self.stats.increment_element(rendered.tag());
        if rendered.is_list_item() {
            if !self.state.in_list {
                self.state.in_list = true;
                self.stats.lists += 1;
                emit("<ul>")?;
            }
        } else if self.state.in_list {
            self.state.in_list = false;
            emit("</ul>")?;
        }
        emit(rendered.as_str())
    }

    fn finish<E>(mut self, emit: &mut Emit<'_, E>) -> Result<DocumentStatistics, E> {
        if self.state.in_list {
            self.state.in_list = false;
            emit("</ul>")?;
        }
        if self.state.preformatted {
            self.stats.unterminated_fence = true;
            if self.options.close_unterminated_fence {
                log::debug!("document ends inside a preformatted block; closing it");
                self.state.preformatted = false;
                emit("</pre>")?;
            } else {
                log::debug!("document ends inside a preformatted block; leaving <pre> open");
            }
        }
        Ok(self.stats)
    }
}

/// Converts gemtext documents to HTML line sequences
#[derive(Debug, Clone, Default)]
pub struct DocumentConverter {
    options: ConvertOptions,
}

impl DocumentConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert a sequence of lines into the output lines, in order.
    pub fn convert<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut output = Vec::new();
        let mut push = |html: &str| -> Result<(), Infallible> {
            output.push(html.to_string());
            Ok(())
        };

        let mut conversion = Conversion::new(&self.options);
        for line in lines {
            match conversion.feed::<Infallible>(line.as_ref(), &mut push) {
                Ok(()) => {}
                Err(never) => match never {},
            }
        }
        match conversion.finish::<Infallible>(&mut push) {
            Ok(_) => {}
            Err(never) => match never {},
        }
        output
    }

    /// Convert a whole document held in memory. Every output line ends with `\n`.
    pub fn convert_str(&self, text: &str) -> String {
        let mut html = String::new();
        for line in self.convert(text.lines()) {
            html.push_str(&line);
            html.push('\n');
        }
        html
    }

    /// Stream a document from `input` to `output`.
    ///
    /// Lines are split on `\n` (a preceding `\r` is dropped too). Bytes that
    /// are not valid UTF-8 are replaced rather than rejected.
    pub fn convert_reader(
        &self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> io::Result<DocumentStatistics> {
        let mut write_line = |html: &str| writeln!(output, "{}", html);
        let mut conversion = Conversion::new(&self.options);

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            conversion.feed::<io::Error>(&String::from_utf8_lossy(&buf), &mut write_line)?;
        }

        conversion.finish::<io::Error>(&mut write_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(lines: &[&str]) -> Vec<String> {
        DocumentConverter::default().convert(lines)
    }

    #[test]
    fn test_fence_toggles_preformatted() {
        assert_eq!(
            convert(&["```", "code here", "```"]),
            vec!["<pre>", "code here", "</pre>"]
        );
    }

    #[test]
    fn test_preformatted_lines_are_not_classified() {
        assert_eq!(
            convert(&["```", "# not a heading", "* not an item", "<tag>", "```"]),
            vec!["<pre>", "# not a heading", "* not an item", "<tag>", "</pre>"]
        );
    }

    #[test]
    fn test_list_grouping() {
        assert_eq!(
            convert(&["* a", "* b", "not a list"]),
            vec!["<ul>", "<li>a</li>", "<li>b</li>", "</ul>", "<p>not a list</p>"]
        );
    }

    #[test]
    fn test_list_closed_at_end_of_document() {
        assert_eq!(
            convert(&["* only item"]),
            vec!["<ul>", "<li>only item</li>", "</ul>"]
        );
    }

    #[test]
    fn test_separate_lists() {
        assert_eq!(
            convert(&["* a", "", "* b"]),
            vec![
                "<ul>", "<li>a</li>", "</ul>", "<p></p>", "<ul>", "<li>b</li>", "</ul>"
            ]
        );
    }

    #[test]
    fn test_fence_closes_open_list() {
        assert_eq!(
            convert(&["* a", "```", "* x", "```", "* b"]),
            vec![
                "<ul>", "<li>a</li>", "</ul>", "<pre>", "* x", "</pre>", "<ul>", "<li>b</li>",
                "</ul>"
            ]
        );
    }

    #[test]
    fn test_unterminated_fence_is_closed_by_default() {
        assert_eq!(convert(&["```", "dangling"]), vec!["<pre>", "dangling", "</pre>"]);
    }

    #[test]
    fn test_unterminated_fence_left_open_when_configured() {
        let converter =
            DocumentConverter::new(ConvertOptions::default().with_close_unterminated_fence(false));
        assert_eq!(converter.convert(["```", "dangling"]), vec!["<pre>", "dangling"]);
    }

    #[test]
    fn test_fence_with_suffix_is_content_when_exact() {
        assert_eq!(convert(&["```diff"]), vec!["<p>```diff</p>"]);
    }

    #[test]
    fn test_fence_with_suffix_toggles_when_prefix() {
        let converter = DocumentConverter::new(ConvertOptions::new(FenceMatch::Prefix));
        assert_eq!(
            converter.convert(["```diff", "+ added", "```"]),
            vec!["<pre>", "+ added", "</pre>"]
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(convert(&[]).is_empty());
    }

    #[test]
    fn test_convert_str() {
        let html = DocumentConverter::default().convert_str("# Hi\n* one\n=> /x.gmi X\n");
        assert_eq!(
            html,
            "<h1>Hi</h1>\n<ul>\n<li>one</li>\n</ul>\n<a href=\"/x.gmi\">X</a>\n"
        );
    }

    #[test]
    fn test_convert_reader_statistics() {
        let text = "# T\r\n* a\n* b\n```\nraw\n```\ntail";
        let mut input = text.as_bytes();
        let mut output = Vec::new();
        let stats = DocumentConverter::default()
            .convert_reader(&mut input, &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "<h1>T</h1>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<pre>\nraw\n</pre>\n<p>tail</p>\n"
        );
        assert_eq!(stats.total_lines, 7);
        assert_eq!(stats.fences, 2);
        assert_eq!(stats.preformatted_lines, 1);
        assert_eq!(stats.lists, 1);
        assert_eq!(stats.element_count(crate::line::Tag::Li), 2);
        assert!(!stats.unterminated_fence);
    }

    #[test]
    fn test_convert_reader_accepts_invalid_utf8() {
        let mut input: &[u8] = b"caf\xe9\n";
        let mut output = Vec::new();
        DocumentConverter::default()
            .convert_reader(&mut input, &mut output)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "<p>caf\u{FFFD}</p>\n");
    }

    #[test]
    fn test_unterminated_fence_reported() {
        let mut input: &[u8] = b"```\nopen";
        let mut output = Vec::new();
        let stats = DocumentConverter::default()
            .convert_reader(&mut input, &mut output)
            .unwrap();
        assert!(stats.unterminated_fence);
        assert_eq!(String::from_utf8(output).unwrap(), "<pre>\nopen\n</pre>\n");
    }
}
