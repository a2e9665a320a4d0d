//! Plain-text projection of Markdown documents.
//!
//! This module strips enough Markdown syntax (code, links, images,
//! headings, list markers, emphasis) to analyze prose without tripping
//! over markup. It does not build a parse tree and does not preserve
//! byte offsets; checkers needing exact source positions scan the raw
//! content instead.

use regex::Regex;

/// Regex-based Markdown to plain text converter
#[derive(Debug, Clone)]
pub struct MarkdownExtractor {
    code_block: Regex,
    inline_code: Regex,
    image: Regex,
    link: Regex,
    heading: Regex,
    unordered_list: Regex,
    ordered_list: Regex,
    bold: Regex,
    italic: Regex,
    strikethrough: Regex,
}

impl MarkdownExtractor {
    pub fn new() -> Self {
        // Line-start patterns only eat spaces and tabs so lines never merge
        Self {
            code_block: Regex::new(r"(?s)```.*?```").expect("valid code block regex"),
            inline_code: Regex::new(r"`[^`]+`").expect("valid inline code regex"),
            image: Regex::new(r"!\[([^\]]*)\]\([^)]+\)").expect("valid image regex"),
            link: Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link regex"),
            heading: Regex::new(r"(?m)^#+[ \t]*").expect("valid heading regex"),
            unordered_list: Regex::new(r"(?m)^[ \t]*[-*+][ \t]+").expect("valid list regex"),
            ordered_list: Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").expect("valid list regex"),
            bold: Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"),
            italic: Regex::new(r"\*([^*]+)\*").expect("valid italic regex"),
            strikethrough: Regex::new(r"~~([^~]+)~~").expect("valid strikethrough regex"),
        }
    }

    /// Extract analyzable prose from a Markdown document
    pub fn extract(&self, markdown: &str) -> String {
        let text = self.code_block.replace_all(markdown, "");
        let text = self.inline_code.replace_all(&text, "");
        // Images before links: the link pattern also matches the `[alt](url)`
        // tail of an image and would leave `!alt` behind
        let text = self.image.replace_all(&text, "$1");
        let text = self.link.replace_all(&text, "$1");
        let text = self.heading.replace_all(&text, "");
        let text = self.unordered_list.replace_all(&text, "");
        let text = self.ordered_list.replace_all(&text, "");
        let text = self.bold.replace_all(&text, "$1");
        let text = self.italic.replace_all(&text, "$1");
        let text = self.strikethrough.replace_all(&text, "$1");

        text.trim().to_string()
    }
}

impl Default for MarkdownExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Flag every physical line that belongs to a fenced code block.
///
/// Lines are split on `'\n'`, matching how the readability pass walks the
/// document. Backtick triples pair up across the document the same way
/// the code block pattern of [`MarkdownExtractor`] pairs them, so a line
/// holding an even number of them (```` ```x``` ````) opens nothing. Lines
/// that open or close a fence are flagged; an unterminated fence runs to
/// the end of the document.
pub fn fenced_code_lines(content: &str) -> Vec<bool> {
    let mut in_fence = false;

    content
        .split('\n')
        .map(|line| {
            let toggles = line.matches("```").count() % 2 == 1;
            let was_in_fence = in_fence;
            if toggles {
                in_fence = !in_fence;
            }
            toggles || was_in_fence
        })
        .collect()
}
