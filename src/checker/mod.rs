//! Proofreading checkers.
//!
//! Each checker is built once from its rule tables and then scans any
//! number of documents without mutating itself.

pub mod proper_noun;
pub mod readability;
pub mod typo;

use regex::Regex;

use crate::position::LineIndex;
use crate::result::{LintResult, Severity};

pub use proper_noun::ProperNounChecker;
pub use readability::ReadabilityChecker;
pub use typo::TypoChecker;

/// A pass over one document producing findings in scan order
pub trait Checker: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn check(&self, file_path: &str, content: &str) -> Vec<LintResult>;
}

/// A misspelled term matched on ASCII word boundaries
#[derive(Debug, Clone)]
pub(crate) struct TermMatcher {
    incorrect: String,
    correct: String,
    regex: Regex,
}

impl TermMatcher {
    /// Compile `(incorrect, correct)` pairs, keeping their order.
    ///
    /// Pairs whose correct form equals the key are dropped; terms that
    /// fail to compile are logged and skipped.
    pub(crate) fn compile_all<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<Self> {
        pairs
            .into_iter()
            .filter(|(incorrect, correct)| !incorrect.is_empty() && incorrect != correct)
            .filter_map(|(incorrect, correct)| match Self::new(incorrect, correct) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    tracing::warn!("Skipping dictionary term {:?}: {}", incorrect, e);
                    None
                }
            })
            .collect()
    }

    fn new(incorrect: &str, correct: &str) -> Result<Self, regex::Error> {
        // `\b` in Unicode mode treats kana and kanji as word characters,
        // which would hide "Javascript" in "これはJavascriptの記事"
        let pattern = format!(r"(?-u:\b){}(?-u:\b)", regex::escape(incorrect));
        Ok(Self {
            incorrect: incorrect.to_string(),
            correct: correct.to_string(),
            regex: Regex::new(&pattern)?,
        })
    }

    /// One WARNING per non-overlapping occurrence, left to right
    pub(crate) fn find_all<'a>(
        &'a self,
        file_path: &'a str,
        content: &'a str,
        index: &'a LineIndex<'a>,
        rule: &'static str,
    ) -> impl Iterator<Item = LintResult> + 'a {
        self.regex.find_iter(content).map(move |m| {
            LintResult::spanning(
                file_path,
                index.span(m.range()),
                rule,
                Severity::Warning,
                format!(
                    "「{}」は「{}」の誤記の可能性があります。",
                    self.incorrect, self.correct
                ),
            )
            .with_suggestion(self.correct.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_term_matcher_respects_ascii_word_boundaries() {
        let matchers = TermMatcher::compile_all([("Javascript", "JavaScript")]);
        let content = "これはJavascriptの記事。Javascripting は対象外";
        let index = LineIndex::new(content);
        let results: Vec<_> = matchers[0].find_all("a.md", content, &index, "t").collect();

        assert_eq!(results.len(), 1);
        assert_eq!((results[0].line, results[0].column), (1, 4));
        assert_eq!(results[0].end_column, Some(14));
        assert_eq!(results[0].suggestions, vec!["JavaScript".to_string()]);
    }

    #[test]
    fn test_identity_and_empty_pairs_are_dropped() {
        let matchers = TermMatcher::compile_all([("Docker", "Docker"), ("", "x"), ("Html", "HTML")]);
        assert_eq!(matchers.len(), 1);
        assert_eq!(matchers[0].incorrect, "Html");
    }

    #[test]
    fn test_terms_are_matched_literally() {
        let matchers = TermMatcher::compile_all([("node.js", "Node.js")]);
        let content = "nodexjs と node.js";
        let index = LineIndex::new(content);
        let results: Vec<_> = matchers[0].find_all("a.md", content, &index, "t").collect();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].column, 11);
    }
}
