use regex::Regex;

use super::{Checker, TermMatcher};
use crate::dictionary::Dictionary;
use crate::position::LineIndex;
use crate::result::{LintResult, Severity};

pub const PROPER_NOUN: &str = "proper-noun";
pub const TECH_PHRASE: &str = "tech-phrase";

/// A multi-word technical phrase with one canonical spelling
#[derive(Debug, Clone)]
struct PhrasePattern {
    regex: Regex,
    correct: &'static str,
    message: &'static str,
}

impl PhrasePattern {
    fn new(pattern: &str, correct: &'static str, message: &'static str) -> Self {
        Self {
            regex: Regex::new(pattern).expect("valid technical phrase regex"),
            correct,
            message,
        }
    }
}

/// Proper-noun spelling backed by the merged built-in and user dictionary
#[derive(Debug, Clone)]
pub struct ProperNounChecker {
    terms: Vec<TermMatcher>,
    phrases: Vec<PhrasePattern>,
}

impl ProperNounChecker {
    /// Only entries with a single correct form take part; other values
    /// (alternative lists, flagged words) are skipped.
    pub fn new(dictionary: &Dictionary) -> Self {
        // No trailing boundary after キー: an ASCII boundary never follows kana
        let phrases = vec![
            PhrasePattern::new(
                r"(?-u:\b)API\s*キー",
                "APIキー",
                "APIキーは一語で表記することを推奨します。",
            ),
            PhrasePattern::new(
                r"(?-u:\b)WEB\s*API(?-u:\b)",
                "Web API",
                "Web APIの表記を推奨します。",
            ),
            PhrasePattern::new(
                r"(?i)(?-u:\b)web\s*api(?-u:\b)",
                "Web API",
                "Web APIの表記を推奨します。",
            ),
        ];

        Self {
            terms: TermMatcher::compile_all(dictionary.single_corrections()),
            phrases,
        }
    }

    fn check_terms(&self, file_path: &str, content: &str, index: &LineIndex) -> Vec<LintResult> {
        self.terms
            .iter()
            .flat_map(|term| term.find_all(file_path, content, index, PROPER_NOUN))
            .collect()
    }

    fn check_phrases(&self, file_path: &str, content: &str, index: &LineIndex) -> Vec<LintResult> {
        let mut results = Vec::new();

        for phrase in &self.phrases {
            for m in phrase.regex.find_iter(content) {
                results.push(
                    LintResult::spanning(
                        file_path,
                        index.span(m.range()),
                        TECH_PHRASE,
                        Severity::Info,
                        phrase.message,
                    )
                    .with_suggestion(phrase.correct),
                );
            }
        }

        results
    }
}

impl Checker for ProperNounChecker {
    fn name(&self) -> &'static str {
        "proper-noun"
    }

    fn check(&self, file_path: &str, content: &str) -> Vec<LintResult> {
        let index = LineIndex::new(content);

        let mut results = self.check_terms(file_path, content, &index);
        results.extend(self.check_phrases(file_path, content, &index));
        results
    }
}
