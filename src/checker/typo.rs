use regex::Regex;

use super::{Checker, TermMatcher};
use crate::dictionary::Dictionary;
use crate::position::LineIndex;
use crate::result::{LintResult, Severity};

pub const TECH_TERM: &str = "tech-term";
pub const JAPANESE_PHRASE: &str = "japanese-phrase";
pub const REPEATED_LONG_VOWEL: &str = "repeated-long-vowel";

/// Misspelled technical terms and discouraged Japanese spellings
#[derive(Debug, Clone)]
pub struct TypoChecker {
    tech_terms: Vec<TermMatcher>,
    japanese_phrases: Vec<(String, String)>,
    long_vowel: Regex,
}

impl TypoChecker {
    pub fn new(tech_terms: &Dictionary, japanese_phrases: Vec<(String, String)>) -> Self {
        Self {
            tech_terms: TermMatcher::compile_all(tech_terms.single_corrections()),
            japanese_phrases,
            long_vowel: Regex::new(r"[ァ-ヴ]ー{2,}").expect("valid long vowel regex"),
        }
    }

    /// Every occurrence of every misspelled technical term
    fn check_tech_terms(&self, file_path: &str, content: &str, index: &LineIndex) -> Vec<LintResult> {
        self.tech_terms
            .iter()
            .flat_map(|term| term.find_all(file_path, content, index, TECH_TERM))
            .collect()
    }

    /// Only the first occurrence of each phrase is reported
    fn check_japanese_phrases(&self, file_path: &str, content: &str, index: &LineIndex) -> Vec<LintResult> {
        self.japanese_phrases
            .iter()
            .filter_map(|(typo, correct)| {
                let start = content.find(typo.as_str())?;
                Some(
                    LintResult::spanning(
                        file_path,
                        index.span(start..start + typo.len()),
                        JAPANESE_PHRASE,
                        Severity::Warning,
                        format!("「{}」は「{}」を推奨します。", typo, correct),
                    )
                    .with_suggestion(correct.clone()),
                )
            })
            .collect()
    }

    /// Two or more long vowel marks after a katakana character
    fn check_long_vowels(&self, file_path: &str, content: &str, index: &LineIndex) -> Vec<LintResult> {
        self.long_vowel
            .find_iter(content)
            .map(|m| {
                LintResult::spanning(
                    file_path,
                    index.span(m.range()),
                    REPEATED_LONG_VOWEL,
                    Severity::Info,
                    format!("長音符が連続しています: 「{}」", m.as_str()),
                )
            })
            .collect()
    }
}

impl Checker for TypoChecker {
    fn name(&self) -> &'static str {
        "typo"
    }

    fn check(&self, file_path: &str, content: &str) -> Vec<LintResult> {
        let index = LineIndex::new(content);

        let mut results = Vec::new();
        results.extend(self.check_tech_terms(file_path, content, &index));
        results.extend(self.check_japanese_phrases(file_path, content, &index));
        results.extend(self.check_long_vowels(file_path, content, &index));
        results
    }
}
