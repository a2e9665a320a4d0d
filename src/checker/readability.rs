//! Line-level readability heuristics.
//!
//! Rules that can localize their match (sentence length, particle runs,
//! long vowel runs) report its real column; the remaining rules flag the
//! whole line at column 1.

use regex::Regex;

use super::Checker;
use crate::config::ReadabilityConfig;
use crate::extractor::{fenced_code_lines, MarkdownExtractor};
use crate::position::{position_of, Position, Span};
use crate::result::{LintResult, Severity};

pub const SENTENCE_LENGTH: &str = "sentence-length";
pub const CONSECUTIVE_PARTICLES: &str = "consecutive-particles";
pub const DUPLICATE_PARTICLE: &str = "duplicate-particle";
pub const COMMA_DENSITY: &str = "comma-density";
pub const LONG_VOWEL: &str = "long-vowel";
pub const MIXED_WIDTH: &str = "mixed-width";
pub const PUNCTUATION_SPACING: &str = "punctuation-spacing";
pub const ALPHANUMERIC_SPACING: &str = "alphanumeric-spacing";

const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？'];

/// Readability checker over extracted prose, one physical line at a time
#[derive(Debug, Clone)]
pub struct ReadabilityChecker {
    config: ReadabilityConfig,
    extractor: MarkdownExtractor,
    consecutive_particles: Regex,
    duplicate_particle: Regex,
    long_vowel: Regex,
    mixed_width: Regex,
    punctuation_spacing: Regex,
    alphanumeric_spacing: Regex,
}

/// One physical line under analysis
struct Line<'a> {
    number: usize,
    raw: &'a str,
    text: String,
}

impl Line<'_> {
    /// Position of a byte offset within the raw line
    fn position(&self, offset: usize) -> Position {
        Position {
            line: self.number,
            column: position_of(self.raw, offset).column,
        }
    }

    fn span(&self, range: std::ops::Range<usize>) -> Span {
        Span {
            start: self.position(range.start),
            end: self.position(range.end),
        }
    }

    fn start(&self) -> Position {
        Position {
            line: self.number,
            column: 1,
        }
    }
}

impl ReadabilityChecker {
    pub fn new(config: ReadabilityConfig) -> Self {
        Self {
            config,
            extractor: MarkdownExtractor::new(),
            consecutive_particles: Regex::new(r"[がのをにへとでや]{2,}")
                .expect("valid particle run regex"),
            duplicate_particle: Regex::new(
                r"が.*が|の.*の|を.*を|に.*に|へ.*へ|と.*と|で.*で|や.*や",
            )
            .expect("valid duplicate particle regex"),
            long_vowel: Regex::new(r"[ァ-ヴ]ー{2,}").expect("valid long vowel regex"),
            mixed_width: Regex::new(r"[０-９][0-9]|[0-9][０-９]|[Ａ-Ｚａ-ｚ][A-Za-z]|[A-Za-z][Ａ-Ｚａ-ｚ]")
                .expect("valid mixed width regex"),
            punctuation_spacing: Regex::new(r"[！？][^\s　]").expect("valid punctuation regex"),
            alphanumeric_spacing: Regex::new(
                r"[ぁ-んァ-ヶ一-龠々][a-zA-Z0-9]|[a-zA-Z0-9][ぁ-んァ-ヶ一-龠々]",
            )
            .expect("valid alphanumeric spacing regex"),
        }
    }

    fn check_line(&self, file_path: &str, line: &Line<'_>, results: &mut Vec<LintResult>) {
        let cfg = &self.config;

        if cfg.sentence_length {
            self.check_sentence_length(file_path, line, results);
        }

        if cfg.consecutive_particles {
            for m in self.consecutive_particles.find_iter(line.raw) {
                results.push(LintResult::spanning(
                    file_path,
                    line.span(m.range()),
                    CONSECUTIVE_PARTICLES,
                    Severity::Info,
                    format!("助詞が連続しています: 「{}」", m.as_str()),
                ));
            }
        }

        if cfg.duplicate_particle && self.duplicate_particle.is_match(&line.text) {
            results.push(LintResult::at(
                file_path,
                line.start(),
                DUPLICATE_PARTICLE,
                Severity::Info,
                "同じ助詞が重複して使用されている可能性があります。",
            ));
        }

        if cfg.comma_density {
            let comma_count = line.raw.matches('、').count();
            if comma_count > cfg.max_commas {
                results.push(LintResult::at(
                    file_path,
                    line.start(),
                    COMMA_DENSITY,
                    Severity::Info,
                    format!(
                        "読点が多すぎます。現在{}個です。文を分割することを検討してください。",
                        comma_count
                    ),
                ));
            }
        }

        if cfg.long_vowel {
            for m in self.long_vowel.find_iter(line.raw) {
                results.push(LintResult::spanning(
                    file_path,
                    line.span(m.range()),
                    LONG_VOWEL,
                    Severity::Info,
                    format!("カタカナ語の長音符が不適切な可能性があります: 「{}」", m.as_str()),
                ));
            }
        }

        if cfg.mixed_width && self.mixed_width.is_match(line.raw) {
            results.push(LintResult::at(
                file_path,
                line.start(),
                MIXED_WIDTH,
                Severity::Info,
                "半角と全角の文字が混在しています。統一することを推奨します。",
            ));
        }

        if cfg.punctuation_spacing && self.punctuation_spacing.is_match(line.raw) {
            results.push(LintResult::at(
                file_path,
                line.start(),
                PUNCTUATION_SPACING,
                Severity::Info,
                "感嘆符・疑問符の後にはスペースを入れることを推奨します。",
            ));
        }

        if cfg.alphanumeric_spacing && self.alphanumeric_spacing.is_match(line.raw) {
            results.push(LintResult::at(
                file_path,
                line.start(),
                ALPHANUMERIC_SPACING,
                Severity::Info,
                "日本語と英数字の間にはスペースを入れることを推奨します。",
            ));
        }
    }

    /// Sentences are split on 。！？ and measured in characters
    fn check_sentence_length(&self, file_path: &str, line: &Line<'_>, results: &mut Vec<LintResult>) {
        let max = self.config.max_sentence_length;

        for sentence in line
            .text
            .split(SENTENCE_TERMINATORS)
            .filter(|s| !s.trim().is_empty())
        {
            let length = sentence.chars().count();
            if length <= max {
                continue;
            }

            // Markup inside the sentence can make it unfindable in the raw line
            let start = line
                .raw
                .find(sentence)
                .map(|offset| line.position(offset))
                .unwrap_or_else(|| line.start());

            results.push(LintResult::at(
                file_path,
                start,
                SENTENCE_LENGTH,
                Severity::Info,
                format!(
                    "一文が長すぎます。現在{}文字です。{}文字以下を推奨します。",
                    length, max
                ),
            ));
        }
    }
}

impl Checker for ReadabilityChecker {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn check(&self, file_path: &str, content: &str) -> Vec<LintResult> {
        let mut results = Vec::new();
        let in_code = fenced_code_lines(content);

        for (i, (raw, is_code)) in content.split('\n').zip(in_code).enumerate() {
            if is_code {
                continue;
            }

            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let text = self.extractor.extract(raw);
            if text.trim().is_empty() {
                continue;
            }

            let line = Line {
                number: i + 1,
                raw,
                text,
            };
            self.check_line(file_path, &line, &mut results);
        }

        results
    }
}
