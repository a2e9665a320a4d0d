//! Lint orchestration: runs every enabled checker over a document.

use std::path::Path;

use crate::checker::{Checker, ProperNounChecker, ReadabilityChecker, TypoChecker};
use crate::config::Config;
use crate::dictionary::{builtin, Dictionary};
use crate::discover;
use crate::result::LintResult;

/// Runs the configured checkers in a fixed order: typo, proper noun,
/// readability.
pub struct Linter {
    checkers: Vec<Box<dyn Checker>>,
}

impl Linter {
    /// Build all rule tables once; the user dictionary is read here
    pub fn new(config: &Config) -> Self {
        let custom = Dictionary::load(config.dictionary.path.as_deref());
        Self::with_dictionary(config, custom)
    }

    /// Same as [`Linter::new`] with an already loaded user dictionary
    pub fn with_dictionary(config: &Config, custom: Dictionary) -> Self {
        let mut checkers: Vec<Box<dyn Checker>> = Vec::new();

        if config.checker.typo {
            checkers.push(Box::new(TypoChecker::new(
                &builtin::tech_terms(),
                builtin::japanese_phrases(),
            )));
        }
        if config.checker.proper_noun {
            let proper_nouns = builtin::proper_nouns().merge(custom);
            checkers.push(Box::new(ProperNounChecker::new(&proper_nouns)));
        }
        if config.checker.readability {
            checkers.push(Box::new(ReadabilityChecker::new(config.readability.clone())));
        }

        Self { checkers }
    }

    /// Lint one document's content; `file_path` is only copied into results
    pub fn lint_content(&self, file_path: &str, content: &str) -> Vec<LintResult> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        for checker in &self.checkers {
            let found = checker.check(file_path, content);
            tracing::debug!("{}: {} reported {} issue(s)", file_path, checker.name(), found.len());
            results.extend(found);
        }
        results
    }

    /// Read and lint a file; `None` when it cannot be read
    pub fn lint_file(&self, path: &Path) -> Option<Vec<LintResult>> {
        self.lint_file_as(path, &path.to_string_lossy())
    }

    /// Like [`Linter::lint_file`], reporting results under `file_path`
    pub fn lint_file_as(&self, path: &Path, file_path: &str) -> Option<Vec<LintResult>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };

        tracing::info!("Checking {}", path.display());
        Some(self.lint_content(file_path, &content))
    }

    /// Lint files in order, concatenating their results
    pub fn lint_files<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<LintResult> {
        self.lint_all(paths, |path| path.to_string_lossy().to_string())
    }

    /// Lint files found under `root`, naming results relative to it
    pub fn lint_files_in<P: AsRef<Path>>(&self, root: &Path, paths: &[P]) -> Vec<LintResult> {
        self.lint_all(paths, |path| discover::display_path(path, root))
    }

    fn lint_all<P: AsRef<Path>>(&self, paths: &[P], name: impl Fn(&Path) -> String) -> Vec<LintResult> {
        if paths.is_empty() {
            tracing::info!("No target files found");
            return Vec::new();
        }

        tracing::info!("Checking {} file(s)", paths.len());
        let results: Vec<LintResult> = paths
            .iter()
            .filter_map(|path| {
                let path = path.as_ref();
                self.lint_file_as(path, &name(path))
            })
            .flatten()
            .collect();
        tracing::info!("Found {} issue(s)", results.len());

        results
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::with_dictionary(&Config::default(), Dictionary::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{proper_noun, readability, typo};
    use crate::result::Severity;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "# テスト記事

これはJavascriptの記事です。Githubで公開しています。

一文が非常に長くて読みにくい文章の例です。この文章は120文字を超えているため、読みやすさの観点から分割することを推奨される可能性があります。

API キーを設定します。WEB APIを利用します。

以下の通りです。全てのファイルを確認します。

日本語とEnglishが混在している文章です。
";

    #[test]
    fn test_detects_typos_and_style_issues() {
        let linter = Linter::default();
        let results = linter.lint_content("sample.md", SAMPLE);

        assert!(results
            .iter()
            .any(|r| r.message.contains("Javascript") || r.message.contains("Github")));
        assert!(results
            .iter()
            .any(|r| r.message.contains("長すぎ") || r.message.contains("スペース")));
        assert!(results.iter().all(|r| r.file_path == "sample.md"));
    }

    #[test]
    fn test_checker_order_is_preserved() {
        let linter = Linter::default();
        let results = linter.lint_content("a.md", "Github の API キー、");

        let rules: Vec<&str> = results.iter().map(|r| r.rule).collect();
        assert_eq!(
            rules,
            vec![
                typo::TECH_TERM,
                proper_noun::PROPER_NOUN,
                proper_noun::TECH_PHRASE,
            ]
        );
    }

    #[test]
    fn test_javascript_warning_from_both_passes() {
        let linter = Linter::default();
        let results = linter.lint_content("a.md", "Javascript");

        let warnings: Vec<_> = results
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|r| r.suggestions == vec!["JavaScript".to_string()]));
    }

    #[test]
    fn test_empty_and_whitespace_content() {
        let linter = Linter::default();
        assert!(linter.lint_content("a.md", "").is_empty());
        assert!(linter.lint_content("a.md", " \n\t\n").is_empty());
    }

    #[test]
    fn test_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.md");
        std::fs::write(&empty, "").unwrap();
        let missing = dir.path().join("non-existent-file.md");

        let linter = Linter::default();
        assert!(linter.lint_file(&missing).is_none());
        assert_eq!(linter.lint_files(&[&missing]), Vec::new());
        assert_eq!(linter.lint_files(&[&empty]), Vec::new());
        assert_eq!(linter.lint_files::<&Path>(&[]), Vec::new());
    }

    #[test]
    fn test_files_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.md");
        let second = dir.path().join("second.md");
        std::fs::write(&first, "Github と Json\n").unwrap();
        std::fs::write(&second, "Xml です\n").unwrap();

        let linter = Linter::default();
        let results = linter.lint_files(&[&first, &second]);
        let files: Vec<String> = results.iter().map(|r| r.file_path.clone()).collect();

        let first_name = first.to_string_lossy().to_string();
        let split = files.iter().position(|f| *f != first_name).unwrap();
        assert!(split > 0);
        assert!(files[split..].iter().all(|f| *f == second.to_string_lossy()));
    }

    #[test]
    fn test_results_named_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/x.md"), "Github です\n").unwrap();

        let files = discover::collect(&["docs/*.md"], dir.path());
        let results = Linter::default().lint_files_in(dir.path(), &files);

        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.file_path == "docs/x.md"));
    }

    #[test]
    fn test_config_disables_checkers() {
        let mut config = Config::default();
        config.checker.typo = false;
        config.checker.proper_noun = false;

        let linter = Linter::with_dictionary(&config, Dictionary::new());
        let results = linter.lint_content("a.md", "Javascript、、、、、");

        assert!(results.iter().all(|r| r.rule == readability::COMMA_DENSITY));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_custom_dictionary_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("dict.json");
        std::fs::write(&dict, r#"{"rustlang": "Rust"}"#).unwrap();

        let mut config = Config::default();
        config.dictionary.path = Some(dict);
        config.checker.readability = false;

        let linter = Linter::new(&config);
        let results = linter.lint_content("a.md", "I like rustlang.");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].suggestions, vec!["Rust".to_string()]);
    }
}
