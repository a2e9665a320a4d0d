//! Target file discovery.
//!
//! Inputs are explicit paths or glob patterns, resolved relative to a
//! root directory. Dependency and build directories are never searched.

use std::path::{Component, Path, PathBuf};

pub const DEFAULT_PATTERN: &str = "**/*.md";

/// Directory names skipped during glob expansion
pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git", "dist"];

fn is_glob(input: &str) -> bool {
    input.contains(&['*', '?', '['][..])
}

fn is_ignored(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => name.to_str().is_some_and(|n| IGNORED_DIRS.contains(&n)),
        _ => false,
    })
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

/// Identifier for a discovered file: its path relative to `root`, so
/// `./docs/a.md` under the default root is reported as `docs/a.md`.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Resolve inputs to a de-duplicated file list in first-seen order.
///
/// Explicit paths are kept even when they do not exist so the linter can
/// report them; globs only contribute existing files. With no inputs the
/// default pattern is used.
pub fn collect<S: AsRef<str>>(inputs: &[S], root: &Path) -> Vec<PathBuf> {
    let inputs: Vec<&str> = if inputs.is_empty() {
        vec![DEFAULT_PATTERN]
    } else {
        inputs.iter().map(AsRef::as_ref).collect()
    };

    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        if !is_glob(input) {
            push_unique(&mut files, root.join(input));
            continue;
        }

        let pattern = root.join(input);
        let Some(pattern) = pattern.to_str() else {
            tracing::warn!("Skipping non UTF-8 pattern {}", pattern.display());
            continue;
        };

        let entries = match glob::glob(pattern) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Invalid glob pattern {:?}: {}", input, e);
                continue;
            }
        };

        let before = files.len();
        for entry in entries {
            match entry {
                Ok(path) => {
                    let relative = path.strip_prefix(root).unwrap_or(&path);
                    if path.is_file() && !is_ignored(relative) {
                        push_unique(&mut files, path);
                    }
                }
                Err(e) => tracing::warn!("Cannot read {}: {}", e.path().display(), e.error()),
            }
        }
        tracing::debug!("{} matched {} file(s)", input, files.len() - before);
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "本文").unwrap();
    }

    #[test]
    fn test_default_pattern_skips_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "README.md");
        touch(dir.path(), "docs/guide.md");
        touch(dir.path(), "docs/notes.txt");
        touch(dir.path(), "node_modules/pkg/README.md");
        touch(dir.path(), "dist/out.md");

        let mut files = collect::<&str>(&[], dir.path());
        files.sort();
        assert_eq!(
            files,
            vec![dir.path().join("README.md"), dir.path().join("docs/guide.md")]
        );
    }

    #[test]
    fn test_explicit_paths_kept_in_order_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.md");
        touch(dir.path(), "a.md");

        let files = collect(&["b.md", "missing.md", "*.md"], dir.path());
        assert_eq!(
            files,
            vec![
                dir.path().join("b.md"),
                dir.path().join("missing.md"),
                dir.path().join("a.md"),
            ]
        );
    }

    #[test]
    fn test_display_path_is_root_relative() {
        assert_eq!(display_path(Path::new("./docs/x.md"), Path::new(".")), "docs/x.md");
        assert_eq!(display_path(Path::new("/work/README.md"), Path::new("/work")), "README.md");
        assert_eq!(display_path(Path::new("/elsewhere/a.md"), Path::new("/work")), "/elsewhere/a.md");
    }

    #[test]
    fn test_collected_paths_display_relative() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "docs/guide.md");

        let files = collect(&["docs/*.md"], dir.path());
        let names: Vec<String> = files.iter().map(|f| display_path(f, dir.path())).collect();
        assert_eq!(names, vec!["docs/guide.md".to_string()]);
    }

    #[test]
    fn test_glob_detection() {
        assert!(is_glob("**/*.md"));
        assert!(is_glob("doc?.md"));
        assert!(!is_glob("docs/readme.md"));
    }
}
