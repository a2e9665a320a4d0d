use serde::Serialize;

use crate::position::{Position, Span};

/// Severity of a finding, fixed by the rule that emits it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported issue in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    pub file_path: String,
    /// 1-based start line
    pub line: usize,
    /// 1-based start column, in characters
    pub column: usize,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
    pub message: String,
    pub severity: Severity,
    pub suggestions: Vec<String>,
    /// Stable id of the rule that produced this finding
    pub rule: &'static str,
}

impl LintResult {
    /// A finding that only points at a position
    pub fn at(
        file_path: &str,
        start: Position,
        rule: &'static str,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.to_string(),
            line: start.line,
            column: start.column,
            end_line: None,
            end_column: None,
            message: message.into(),
            severity,
            suggestions: Vec::new(),
            rule,
        }
    }

    /// A finding covering a matched span
    pub fn spanning(
        file_path: &str,
        span: Span,
        rule: &'static str,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            end_line: Some(span.end.line),
            end_column: Some(span.end.column),
            ..Self::at(file_path, span.start, rule, severity, message)
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn start(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// End of the finding, or its start when only a point was reported
    pub fn end_or_start(&self) -> Position {
        Position {
            line: self.end_line.unwrap_or(self.line),
            column: self.end_column.unwrap_or(self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_point_result_has_no_end() {
        let result = LintResult::at(
            "test.md",
            Position { line: 1, column: 1 },
            "comma-density",
            Severity::Info,
            "Test message",
        );

        assert_eq!(result.file_path, "test.md");
        assert_eq!(result.end_line, None);
        assert_eq!(result.end_column, None);
        assert!(result.suggestions.is_empty());
        assert_eq!(result.end_or_start(), result.start());
    }

    #[test]
    fn test_serialized_shape() {
        let span = Span {
            start: Position { line: 3, column: 4 },
            end: Position { line: 3, column: 14 },
        };
        let result = LintResult::spanning("a.md", span, "proper-noun", Severity::Warning, "msg")
            .with_suggestion("JavaScript");

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "filePath": "a.md",
                "line": 3,
                "column": 4,
                "endLine": 3,
                "endColumn": 14,
                "message": "msg",
                "severity": "WARNING",
                "suggestions": ["JavaScript"],
                "rule": "proper-noun"
            })
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }
}
