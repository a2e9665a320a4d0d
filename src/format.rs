//! Output rendering for lint results.
//!
//! Supports reviewdog's Diagnostic Format (`rdjson` and line-delimited
//! `rdjsonl`), a plain JSON array of results, and human-readable text.

use std::io::Write;

use serde::Serialize;

use crate::position::Position;
use crate::result::{LintResult, Severity};

pub const SOURCE_NAME: &str = "kousei";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `path:line:col: SEVERITY [rule] message`
    #[default]
    Text,
    /// JSON array of results
    Json,
    /// reviewdog Diagnostic Format, one result set
    Rdjson,
    /// reviewdog Diagnostic Format, one diagnostic per line
    Rdjsonl,
}

#[derive(Serialize)]
struct RdResult<'a> {
    source: RdSource,
    diagnostics: Vec<RdDiagnostic<'a>>,
}

#[derive(Serialize)]
struct RdSource {
    name: &'static str,
}

#[derive(Serialize)]
struct RdDiagnostic<'a> {
    message: &'a str,
    location: RdLocation<'a>,
    severity: Severity,
    code: RdCode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<RdSuggestion<'a>>,
}

#[derive(Serialize)]
struct RdLocation<'a> {
    path: &'a str,
    range: RdRange,
}

#[derive(Serialize)]
struct RdRange {
    start: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<Position>,
}

#[derive(Serialize)]
struct RdCode {
    value: &'static str,
}

#[derive(Serialize)]
struct RdSuggestion<'a> {
    range: RdRange,
    text: &'a str,
}

impl<'a> From<&'a LintResult> for RdDiagnostic<'a> {
    fn from(result: &'a LintResult) -> Self {
        let end = match (result.end_line, result.end_column) {
            (Some(line), Some(column)) => Some(Position { line, column }),
            _ => None,
        };

        let suggestions = result
            .suggestions
            .iter()
            .map(|text| RdSuggestion {
                range: RdRange {
                    start: result.start(),
                    end: Some(result.end_or_start()),
                },
                text,
            })
            .collect();

        Self {
            message: &result.message,
            location: RdLocation {
                path: &result.file_path,
                range: RdRange {
                    start: result.start(),
                    end,
                },
            },
            severity: result.severity,
            code: RdCode { value: result.rule },
            suggestions,
        }
    }
}

/// Write results in the requested format
pub fn write_results<W: Write>(
    out: &mut W,
    results: &[LintResult],
    format: OutputFormat,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => {
            for r in results {
                write!(
                    out,
                    "{}:{}:{}: {} [{}] {}",
                    r.file_path, r.line, r.column, r.severity, r.rule, r.message
                )?;
                if !r.suggestions.is_empty() {
                    write!(out, " (→ {})", r.suggestions.join(", "))?;
                }
                writeln!(out)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, results)?;
            writeln!(out)?;
        }
        OutputFormat::Rdjson => {
            let rd = RdResult {
                source: RdSource { name: SOURCE_NAME },
                diagnostics: results.iter().map(RdDiagnostic::from).collect(),
            };
            serde_json::to_writer(&mut *out, &rd)?;
            writeln!(out)?;
        }
        OutputFormat::Rdjsonl => {
            for r in results {
                serde_json::to_writer(&mut *out, &RdDiagnostic::from(r))?;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}
