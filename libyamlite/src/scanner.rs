//! Phase 1: Scanner
//!
//! The scanner converts raw source text into scan lines. It performs:
//! - Leading byte order mark removal
//! - Blank and comment line filtering
//! - Trailing comment and whitespace stripping
//! - Indentation counting (tabs rejected or expanded per [`TabPolicy`])

use crate::error::{ParseContext, ParseError, Result};
use crate::options::TabPolicy;

/// A single line after the scanning phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine {
    /// Content after indent, without comment or trailing whitespace.
    pub text: String,
    /// Number of leading spaces.
    pub indent: usize,
    /// Zero-based line number for error reporting.
    pub line_num: usize,
}

/// Scan source text into scan lines.
pub fn scan(source: &str, ctx: &ParseContext) -> Result<Vec<ScanLine>> {
    let mut lines = Vec::new();
    let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);

    for (line_num, line_str) in source.lines().enumerate() {
        let trimmed = line_str.trim();

        // Blank and whole-line comments vanish entirely
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Document start marker
        if line_str.trim_end() == "---" {
            continue;
        }

        let (indent, rest) = split_indent(line_str, line_num, ctx)?;

        let text = strip_comment(rest);
        if text.is_empty() {
            continue;
        }

        lines.push(ScanLine {
            text: text.to_string(),
            indent,
            line_num,
        });
    }

    tracing::debug!(lines = lines.len(), "scanned");
    Ok(lines)
}

/// Separate leading indentation from line content.
/// Returns (indent, rest) where indent counts spaces after tab expansion.
fn split_indent<'a>(
    line: &'a str,
    line_num: usize,
    ctx: &ParseContext,
) -> Result<(usize, &'a str)> {
    let mut indent = 0;
    for (col, b) in line.bytes().enumerate() {
        match b {
            b' ' => indent += 1,
            b'\t' => match ctx.options.tabs {
                TabPolicy::Expand(width) => indent += width,
                _ => {
                    return Err(
                        ParseError::TabNotAllowed(String::new()).with_location(ctx, line_num, col)
                    );
                }
            },
            _ => return Ok((indent, &line[col..])),
        }
    }
    Ok((indent, ""))
}

/// Cut a line at the first comment marker and drop trailing whitespace.
fn strip_comment(rest: &str) -> &str {
    match rest.find('#') {
        Some(pos) => rest[..pos].trim_end(),
        None => rest.trim_end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn scan_default(source: &str) -> Vec<ScanLine> {
        let ctx = ParseContext::new(None, &Options::default());
        scan(source, &ctx).unwrap()
    }

    #[test]
    fn test_split_indent() {
        let ctx = ParseContext::new(None, &Options::default());
        assert_eq!(split_indent("hello", 0, &ctx).unwrap(), (0, "hello"));
        assert_eq!(split_indent("  hello", 0, &ctx).unwrap(), (2, "hello"));
        assert_eq!(split_indent("    hello", 0, &ctx).unwrap(), (4, "hello"));
    }

    #[test]
    fn test_scan_simple() {
        let lines = scan_default("name: demo");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "name: demo");
        assert_eq!(lines[0].indent, 0);
        assert_eq!(lines[0].line_num, 0);
    }

    #[test]
    fn test_scan_drops_blank_and_comment_lines() {
        let lines = scan_default("# header\n\napp:\n    # indented comment\n  name: x\n   \n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "app:");
        assert_eq!(lines[1].text, "name: x");
        assert_eq!(lines[1].indent, 2);
        assert_eq!(lines[1].line_num, 4);
    }

    #[test]
    fn test_scan_trailing_comment() {
        let lines = scan_default("port: 8080   # http\nhost: a  \r\n");
        assert_eq!(lines[0].text, "port: 8080");
        assert_eq!(lines[1].text, "host: a");
    }

    #[test]
    fn test_scan_document_marker() {
        let lines = scan_default("---\nkey: v\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "key: v");
    }

    #[test]
    fn test_scan_skips_bom() {
        let lines = scan_default("\u{FEFF}config:\n  version: 2\n");
        assert_eq!(lines[0].text, "config:");
        assert_eq!(lines[0].indent, 0);
        assert_eq!(lines[1].text, "version: 2");
    }

    #[test]
    fn test_scan_bom_only_at_start() {
        let lines = scan_default("a: x\nb: \u{FEFF}y");
        assert_eq!(lines[1].text, "b: \u{FEFF}y");
    }

    #[test]
    fn test_tab_error() {
        let ctx = ParseContext::new(None, &Options::default());
        let err = scan("a:\n\tb: 1", &ctx).unwrap_err();
        assert!(matches!(err, ParseError::TabNotAllowed(_)));
        assert_eq!(err.to_string(), "Tab not allowed in indentation (use spaces) at 2:1");
    }

    #[test]
    fn test_tab_expansion() {
        let options = Options {
            tabs: TabPolicy::Expand(4),
            ..Options::default()
        };
        let ctx = ParseContext::new(None, &options);
        let lines = scan("a:\n\t b: 1", &ctx).unwrap();
        assert_eq!(lines[1].indent, 5);
        assert_eq!(lines[1].text, "b: 1");
    }

    #[test]
    fn test_tab_inside_value_is_kept() {
        let lines = scan_default("a: x\ty");
        assert_eq!(lines[0].text, "a: x\ty");
    }
}
