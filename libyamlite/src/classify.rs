//! Phase 2: Line Classifier
//!
//! Derives the syntactic role of every scan line:
//! - `key:` opens a nested scope
//! - `key: value` assigns a scalar
//! - `- value` is one item of a sequence
//! - `key: |` (or `|-`, `>`, ...) starts a block scalar whose deeper lines are
//!   continuation text

use crate::scanner::ScanLine;

/// Chomping behavior of a block scalar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockChomp {
    /// `|`, `>`, `|+`, `>+`: every line keeps its newline.
    Keep,
    /// `|-`, `>-`: the final newline is removed.
    Strip,
}

/// Syntactic role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `key:` with nothing after the colon.
    ParentKey,
    /// `key: value`.
    KeyValue,
    /// `- value`.
    SequenceItem,
    /// `key: |` and friends.
    BlockHeader(BlockChomp),
    /// Text belonging to the nearest preceding block header.
    BlockContinuation,
    /// Anything else.
    Unrecognized,
}

/// A scan line decomposed into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    /// Trimmed, lower-cased key for key-bearing lines.
    pub key: Option<String>,
    /// Scalar value, sequence payload, or raw continuation text.
    pub value: Option<String>,
    pub indent: usize,
    pub line_num: usize,
}

impl ClassifiedLine {
    /// Whether this line may be the ancestor of deeper lines: a key with no
    /// inline scalar.
    pub fn opens_scope(&self) -> bool {
        matches!(self.kind, LineKind::ParentKey | LineKind::BlockHeader(_))
    }

    /// Raw text of the line, for diagnostics.
    pub fn text(&self) -> String {
        match (&self.key, &self.value) {
            (Some(k), Some(v)) => format!("{}: {}", k, v),
            (Some(k), None) => format!("{}:", k),
            (None, Some(v)) => v.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Classify every line, tagging lines nested under a block header as
/// continuation text.
pub fn classify_all(lines: &[ScanLine]) -> Vec<ClassifiedLine> {
    let mut out = Vec::with_capacity(lines.len());
    let mut block_indent: Option<usize> = None;

    for sl in lines {
        if let Some(header) = block_indent {
            if sl.indent > header {
                out.push(ClassifiedLine {
                    kind: LineKind::BlockContinuation,
                    key: None,
                    value: Some(sl.text.clone()),
                    indent: sl.indent,
                    line_num: sl.line_num,
                });
                continue;
            }
            block_indent = None;
        }

        let line = classify(sl);
        if let LineKind::BlockHeader(_) = line.kind {
            block_indent = Some(line.indent);
        }
        out.push(line);
    }

    out
}

/// Classify a single line without regard to its neighbours.
pub fn classify(sl: &ScanLine) -> ClassifiedLine {
    let text = sl.text.trim();
    let mut line = ClassifiedLine {
        kind: LineKind::Unrecognized,
        key: None,
        value: None,
        indent: sl.indent,
        line_num: sl.line_num,
    };

    if let Some(payload) = text.strip_prefix('-') {
        let payload = payload.trim();
        if !payload.is_empty() {
            let item = unquote(payload);
            // Sequences of mappings are not part of the grammar
            if item.len() == payload.len() && is_mapping_entry(payload) {
                line.value = Some(text.to_string());
            } else {
                line.kind = LineKind::SequenceItem;
                line.value = Some(item.to_string());
            }
            return line;
        }
    }

    let Some((key_part, value_part)) = text.split_once(':') else {
        line.value = Some(text.to_string());
        return line;
    };

    let key = unquote(key_part.trim()).to_lowercase();
    let value = value_part.trim();
    if key.is_empty() {
        line.value = Some(text.to_string());
        return line;
    }

    line.key = Some(key);
    if value.is_empty() {
        line.kind = LineKind::ParentKey;
    } else if let Some(chomp) = block_indicator(value) {
        line.kind = LineKind::BlockHeader(chomp);
        line.value = Some(value.to_string());
    } else {
        line.kind = LineKind::KeyValue;
        line.value = Some(value.to_string());
    }
    line
}

/// Recognize a block scalar indicator.
fn block_indicator(value: &str) -> Option<BlockChomp> {
    match value {
        "|" | ">" | "|+" | ">+" => Some(BlockChomp::Keep),
        "|-" | ">-" => Some(BlockChomp::Strip),
        _ => None,
    }
}

/// Check whether text has the shape `key: value` or `key:`.
fn is_mapping_entry(s: &str) -> bool {
    s.ends_with(':') || s.contains(": ")
}

/// Remove one pair of matching surrounding quotes.
pub(crate) fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' || first == b'\'') && first == last {
            return &s[1..s.len() - 1];
        }
    }
    s
}
