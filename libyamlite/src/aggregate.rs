//! Phase 4: Aggregator
//!
//! Walks the classified lines once and turns every value-bearing line or run
//! of lines into a document entry:
//! - `key: value` becomes a scalar (or a sequence for inline `[a, b]` lists)
//! - consecutive `- item` lines become one sequence owned by the preceding key
//! - a block header and its continuation lines become one block text

use crate::classify::{unquote, BlockChomp, ClassifiedLine, LineKind};
use crate::document::{Document, EntryValue, KeyPath, Warning};
use crate::error::{ParseContext, ParseError, Result};
use crate::resolver::ancestors;

/// Aggregate classified lines into a document.
pub fn aggregate(lines: &[ClassifiedLine], ctx: &ParseContext) -> Result<Document> {
    let mut doc = Document::new();
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        match line.kind {
            LineKind::ParentKey | LineKind::BlockContinuation => {
                i += 1;
            }
            LineKind::KeyValue => {
                let path = key_path(lines, i);
                let raw = line.value.as_deref().unwrap_or_default();
                let value = match parse_flow_list(raw) {
                    Some(items) => EntryValue::Sequence(items),
                    None => EntryValue::Scalar(unquote(raw).to_string()),
                };
                insert(&mut doc, path, value);
                i += 1;
            }
            LineKind::SequenceItem => {
                let end = run_end(lines, i, LineKind::SequenceItem);
                let items: Vec<String> = lines[i..end]
                    .iter()
                    .filter_map(|l| l.value.clone())
                    .collect();
                match sequence_path(lines, i, end - 1) {
                    Some(path) => insert(&mut doc, path, EntryValue::Sequence(items)),
                    None => doc.warn(Warning::OrphanSequence {
                        line_num: line.line_num,
                    }),
                }
                i = end;
            }
            LineKind::BlockHeader(chomp) => {
                let end = run_end(lines, i + 1, LineKind::BlockContinuation);
                let text = join_block(&lines[i + 1..end], chomp);
                insert(&mut doc, key_path(lines, i), EntryValue::BlockText(text));
                i = end;
            }
            LineKind::Unrecognized => {
                let text = line.text();
                if ctx.options.strict_grammar {
                    return Err(ParseError::MalformedLine(text, String::new()).with_location(
                        ctx,
                        line.line_num,
                        line.indent,
                    ));
                }
                doc.warn(Warning::UnrecognizedLine {
                    line_num: line.line_num,
                    text,
                });
                i += 1;
            }
        }
    }

    tracing::debug!(entries = doc.len(), "aggregated");
    Ok(doc)
}

/// Full path of a key-bearing line: its ancestors plus its own key.
fn key_path(lines: &[ClassifiedLine], index: usize) -> KeyPath {
    let path = KeyPath::new(ancestors(lines, index));
    match &lines[index].key {
        Some(key) => path.child(key.clone()),
        None => path,
    }
}

/// Path owning the sequence run `lines[start..=last]`.
///
/// The owner is the scope-opening key right before the run when it sits at or
/// above the items' indentation, which also covers the YAML style where items
/// are not indented below their key. Otherwise fall back to the ancestry of
/// the last item.
fn sequence_path(lines: &[ClassifiedLine], start: usize, last: usize) -> Option<KeyPath> {
    let owner = start
        .checked_sub(1)
        .filter(|&o| lines[o].kind == LineKind::ParentKey && lines[o].indent <= lines[start].indent);

    let path = match owner {
        Some(o) => key_path(lines, o),
        None => KeyPath::new(ancestors(lines, last)),
    };
    (!path.is_empty()).then_some(path)
}

/// Index one past the run of `kind` lines starting at `start`.
fn run_end(lines: &[ClassifiedLine], start: usize, kind: LineKind) -> usize {
    lines[start..]
        .iter()
        .position(|l| l.kind != kind)
        .map_or(lines.len(), |n| start + n)
}

/// Join block continuation lines, stripping the block's own indentation.
fn join_block(lines: &[ClassifiedLine], chomp: BlockChomp) -> String {
    let Some(first) = lines.first() else {
        return String::new();
    };
    let base = first.indent;

    let mut text = String::new();
    for line in lines {
        text.push_str(&" ".repeat(line.indent.saturating_sub(base)));
        text.push_str(line.value.as_deref().unwrap_or_default());
        text.push('\n');
    }
    if chomp == BlockChomp::Strip {
        text.pop();
    }
    text
}

/// Parse an inline `[a, b, c]` list.
fn parse_flow_list(raw: &str) -> Option<Vec<String>> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }
    Some(
        inner
            .split(',')
            .map(|item| unquote(item.trim()).to_string())
            .collect(),
    )
}

fn insert(doc: &mut Document, path: KeyPath, value: EntryValue) {
    if let Some(old) = doc.insert(path, value) {
        tracing::debug!(path = %old.path, "overwritten by later entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_all;
    use crate::options::Options;
    use crate::scanner::scan;

    fn aggregate_str(source: &str) -> Document {
        let ctx = ParseContext::new(None, &Options::default());
        let lines = classify_all(&scan(source, &ctx).unwrap());
        aggregate(&lines, &ctx).unwrap()
    }

    fn scalar(s: &str) -> EntryValue {
        EntryValue::Scalar(s.to_string())
    }

    fn seq(items: &[&str]) -> EntryValue {
        EntryValue::Sequence(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_scalar_entries() {
        let doc = aggregate_str("app:\n  name: demo\n  port: 8080\nversion: 1.0.0");
        assert_eq!(doc.get("app.name"), Some(&scalar("demo")));
        assert_eq!(doc.get("app.port"), Some(&scalar("8080")));
        assert_eq!(doc.get("version"), Some(&scalar("1.0.0")));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_sequence_run() {
        let doc = aggregate_str("db:\n  host: h\n  campo:\n    - A\n    - B\n    - C\n  user: u");
        assert_eq!(doc.get("db.campo"), Some(&seq(&["A", "B", "C"])));
        assert_eq!(doc.get("db.host"), Some(&scalar("h")));
        assert_eq!(doc.get("db.user"), Some(&scalar("u")));
    }

    #[test]
    fn test_sequence_at_key_indentation() {
        let doc = aggregate_str("tags:\n- a\n- b\nname: x");
        assert_eq!(doc.get("tags"), Some(&seq(&["a", "b"])));
        assert_eq!(doc.get("name"), Some(&scalar("x")));
    }

    #[test]
    fn test_quoted_items_may_contain_colons() {
        let doc = aggregate_str("hosts:\n  - \"db: primary\"\n  - plain\n");
        assert_eq!(doc.get("hosts"), Some(&seq(&["db: primary", "plain"])));
        assert!(doc.warnings().is_empty());
    }

    #[test]
    fn test_orphan_sequence_warns() {
        let doc = aggregate_str("- a\n- b");
        assert!(doc.is_empty());
        assert_eq!(doc.warnings(), &[Warning::OrphanSequence { line_num: 0 }]);
    }

    #[test]
    fn test_inline_list() {
        let doc = aggregate_str("tags: [app, 'config', yaml]\nnone: []");
        assert_eq!(doc.get("tags"), Some(&seq(&["app", "config", "yaml"])));
        assert_eq!(doc.get("none"), Some(&seq(&[])));
    }

    #[test]
    fn test_quoted_scalars() {
        let doc = aggregate_str("name: \"Sample App\"\nodd: \"unbalanced'\nlist: '[a, b]'");
        assert_eq!(doc.get("name"), Some(&scalar("Sample App")));
        assert_eq!(doc.get("odd"), Some(&scalar("\"unbalanced'")));
        assert_eq!(doc.get("list"), Some(&scalar("[a, b]")));
    }

    #[test]
    fn test_block_text() {
        let doc = aggregate_str("a:\n  text: |\n    one\n    two\n      three\n  b: 2");
        assert_eq!(
            doc.get("a.text"),
            Some(&EntryValue::BlockText("one\ntwo\n  three\n".into()))
        );
        assert_eq!(doc.get("a.b"), Some(&scalar("2")));
    }

    #[test]
    fn test_block_text_strip_chomp() {
        let doc = aggregate_str("text: |-\n  one\n  two");
        assert_eq!(doc.get("text"), Some(&EntryValue::BlockText("one\ntwo".into())));
    }

    #[test]
    fn test_empty_block() {
        let doc = aggregate_str("text: >\nnext: 1");
        assert_eq!(doc.get("text"), Some(&EntryValue::BlockText(String::new())));
        assert_eq!(doc.get("next"), Some(&scalar("1")));
    }

    #[test]
    fn test_unrecognized_line_warns() {
        let doc = aggregate_str("a: 1\nstray words\nb: 2");
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc.warnings(),
            &[Warning::UnrecognizedLine {
                line_num: 1,
                text: "stray words".into()
            }]
        );
    }

    #[test]
    fn test_unrecognized_line_strict() {
        let options = Options {
            strict_grammar: true,
            ..Options::default()
        };
        let ctx = ParseContext::new(Some("bad.yaml"), &options);
        let lines = classify_all(&scan("a: 1\n  stray words", &ctx).unwrap());
        let err = aggregate(&lines, &ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unrecognized line \"stray words\" at 2:3 of <bad.yaml>"
        );
    }

    #[test]
    fn test_last_write_wins() {
        let doc = aggregate_str("a:\n  b: 1\na:\n  b: 2");
        assert_eq!(doc.get("a.b"), Some(&scalar("2")));
    }
}
