//! Property-based tests for hierarchy resolution.
//!
//! These tests use proptest to generate arbitrary indentation trees and check
//! that parsing recovers exactly the paths the generator built.

use std::collections::BTreeMap;

use libyamlite::{encode, parse, EntryValue, Format};
use proptest::prelude::*;

/// A generated document and the entries it must parse to.
struct Tree {
    source: String,
    expected: BTreeMap<String, String>,
}

/// Build a well-formed tree from raw (depth, is_parent) draws.
///
/// Depths are clamped so every line is at most one level below an open
/// parent; keys and values are unique per line.
fn build_tree(draws: &[(usize, bool)], width: usize) -> Tree {
    let mut source = String::new();
    let mut expected = BTreeMap::new();
    let mut stack: Vec<String> = Vec::new();
    let mut max_depth = 0;

    for (i, &(raw_depth, is_parent)) in draws.iter().enumerate() {
        let depth = raw_depth.min(max_depth);
        let key = format!("k{}", i);
        stack.truncate(depth);
        source.push_str(&" ".repeat(depth * width));

        if is_parent {
            source.push_str(&format!("{}:\n", key));
            stack.push(key);
            max_depth = depth + 1;
        } else {
            let value = format!("v{}", i);
            source.push_str(&format!("{}: {}\n", key, value));
            let mut path = stack.clone();
            path.push(key);
            expected.insert(path.join("."), value);
            max_depth = depth;
        }
    }

    Tree { source, expected }
}

fn scalars(source: &str) -> BTreeMap<String, String> {
    parse(source)
        .unwrap()
        .entries()
        .filter_map(|e| match &e.value {
            EntryValue::Scalar(s) => Some((e.path.dotted(), s.clone())),
            _ => None,
        })
        .collect()
}

proptest! {
    /// Every leaf resolves to the path of its enclosing parents
    #[test]
    fn resolved_paths_match_tree(
        draws in prop::collection::vec((0usize..6, any::<bool>()), 1..60),
        width in 1usize..5
    ) {
        let tree = build_tree(&draws, width);
        prop_assert_eq!(scalars(&tree.source), tree.expected, "source:\n{}", tree.source);
    }

    /// Indentation width does not change the resolved paths
    #[test]
    fn indentation_width_is_irrelevant(
        draws in prop::collection::vec((0usize..6, any::<bool>()), 1..40),
        a in 1usize..5,
        b in 1usize..5
    ) {
        let left = build_tree(&draws, a);
        let right = build_tree(&draws, b);
        prop_assert_eq!(scalars(&left.source), scalars(&right.source));
    }

    /// Sequence items come back in order under their key
    #[test]
    fn sequence_items_keep_order(
        items in prop::collection::vec("[a-z0-9]{1,8}", 1..30),
        depth in 0usize..4
    ) {
        let mut source = String::new();
        for d in 0..depth {
            source.push_str(&format!("{}p{}:\n", "  ".repeat(d), d));
        }
        source.push_str(&format!("{}list:\n", "  ".repeat(depth)));
        for item in &items {
            source.push_str(&format!("{}- {}\n", "  ".repeat(depth + 1), item));
        }

        let mut path: Vec<String> = (0..depth).map(|d| format!("p{}", d)).collect();
        path.push("list".to_string());

        let doc = parse(&source).unwrap();
        prop_assert_eq!(doc.get(&path.join(".")), Some(&EntryValue::Sequence(items)));
    }

    /// Parsing twice yields the same document and rendering
    #[test]
    fn parsing_is_deterministic(
        draws in prop::collection::vec((0usize..6, any::<bool>()), 1..40)
    ) {
        let tree = build_tree(&draws, 2);
        let first = parse(&tree.source).unwrap();
        let second = parse(&tree.source).unwrap();
        prop_assert_eq!(encode(&first, Format::Paths), encode(&second, Format::Paths));
        prop_assert_eq!(first, second);
    }
}
