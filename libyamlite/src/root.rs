//! Wrapper-root detection.
//!
//! A document may either start directly at a model's fields or wrap them in a
//! single top-level key named after the model:
//!
//! ```yaml
//! config:
//!   version: 1.0.0
//! ```
//!
//! binds to `Config { version }` the same way `version: 1.0.0` does.

use std::collections::BTreeSet;

use crate::document::Document;
use crate::model::Model;
use crate::options::RootKeyPolicy;

/// Distinct first segments of the document's paths.
pub fn root_keys(doc: &Document) -> BTreeSet<&str> {
    doc.root_keys()
}

/// Decide whether the first segment of every path is stripped before binding
/// `doc` onto `model`.
pub fn strips_wrapper(doc: &Document, model: &dyn Model, policy: RootKeyPolicy) -> bool {
    match policy {
        RootKeyPolicy::Strip => true,
        RootKeyPolicy::Keep => false,
        _ => {
            let name = model.name().to_lowercase();
            let is_root = root_keys(doc).contains(name.as_str());
            // A field of the same name is a real key, not a wrapper
            let is_field = model.fields().iter().any(|f| f.matches(&name));
            tracing::debug!(model = %name, is_root, is_field, "root key check");
            is_root && !is_field
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EntryValue, KeyPath};

    crate::model! {
        #[derive(Default)]
        struct Config {
            version: String,
        }
    }

    crate::model! {
        #[derive(Default)]
        struct Server {
            server: String,
        }
    }

    fn doc(paths: &[&str]) -> Document {
        let mut doc = Document::new();
        for p in paths {
            let path = KeyPath::new(p.split('.').map(String::from).collect());
            doc.insert(path, EntryValue::Scalar("x".into()));
        }
        doc
    }

    #[test]
    fn test_root_keys_are_distinct() {
        let d = doc(&["config.version", "config.app.name", "other"]);
        assert_eq!(root_keys(&d).into_iter().collect::<Vec<_>>(), vec!["config", "other"]);
    }

    #[test]
    fn test_strips_matching_root() {
        let d = doc(&["config.version", "config.app.name"]);
        assert!(strips_wrapper(&d, &Config::default(), RootKeyPolicy::Auto));
    }

    #[test]
    fn test_keeps_unwrapped_document() {
        let d = doc(&["version", "app.name"]);
        assert!(!strips_wrapper(&d, &Config::default(), RootKeyPolicy::Auto));
    }

    #[test]
    fn test_field_named_like_model_is_not_a_wrapper() {
        let d = doc(&["server"]);
        assert!(!strips_wrapper(&d, &Server::default(), RootKeyPolicy::Auto));
    }

    #[test]
    fn test_forced_policies() {
        let d = doc(&["version"]);
        assert!(strips_wrapper(&d, &Config::default(), RootKeyPolicy::Strip));
        let d = doc(&["config.version"]);
        assert!(!strips_wrapper(&d, &Config::default(), RootKeyPolicy::Keep));
    }
}
