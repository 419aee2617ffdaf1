//! Phase 5: Structure Populator
//!
//! Binds document entries onto a [`Model`]. Each path is walked segment by
//! segment through the model's field tables; the value is coerced into the
//! leaf field the last segment names. Paths that lead nowhere are dropped and
//! reported, never treated as errors.

use crate::document::{Document, Entry, KeyPath};
use crate::error::{ParseError, Result};
use crate::model::{FieldKind, Model, Slot};
use crate::options::{CoercionPolicy, Options};
use crate::root::strips_wrapper;

/// A value that could not be coerced into the field it addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: KeyPath,
    pub expected: FieldKind,
    pub value: String,
}

/// Outcome of binding a document onto a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    /// Number of fields assigned.
    pub bound: usize,
    /// Entries whose path matched no field.
    pub dropped: Vec<KeyPath>,
    /// Values replaced by the field's zero value under lenient coercion.
    pub mismatches: Vec<Mismatch>,
    /// Whether a wrapper root key was stripped.
    pub stripped_root: bool,
}

impl BindReport {
    /// True when every entry was bound without a mismatch.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty() && self.mismatches.is_empty()
    }
}

/// Bind every entry of `doc` onto `model`, mutating it in place.
///
/// Fields not addressed by the document keep their current value.
pub fn populate(model: &mut dyn Model, doc: &Document, options: &Options) -> Result<BindReport> {
    let strip = strips_wrapper(doc, model, options.root_key);
    let mut binder = Binder {
        policy: options.coercion,
        report: BindReport {
            stripped_root: strip,
            ..BindReport::default()
        },
    };

    for entry in doc.entries() {
        let segments = entry.path.segments();
        let segments = if strip {
            segments.get(1..).unwrap_or_default()
        } else {
            segments
        };
        if segments.is_empty() {
            binder.drop_entry(entry);
            continue;
        }
        binder.bind(model, segments, entry)?;
    }

    tracing::debug!(
        bound = binder.report.bound,
        dropped = binder.report.dropped.len(),
        mismatches = binder.report.mismatches.len(),
        "populated {}",
        model.name()
    );
    Ok(binder.report)
}

struct Binder {
    policy: CoercionPolicy,
    report: BindReport,
}

impl Binder {
    fn bind(&mut self, model: &mut dyn Model, segments: &[String], entry: &Entry) -> Result<()> {
        let Some((segment, rest)) = segments.split_first() else {
            return Ok(());
        };
        let Some(field) = model.fields().iter().find(|f| f.matches(segment)) else {
            self.drop_entry(entry);
            return Ok(());
        };

        match (model.field_mut(field.ident), rest.is_empty()) {
            (Some(Slot::Nested(inner)), false) => self.bind(inner, rest, entry),
            (Some(Slot::Leaf(leaf)), true) => match leaf.coerce(&entry.value) {
                Ok(()) => {
                    self.report.bound += 1;
                    Ok(())
                }
                Err(err) => {
                    self.mismatch(entry, err.expected)?;
                    leaf.reset();
                    Ok(())
                }
            },
            // A value aimed at a whole nested model
            (Some(Slot::Nested(_)), true) => self.mismatch(entry, FieldKind::Nested),
            // Path continues below a leaf, or the table lied about the field
            _ => {
                self.drop_entry(entry);
                Ok(())
            }
        }
    }

    fn mismatch(&mut self, entry: &Entry, expected: FieldKind) -> Result<()> {
        let value = entry.value.describe();
        if self.policy == CoercionPolicy::Strict {
            return Err(ParseError::TypeMismatch {
                path: entry.path.dotted(),
                expected,
                value,
            });
        }
        tracing::warn!(path = %entry.path, %expected, value = %value, "value does not fit field");
        self.report.mismatches.push(Mismatch {
            path: entry.path.clone(),
            expected,
            value,
        });
        Ok(())
    }

    fn drop_entry(&mut self, entry: &Entry) {
        tracing::debug!(path = %entry.path, "no matching field");
        self.report.dropped.push(entry.path.clone());
    }
}
