//! yamlite: an indentation-driven reader for a small YAML subset.
//!
//! yamlite reads configuration-style documents (nested keys, scalars, lists of
//! scalars and block text) into a flat [`Document`] of dotted paths, and binds
//! that document onto typed structures declared with [`model!`].
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: Converts source text into line records, removing comments
//!    and measuring indentation.
//!
//! 2. **Classifier**: Tags each line as a parent key, key/value pair, sequence
//!    item, block header or block content.
//!
//! 3. **Resolver**: Derives each line's ancestor keys from indentation alone.
//!
//! 4. **Aggregator**: Collects values, sequence runs and block text into
//!    document entries.
//!
//! Binding adds two more steps: wrapper-root detection and the populator,
//! which coerces each entry into the field its path addresses.

mod aggregate;
mod classify;
mod coerce;
mod document;
mod encode;
mod error;
mod model;
mod options;
mod populate;
mod resolver;
mod root;
mod scanner;
mod value;

use std::path::Path;

pub use coerce::{Coerce, CoerceError};
pub use document::{Document, Entry, EntryValue, KeyPath, Warning};
pub use encode::{encode, Format};
pub use error::{ParseError, Result};
pub use model::{Bindable, FieldDescriptor, FieldKind, Model, Slot};
pub use options::{CoercionPolicy, Options, RootKeyPolicy, TabPolicy};
pub use populate::{populate, BindReport, Mismatch};
pub use value::Value;

/// Parse a document from a string.
///
/// # Example
///
/// ```
/// use libyamlite::parse;
///
/// let doc = parse("app:\n  name: demo").unwrap();
/// assert_eq!(doc.get("app.name").and_then(|v| v.as_str()), Some("demo"));
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parse_with_filename(input, None, &Options::default())
}

/// Parse a document from a string with explicit options.
pub fn parse_with_options(input: &str, options: &Options) -> Result<Document> {
    parse_with_filename(input, None, options)
}

/// Parse a document from a string with a filename for error messages.
pub fn parse_with_filename(
    input: &str,
    filename: Option<&str>,
    options: &Options,
) -> Result<Document> {
    let ctx = error::ParseContext::new(filename, options);

    // Phase 1: Scan source into lines
    let lines = scanner::scan(input, &ctx)?;

    // Phase 2: Tag line shapes
    let lines = classify::classify_all(&lines);

    // Phases 3 and 4: Resolve ancestry and collect entries
    aggregate::aggregate(&lines, &ctx)
}

/// Read and parse a file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    parse_file_with_options(path, &Options::default())
}

/// Read and parse a file with explicit options.
pub fn parse_file_with_options(path: impl AsRef<Path>, options: &Options) -> Result<Document> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path.display().to_string();
    parse_with_filename(&input, Some(&filename), options)
}

/// Parse a string and bind it onto `model`.
pub fn from_str<M: Model + ?Sized>(model: &mut M, input: &str) -> Result<BindReport> {
    from_str_with_options(model, input, &Options::default())
}

/// Parse a string and bind it onto `model` with explicit options.
pub fn from_str_with_options<M: Model + ?Sized>(
    model: &mut M,
    input: &str,
    options: &Options,
) -> Result<BindReport> {
    let doc = parse_with_options(input, options)?;
    bind(model, &doc, options)
}

/// Read a file and bind it onto `model`.
pub fn from_file<M: Model + ?Sized>(model: &mut M, path: impl AsRef<Path>) -> Result<BindReport> {
    from_file_with_options(model, path, &Options::default())
}

/// Read a file and bind it onto `model` with explicit options.
pub fn from_file_with_options<M: Model + ?Sized>(
    model: &mut M,
    path: impl AsRef<Path>,
    options: &Options,
) -> Result<BindReport> {
    let doc = parse_file_with_options(path, options)?;
    bind(model, &doc, options)
}

fn bind<M: Model + ?Sized>(model: &mut M, doc: &Document, options: &Options) -> Result<BindReport> {
    let mut model = Erased(model);
    populate(&mut model, doc, options)
}

/// Adapter handing a possibly unsized model to the populator as `dyn Model`.
struct Erased<'a, M: ?Sized>(&'a mut M);

impl<M: Model + ?Sized> Model for Erased<'_, M> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        self.0.fields()
    }

    fn field_mut(&mut self, ident: &str) -> Option<Slot<'_>> {
        self.0.field_mut(ident)
    }
}
