//! Error types for yamlite parsing and binding.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::FieldKind;
use crate::options::Options;

/// Result type for yamlite operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Per-call parse state: the filename used in error messages and the options
/// in force. Created fresh for every parse and passed down the pipeline.
#[derive(Clone, Debug)]
pub struct ParseContext {
    pub filename: Option<String>,
    pub options: Options,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>, options: &Options) -> Self {
        Self {
            filename: filename.map(String::from),
            options: *options,
        }
    }

    /// Format a location suffix for error messages.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => format!(" at {}:{}", line + 1, col + 1),
        }
    }
}

/// Error type for yamlite parsing and binding.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tab character found in indentation.
    #[error("Tab not allowed in indentation (use spaces){0}")]
    TabNotAllowed(String),

    /// Line is neither a key, a sequence item, nor block content.
    #[error("Unrecognized line \"{0}\"{1}")]
    MalformedLine(String, String),

    /// Value cannot be coerced to the type of the field it addresses.
    #[error("Cannot bind {value:?} at {path} to {expected} field")]
    TypeMismatch {
        path: String,
        expected: FieldKind,
        value: String,
    },
}

impl ParseError {
    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        let suffix = ctx.loc_suffix(line, col);
        match self {
            ParseError::TabNotAllowed(_) => ParseError::TabNotAllowed(suffix),
            ParseError::MalformedLine(text, _) => ParseError::MalformedLine(text, suffix),
            other => other,
        }
    }
}
