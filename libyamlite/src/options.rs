//! Parser and binder configuration.

/// How tab characters in indentation are treated.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabPolicy {
    /// Fail with [`crate::ParseError::TabNotAllowed`].
    Reject,
    /// Count every leading tab as this many spaces.
    Expand(usize),
}

/// What happens when a value does not fit the field it addresses, e.g. `port: abc`
/// bound to an integer field.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoercionPolicy {
    /// Assign the field's zero value and record the mismatch in the
    /// [`crate::BindReport`].
    Lenient,
    /// Abort binding with [`crate::ParseError::TypeMismatch`].
    Strict,
}

/// Whether the first path segment is a wrapper named after the target model.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootKeyPolicy {
    /// Strip when the model's name is one of the document's root keys and the
    /// model declares no field of that name.
    Auto,
    /// Always strip the first segment.
    Strip,
    /// Never strip.
    Keep,
}

/// Parser configuration options.
///
/// ```rust
/// use libyamlite::{parse_with_options, Options, TabPolicy};
///
/// let options = Options {
///     tabs: TabPolicy::Expand(2),
///     ..Options::default()
/// };
///
/// let doc = parse_with_options("server:\n\tport: 80\n", &options).unwrap();
/// assert_eq!(doc.get("server.port").and_then(|v| v.as_str()), Some("80"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Treatment of tabs in indentation. Default: reject.
    pub tabs: TabPolicy,
    /// Treatment of values that do not fit their field. Default: lenient.
    pub coercion: CoercionPolicy,
    /// Wrapper-root detection. Default: auto.
    pub root_key: RootKeyPolicy,
    /// If true, lines that are neither keys, sequence items nor block content
    /// fail the parse instead of producing a warning. Default: false.
    pub strict_grammar: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tabs: TabPolicy::Reject,
            coercion: CoercionPolicy::Lenient,
            root_key: RootKeyPolicy::Auto,
            strict_grammar: false,
        }
    }
}
