use thiserror::Error;

/// Hard failures surfaced while preprocessing a document.
///
/// A line that merely fails to match any pattern is never an error; it passes
/// through as ordinary text. These variants cover the invariants a document
/// author controls and must fix before re-running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Two declarations produced the same variable name after sanitization
    /// and section prefixing.
    #[error("duplicate variable name found in form: {0}")]
    DuplicateVariableName(String),

    /// The line did not declare a recognizable field. Only surfaced by
    /// `Field::from_str`; the preprocessor treats this as plain text.
    #[error("could not match labeled field: {0:?}")]
    NoFieldMatched(String),

    /// A select field carried more than one `[c]`/`[o]` collapse tag.
    #[error("a select field can only collapse on a single item")]
    ConflictingCollapseDirective,
}
