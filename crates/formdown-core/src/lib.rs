pub mod error;
pub mod fields;
pub mod preprocessor;
pub mod sanitize;
pub mod types;

pub use error::FormError;
pub use fields::match_specific;
pub use preprocessor::{FormPreprocessor, StructureTracker, COLLAPSE_CLOSE_HTML};
pub use sanitize::{default_formatter, default_sanitizer};
pub use types::{Field, FormDefinition, SelectChoice, SpecificField};

/// Preprocess a whole document with the default sanitizer and formatter.
///
/// Returns the rewritten document and the extracted form definition.
pub fn parse(text: &str) -> Result<(String, FormDefinition), FormError> {
    parse_with(text, default_sanitizer, default_formatter)
}

/// Preprocess a whole document with caller-supplied sanitizer and formatter.
pub fn parse_with<S, F>(
    text: &str,
    sanitizer: S,
    formatter: F,
) -> Result<(String, FormDefinition), FormError>
where
    S: Fn(&str) -> String,
    F: Fn(&str, &Field) -> String,
{
    // Strip trailing \r for CRLF input.
    let lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    let (definition, rewritten) = FormPreprocessor::new(sanitizer, formatter).run(lines)?;
    Ok((rewritten.join("\n"), definition))
}
