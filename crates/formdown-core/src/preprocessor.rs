use regex::Regex;
use std::sync::LazyLock;

use crate::error::FormError;
use crate::sanitize::{default_formatter, default_sanitizer};
use crate::types::{Field, FormDefinition};

// --- Structural directive patterns ---

static RE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[section[ \t]*(?::(?P<name>.*))?\]").unwrap());
static RE_COLLAPSE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[collapse[ \t]*(?::(?P<name>.*))?\]").unwrap());
static RE_COLLAPSE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[endcollapse\]").unwrap());

/// Markup emitted in place of a `[endcollapse]` marker.
pub const COLLAPSE_CLOSE_HTML: &str = "</div>";

/// Markup emitted in place of a `[collapse]`/`[collapse:name]` marker.
pub fn collapse_open_html(id: &str) -> String {
    format!("<div id=\"accordion-{id}\">")
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// --- Structure tracking ---

/// Tracks the active section and assigns stable identifiers to collapsible
/// regions. Fresh per preprocessing run; never shared across runs.
#[derive(Debug, Default)]
pub struct StructureTracker {
    current_section: Option<String>,
    anonymous_collapse_counter: u32,
}

impl StructureTracker {
    /// Enter a section. An absent or empty name clears the active prefix.
    /// Sections do not nest; only one is active at a time.
    pub fn enter_section(&mut self, name: Option<&str>) {
        let name = name.map(normalize_name).unwrap_or_default();
        self.current_section = if name.is_empty() { None } else { Some(name) };
    }

    /// Resolve the identifier for a collapse-open marker: the sanitized name
    /// when given, otherwise the anonymous counter's value (post-increment).
    /// Either way the identifier is section-prefixed when a section is active.
    pub fn resolve_collapse_id(&mut self, sanitized_name: Option<String>) -> String {
        let id = match sanitized_name {
            Some(name) => name,
            None => {
                let n = self.anonymous_collapse_counter.to_string();
                self.anonymous_collapse_counter += 1;
                n
            }
        };
        self.qualify(&id)
    }

    /// Prefix a name with the active section, if any.
    pub fn qualify(&self, name: &str) -> String {
        match &self.current_section {
            Some(section) => format!("{section}_{name}"),
            None => name.to_string(),
        }
    }
}

// --- Line preprocessor ---

/// Single-pass line preprocessor: consumes a document's lines in order,
/// extracts field declarations into a [`FormDefinition`], and rewrites each
/// recognized line through the caller-supplied placeholder formatter.
pub struct FormPreprocessor<S, F>
where
    S: Fn(&str) -> String,
    F: Fn(&str, &Field) -> String,
{
    sanitizer: S,
    formatter: F,
}

impl FormPreprocessor<fn(&str) -> String, fn(&str, &Field) -> String> {
    /// A preprocessor using [`default_sanitizer`] and [`default_formatter`].
    pub fn with_defaults() -> Self {
        FormPreprocessor {
            sanitizer: default_sanitizer,
            formatter: default_formatter,
        }
    }
}

impl<S, F> FormPreprocessor<S, F>
where
    S: Fn(&str) -> String,
    F: Fn(&str, &Field) -> String,
{
    pub fn new(sanitizer: S, formatter: F) -> Self {
        FormPreprocessor {
            sanitizer,
            formatter,
        }
    }

    /// Process a document, line by line, in a single pass with no lookahead.
    ///
    /// Section markers are consumed. Collapse markers are replaced by
    /// open/close region markup. Recognized declarations are replaced by the
    /// formatter's placeholder and recorded in the definition under their
    /// sanitized, section-prefixed variable name. Everything else passes
    /// through unchanged.
    ///
    /// All per-run state is allocated here; two runs share nothing.
    pub fn run<I, L>(&self, lines: I) -> Result<(FormDefinition, Vec<String>), FormError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut tracker = StructureTracker::default();
        let mut definition = FormDefinition::new();
        let mut out: Vec<String> = Vec::new();

        for line in lines {
            let line = line.as_ref();

            if let Some(caps) = RE_SECTION.captures(line) {
                tracker.enter_section(caps.name("name").map(|m| m.as_str()));
                continue;
            }

            if let Some(caps) = RE_COLLAPSE_OPEN.captures(line) {
                let name = caps
                    .name("name")
                    .map(|m| normalize_name(m.as_str()))
                    .unwrap_or_default();
                let sanitized = if name.is_empty() {
                    None
                } else {
                    Some((self.sanitizer)(&name))
                };
                let id = tracker.resolve_collapse_id(sanitized);
                out.push(collapse_open_html(&id));
                continue;
            }

            if RE_COLLAPSE_CLOSE.is_match(line) {
                out.push(COLLAPSE_CLOSE_HTML.to_string());
                continue;
            }

            let Some((original_label, required, specific)) = Field::matches(line)? else {
                out.push(line.to_string());
                continue;
            };
            let field = Field {
                original_label,
                required,
                specific,
            };

            let variable_name = tracker.qualify(&(self.sanitizer)(&field.label().to_lowercase()));

            if definition.contains_key(&variable_name) {
                return Err(FormError::DuplicateVariableName(variable_name));
            }

            out.push((self.formatter)(&variable_name, &field));
            definition.insert(variable_name, field);
        }

        Ok((definition, out))
    }
}
